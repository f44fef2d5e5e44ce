use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;

use super::property::SharedTarget;
use super::trigger::{
    Crossing, SharedGeometry, Threshold, TriggerHandle, TriggerOptions, TriggerRegistry, Viewport,
};
use super::tween::{TransitionHandle, TransitionRunner, Tween};

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("scope {0:?} is still animated by an active session")]
    ScopeBusy(String),
}

/// Which scopes currently have a live session. A scope is a DOM subtree
/// identified by a stable key (usually the section id).
#[derive(Clone, Default)]
pub struct ScopeClaims {
    claimed: Rc<RefCell<HashSet<String>>>,
}

impl ScopeClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, scope: &str) -> bool {
        self.claimed.borrow().contains(scope)
    }

    fn claim(&self, scope: &str) -> bool {
        self.claimed.borrow_mut().insert(scope.to_string())
    }

    fn release(&self, scope: &str) {
        self.claimed.borrow_mut().remove(scope);
    }
}

thread_local! {
    static PAGE_CLAIMS: ScopeClaims = ScopeClaims::new();
}

/// Claims shared by every section mounted on the page.
pub fn page_claims() -> ScopeClaims {
    PAGE_CLAIMS.with(|c| c.clone())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Reverted,
}

struct Timer {
    delay_ms: f64,
    armed_at: Option<f64>,
    callback: Box<dyn FnOnce()>,
}

/// Owns every tween, trigger and timer a view creates while it is mounted
/// and tears them all down together. A session goes `Active -> Reverted`
/// exactly once; build a new one to animate the scope again.
pub struct AnimationSession {
    scope: String,
    claims: ScopeClaims,
    state: Cell<SessionState>,
    runner: TransitionRunner,
    triggers: TriggerRegistry,
    timers: RefCell<Vec<Timer>>,
    touched: RefCell<Vec<SharedTarget>>,
}

impl AnimationSession {
    /// Fails while another active session holds `scope`.
    pub fn create(scope: impl Into<String>, claims: &ScopeClaims) -> Result<Rc<Self>, SessionError> {
        let scope = scope.into();
        if !claims.claim(&scope) {
            return Err(SessionError::ScopeBusy(scope));
        }
        debug!("animation session for {:?} active", scope);
        Ok(Rc::new(Self {
            scope,
            claims: claims.clone(),
            state: Cell::new(SessionState::Active),
            runner: TransitionRunner::new(),
            triggers: TriggerRegistry::new(),
            timers: RefCell::new(Vec::new()),
            touched: RefCell::new(Vec::new()),
        }))
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == SessionState::Active
    }

    pub fn running_transitions(&self) -> usize {
        self.runner.len()
    }

    pub fn armed_triggers(&self) -> usize {
        self.triggers.len()
    }

    fn refuse(&self, what: &str) -> bool {
        if self.is_active() {
            return false;
        }
        warn!("{} on reverted session {:?} ignored", what, self.scope);
        true
    }

    /// Targets revert will restore.
    pub fn touched_targets(&self) -> usize {
        self.touched.borrow().len()
    }

    fn touch(&self, target: &SharedTarget) {
        let mut touched = self.touched.borrow_mut();
        touched.retain(|t| t.is_attached());
        let ptr = Rc::as_ptr(target) as *const ();
        if !touched.iter().any(|t| Rc::as_ptr(t) as *const () == ptr) {
            touched.push(target.clone());
        }
    }

    pub fn tween(&self, tween: Tween) -> Option<TransitionHandle> {
        if self.refuse("tween") {
            return None;
        }
        self.touch(tween.target());
        Some(self.runner.run(tween))
    }

    pub fn trigger(
        &self,
        target: Option<SharedGeometry>,
        threshold: Threshold,
        options: TriggerOptions,
        on_crossing: impl FnMut(Crossing) + 'static,
    ) -> TriggerHandle {
        if self.refuse("trigger") {
            return TriggerHandle::inert();
        }
        self.triggers.register(target, threshold, options, on_crossing)
    }

    /// Hides the element in its start state now and plays `make()` when it
    /// scrolls past `threshold`. Repeatable reveals play backward again when
    /// the element scrolls back below the line.
    pub fn reveal(
        self: &Rc<Self>,
        geometry: Option<SharedGeometry>,
        threshold: Threshold,
        options: TriggerOptions,
        make: impl Fn() -> Tween + 'static,
    ) -> TriggerHandle {
        if self.refuse("reveal") {
            return TriggerHandle::inert();
        }
        if geometry.is_some() {
            let first = make();
            self.touch(first.target());
            first.render_start();
        }

        let session = Rc::downgrade(self);
        let current: RefCell<Option<TransitionHandle>> = RefCell::new(None);
        self.triggers.register(geometry, threshold, options, move |crossing| {
            let Some(session) = session.upgrade() else {
                return;
            };
            let mut current = current.borrow_mut();
            let live = current.as_ref().filter(|h| h.is_active()).cloned();
            match (crossing, live) {
                (Crossing::Enter, Some(h)) => h.play(),
                (Crossing::Leave, Some(h)) => h.reverse(),
                (Crossing::Enter, None) => *current = session.tween(make()),
                (Crossing::Leave, None) => *current = session.tween(make().reversed()),
            }
        })
    }

    /// Ties `tween`'s position to the scroll distance between two lines.
    pub fn parallax(
        self: &Rc<Self>,
        geometry: Option<SharedGeometry>,
        start: Threshold,
        end: Threshold,
        tween: Tween,
    ) -> TriggerHandle {
        if self.refuse("parallax") {
            return TriggerHandle::inert();
        }
        if geometry.is_none() {
            warn!("parallax target in {:?} missing; skipped", self.scope);
            return TriggerHandle::inert();
        }
        let Some(handle) = self.tween(tween.paused()) else {
            return TriggerHandle::inert();
        };
        self.triggers.scrub(geometry, start, end, move |p| handle.seek(p))
    }

    /// Runs `f` once `seconds` of frame time have passed, unless the
    /// session is reverted first.
    pub fn after(&self, seconds: f64, f: impl FnOnce() + 'static) {
        if self.refuse("timer") {
            return;
        }
        self.timers.borrow_mut().push(Timer {
            delay_ms: seconds * 1000.0,
            armed_at: None,
            callback: Box::new(f),
        });
    }

    /// Advances tweens and timers. Returns whether any work remains.
    pub fn tick(&self, now: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        let running = self.runner.tick(now);

        let due = {
            let mut timers = self.timers.borrow_mut();
            for t in timers.iter_mut() {
                t.armed_at.get_or_insert(now);
            }
            let (due, pending): (Vec<Timer>, Vec<Timer>) = timers
                .drain(..)
                .partition(|t| now - t.armed_at.unwrap_or(now) >= t.delay_ms);
            *timers = pending;
            due
        };
        for timer in due {
            if !self.is_active() {
                break;
            }
            (timer.callback)();
        }

        running || !self.timers.borrow().is_empty()
    }

    /// Re-measures trigger targets after a scroll or resize.
    pub fn evaluate(&self, viewport: Viewport) {
        if self.is_active() {
            self.triggers.evaluate(viewport);
        }
    }

    /// Cancels everything the session owns and puts touched elements back
    /// to their stylesheet state. Calling it again does nothing.
    pub fn revert(&self) {
        if self.state.replace(SessionState::Reverted) == SessionState::Reverted {
            return;
        }
        self.triggers.clear();
        self.runner.cancel_all(false);
        self.timers.borrow_mut().clear();
        for target in self.touched.borrow_mut().drain(..) {
            target.clear();
        }
        self.claims.release(&self.scope);
        debug!("animation session for {:?} reverted", self.scope);
    }
}

impl Drop for AnimationSession {
    fn drop(&mut self) {
        self.revert();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::Ease;
    use crate::animation::property::testing::RecordingTarget;
    use crate::animation::property::Property;
    use crate::animation::trigger::testing::FakeBox;
    use crate::animation::trigger::Edge;

    const VIEW: Viewport = Viewport { height: 1000.0 };
    const LINE: Threshold = Threshold::new(Edge::Top, 0.8);

    fn fade_up(el: &Rc<RecordingTarget>) -> impl Fn() -> Tween + 'static {
        let el = el.clone();
        move || {
            Tween::new(el.clone())
                .from(Property::Opacity, 0.0)
                .from(Property::Y, 50.0)
                .duration(1.0)
                .ease(Ease::POWER3_OUT)
        }
    }

    #[test]
    fn overlapping_sessions_are_refused() {
        let claims = ScopeClaims::new();
        let first = AnimationSession::create("hero", &claims).unwrap();
        assert!(matches!(
            AnimationSession::create("hero", &claims),
            Err(SessionError::ScopeBusy(_))
        ));
        assert!(AnimationSession::create("services", &claims).is_ok());
        first.revert();
        assert!(AnimationSession::create("hero", &claims).is_ok());
    }

    #[test]
    fn dropping_a_session_releases_its_scope() {
        let claims = ScopeClaims::new();
        drop(AnimationSession::create("about", &claims).unwrap());
        assert!(!claims.is_claimed("about"));
    }

    #[test]
    fn mount_scroll_unmount_stops_all_mutation() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("services", &claims).unwrap();
        let el = RecordingTarget::shared();
        let card = FakeBox::at(1400.0);
        session.reveal(Some(card.clone()), LINE, TriggerOptions::once("card"), fade_up(&el));

        // Start state is applied on mount, nothing runs yet.
        assert_eq!(el.value(Property::Opacity), Some(0.0));
        session.evaluate(VIEW);
        assert_eq!(session.running_transitions(), 0);

        card.scroll_by(700.0);
        session.evaluate(VIEW);
        assert_eq!(session.running_transitions(), 1);
        session.evaluate(VIEW);
        assert_eq!(session.running_transitions(), 1);

        session.tick(0.0);
        session.tick(300.0);
        session.revert();
        let writes = el.writes();
        assert!(el.value(Property::Opacity).is_none());

        session.tick(600.0);
        session.tick(5000.0);
        card.scroll_by(-900.0);
        session.evaluate(VIEW);
        card.scroll_by(900.0);
        session.evaluate(VIEW);
        assert_eq!(el.writes(), writes);
        assert_eq!(session.running_transitions(), 0);
        assert_eq!(session.armed_triggers(), 0);
    }

    #[test]
    fn repeated_tweens_on_one_target_are_tracked_once() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("chatbot", &claims).unwrap();
        let el = RecordingTarget::shared();
        for i in 0..50 {
            session.tween(Tween::new(el.clone()).from(Property::Scale, 0.9).duration(0.3));
            session.tick(i as f64 * 1000.0);
            session.tick(i as f64 * 1000.0 + 500.0);
        }
        assert_eq!(session.running_transitions(), 0);
        assert_eq!(session.touched_targets(), 1);
    }

    #[test]
    fn detached_targets_are_released_before_revert() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("contact", &claims).unwrap();
        let mut last = None;
        for i in 0..1000 {
            if let Some(prev) = last.take() {
                let prev: Rc<RecordingTarget> = prev;
                // The form re-rendered; the old node is gone.
                prev.detached.set(true);
            }
            let el = RecordingTarget::shared();
            session.tween(Tween::new(el.clone()).from(Property::Opacity, 0.5).duration(0.4));
            session.tick(i as f64 * 1000.0);
            session.tick(i as f64 * 1000.0 + 500.0);
            last = Some(el);
        }
        assert_eq!(session.running_transitions(), 0);
        assert_eq!(session.touched_targets(), 1);

        // The one still on the page is restored on revert.
        let live = last.unwrap();
        session.revert();
        assert_eq!(*live.clears.borrow(), 1);
    }

    #[test]
    fn revert_is_idempotent() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("x", &claims).unwrap();
        let el = RecordingTarget::shared();
        session.tween(Tween::new(el.clone()).from(Property::Scale, 0.5));
        session.revert();
        session.revert();
        assert_eq!(session.state(), SessionState::Reverted);
        assert_eq!(*el.clears.borrow(), 1);
    }

    #[test]
    fn reverted_session_refuses_new_work() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("x", &claims).unwrap();
        session.revert();
        let el = RecordingTarget::shared();
        assert!(session.tween(Tween::new(el.clone()).from(Property::X, 10.0)).is_none());
        let h = session.trigger(Some(FakeBox::at(0.0)), LINE, TriggerOptions::default(), |_| {});
        assert!(!h.is_armed());
        assert_eq!(el.writes(), 0);
    }

    #[test]
    fn repeatable_reveal_reverses_on_leave() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("headers", &claims).unwrap();
        let el = RecordingTarget::shared();
        let header = FakeBox::at(900.0);
        session.reveal(Some(header.clone()), LINE, TriggerOptions::repeatable("header"), fade_up(&el));

        header.scroll_by(200.0);
        session.evaluate(VIEW);
        session.tick(0.0);
        session.tick(1000.0);
        assert_eq!(el.value(Property::Opacity), Some(1.0));
        assert_eq!(session.running_transitions(), 0);

        header.scroll_by(-200.0);
        session.evaluate(VIEW);
        session.tick(1000.0);
        session.tick(2000.0);
        assert_eq!(el.value(Property::Opacity), Some(0.0));
    }

    #[test]
    fn missing_reveal_target_is_skipped() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("contact", &claims).unwrap();
        let el = RecordingTarget::shared();
        let h = session.reveal(None, LINE, TriggerOptions::once(".contact-badge"), fade_up(&el));
        session.evaluate(VIEW);
        assert!(!h.is_armed());
        assert_eq!(el.writes(), 0);
    }

    #[test]
    fn timers_fire_once_and_die_with_the_session() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("t", &claims).unwrap();
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        session.after(1.0, move || f.set(f.get() + 1));
        let g = fired.clone();
        session.after(3.0, move || g.set(g.get() + 10));

        assert!(session.tick(100.0));
        session.tick(1100.0);
        assert_eq!(fired.get(), 1);
        session.revert();
        session.tick(9000.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn parallax_follows_scroll() {
        let claims = ScopeClaims::new();
        let session = AnimationSession::create("hero", &claims).unwrap();
        let content = RecordingTarget::shared();
        let hero = Rc::new(FakeBox {
            top: Cell::new(0.0),
            height: 1000.0,
            attached: Cell::new(true),
        });
        session.parallax(
            Some(hero.clone()),
            "top top".parse().unwrap(),
            "bottom top".parse().unwrap(),
            Tween::new(content.clone()).to(Property::Y, 100.0).duration(1.0).ease(Ease::Linear),
        );
        hero.scroll_by(500.0);
        session.evaluate(VIEW);
        let y = content.value(Property::Y).unwrap();
        assert!((y - 50.0).abs() < 1e-9);
    }
}
