use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::counter::CounterLiteral;
use super::easing::Ease;
use super::property::{Property, SharedTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// Restart from the beginning every cycle.
    Infinite,
    /// Infinite with yoyo: forward, backward, forward...
    Bounce,
}

#[derive(Clone, Copy, Debug)]
struct Track {
    property: Property,
    from: Option<f64>,
    to: Option<f64>,
}

#[derive(Clone, Debug)]
struct CounterTrack {
    literal: CounterLiteral,
    start: f64,
}

/// A transition record: what to animate on which target and how. Build it
/// up front, hand it to a [`TransitionRunner`], keep the handle.
pub struct Tween {
    target: SharedTarget,
    tracks: Vec<Track>,
    counter: Option<CounterTrack>,
    duration_ms: f64,
    delay_ms: f64,
    ease: Ease,
    repeat: Repeat,
    reversed: bool,
    paused: bool,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Tween {
    pub fn new(target: SharedTarget) -> Self {
        Self {
            target,
            tracks: Vec::new(),
            counter: None,
            duration_ms: 500.0,
            delay_ms: 0.0,
            ease: Ease::default(),
            repeat: Repeat::Once,
            reversed: false,
            paused: false,
            on_complete: None,
        }
    }

    /// Animate from `value` to the property's resting value.
    pub fn from(mut self, property: Property, value: f64) -> Self {
        self.tracks.push(Track { property, from: Some(value), to: None });
        self
    }

    /// Animate from whatever the target currently shows to `value`.
    pub fn to(mut self, property: Property, value: f64) -> Self {
        self.tracks.push(Track { property, from: None, to: Some(value) });
        self
    }

    pub fn from_to(mut self, property: Property, from: f64, to: f64) -> Self {
        self.tracks.push(Track { property, from: Some(from), to: Some(to) });
        self
    }

    /// Count the target's text up from `start` to the literal.
    pub fn count(mut self, literal: CounterLiteral, start: f64) -> Self {
        self.counter = Some(CounterTrack { literal, start });
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration_ms = (seconds * 1000.0).max(0.0);
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay_ms = (seconds * 1000.0).max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Shorthand for an endless forward/backward oscillation.
    pub fn yoyo(self) -> Self {
        self.repeat(Repeat::Bounce)
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Paused tweens only move through [`TransitionHandle::seek`].
    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn target(&self) -> &SharedTarget {
        &self.target
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn repeat_policy(&self) -> Repeat {
        self.repeat
    }

    /// Writes the start-of-timeline values without scheduling anything.
    /// Used to hide reveal targets before their trigger fires.
    pub fn render_start(&self) {
        let resolved = self.resolve();
        let p = if self.reversed { 1.0 } else { 0.0 };
        render(&self.target, &resolved, self.counter.as_ref(), p);
    }

    fn resolve(&self) -> Vec<(Property, f64, f64)> {
        self.tracks
            .iter()
            .map(|t| {
                let from = t
                    .from
                    .or_else(|| self.target.current(t.property))
                    .unwrap_or_else(|| t.property.neutral());
                let to = t.to.unwrap_or_else(|| t.property.neutral());
                (t.property, from, to)
            })
            .collect()
    }
}

/// Offsets each tween's delay by `each` seconds in list order.
pub fn stagger(tweens: Vec<Tween>, each: f64) -> Vec<Tween> {
    tweens
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let base = t.delay_ms / 1000.0;
            t.delay(base + each * i as f64)
        })
        .collect()
}

fn render(
    target: &SharedTarget,
    tracks: &[(Property, f64, f64)],
    counter: Option<&CounterTrack>,
    eased: f64,
) {
    for &(property, from, to) in tracks {
        target.set(property, from + (to - from) * eased);
    }
    if let Some(c) = counter {
        target.set_text(&c.literal.frame(c.start, eased));
    }
}

struct Running {
    id: u64,
    target: SharedTarget,
    tracks: Vec<(Property, f64, f64)>,
    counter: Option<CounterTrack>,
    duration_ms: f64,
    delay_left: f64,
    ease: Ease,
    repeat: Repeat,
    elapsed: f64,
    backward: bool,
    paused: bool,
    last_tick: Option<f64>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Running {
    fn linear_progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return if self.backward { 0.0 } else { 1.0 };
        }
        match self.repeat {
            Repeat::Once => (self.elapsed / self.duration_ms).clamp(0.0, 1.0),
            Repeat::Infinite => (self.elapsed.rem_euclid(self.duration_ms)) / self.duration_ms,
            Repeat::Bounce => {
                let cycle = (self.elapsed / self.duration_ms).floor() as i64;
                let local = self.elapsed.rem_euclid(self.duration_ms) / self.duration_ms;
                if cycle.rem_euclid(2) == 1 {
                    1.0 - local
                } else {
                    local
                }
            }
        }
    }

    fn finished(&self) -> bool {
        if self.repeat != Repeat::Once || self.paused {
            return false;
        }
        if self.backward {
            self.elapsed <= 0.0
        } else {
            self.elapsed >= self.duration_ms
        }
    }

    fn draw(&self) {
        let p = self.linear_progress();
        render(&self.target, &self.tracks, self.counter.as_ref(), self.ease.apply(p));
    }

    /// Advances the clock; returns true once the tween has run its course.
    fn advance(&mut self, now: f64) -> bool {
        let mut dt = match self.last_tick {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_tick = Some(now);
        if self.paused {
            return false;
        }
        if self.delay_left > 0.0 {
            self.delay_left -= dt;
            if self.delay_left > 0.0 {
                return false;
            }
            dt = -self.delay_left;
            self.delay_left = 0.0;
        }
        self.elapsed += if self.backward { -dt } else { dt };
        if self.repeat == Repeat::Once {
            self.elapsed = self.elapsed.clamp(0.0, self.duration_ms);
        }
        self.draw();
        self.finished()
    }
}

#[derive(Default)]
struct RunnerInner {
    next_id: u64,
    running: Vec<Running>,
}

impl RunnerInner {
    fn find(&mut self, id: u64) -> Option<&mut Running> {
        self.running.iter_mut().find(|r| r.id == id)
    }
}

/// Drives tweens forward on every frame tick.
#[derive(Clone, Default)]
pub struct TransitionRunner {
    inner: Rc<RefCell<RunnerInner>>,
}

impl TransitionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self, mut tween: Tween) -> TransitionHandle {
        let tracks = tween.resolve();
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let running = Running {
            id,
            target: tween.target.clone(),
            tracks,
            counter: tween.counter.take(),
            duration_ms: tween.duration_ms,
            delay_left: tween.delay_ms,
            ease: tween.ease,
            repeat: tween.repeat,
            elapsed: if tween.reversed { tween.duration_ms } else { 0.0 },
            backward: tween.reversed,
            paused: tween.paused,
            last_tick: None,
            on_complete: tween.on_complete.take(),
        };
        // Render the first frame right away so delayed reveals don't flash.
        running.draw();
        inner.running.push(running);
        TransitionHandle { id, runner: Rc::downgrade(&self.inner) }
    }

    /// Advances every live tween to `now` (milliseconds, monotonic).
    /// Returns whether anything is still running.
    pub fn tick(&self, now: f64) -> bool {
        let mut completed = Vec::new();
        let alive = {
            let mut inner = self.inner.borrow_mut();
            let mut i = 0;
            while i < inner.running.len() {
                if inner.running[i].advance(now) {
                    let mut done = inner.running.remove(i);
                    if let Some(cb) = done.on_complete.take() {
                        completed.push(cb);
                    }
                } else {
                    i += 1;
                }
            }
            !inner.running.is_empty()
        };
        for cb in completed {
            cb();
        }
        alive
    }

    /// Stops every tween. With `reset`, touched targets are cleared back to
    /// their stylesheet state.
    pub fn cancel_all(&self, reset: bool) {
        let drained: Vec<Running> = self.inner.borrow_mut().running.drain(..).collect();
        if reset {
            for r in &drained {
                r.target.clear();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a running tween. Every operation is a no-op once the tween
/// has completed or its runner is gone.
#[derive(Clone)]
pub struct TransitionHandle {
    id: u64,
    runner: Weak<RefCell<RunnerInner>>,
}

impl TransitionHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.runner
            .upgrade()
            .map(|inner| inner.borrow().running.iter().any(|r| r.id == self.id))
            .unwrap_or(false)
    }

    /// Stops the tween where it is. The completion callback never runs.
    pub fn cancel(&self) {
        if let Some(inner) = self.runner.upgrade() {
            inner.borrow_mut().running.retain(|r| r.id != self.id);
        }
    }

    /// Plays back toward the start from the current position.
    pub fn reverse(&self) {
        self.set_direction(true);
    }

    /// Plays forward toward the end from the current position.
    pub fn play(&self) {
        self.set_direction(false);
    }

    fn set_direction(&self, backward: bool) {
        if let Some(inner) = self.runner.upgrade() {
            if let Some(r) = inner.borrow_mut().find(self.id) {
                r.backward = backward;
                r.paused = false;
            }
        }
    }

    /// Jumps to `progress` in `[0, 1]` and renders it. Used by scrubbed
    /// tweens whose position follows the scroll bar.
    pub fn seek(&self, progress: f64) {
        if let Some(inner) = self.runner.upgrade() {
            if let Some(r) = inner.borrow_mut().find(self.id) {
                r.elapsed = progress.clamp(0.0, 1.0) * r.duration_ms;
                r.draw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::property::testing::RecordingTarget;
    use crate::animation::property::AnimationTarget;
    use std::cell::Cell;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn from_tween_lands_on_resting_value() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        runner.run(
            Tween::new(el.clone())
                .from(Property::Opacity, 0.0)
                .from(Property::Y, 50.0)
                .duration(1.0)
                .ease(Ease::POWER3_OUT),
        );
        // First frame is rendered immediately.
        assert!(approx(el.value(Property::Opacity), 0.0));
        assert!(approx(el.value(Property::Y), 50.0));

        runner.tick(0.0);
        runner.tick(500.0);
        let mid = el.value(Property::Y).unwrap();
        assert!(mid > 0.0 && mid < 50.0);

        assert!(!runner.tick(1000.0));
        assert!(approx(el.value(Property::Opacity), 1.0));
        assert!(approx(el.value(Property::Y), 0.0));
    }

    #[test]
    fn to_tween_starts_from_current_value() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        el.set(Property::Opacity, 0.3);
        runner.run(Tween::new(el.clone()).to(Property::Opacity, 0.1).duration(0.5).ease(Ease::Linear));
        runner.tick(0.0);
        runner.tick(250.0);
        assert!(approx(el.value(Property::Opacity), 0.2));
    }

    #[test]
    fn delay_holds_the_first_frame() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        runner.run(Tween::new(el.clone()).from(Property::Opacity, 0.0).duration(1.0).delay(0.5).ease(Ease::Linear));
        runner.tick(0.0);
        runner.tick(400.0);
        assert!(approx(el.value(Property::Opacity), 0.0));
        runner.tick(1000.0);
        assert!(approx(el.value(Property::Opacity), 0.5));
    }

    #[test]
    fn completion_callback_runs_once() {
        let runner = TransitionRunner::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = runner.run(
            Tween::new(RecordingTarget::shared())
                .from(Property::Scale, 0.9)
                .duration(0.2)
                .on_complete(move || h.set(h.get() + 1)),
        );
        runner.tick(0.0);
        runner.tick(300.0);
        runner.tick(600.0);
        assert_eq!(hits.get(), 1);
        assert!(!handle.is_active());
    }

    #[test]
    fn bounce_oscillates_without_finishing() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        runner.run(Tween::new(el.clone()).to(Property::Y, -100.0).duration(1.0).ease(Ease::Linear).yoyo());
        runner.tick(0.0);
        runner.tick(1000.0);
        assert!(approx(el.value(Property::Y), -100.0));
        runner.tick(1500.0);
        assert!(approx(el.value(Property::Y), -50.0));
        assert!(runner.tick(2000.0));
        assert!(approx(el.value(Property::Y), 0.0));
        assert_eq!(runner.len(), 1);
    }

    #[test]
    fn cancelled_tween_stops_writing() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        let handle = runner.run(Tween::new(el.clone()).from(Property::X, 20.0).duration(1.0));
        runner.tick(0.0);
        runner.tick(100.0);
        handle.cancel();
        handle.cancel();
        let writes = el.writes();
        runner.tick(200.0);
        assert_eq!(el.writes(), writes);
    }

    #[test]
    fn reverse_plays_back_from_current_position() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        let handle = runner.run(Tween::new(el.clone()).from(Property::Opacity, 0.0).duration(1.0).ease(Ease::Linear));
        runner.tick(0.0);
        runner.tick(600.0);
        handle.reverse();
        runner.tick(800.0);
        assert!(approx(el.value(Property::Opacity), 0.4));
        assert!(!runner.tick(1500.0));
        assert!(approx(el.value(Property::Opacity), 0.0));
    }

    #[test]
    fn paused_tween_follows_seek() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        let handle = runner.run(
            Tween::new(el.clone()).to(Property::Y, 100.0).duration(1.0).ease(Ease::Linear).paused(),
        );
        runner.tick(0.0);
        runner.tick(5000.0);
        assert!(approx(el.value(Property::Y), 0.0));
        handle.seek(0.25);
        assert!(approx(el.value(Property::Y), 25.0));
        assert!(handle.is_active());
    }

    #[test]
    fn counter_track_ends_on_literal() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        let literal = CounterLiteral::parse("99.9%").unwrap();
        runner.run(Tween::new(el.clone()).count(literal, 0.0).duration(2.0).ease(Ease::POWER2_OUT));
        assert_eq!(el.text.borrow().as_deref(), Some("0.0%"));
        runner.tick(0.0);
        runner.tick(1999.0);
        assert_ne!(el.text.borrow().as_deref(), Some("99.9%"));
        runner.tick(2000.0);
        assert_eq!(el.text.borrow().as_deref(), Some("99.9%"));
    }

    #[test]
    fn stagger_offsets_delays() {
        let tweens: Vec<Tween> = (0..3)
            .map(|_| Tween::new(RecordingTarget::shared()).delay(0.8))
            .collect();
        let delays: Vec<f64> = stagger(tweens, 0.2).iter().map(|t| t.delay_ms()).collect();
        assert_eq!(delays.len(), 3);
        assert!((delays[0] - 800.0).abs() < 1e-9);
        assert!((delays[1] - 1000.0).abs() < 1e-9);
        assert!((delays[2] - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn cancel_all_with_reset_clears_targets() {
        let runner = TransitionRunner::new();
        let el = RecordingTarget::shared();
        runner.run(Tween::new(el.clone()).from(Property::Opacity, 0.0).duration(1.0));
        runner.cancel_all(true);
        assert!(runner.is_empty());
        assert_eq!(*el.clears.borrow(), 1);
        assert!(el.value(Property::Opacity).is_none());
    }
}
