use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use super::dom::{FrameLoop, Scope};
use super::session::{page_claims, AnimationSession};

/// The mounted session, for event handlers that animate after setup.
/// Empty before mount and after unmount.
pub type SessionSlot = Rc<RefCell<Option<Rc<AnimationSession>>>>;

/// Binds an [`AnimationSession`] to a component's mounted lifetime.
///
/// On mount the session is created for `scope_key`, `setup` registers the
/// section's tweens and triggers inside the subtree behind `root`, and a
/// frame loop starts driving it. On unmount the loop and its listeners are
/// dropped and the session is reverted, so a remount starts clean instead
/// of stacking a second set of triggers on the same elements.
#[hook]
pub fn use_animation_session<F>(scope_key: &'static str, root: NodeRef, setup: F) -> SessionSlot
where
    F: FnOnce(&Rc<AnimationSession>, &Scope) + 'static,
{
    let slot: SessionSlot = use_mut_ref(|| None);
    {
        let slot = slot.clone();
        use_effect_with_deps(
            move |_| {
                let mut frames = None;
                match root.cast::<Element>() {
                    Some(el) => match AnimationSession::create(scope_key, &page_claims()) {
                        Ok(session) => {
                            setup(&session, &Scope::new(el));
                            frames = FrameLoop::start(&session);
                            *slot.borrow_mut() = Some(session);
                        }
                        Err(e) => gloo_console::warn!(e.to_string()),
                    },
                    None => gloo_console::warn!(format!("{} has no mounted root; not animated", scope_key)),
                }
                move || {
                    drop(frames);
                    if let Some(session) = slot.borrow_mut().take() {
                        session.revert();
                    }
                }
            },
            (),
        );
    }
    slot
}

/// Runs `f` against the mounted session, if there is one.
pub fn with_session(slot: &SessionSlot, f: impl FnOnce(&Rc<AnimationSession>)) {
    if let Some(session) = slot.borrow().as_ref() {
        f(session);
    }
}
