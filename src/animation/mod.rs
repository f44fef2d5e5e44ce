//! Scroll-driven reveal engine: tweens advanced by frame ticks, triggers
//! fired by scroll position, and sessions that own both for the lifetime
//! of a mounted section.

pub mod counter;
pub mod dom;
pub mod easing;
pub mod hook;
pub mod property;
pub mod session;
pub mod trigger;
pub mod tween;

pub use easing::Ease;
pub use hook::use_animation_session;
pub use property::Property;
pub use tween::Tween;
