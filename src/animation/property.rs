use std::rc::Rc;

/// Visual properties the runner knows how to interpolate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    Scale,
    /// Width as a percentage of the parent.
    WidthPercent,
    StrokeDashoffset,
}

impl Property {
    /// The value an element shows when no animation has touched it.
    pub fn neutral(self) -> f64 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::WidthPercent => 100.0,
            Property::X | Property::Y | Property::StrokeDashoffset => 0.0,
        }
    }
}

/// Something a tween can write to. The browser binding implements this for
/// `HtmlElement`; tests use an in-memory recorder.
pub trait AnimationTarget {
    /// Last value written for `property`, if any.
    fn current(&self, property: Property) -> Option<f64>;

    fn set(&self, property: Property, value: f64);

    /// Text content, used by counter tracks.
    fn set_text(&self, text: &str);

    /// Drops every inline value written by animations so the element falls
    /// back to its stylesheet state.
    fn clear(&self);

    /// False once the target has left the page. Sessions forget detached
    /// targets instead of holding them until revert.
    fn is_attached(&self) -> bool {
        true
    }
}

pub type SharedTarget = Rc<dyn AnimationTarget>;

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    /// Records every write so tests can assert on mutation counts.
    #[derive(Default)]
    pub struct RecordingTarget {
        pub values: RefCell<BTreeMap<Property, f64>>,
        pub text: RefCell<Option<String>>,
        pub writes: RefCell<usize>,
        pub clears: RefCell<usize>,
        pub detached: Cell<bool>,
    }

    impl RecordingTarget {
        pub fn shared() -> Rc<RecordingTarget> {
            Rc::new(RecordingTarget::default())
        }

        pub fn value(&self, property: Property) -> Option<f64> {
            self.values.borrow().get(&property).copied()
        }

        pub fn writes(&self) -> usize {
            *self.writes.borrow()
        }
    }

    impl AnimationTarget for RecordingTarget {
        fn current(&self, property: Property) -> Option<f64> {
            self.value(property)
        }

        fn set(&self, property: Property, value: f64) {
            self.values.borrow_mut().insert(property, value);
            *self.writes.borrow_mut() += 1;
        }

        fn set_text(&self, text: &str) {
            *self.text.borrow_mut() = Some(text.to_string());
            *self.writes.borrow_mut() += 1;
        }

        fn clear(&self) {
            self.values.borrow_mut().clear();
            *self.clears.borrow_mut() += 1;
        }

        fn is_attached(&self) -> bool {
            !self.detached.get()
        }
    }
}
