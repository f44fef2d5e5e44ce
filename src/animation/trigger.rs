use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use log::warn;
use thiserror::Error;

/// Which edge of the element is compared against the viewport line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// A viewport-relative line, written the way section code reads:
/// `"top 80%"` fires once the element's top edge rises above 80% of the
/// viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub edge: Edge,
    /// Position of the line as a fraction of viewport height.
    pub line: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    #[error("expected `<edge> <position>`, got {0:?}")]
    Shape(String),
    #[error("unknown element edge {0:?}")]
    Edge(String),
    #[error("invalid viewport position {0:?}")]
    Position(String),
}

impl Threshold {
    pub const fn new(edge: Edge, line: f64) -> Self {
        Self { edge, line }
    }
}

impl FromStr for Threshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (edge, pos) = match (parts.next(), parts.next(), parts.next()) {
            (Some(e), Some(p), None) => (e, p),
            _ => return Err(ThresholdError::Shape(s.to_string())),
        };
        let edge = match edge {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            other => return Err(ThresholdError::Edge(other.to_string())),
        };
        let line = match pos {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => pct
                .strip_suffix('%')
                .and_then(|n| n.parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .map(|n| n / 100.0)
                .ok_or_else(|| ThresholdError::Position(pct.to_string()))?,
        };
        Ok(Self { edge, line })
    }
}

/// Element box relative to the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Center => self.top + self.height / 2.0,
            Edge::Bottom => self.top + self.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub height: f64,
}

/// Anything whose on-screen position can be measured.
pub trait Geometry {
    /// `None` when the element is detached or has no layout.
    fn bounds(&self) -> Option<Bounds>;
}

pub type SharedGeometry = Rc<dyn Geometry>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// The edge moved above the line (scrolling down).
    Enter,
    /// The edge moved back below the line (scrolling up).
    Leave,
}

#[derive(Clone, Debug)]
pub struct TriggerOptions {
    pub once: bool,
    pub label: String,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self { once: true, label: String::new() }
    }
}

impl TriggerOptions {
    pub fn once(label: impl Into<String>) -> Self {
        Self { once: true, label: label.into() }
    }

    pub fn repeatable(label: impl Into<String>) -> Self {
        Self { once: false, label: label.into() }
    }
}

type CrossingFn = Rc<RefCell<dyn FnMut(Crossing)>>;
type ProgressFn = Rc<RefCell<dyn FnMut(f64)>>;

enum Kind {
    Crossing {
        threshold: Threshold,
        once: bool,
        active: bool,
        callback: CrossingFn,
    },
    Scrub {
        start: Threshold,
        end: Threshold,
        last: Option<f64>,
        callback: ProgressFn,
    },
}

struct Entry {
    id: u64,
    geometry: SharedGeometry,
    kind: Kind,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    entries: Vec<Entry>,
}

enum Fire {
    Crossing(CrossingFn, Crossing),
    Progress(ProgressFn, f64),
}

/// Watches registered elements against viewport lines and fires callbacks
/// as the page scrolls. Call [`TriggerRegistry::evaluate`] on every scroll
/// and resize.
#[derive(Clone, Default)]
pub struct TriggerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        target: Option<SharedGeometry>,
        threshold: Threshold,
        options: TriggerOptions,
        on_crossing: impl FnMut(Crossing) + 'static,
    ) -> TriggerHandle {
        let Some(geometry) = target else {
            warn!("scroll trigger target {:?} missing; skipped", options.label);
            return TriggerHandle::inert();
        };
        self.insert(
            geometry,
            Kind::Crossing {
                threshold,
                once: options.once,
                active: false,
                callback: Rc::new(RefCell::new(on_crossing)),
            },
        )
    }

    /// Reports progress in `[0, 1]` as the element travels from `start` to
    /// `end`. Fires only when the value changes.
    pub fn scrub(
        &self,
        target: Option<SharedGeometry>,
        start: Threshold,
        end: Threshold,
        on_progress: impl FnMut(f64) + 'static,
    ) -> TriggerHandle {
        let Some(geometry) = target else {
            warn!("scrub target missing; skipped");
            return TriggerHandle::inert();
        };
        self.insert(
            geometry,
            Kind::Scrub { start, end, last: None, callback: Rc::new(RefCell::new(on_progress)) },
        )
    }

    fn insert(&self, geometry: SharedGeometry, kind: Kind) -> TriggerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.push(Entry { id, geometry, kind });
        TriggerHandle { id, registry: Rc::downgrade(&self.inner) }
    }

    /// Measures every trigger and fires the crossings since the previous
    /// call. Enters fire in the order the scroll passed them (highest
    /// element first), leaves in the reverse order, then scrub updates.
    pub fn evaluate(&self, viewport: Viewport) {
        let mut enters: Vec<(f64, CrossingFn)> = Vec::new();
        let mut leaves: Vec<(f64, CrossingFn)> = Vec::new();
        let mut progress: Vec<Fire> = Vec::new();
        {
            let mut inner = self.inner.borrow_mut();
            let mut spent = Vec::new();
            for entry in inner.entries.iter_mut() {
                let Some(bounds) = entry.geometry.bounds() else {
                    continue;
                };
                match &mut entry.kind {
                    Kind::Crossing { threshold, once, active, callback } => {
                        let pos = bounds.edge(threshold.edge);
                        let now_active = pos <= threshold.line * viewport.height;
                        if now_active && !*active {
                            enters.push((pos, callback.clone()));
                            if *once {
                                spent.push(entry.id);
                            }
                        } else if !now_active && *active {
                            leaves.push((pos, callback.clone()));
                        }
                        *active = now_active;
                    }
                    Kind::Scrub { start, end, last, callback } => {
                        let p = scrub_progress(bounds, *start, *end, viewport);
                        if *last != Some(p) {
                            *last = Some(p);
                            progress.push(Fire::Progress(callback.clone(), p));
                        }
                    }
                }
            }
            inner.entries.retain(|e| !spent.contains(&e.id));
        }

        enters.sort_by(|a, b| a.0.total_cmp(&b.0));
        leaves.sort_by(|a, b| b.0.total_cmp(&a.0));
        let fires = enters
            .into_iter()
            .map(|(_, cb)| Fire::Crossing(cb, Crossing::Enter))
            .chain(leaves.into_iter().map(|(_, cb)| Fire::Crossing(cb, Crossing::Leave)))
            .chain(progress);

        for fire in fires {
            match fire {
                Fire::Crossing(cb, crossing) => {
                    if let Ok(mut f) = cb.try_borrow_mut() {
                        f(crossing);
                    }
                }
                Fire::Progress(cb, p) => {
                    if let Ok(mut f) = cb.try_borrow_mut() {
                        f(p);
                    }
                }
            }
        }
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerRegistry").field("len", &self.len()).finish()
    }
}

fn scrub_progress(bounds: Bounds, start: Threshold, end: Threshold, viewport: Viewport) -> f64 {
    // Both distances shrink by the same amount as the page scrolls down.
    let to_start = bounds.edge(start.edge) - start.line * viewport.height;
    let to_end = bounds.edge(end.edge) - end.line * viewport.height;
    let span = to_end - to_start;
    if span <= 0.0 {
        return if to_end <= 0.0 { 1.0 } else { 0.0 };
    }
    (-to_start / span).clamp(0.0, 1.0)
}

/// Handle to a registered trigger. Cancelling twice, or after a once
/// trigger already fired, does nothing.
#[derive(Clone, Debug)]
pub struct TriggerHandle {
    id: u64,
    registry: Weak<RefCell<RegistryInner>>,
}

impl TriggerHandle {
    /// A handle bound to nothing; what missing targets get.
    pub fn inert() -> Self {
        Self { id: 0, registry: Weak::new() }
    }

    pub fn is_armed(&self) -> bool {
        self.registry
            .upgrade()
            .map(|r| r.borrow().entries.iter().any(|e| e.id == self.id))
            .unwrap_or(false)
    }

    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::Cell;

    /// An element whose top edge tests move by hand.
    pub struct FakeBox {
        pub top: Cell<f64>,
        pub height: f64,
        pub attached: Cell<bool>,
    }

    impl FakeBox {
        pub fn at(top: f64) -> Rc<FakeBox> {
            Rc::new(FakeBox { top: Cell::new(top), height: 100.0, attached: Cell::new(true) })
        }

        pub fn scroll_by(&self, dy: f64) {
            self.top.set(self.top.get() - dy);
        }
    }

    impl Geometry for FakeBox {
        fn bounds(&self) -> Option<Bounds> {
            self.attached
                .get()
                .then(|| Bounds { top: self.top.get(), height: self.height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeBox;
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    const VIEW: Viewport = Viewport { height: 1000.0 };

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(Crossing) + 'static) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        (hits, move |_: Crossing| h.set(h.get() + 1))
    }

    #[test]
    fn parses_thresholds() {
        assert_eq!("top 80%".parse(), Ok(Threshold::new(Edge::Top, 0.8)));
        assert_eq!("bottom top".parse(), Ok(Threshold::new(Edge::Bottom, 0.0)));
        assert_eq!("center center".parse(), Ok(Threshold::new(Edge::Center, 0.5)));
        assert!(matches!("top".parse::<Threshold>(), Err(ThresholdError::Shape(_))));
        assert!(matches!("left 80%".parse::<Threshold>(), Err(ThresholdError::Edge(_))));
        assert!(matches!("top eighty".parse::<Threshold>(), Err(ThresholdError::Position(_))));
    }

    #[test]
    fn once_trigger_fires_on_first_crossing_only() {
        let registry = TriggerRegistry::new();
        let el = FakeBox::at(1200.0);
        let (hits, cb) = counter();
        let handle = registry.register(Some(el.clone()), "top 80%".parse().unwrap(), TriggerOptions::default(), cb);

        registry.evaluate(VIEW);
        assert_eq!(hits.get(), 0);
        el.scroll_by(500.0);
        registry.evaluate(VIEW);
        assert_eq!(hits.get(), 1);
        assert!(!handle.is_armed());

        el.scroll_by(-600.0);
        registry.evaluate(VIEW);
        el.scroll_by(600.0);
        registry.evaluate(VIEW);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn repeatable_trigger_fires_both_directions() {
        let registry = TriggerRegistry::new();
        let el = FakeBox::at(900.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        registry.register(
            Some(el.clone()),
            "top 85%".parse().unwrap(),
            TriggerOptions::repeatable("card"),
            move |c| s.borrow_mut().push(c),
        );
        for dy in [100.0, 10.0, -200.0, 300.0] {
            el.scroll_by(dy);
            registry.evaluate(VIEW);
        }
        assert_eq!(*seen.borrow(), vec![Crossing::Enter, Crossing::Leave, Crossing::Enter]);
    }

    #[test]
    fn missing_target_yields_inert_handle() {
        let registry = TriggerRegistry::new();
        let (hits, cb) = counter();
        let handle = registry.register(None, Threshold::new(Edge::Top, 0.8), TriggerOptions::once("ghost"), cb);
        registry.evaluate(VIEW);
        assert!(registry.is_empty());
        assert!(!handle.is_armed());
        handle.cancel();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancelled_trigger_never_fires() {
        let registry = TriggerRegistry::new();
        let el = FakeBox::at(2000.0);
        let (hits, cb) = counter();
        let handle = registry.register(Some(el.clone()), Threshold::new(Edge::Top, 0.8), TriggerOptions::default(), cb);
        handle.cancel();
        handle.cancel();
        el.scroll_by(2000.0);
        registry.evaluate(VIEW);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn detached_elements_are_skipped() {
        let registry = TriggerRegistry::new();
        let el = FakeBox::at(0.0);
        el.attached.set(false);
        let (hits, cb) = counter();
        registry.register(Some(el.clone()), Threshold::new(Edge::Top, 0.8), TriggerOptions::default(), cb);
        registry.evaluate(VIEW);
        assert_eq!(hits.get(), 0);
        el.attached.set(true);
        registry.evaluate(VIEW);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn jump_scroll_fires_in_crossing_order() {
        let registry = TriggerRegistry::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let boxes: Vec<_> = [1500.0, 1100.0, 1300.0].iter().map(|t| FakeBox::at(*t)).collect();
        for (i, b) in boxes.iter().enumerate() {
            let o = order.clone();
            registry.register(
                Some(b.clone()),
                Threshold::new(Edge::Top, 0.8),
                TriggerOptions::default(),
                move |_| o.borrow_mut().push(i),
            );
        }
        for b in &boxes {
            b.scroll_by(1000.0);
        }
        registry.evaluate(VIEW);
        assert_eq!(*order.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn scrub_reports_progress_between_lines() {
        let registry = TriggerRegistry::new();
        let hero = Rc::new(FakeBox { top: Cell::new(0.0), height: 1000.0, attached: Cell::new(true) });
        let last = Rc::new(Cell::new(-1.0));
        let l = last.clone();
        registry.scrub(
            Some(hero.clone()),
            "top top".parse().unwrap(),
            "bottom top".parse().unwrap(),
            move |p| l.set(p),
        );
        registry.evaluate(VIEW);
        assert_eq!(last.get(), 0.0);
        hero.scroll_by(250.0);
        registry.evaluate(VIEW);
        assert!((last.get() - 0.25).abs() < 1e-9);
        hero.scroll_by(5000.0);
        registry.evaluate(VIEW);
        assert_eq!(last.get(), 1.0);
    }

    proptest! {
        #[test]
        fn once_trigger_never_fires_twice(moves in proptest::collection::vec(-800.0f64..800.0, 1..60)) {
            let registry = TriggerRegistry::new();
            let el = FakeBox::at(900.0);
            let (hits, cb) = counter();
            registry.register(Some(el.clone()), Threshold::new(Edge::Top, 0.8), TriggerOptions::default(), cb);
            let mut ever_crossed = false;
            for dy in moves {
                el.scroll_by(dy);
                registry.evaluate(VIEW);
                ever_crossed |= el.top.get() <= 800.0;
            }
            prop_assert_eq!(hits.get(), u32::from(ever_crossed));
        }
    }
}
