use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

use super::counter::CounterLiteral;
use super::easing::Ease;
use super::property::{AnimationTarget, Property, SharedTarget};
use super::session::AnimationSession;
use super::trigger::{Bounds, Geometry, SharedGeometry, Threshold, TriggerOptions, Viewport};
use super::tween::{stagger, Tween};

/// Writes tween output into an element's inline style.
pub struct ElementTarget {
    el: HtmlElement,
    values: RefCell<BTreeMap<Property, f64>>,
    original_text: RefCell<Option<String>>,
}

impl ElementTarget {
    pub fn new(el: HtmlElement) -> Rc<Self> {
        Rc::new(Self {
            el,
            values: RefCell::new(BTreeMap::new()),
            original_text: RefCell::new(None),
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.el
    }

    fn transform(&self) -> String {
        let values = self.values.borrow();
        let get = |p: Property| values.get(&p).copied().unwrap_or_else(|| p.neutral());
        format!(
            "translate3d({}px, {}px, 0) scale({})",
            get(Property::X),
            get(Property::Y),
            get(Property::Scale)
        )
    }
}

impl AnimationTarget for ElementTarget {
    fn current(&self, property: Property) -> Option<f64> {
        self.values.borrow().get(&property).copied()
    }

    fn set(&self, property: Property, value: f64) {
        self.values.borrow_mut().insert(property, value);
        let style = self.el.style();
        let _ = match property {
            Property::Opacity => style.set_property("opacity", &value.to_string()),
            Property::X | Property::Y | Property::Scale => style.set_property("transform", &self.transform()),
            Property::WidthPercent => style.set_property("width", &format!("{}%", value)),
            Property::StrokeDashoffset => style.set_property("stroke-dashoffset", &value.to_string()),
        };
    }

    fn set_text(&self, text: &str) {
        let mut original = self.original_text.borrow_mut();
        if original.is_none() {
            *original = self.el.text_content();
        }
        self.el.set_text_content(Some(text));
    }

    fn clear(&self) {
        self.values.borrow_mut().clear();
        let style = self.el.style();
        for prop in ["opacity", "transform", "width", "stroke-dashoffset"] {
            let _ = style.remove_property(prop);
        }
        if let Some(text) = self.original_text.borrow_mut().take() {
            self.el.set_text_content(Some(&text));
        }
    }

    fn is_attached(&self) -> bool {
        self.el.is_connected()
    }
}

/// Keeps one target per element across renders, so repeated tweens on the
/// same node share it. A different node replaces the stored target.
pub fn reuse_target(slot: &RefCell<Option<Rc<ElementTarget>>>, el: HtmlElement) -> Rc<ElementTarget> {
    let mut slot = slot.borrow_mut();
    match slot.as_ref() {
        Some(target) if *target.element() == el => target.clone(),
        _ => {
            let target = ElementTarget::new(el);
            *slot = Some(target.clone());
            target
        }
    }
}

/// Measures an element with `getBoundingClientRect`.
pub struct ElementGeometry(pub Element);

impl Geometry for ElementGeometry {
    fn bounds(&self) -> Option<Bounds> {
        if !self.0.is_connected() {
            return None;
        }
        let rect = self.0.get_bounding_client_rect();
        Some(Bounds { top: rect.top(), height: rect.height() })
    }
}

pub fn viewport() -> Option<Viewport> {
    let height = web_sys::window()?.inner_height().ok()?.as_f64()?;
    Some(Viewport { height })
}

fn parse_threshold(text: &str) -> Option<Threshold> {
    match text.parse::<Threshold>() {
        Ok(t) => Some(t),
        Err(e) => {
            warn!("bad scroll threshold: {}", e);
            None
        }
    }
}

/// The subtree a section animates. Lookups never leave it, so two sections
/// using the same class names stay independent.
#[derive(Clone)]
pub struct Scope {
    root: Element,
}

impl Scope {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn select(&self, selector: &str) -> Option<HtmlElement> {
        if self.root.matches(selector).unwrap_or(false) {
            return self.root.clone().dyn_into::<HtmlElement>().ok();
        }
        self.root
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    pub fn select_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = self.root.query_selector_all(selector) else {
            warn!("invalid selector {:?}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn select_all_or_warn(&self, selector: &str) -> Vec<HtmlElement> {
        let found = self.select_all(selector);
        if found.is_empty() {
            warn!("no elements match {:?}; animation skipped", selector);
        }
        found
    }

    /// Plays `make` on every match right away, staggered by `each` seconds.
    pub fn intro(
        &self,
        session: &Rc<AnimationSession>,
        selector: &str,
        each: f64,
        make: impl Fn(SharedTarget) -> Tween,
    ) {
        let tweens = self
            .select_all_or_warn(selector)
            .into_iter()
            .map(|el| make(ElementTarget::new(el)))
            .collect();
        for tween in stagger(tweens, each) {
            session.tween(tween);
        }
    }

    /// Gives every match its own scroll trigger. `make` receives the
    /// element's index among the matches.
    pub fn reveal_each(
        &self,
        session: &Rc<AnimationSession>,
        selector: &str,
        threshold: &str,
        once: bool,
        make: impl Fn(usize, SharedTarget) -> Tween + Clone + 'static,
    ) {
        let Some(threshold) = parse_threshold(threshold) else {
            return;
        };
        for (i, el) in self.select_all_or_warn(selector).into_iter().enumerate() {
            let geometry: SharedGeometry = Rc::new(ElementGeometry(el.clone().into()));
            let target: SharedTarget = ElementTarget::new(el);
            let options = if once {
                TriggerOptions::once(selector)
            } else {
                TriggerOptions::repeatable(selector)
            };
            let make = make.clone();
            session.reveal(Some(geometry), threshold, options, move || make(i, target.clone()));
        }
    }

    /// Every match triggers off one shared element (`trigger_selector`),
    /// staggered by `each` seconds.
    pub fn reveal_group(
        &self,
        session: &Rc<AnimationSession>,
        trigger_selector: &str,
        selector: &str,
        threshold: &str,
        each: f64,
        make: impl Fn(SharedTarget) -> Tween + Clone + 'static,
    ) {
        let Some(threshold) = parse_threshold(threshold) else {
            return;
        };
        let geometry = self
            .select(trigger_selector)
            .map(|el| Rc::new(ElementGeometry(el.into())) as SharedGeometry);
        for (i, el) in self.select_all_or_warn(selector).into_iter().enumerate() {
            let target: SharedTarget = ElementTarget::new(el);
            let make = make.clone();
            session.reveal(
                geometry.clone(),
                threshold,
                TriggerOptions::once(selector),
                move || {
                    let tween = make(target.clone());
                    let base = tween.delay_ms() / 1000.0;
                    tween.delay(base + each * i as f64)
                },
            );
        }
    }

    /// Counts every match up from zero to the number it shows in markup.
    /// Text that is not a single number ("24/7") is left alone.
    pub fn count_up(&self, session: &Rc<AnimationSession>, selector: &str, threshold: &str) {
        let Some(threshold) = parse_threshold(threshold) else {
            return;
        };
        for el in self.select_all_or_warn(selector) {
            let literal = el
                .get_attribute("data-count")
                .or_else(|| el.text_content())
                .and_then(|text| CounterLiteral::parse(&text));
            let Some(literal) = literal else {
                continue;
            };
            let geometry: SharedGeometry = Rc::new(ElementGeometry(el.clone().into()));
            let target: SharedTarget = ElementTarget::new(el);
            session.reveal(Some(geometry), threshold, TriggerOptions::once(selector), move || {
                Tween::new(target.clone())
                    .count(literal.clone(), 0.0)
                    .duration(2.0)
                    .ease(Ease::POWER2_OUT)
            });
        }
    }

    /// Grows every match from zero width to its `data-width` percentage,
    /// once, when it scrolls past `threshold`.
    pub fn grow_bars(&self, session: &Rc<AnimationSession>, selector: &str, threshold: &str) {
        let Some(threshold) = parse_threshold(threshold) else {
            return;
        };
        for el in self.select_all_or_warn(selector) {
            let width = el
                .get_attribute("data-width")
                .and_then(|w| w.trim().trim_end_matches('%').parse::<f64>().ok());
            let Some(width) = width else {
                warn!("{:?} without a numeric data-width; skipped", selector);
                continue;
            };
            let geometry: SharedGeometry = Rc::new(ElementGeometry(el.clone().into()));
            let target: SharedTarget = ElementTarget::new(el);
            session.reveal(Some(geometry), threshold, TriggerOptions::once(selector), move || {
                Tween::new(target.clone())
                    .from_to(Property::WidthPercent, 0.0, width)
                    .duration(1.5)
                    .ease(Ease::POWER2_OUT)
            });
        }
    }

    /// Scroll-linked motion of `selector` while `trigger_selector` travels
    /// from `start` to `end`.
    pub fn parallax(
        &self,
        session: &Rc<AnimationSession>,
        trigger_selector: &str,
        selector: &str,
        start: &str,
        end: &str,
        make: impl FnOnce(SharedTarget) -> Tween,
    ) {
        let (Some(start), Some(end)) = (parse_threshold(start), parse_threshold(end)) else {
            return;
        };
        let Some(el) = self.select(selector) else {
            warn!("parallax target {:?} missing; skipped", selector);
            return;
        };
        let geometry = self
            .select(trigger_selector)
            .map(|t| Rc::new(ElementGeometry(t.into())) as SharedGeometry);
        session.parallax(geometry, start, end, make(ElementTarget::new(el)));
    }
}

/// Browser plumbing for one session: the `requestAnimationFrame` loop and
/// the window scroll/resize listeners. Dropping it releases all three.
pub struct FrameLoop {
    window: Window,
    frame_id: Rc<Cell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    on_scroll: Closure<dyn FnMut()>,
}

impl FrameLoop {
    pub fn start(session: &Rc<AnimationSession>) -> Option<Self> {
        let window = web_sys::window()?;
        let weak: Weak<AnimationSession> = Rc::downgrade(session);

        let frame_id = Rc::new(Cell::new(None));
        let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        {
            let frame_for_cb = frame.clone();
            let frame_id = frame_id.clone();
            let window = window.clone();
            let weak = weak.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                let Some(session) = weak.upgrade() else {
                    return;
                };
                if !session.is_active() {
                    return;
                }
                session.tick(now);
                if let Some(cb) = frame_for_cb.borrow().as_ref() {
                    frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let on_scroll = Closure::wrap(Box::new(move || {
            if let (Some(session), Some(vp)) = (weak.upgrade(), viewport()) {
                session.evaluate(vp);
            }
        }) as Box<dyn FnMut()>);

        for event in ["scroll", "resize"] {
            if window
                .add_event_listener_with_callback(event, on_scroll.as_ref().unchecked_ref())
                .is_err()
            {
                warn!("could not listen for {}", event);
            }
        }

        if let Some(cb) = frame.borrow().as_ref() {
            frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }

        // Initial check, for sections already on screen at mount.
        if let Some(vp) = viewport() {
            session.evaluate(vp);
        }

        Some(Self { window, frame_id, frame, on_scroll })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        for event in ["scroll", "resize"] {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, self.on_scroll.as_ref().unchecked_ref());
        }
        self.frame.borrow_mut().take();
    }
}
