use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};
use yew::prelude::*;

const TARGET_FPS: f64 = 30.0;
const POINTER_THROTTLE_MS: f64 = 50.0;
const RESIZE_DEBOUNCE_MS: u32 = 100;
const CORE_IMAGE: &str = "/assets/images/core.png";

/// Lets through at most `fps` frames per second of `requestAnimationFrame`
/// timestamps, carrying the remainder so the cadence does not drift.
#[derive(Debug)]
pub struct FrameGate {
    interval_ms: f64,
    last: Option<f64>,
}

impl FrameGate {
    pub fn new(fps: f64) -> Self {
        Self { interval_ms: 1000.0 / fps, last: None }
    }

    pub fn ready(&mut self, now: f64) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return true;
        };
        let delta = now - last;
        if delta < self.interval_ms {
            return false;
        }
        self.last = Some(now - delta % self.interval_ms);
        true
    }
}

/// Maps a client position to -1..1 on both axes, y pointing up.
pub fn normalize_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    (client_x / width * 2.0 - 1.0, -(client_y / height * 2.0 - 1.0))
}

/// Eases toward wherever the pointer is, a small step every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
}

impl Camera {
    pub const FOLLOW: f64 = 0.03;

    pub fn follow(&mut self, pointer: (f64, f64)) {
        let (tx, ty) = (pointer.0 * 1.5, pointer.1 * 0.8 + 2.0);
        self.x += (tx - self.x) * Self::FOLLOW;
        self.y += (ty - self.y) * Self::FOLLOW;
    }
}

#[derive(Clone, Copy, Debug)]
struct Orb {
    // Fractions of the canvas size.
    x: f64,
    y: f64,
    radius: f64,
    depth: f64,
    phase: f64,
    color: &'static str,
}

const ORBS: &[Orb] = &[
    Orb { x: 0.15, y: 0.25, radius: 0.09, depth: 0.6, phase: 0.0, color: "rgba(6, 182, 212, 0.35)" },
    Orb { x: 0.80, y: 0.20, radius: 0.12, depth: 0.3, phase: 1.3, color: "rgba(139, 92, 246, 0.30)" },
    Orb { x: 0.65, y: 0.70, radius: 0.07, depth: 0.9, phase: 2.1, color: "rgba(59, 130, 246, 0.35)" },
    Orb { x: 0.30, y: 0.75, radius: 0.10, depth: 0.4, phase: 3.7, color: "rgba(16, 185, 129, 0.25)" },
    Orb { x: 0.50, y: 0.40, radius: 0.05, depth: 1.2, phase: 4.4, color: "rgba(236, 72, 153, 0.30)" },
];

/// Where an orb sits at `t` seconds, in canvas pixels.
fn orb_position(orb: &Orb, t: f64, camera: Camera, width: f64, height: f64) -> (f64, f64) {
    let drift_x = (t * 0.3 + orb.phase).sin() * 0.03;
    let drift_y = (t * 0.4 + orb.phase).cos() * 0.04;
    let x = (orb.x + drift_x - camera.x * 0.02 * orb.depth) * width;
    let y = (orb.y + drift_y + (camera.y - 2.0) * 0.02 * orb.depth) * height;
    (x, y)
}

struct Scene {
    gate: FrameGate,
    camera: Camera,
    pointer: (f64, f64),
    last_pointer_at: f64,
    image: Option<HtmlImageElement>,
}

impl Scene {
    fn draw(&self, ctx: &CanvasRenderingContext2d, now: f64, width: f64, height: f64) {
        let t = now / 1000.0;
        ctx.clear_rect(0.0, 0.0, width, height);
        let unit = width.min(height);
        for orb in ORBS {
            let (x, y) = orb_position(orb, t, self.camera, width, height);
            ctx.begin_path();
            fill_with(ctx, orb.color);
            if ctx.arc(x, y, orb.radius * unit, 0.0, TAU).is_ok() {
                ctx.fill();
            }
        }
        if let Some(image) = &self.image {
            let size = unit * 0.35;
            let bob = (t * 0.8).sin() * unit * 0.01;
            let x = width / 2.0 - size / 2.0 - self.camera.x * 6.0;
            let y = height / 2.0 - size / 2.0 + bob;
            ctx.set_global_alpha(0.85);
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, size, size);
            ctx.set_global_alpha(1.0);
        }
    }
}

#[allow(deprecated)]
fn fill_with(ctx: &CanvasRenderingContext2d, color: &str) {
    ctx.set_fill_style(&JsValue::from_str(color));
}

fn fit_to_box(canvas: &HtmlCanvasElement) {
    let (w, h) = (canvas.client_width().max(1) as u32, canvas.client_height().max(1) as u32);
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
    }
}

fn on_screen(canvas: &HtmlCanvasElement) -> bool {
    let Some(vh) = web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
    else {
        return true;
    };
    let rect = canvas.get_bounding_client_rect();
    rect.bottom() > 0.0 && rect.top() < vh
}

/// Decorative canvas behind the hero: drifting orbs and a floating core
/// image that lean toward the pointer. Rendering pauses while scrolled off
/// screen.
#[function_component(Backdrop)]
pub fn backdrop() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let canvas = canvas_ref.cast::<HtmlCanvasElement>();
                let ctx = canvas
                    .as_ref()
                    .and_then(|c| c.get_context("2d").ok().flatten())
                    .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());

                let scene = Rc::new(RefCell::new(Scene {
                    gate: FrameGate::new(TARGET_FPS),
                    camera: Camera::default(),
                    pointer: (0.0, 0.0),
                    last_pointer_at: f64::NEG_INFINITY,
                    image: None,
                }));

                // Optional decoration; the orbs carry on without it.
                let image = HtmlImageElement::new().ok();
                let on_load = {
                    let scene = scene.clone();
                    let image = image.clone();
                    Closure::wrap(Box::new(move || {
                        scene.borrow_mut().image = image.clone();
                    }) as Box<dyn FnMut()>)
                };
                let on_error = Closure::wrap(Box::new(move || {
                    gloo_console::error!(format!("backdrop: could not load {}", CORE_IMAGE));
                }) as Box<dyn FnMut()>);
                if let Some(image) = &image {
                    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
                    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
                    image.set_src(CORE_IMAGE);
                }

                let on_pointer = {
                    let scene = scene.clone();
                    Closure::wrap(Box::new(move |e: MouseEvent| {
                        let mut scene = scene.borrow_mut();
                        let now = e.time_stamp();
                        if now - scene.last_pointer_at < POINTER_THROTTLE_MS {
                            return;
                        }
                        scene.last_pointer_at = now;
                        let (w, h) = web_sys::window()
                            .map(|w| {
                                (
                                    w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                                    w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                                )
                            })
                            .unwrap_or((0.0, 0.0));
                        scene.pointer = normalize_pointer(e.client_x() as f64, e.client_y() as f64, w, h);
                    }) as Box<dyn FnMut(MouseEvent)>)
                };

                let pending_resize: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
                let on_resize = {
                    let canvas = canvas.clone();
                    let pending_resize = pending_resize.clone();
                    Closure::wrap(Box::new(move || {
                        let canvas = canvas.clone();
                        *pending_resize.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                            if let Some(canvas) = canvas {
                                fit_to_box(&canvas);
                            }
                        }));
                    }) as Box<dyn FnMut()>)
                };

                let frame_id = Rc::new(Cell::new(None::<i32>));
                let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
                if let (Some(window), Some(canvas), Some(ctx)) = (window.clone(), canvas.clone(), ctx) {
                    fit_to_box(&canvas);
                    let frame_for_cb = frame.clone();
                    let frame_id_for_cb = frame_id.clone();
                    let scene = scene.clone();
                    let next_window = window.clone();
                    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                        {
                            let mut scene = scene.borrow_mut();
                            if on_screen(&canvas) && scene.gate.ready(now) {
                                let pointer = scene.pointer;
                                scene.camera.follow(pointer);
                                scene.draw(&ctx, now, canvas.width() as f64, canvas.height() as f64);
                            }
                        }
                        if let Some(cb) = frame_for_cb.borrow().as_ref() {
                            frame_id_for_cb.set(next_window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                        }
                    }) as Box<dyn FnMut(f64)>));
                    if let Some(cb) = frame.borrow().as_ref() {
                        frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                    }
                    let _ = window.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref());
                    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                } else {
                    gloo_console::warn!("backdrop: no 2d canvas; skipping");
                }

                move || {
                    if let Some(window) = window {
                        if let Some(id) = frame_id.take() {
                            let _ = window.cancel_animation_frame(id);
                        }
                        let _ = window.remove_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref());
                        let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                    }
                    frame.borrow_mut().take();
                    pending_resize.borrow_mut().take();
                    if let Some(image) = image {
                        image.set_onload(None);
                        image.set_onerror(None);
                    }
                    drop(on_load);
                    drop(on_error);
                }
            },
            (),
        );
    }

    html! {
        <canvas ref={canvas_ref} class="hero-backdrop" aria-hidden="true"></canvas>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_limits_to_target_rate() {
        let mut gate = FrameGate::new(30.0);
        // Roughly 60 Hz timestamps: every other frame gets through.
        let passed = (0..60).filter(|i| gate.ready(*i as f64 * 16.7)).count();
        assert_eq!(passed, 30);
    }

    #[test]
    fn gate_always_passes_first_frame() {
        let mut gate = FrameGate::new(30.0);
        assert!(gate.ready(12_345.0));
        assert!(!gate.ready(12_350.0));
    }

    #[test]
    fn camera_closes_a_small_share_of_the_gap() {
        let mut camera = Camera::default();
        camera.follow((1.0, 0.0));
        assert!((camera.x - 1.5 * Camera::FOLLOW).abs() < 1e-12);
        assert!((camera.y - 2.0 * Camera::FOLLOW).abs() < 1e-12);
        for _ in 0..2000 {
            camera.follow((1.0, 0.0));
        }
        assert!((camera.x - 1.5).abs() < 1e-6);
        assert!((camera.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_is_centered_and_flipped() {
        assert_eq!(normalize_pointer(500.0, 400.0, 1000.0, 800.0), (0.0, 0.0));
        assert_eq!(normalize_pointer(0.0, 0.0, 1000.0, 800.0), (-1.0, 1.0));
        assert_eq!(normalize_pointer(10.0, 10.0, 0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn orbs_stay_near_their_anchor() {
        let camera = Camera { x: 1.5, y: 2.8 };
        for orb in ORBS {
            for step in 0..100 {
                let (x, y) = orb_position(orb, step as f64 * 0.37, camera, 1000.0, 1000.0);
                assert!((x / 1000.0 - orb.x).abs() < 0.1);
                assert!((y / 1000.0 - orb.y).abs() < 0.1);
            }
        }
    }
}
