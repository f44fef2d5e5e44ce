use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;
use yew::prelude::*;

use crate::animation::trigger::{Bounds, Viewport};

pub const BASE_OPACITY: f64 = 0.3;
pub const CONTACT_OPACITY: f64 = 0.1;
/// Share of the video that must be on screen for it to keep playing.
pub const PLAY_THRESHOLD: f64 = 0.1;

/// Dims the video while the viewport's midline is over the contact section,
/// so the form stays readable.
pub fn video_opacity(contact: Option<Bounds>, viewport: Viewport) -> f64 {
    let mid = viewport.height / 2.0;
    match contact {
        Some(b) if b.top <= mid && b.top + b.height >= mid => CONTACT_OPACITY,
        _ => BASE_OPACITY,
    }
}

/// Fraction of `bounds` inside the viewport, 0..=1.
pub fn visible_fraction(bounds: Bounds, viewport: Viewport) -> f64 {
    if bounds.height <= 0.0 {
        return 0.0;
    }
    let top = bounds.top.max(0.0);
    let bottom = (bounds.top + bounds.height).min(viewport.height);
    ((bottom - top) / bounds.height).clamp(0.0, 1.0)
}

fn bounds_of(el: &web_sys::Element) -> Bounds {
    let rect = el.get_bounding_client_rect();
    Bounds { top: rect.top(), height: rect.height() }
}

/// Looping, muted page background. Plays only while on screen.
#[function_component(BackgroundVideo)]
pub fn background_video() -> Html {
    let video_ref = use_node_ref();

    {
        let video_ref = video_ref.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let update = {
                    let video_ref = video_ref.clone();
                    move || {
                        let Some(video) = video_ref.cast::<HtmlVideoElement>() else {
                            return;
                        };
                        let Some(window) = web_sys::window() else {
                            return;
                        };
                        let Some(height) = window.inner_height().ok().and_then(|h| h.as_f64()) else {
                            return;
                        };
                        let viewport = Viewport { height };
                        let contact = window
                            .document()
                            .and_then(|d| d.get_element_by_id("contact"))
                            .map(|el| bounds_of(&el));

                        let opacity = video_opacity(contact, viewport);
                        let _ = video.style().set_property("opacity", &opacity.to_string());

                        let showing = visible_fraction(bounds_of(&video), viewport) >= PLAY_THRESHOLD;
                        if showing && video.paused() {
                            if video.play().is_err() {
                                gloo_console::warn!("background video refused to play");
                            }
                        } else if !showing && !video.paused() {
                            let _ = video.pause();
                        }
                    }
                };
                update();

                let listener = Closure::wrap(Box::new(update) as Box<dyn FnMut()>);
                if let Some(window) = window.as_ref() {
                    for event in ["scroll", "resize"] {
                        let _ = window.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
                    }
                }
                move || {
                    if let Some(window) = window {
                        for event in ["scroll", "resize"] {
                            let _ = window.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
                        }
                    }
                }
            },
            (),
        );
    }

    let on_error = Callback::from(|_: Event| {
        gloo_console::error!("background video failed to load");
    });

    html! {
        <video
            ref={video_ref}
            id="bg-video"
            autoplay=true
            muted=true
            loop=true
            playsinline=true
            onerror={on_error}
            style={format!("opacity: {}; transition: opacity 0.5s ease;", BASE_OPACITY)}
        >
            <source src="/videos/zyntex1.mp4" type="video/mp4" />
        </video>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport { height: 800.0 };

    #[test]
    fn dims_over_contact_section() {
        let over = Bounds { top: -200.0, height: 900.0 };
        assert_eq!(video_opacity(Some(over), VP), CONTACT_OPACITY);
    }

    #[test]
    fn full_opacity_elsewhere() {
        let below = Bounds { top: 500.0, height: 900.0 };
        let above = Bounds { top: -1200.0, height: 900.0 };
        assert_eq!(video_opacity(Some(below), VP), BASE_OPACITY);
        assert_eq!(video_opacity(Some(above), VP), BASE_OPACITY);
        assert_eq!(video_opacity(None, VP), BASE_OPACITY);
    }

    #[test]
    fn visibility_fraction() {
        assert_eq!(visible_fraction(Bounds { top: 0.0, height: 800.0 }, VP), 1.0);
        assert_eq!(visible_fraction(Bounds { top: 600.0, height: 400.0 }, VP), 0.5);
        assert_eq!(visible_fraction(Bounds { top: 900.0, height: 400.0 }, VP), 0.0);
        assert_eq!(visible_fraction(Bounds { top: -100.0, height: 0.0 }, VP), 0.0);
    }
}
