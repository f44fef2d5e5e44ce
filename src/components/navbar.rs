use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, Node};
use yew::prelude::*;

use crate::chatbot;
use crate::config::{NAV_OFFSET_PX, NAV_SCROLLED_AFTER_PX};

const LINKS: &[(&str, &str)] = &[
    ("Home", "home"),
    ("Services", "services"),
    ("Features", "features"),
    ("About", "about"),
    ("Contact", "contact"),
];

/// How far through the page the reader is, 0..=100.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Document offset to scroll to so a section lands just below the fixed
/// header. `rect_top` is the section's viewport-relative top.
pub fn anchor_scroll_target(rect_top: f64, page_y: f64, offset: f64) -> f64 {
    (rect_top + page_y - offset).max(0.0)
}

fn scroll_to_section(id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(section) = window.document().and_then(|d| d.get_element_by_id(id)) else {
        gloo_console::warn!(format!("no section #{}", id));
        return;
    };
    let page_y = window.page_y_offset().unwrap_or(0.0);
    let top = anchor_scroll_target(section.get_bounding_client_rect().top(), page_y, NAV_OFFSET_PX);
    window.scroll_to_with_x_and_y(0.0, top);
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);
    let progress = use_state(|| 0.0_f64);
    let menu_ref = use_node_ref();

    {
        let is_scrolled = is_scrolled.clone();
        let progress = progress.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let Some(root) = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.document_element())
                    else {
                        return;
                    };
                    let top = root.scroll_top() as f64;
                    is_scrolled.set(top > NAV_SCROLLED_AFTER_PX);
                    progress.set(scroll_progress(top, root.scroll_height() as f64, root.client_height() as f64));
                }) as Box<dyn FnMut()>);

                if let Some(window) = window.as_ref() {
                    if window
                        .add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref())
                        .is_err()
                    {
                        gloo_console::error!("navbar: could not listen for scroll");
                    }
                }

                move || {
                    if let Some(window) = window {
                        let _ = window
                            .remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    // A click anywhere outside the open menu closes it.
    {
        let open_now = *menu_open;
        let menu_open = menu_open.clone();
        let menu_ref = menu_ref.clone();
        use_effect_with_deps(
            move |open| {
                let document = web_sys::window().and_then(|w| w.document());
                let listener = if *open {
                    let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
                        let inside = match (menu_ref.cast::<Element>(), e.target()) {
                            (Some(menu), Some(target)) => menu.contains(target.dyn_ref::<Node>()),
                            _ => false,
                        };
                        if !inside {
                            menu_open.set(false);
                        }
                    }) as Box<dyn FnMut(MouseEvent)>);
                    if let Some(document) = document.as_ref() {
                        let _ = document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                    }
                    Some(on_click)
                } else {
                    None
                };
                move || {
                    if let (Some(document), Some(on_click)) = (document, listener) {
                        let _ = document.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                    }
                }
            },
            open_now,
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            menu_open.set(!*menu_open);
        })
    };

    let go_to = |id: &'static str| {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(false);
            scroll_to_section(id);
        })
    };

    let open_chat = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(false);
            chatbot::request_open();
        })
    };

    html! {
        <header class={classes!("site-header", (*is_scrolled).then(|| "scrolled"))}>
            <div class="scroll-progress" style={format!("width: {:.2}%", *progress)}></div>
            <div class="container nav-container">
                <a href="#home" class="logo" onclick={go_to("home")}>
                    <img src="/assets/images/logo1.jpg" class="logo-img" alt="Zyntex Logo" />
                </a>

                <button
                    class={classes!("nav-toggle-btn", (*menu_open).then(|| "active"))}
                    onclick={toggle_menu}
                    aria-label="Toggle navigation"
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>

                <nav ref={menu_ref} class={classes!("nav-links", (*menu_open).then(|| "active"))}>
                    {
                        LINKS.iter().map(|(label, id)| html! {
                            <a href={format!("#{}", id)} class="nav-link" onclick={go_to(*id)}>{*label}</a>
                        }).collect::<Html>()
                    }
                    <a href="#contact" class="btn btn-primary nav-cta-mobile" onclick={open_chat.clone()}>
                        {"Get a demo"}
                    </a>
                </nav>

                <a href="#contact" class="btn btn-primary nav-cta-desktop" onclick={open_chat}>
                    {"Get a demo"}
                </a>
            </div>
            <style>
                {r#"
                    html { scroll-behavior: smooth; }
                    .site-header {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 1000;
                        transition: background 0.3s ease, box-shadow 0.3s ease;
                    }
                    .site-header.scrolled {
                        background: rgba(10, 14, 26, 0.92);
                        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.35);
                        backdrop-filter: blur(10px);
                    }
                    .scroll-progress {
                        position: absolute;
                        top: 0;
                        left: 0;
                        height: 3px;
                        background: linear-gradient(90deg, #06b6d4, #8b5cf6);
                    }
                    .nav-container {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        height: 80px;
                    }
                    .logo-img { height: 44px; border-radius: 8px; }
                    .nav-links { display: flex; gap: 28px; align-items: center; }
                    .nav-link { color: #cbd5e1; text-decoration: none; }
                    .nav-link:hover { color: #fff; }
                    .nav-toggle-btn { display: none; background: none; border: none; }
                    .nav-toggle-btn span {
                        display: block;
                        width: 24px;
                        height: 2px;
                        margin: 5px 0;
                        background: #fff;
                        transition: transform 0.3s ease;
                    }
                    .nav-cta-mobile { display: none; }
                    @media (max-width: 900px) {
                        .nav-toggle-btn { display: block; }
                        .nav-cta-desktop { display: none; }
                        .nav-links {
                            position: fixed;
                            top: 80px;
                            right: 0;
                            flex-direction: column;
                            padding: 24px;
                            background: rgba(10, 14, 26, 0.97);
                            transform: translateX(100%);
                            transition: transform 0.3s ease;
                        }
                        .nav-links.active { transform: translateX(0); }
                        .nav-links.active .nav-cta-mobile { display: inline-block; }
                    }
                "#}
            </style>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_spans_the_scrollable_range() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn progress_handles_short_pages_and_overscroll() {
        assert_eq!(scroll_progress(0.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(2500.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn anchors_land_below_the_header() {
        assert_eq!(anchor_scroll_target(500.0, 1200.0, 80.0), 1620.0);
        assert_eq!(anchor_scroll_target(20.0, 0.0, 80.0), 0.0);
    }
}
