use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::config::{PRELOADER_FADE_MS, PRELOADER_HOLD_MS, PRELOADER_TIMEOUT_MS};

const POLL_MS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloadPhase {
    Holding,
    Fading,
    Done,
}

/// One-shot intro gate. Leaves once the intro asset is ready and the
/// minimum hold has passed, or at the hard timeout if the asset never
/// reports in. Time only moves forward through [`PreloadGate::phase`].
#[derive(Debug)]
pub struct PreloadGate {
    hold_ms: f64,
    fade_ms: f64,
    timeout_ms: f64,
    asset_ready: bool,
    leaving_at: Option<f64>,
}

impl PreloadGate {
    pub fn new(hold_ms: u32, fade_ms: u32, timeout_ms: u32) -> Self {
        Self {
            hold_ms: hold_ms as f64,
            fade_ms: fade_ms as f64,
            timeout_ms: timeout_ms as f64,
            asset_ready: false,
            leaving_at: None,
        }
    }

    pub fn asset_ready(&mut self) {
        self.asset_ready = true;
    }

    /// Phase at `elapsed` ms after mount.
    pub fn phase(&mut self, elapsed: f64) -> PreloadPhase {
        if self.leaving_at.is_none() {
            let held = self.asset_ready && elapsed >= self.hold_ms;
            if held || elapsed >= self.timeout_ms {
                self.leaving_at = Some(elapsed);
            }
        }
        match self.leaving_at {
            None => PreloadPhase::Holding,
            Some(t) if elapsed < t + self.fade_ms => PreloadPhase::Fading,
            Some(_) => PreloadPhase::Done,
        }
    }
}

impl Default for PreloadGate {
    fn default() -> Self {
        Self::new(PRELOADER_HOLD_MS, PRELOADER_FADE_MS, PRELOADER_TIMEOUT_MS)
    }
}

fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

#[derive(Properties, PartialEq)]
pub struct PreloaderProps {
    pub on_complete: Callback<()>,
}

#[function_component(Preloader)]
pub fn preloader(props: &PreloaderProps) -> Html {
    let phase = use_state(|| PreloadPhase::Holding);
    let gate = use_mut_ref(PreloadGate::default);

    {
        let phase = phase.clone();
        let gate = gate.clone();
        let on_complete = props.on_complete.clone();
        use_effect_with_deps(
            move |_| {
                let started = now_ms();
                let mut shown = PreloadPhase::Holding;
                let interval = Interval::new(POLL_MS, move || {
                    if shown == PreloadPhase::Done {
                        return;
                    }
                    let next = gate.borrow_mut().phase(now_ms() - started);
                    if next == shown {
                        return;
                    }
                    shown = next;
                    phase.set(next);
                    if next == PreloadPhase::Done {
                        log::info!("preloader done");
                        on_complete.emit(());
                    }
                });
                move || drop(interval)
            },
            (),
        );
    }

    let on_ready = {
        let gate = gate.clone();
        Callback::from(move |_: Event| gate.borrow_mut().asset_ready())
    };
    // A broken intro video has nothing to wait for.
    let on_error = {
        let gate = gate.clone();
        Callback::from(move |_: Event| {
            gloo_console::error!("preloader video failed to load");
            gate.borrow_mut().asset_ready();
        })
    };

    if *phase == PreloadPhase::Done {
        return html! {};
    }

    html! {
        <div class={classes!("preloader", (*phase == PreloadPhase::Fading).then(|| "fading"))}>
            <video
                class="preloader-video"
                autoplay=true
                muted=true
                loop=true
                playsinline=true
                src="/videos/zyntex-logo.mp4"
                oncanplaythrough={on_ready}
                onerror={on_error}
            />
            <style>
                {format!(r#"
                    .preloader {{
                        position: fixed;
                        inset: 0;
                        z-index: 2000;
                        background: #000;
                        opacity: 1;
                        transition: opacity {}ms ease-in-out;
                    }}
                    .preloader.fading {{ opacity: 0; }}
                    .preloader-video {{ width: 100%; height: 100%; object-fit: cover; }}
                "#, PRELOADER_FADE_MS)}
            </style>
        </div>
    }
}
