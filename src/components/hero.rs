use yew::prelude::*;

use crate::animation::{use_animation_session, Ease, Property, Tween};
use crate::components::backdrop::Backdrop;

const STATS: &[(&str, &str)] = &[
    ("99.9%", "Service reliability"),
    ("10+", "Projects delivered"),
    ("24/7", "Technical support"),
];

const PARTICLES: usize = 8;

#[function_component(Hero)]
pub fn hero() -> Html {
    let root = use_node_ref();

    use_animation_session("hero", root.clone(), |session, scope| {
        for (selector, rise, delay) in [(".hero-title", 50.0, 0.0), (".hero-subtitle", 30.0, 0.3), (".hero-actions", 30.0, 0.5)] {
            scope.intro(session, selector, 0.0, |t| {
                Tween::new(t)
                    .from(Property::Opacity, 0.0)
                    .from(Property::Y, rise)
                    .duration(1.0)
                    .delay(delay)
                    .ease(Ease::POWER3_OUT)
            });
        }
        scope.intro(session, ".hero-stat", 0.2, |t| {
            Tween::new(t)
                .from(Property::Opacity, 0.0)
                .from(Property::Y, 20.0)
                .duration(0.8)
                .delay(0.8)
                .ease(Ease::POWER2_OUT)
        });
        scope.count_up(session, ".hero-stat-number", "top 95%");
        scope.intro(session, ".particle", 2.0, |t| {
            Tween::new(t)
                .to(Property::Y, -100.0)
                .duration(20.0)
                .ease(Ease::SineInOut)
                .yoyo()
        });
        scope.parallax(session, ".hero", ".hero-content", "top top", "bottom top", |t| {
            Tween::new(t)
                .to(Property::Y, 100.0)
                .to(Property::Opacity, 0.5)
                .ease(Ease::Linear)
        });
    });

    html! {
        <section id="home" class="hero" ref={root}>
            <Backdrop />
            <div class="container hero-content">
                <h1 class="hero-title">
                    {"Build, secure & scale your digital infrastructure with confidence."}
                </h1>
                <p class="hero-subtitle">
                    {"Zyntex helps businesses modernize their IT systems through secure cloud solutions, automation, DevOps and real-time monitoring."}
                </p>
                <div class="hero-actions">
                    <a href="#contact" class="btn btn-primary btn-lg">{"Get started"}</a>
                    <a href="#features" class="btn btn-outline btn-lg">{"Learn more"}</a>
                </div>
                <div class="hero-stats-row">
                    {
                        STATS.iter().map(|(number, label)| html! {
                            <div class="hero-stat">
                                <span class="hero-stat-number" data-count={*number}>{*number}</span>
                                <span class="hero-stat-label">{*label}</span>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </div>
            <div class="particles">
                { for (0..PARTICLES).map(|i| html! { <div class="particle" key={i}></div> }) }
            </div>
            <style>
                {r#"
                    .hero {
                        position: relative;
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        overflow: hidden;
                        padding-top: 80px;
                    }
                    .hero-backdrop {
                        position: absolute;
                        inset: 0;
                        width: 100%;
                        height: 100%;
                        z-index: 0;
                        pointer-events: none;
                    }
                    .hero-content { position: relative; z-index: 1; }
                    .hero-title { font-size: clamp(2.2rem, 5vw, 3.8rem); line-height: 1.1; }
                    .hero-subtitle { max-width: 640px; color: #94a3b8; font-size: 1.15rem; }
                    .hero-actions { display: flex; gap: 16px; margin: 32px 0; }
                    .hero-stats-row { display: flex; gap: 48px; flex-wrap: wrap; }
                    .hero-stat { display: flex; flex-direction: column; }
                    .hero-stat-number { font-size: 2rem; font-weight: 700; color: #06b6d4; }
                    .hero-stat-label { color: #94a3b8; font-size: 0.9rem; }
                    .particles { position: absolute; inset: 0; pointer-events: none; }
                    .particle {
                        position: absolute;
                        width: 4px;
                        height: 4px;
                        border-radius: 50%;
                        background: rgba(6, 182, 212, 0.6);
                    }
                    .particle:nth-child(1) { left: 10%; top: 80%; }
                    .particle:nth-child(2) { left: 22%; top: 60%; }
                    .particle:nth-child(3) { left: 35%; top: 90%; }
                    .particle:nth-child(4) { left: 48%; top: 70%; }
                    .particle:nth-child(5) { left: 60%; top: 85%; }
                    .particle:nth-child(6) { left: 72%; top: 65%; }
                    .particle:nth-child(7) { left: 84%; top: 75%; }
                    .particle:nth-child(8) { left: 93%; top: 95%; }
                "#}
            </style>
        </section>
    }
}
