use yew::prelude::*;

use crate::animation::use_animation_session;
use crate::components::section::{reveal_cards, reveal_header, SectionHeader};

const FEATURES: &[(&str, &str)] = &[
    ("Real-time monitoring", "Track CPU, memory, API latency, network usage and custom metrics instantly."),
    ("Smart alerting", "Noise-free alerts with grouping, thresholds and escalation policies."),
    ("Secure by design", "Encryption, RBAC, access logs and zero-trust security practices."),
    ("Scales with you", "From startups to enterprises, scale infrastructure seamlessly."),
    ("Human support", "Talk directly with engineers, not bots or scripts."),
];

#[function_component(WhyChoose)]
pub fn why_choose() -> Html {
    let root = use_node_ref();
    use_animation_session("why-choose", root.clone(), |session, scope| {
        reveal_header(session, scope);
        reveal_cards(session, scope, ".small-card");
    });

    html! {
        <section id="features" class="section" ref={root}>
            <div class="container">
                <SectionHeader
                    title="Why teams choose Zyntex"
                    subtitle="Secure, reliable and scalable solutions built for modern businesses."
                />
                <div class="grid grid-3">
                    {
                        FEATURES.iter().enumerate().map(|(i, (title, text))| html! {
                            <div key={i} class="card small-card">
                                <h3>{*title}</h3>
                                <p class="muted">{*text}</p>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </section>
    }
}
