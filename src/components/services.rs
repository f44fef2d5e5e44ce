use yew::prelude::*;

use crate::animation::use_animation_session;
use crate::components::section::{reveal_cards, reveal_header, SectionHeader};

const SERVICES: &[(&str, &str)] = &[
    ("💻", "Web Development"),
    ("🛡️", "Cybersecurity"),
    ("🎨", "UI / UX Design"),
    ("📊", "Admin Dashboard"),
    ("⚙️", "DevOps & Automation"),
    ("📱", "Mobile App Development"),
];

#[function_component(Services)]
pub fn services() -> Html {
    let root = use_node_ref();
    use_animation_session("services", root.clone(), |session, scope| {
        reveal_header(session, scope);
        reveal_cards(session, scope, ".service-card");
    });

    html! {
        <section id="services" class="section section-alt" ref={root}>
            <div class="container">
                <SectionHeader
                    title="Our Services"
                    subtitle="Modern IT solutions designed to keep your business secure."
                />
                <div class="grid grid-3">
                    {
                        SERVICES.iter().map(|(icon, title)| html! {
                            <article class="card service-card">
                                <div class="icon-circle">{*icon}</div>
                                <h3>{*title}</h3>
                                <p class="muted">
                                    {"High-quality, scalable solutions tailored for modern businesses."}
                                </p>
                            </article>
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </section>
    }
}
