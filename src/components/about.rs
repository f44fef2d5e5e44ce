use yew::prelude::*;

use crate::animation::{use_animation_session, Ease, Property, Tween};
use crate::components::section::{reveal_header, SectionHeader};

const MISSION_POINTS: &[&str] = &[
    "Cloud-native, scalable and secure architectures.",
    "Automation that accelerates development cycles.",
    "Visibility into performance, outages and risk.",
];

const VALUES: &[(&str, &str)] = &[
    ("Security first", "Your uptime and data always come first."),
    ("Transparency", "Clear communication, clear reporting."),
    ("Innovation", "Modern tools that truly add value."),
    ("Partnership", "We act as an extension of your team."),
];

#[function_component(About)]
pub fn about() -> Html {
    let root = use_node_ref();
    use_animation_session("about", root.clone(), |session, scope| {
        reveal_header(session, scope);
        // The two cards come in from opposite sides.
        for (selector, x) in [(".about-mission", -60.0), (".about-values", 60.0)] {
            scope.reveal_each(session, selector, "top 85%", true, move |_, t| {
                Tween::new(t)
                    .from(Property::Opacity, 0.0)
                    .from(Property::X, x)
                    .duration(0.9)
                    .ease(Ease::POWER3_OUT)
            });
        }
        scope.reveal_group(session, ".value-list", ".value-list li", "top 85%", 0.1, |t| {
            Tween::new(t)
                .from(Property::Opacity, 0.0)
                .from(Property::Y, 20.0)
                .duration(0.5)
                .delay(0.3)
        });
    });

    html! {
        <section id="about" class="section section-alt" ref={root}>
            <div class="container">
                <SectionHeader
                    title="About Zyntex"
                    subtitle="We are a team of engineers and security specialists delivering secure, scalable and reliable IT solutions."
                />
                <div class="grid grid-2 about-grid">
                    <div class="card about-mission">
                        <h3>{"Our Mission"}</h3>
                        <p class="muted">
                            {"Our mission is to help businesses deploy, manage and secure modern digital systems without the need for large internal teams."}
                        </p>
                        <p class="muted">{"From architecture to deployment, we stay with you at every step."}</p>
                        <ul class="bullet-list">
                            { for MISSION_POINTS.iter().map(|point| html! { <li>{*point}</li> }) }
                        </ul>
                    </div>
                    <div class="card about-values">
                        <h3>{"What we value"}</h3>
                        <ul class="value-list">
                            {
                                VALUES.iter().map(|(name, text)| html! {
                                    <li>
                                        <strong>{*name}</strong>
                                        <span class="muted">{*text}</span>
                                    </li>
                                }).collect::<Html>()
                            }
                        </ul>
                    </div>
                </div>
            </div>
        </section>
    }
}
