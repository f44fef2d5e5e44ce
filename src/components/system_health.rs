use yew::prelude::*;

use crate::animation::use_animation_session;
use crate::components::section::{reveal_cards, reveal_header, SectionHeader};

struct Status {
    label: &'static str,
    value: &'static str,
    warn: bool,
}

const STATUSES: &[Status] = &[
    Status { label: "Cloud Services", value: "10.0%", warn: false },
    Status { label: "Network Infrastructure", value: "0.2%", warn: false },
    Status { label: "Security Systems", value: "10.0%", warn: true },
    Status { label: "Database Servers", value: "10.0%", warn: false },
];

const HIGHLIGHTS: &[(&str, &str, &str)] = &[
    ("dot-green", "Proactive monitoring", "Detect issues before they impact your business."),
    ("dot-cyan", "Unified dashboard", "Metrics, logs and alerts in one place."),
    ("dot-purple", "Security built-in", "Encrypted data, access control and full audits."),
    ("dot-orange", "Automation ready", "Trigger workflows and scale automatically."),
];

#[function_component(SystemHealth)]
pub fn system_health() -> Html {
    let root = use_node_ref();
    use_animation_session("system-health", root.clone(), |session, scope| {
        reveal_header(session, scope);
        reveal_cards(session, scope, ".card");
        scope.grow_bars(session, ".status-fill", "top 85%");
        scope.count_up(session, ".status-value", "top 85%");
    });

    html! {
        <section id="health" class="section" ref={root}>
            <div class="container">
                <SectionHeader
                    title="Infrastructure health at a glance"
                    subtitle="Live insights into performance, uptime and system status, all in one view."
                />
                <div class="grid grid-2">
                    <div class="card">
                        <h3>{"System Status"}</h3>
                        <p class="muted">
                            {"Real-time monitoring of cloud, network and security systems, helping you stay ahead of issues."}
                        </p>
                        <div class="status-list">
                            {
                                STATUSES.iter().map(|s| html! {
                                    <div class="status-item">
                                        <div class="status-label-row">
                                            <span>{s.label}</span>
                                            <span class="status-value">{s.value}</span>
                                        </div>
                                        <div class="status-bar">
                                            <div
                                                class={classes!("status-fill", if s.warn { "status-warn" } else { "status-ok" })}
                                                data-width={s.value}
                                            ></div>
                                        </div>
                                    </div>
                                }).collect::<Html>()
                            }
                        </div>
                    </div>

                    <div class="card">
                        <h3>{"Key Highlights"}</h3>
                        <ul class="feature-list">
                            {
                                HIGHLIGHTS.iter().map(|(dot, title, text)| html! {
                                    <li>
                                        <span class={classes!("dot", *dot)}></span>
                                        <div>
                                            <strong>{*title}</strong>
                                            <p class="muted">{*text}</p>
                                        </div>
                                    </li>
                                }).collect::<Html>()
                            }
                        </ul>
                    </div>
                </div>
            </div>
            <style>
                {r#"
                    .status-list { display: flex; flex-direction: column; gap: 18px; margin-top: 20px; }
                    .status-label-row { display: flex; justify-content: space-between; margin-bottom: 6px; }
                    .status-bar { height: 8px; border-radius: 4px; background: rgba(255, 255, 255, 0.08); overflow: hidden; }
                    .status-fill { height: 100%; width: 0; border-radius: 4px; }
                    .status-ok { background: linear-gradient(90deg, #10b981, #06b6d4); }
                    .status-warn { background: linear-gradient(90deg, #f59e0b, #ef4444); }
                "#}
            </style>
        </section>
    }
}
