use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::animation::dom::{reuse_target, ElementTarget};
use crate::animation::hook::with_session;
use crate::animation::{use_animation_session, Ease, Property, Tween};
use crate::components::notification::{Toast, ToastMessage};
use crate::contact::form::{service_option, PHONE_DIGITS};
use crate::contact::{self, ContactForm, Field, SERVICE_OPTIONS};

const SUCCESS_TEXT: &str = "Your message has been sent! We'll get back to you within 24 hours.";

#[derive(Properties, PartialEq)]
struct TextFieldProps {
    field: Field,
    label: AttrValue,
    value: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    kind: AttrValue,
    #[prop_or_default]
    required: bool,
    #[prop_or_default]
    invalid: bool,
    #[prop_or_default]
    hint: Option<AttrValue>,
    on_change: Callback<(Field, String)>,
}

#[function_component(TextField)]
fn text_field(props: &TextFieldProps) -> Html {
    let focused = use_state(|| false);
    let id = format!("{:?}", props.field).to_lowercase();

    let oninput = {
        let field = props.field;
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((field, input.value()));
        })
    };
    let onfocus = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(true))
    };
    let onblur = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(false))
    };

    html! {
        <div class={classes!(
            "form-field",
            (*focused || !props.value.is_empty()).then(|| "focused"),
            props.invalid.then(|| "has-error"),
        )}>
            <input
                type={props.kind.clone()}
                id={id.clone()}
                name={id.clone()}
                value={props.value.clone()}
                required={props.required}
                {oninput}
                {onfocus}
                {onblur}
            />
            <label for={id}>{&props.label}</label>
            if let Some(hint) = &props.hint {
                <span class="phone-hint">{hint.clone()}</span>
            }
            <div class="field-line"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ServicePickerProps {
    selected: AttrValue,
    on_change: Callback<(Field, String)>,
}

/// Custom dropdown for the service field. Closes on any click outside it.
#[function_component(ServicePicker)]
fn service_picker(props: &ServicePickerProps) -> Html {
    let open = use_state(|| false);
    let node = use_node_ref();
    {
        let open = open.clone();
        use_click_away(node.clone(), move |_: Event| open.set(false));
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let current = service_option(&props.selected);

    html! {
        <div ref={node} class={classes!("form-field", "form-field-select", current.is_some().then(|| "focused"))}>
            <input type="hidden" name="service" value={props.selected.clone()} />
            <div class={classes!("custom-dropdown", (*open).then(|| "open"))} onclick={toggle}>
                <div class="dropdown-selected">
                    if let Some(option) = current {
                        <span class="dropdown-icon">{option.icon}</span>
                        <span>{option.label}</span>
                    } else {
                        <span class="dropdown-placeholder">{"Choose service..."}</span>
                    }
                </div>
                <div class={classes!("dropdown-arrow", (*open).then(|| "rotated"))}>{"▾"}</div>
            </div>
            <div class={classes!("dropdown-options", (*open).then(|| "show"))}>
                {
                    SERVICE_OPTIONS.iter().map(|option| {
                        let pick = {
                            let open = open.clone();
                            let on_change = props.on_change.clone();
                            let value = option.value;
                            Callback::from(move |_: MouseEvent| {
                                on_change.emit((Field::Service, value.to_string()));
                                open.set(false);
                            })
                        };
                        let selected = props.selected.as_str() == option.value;
                        html! {
                            <div key={option.value} class={classes!("dropdown-option", selected.then(|| "selected"))} onclick={pick}>
                                <span class="option-icon">{option.icon}</span>
                                <span class="option-label">{option.label}</span>
                                if selected {
                                    <span class="option-check">{"✓"}</span>
                                }
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
            <label for="service">{"Service Interested In"}</label>
            <div class="field-line"></div>
        </div>
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let root = use_node_ref();
    let form_ref = use_node_ref();
    let form = use_state(ContactForm::default);
    let submitting = use_state(|| false);
    let toast = use_state(|| None::<ToastMessage>);
    let is_mounted = use_is_mounted();
    let pulse_target = use_mut_ref(|| None::<Rc<ElementTarget>>);

    let session = use_animation_session("contact", root.clone(), |session, scope| {
        for (selector, rise, duration, delay) in [
            (".contact-badge", 30.0, 0.6, 0.0),
            (".contact-title", 40.0, 0.8, 0.1),
            (".contact-subtitle", 30.0, 0.8, 0.2),
        ] {
            scope.reveal_group(session, ".contact-section", selector, "top 80%", 0.0, move |t| {
                Tween::new(t)
                    .from(Property::Opacity, 0.0)
                    .from(Property::Y, rise)
                    .duration(duration)
                    .delay(delay)
                    .ease(Ease::POWER3_OUT)
            });
        }
        scope.reveal_each(session, ".contact-main", "top 85%", true, |_, t| {
            Tween::new(t)
                .from(Property::Opacity, 0.0)
                .from(Property::Y, 50.0)
                .duration(1.0)
                .ease(Ease::POWER3_OUT)
        });
        scope.reveal_group(session, ".info-items", ".info-item", "top 90%", 0.1, |t| {
            Tween::new(t)
                .from(Property::Opacity, 0.0)
                .from(Property::X, 20.0)
                .duration(0.6)
                .ease(Ease::POWER3_OUT)
        });
    });

    let on_change = {
        let form = form.clone();
        Callback::from(move |(field, value): (Field, String)| {
            let mut next = (*form).clone();
            next.update(field, value);
            form.set(next);
        })
    };

    let on_message = {
        let on_change = on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit((Field::Message, input.value()));
        })
    };

    let onsubmit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let toast = toast.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            // Validation problems never reach the network.
            if let Err(err) = form.validate() {
                toast.set(Some(ToastMessage::from(&err)));
                return;
            }
            submitting.set(true);

            let data = (*form).clone();
            let form = form.clone();
            let submitting = submitting.clone();
            let toast = toast.clone();
            let form_ref = form_ref.clone();
            let session = session.clone();
            let is_mounted = is_mounted.clone();
            let pulse_target = pulse_target.clone();
            spawn_local(async move {
                let result = contact::submit(&data).await;
                if !is_mounted() {
                    log::info!("contact form unmounted before the relay answered; result dropped");
                    return;
                }
                match result {
                    Ok(()) => {
                        log::info!("contact form delivered");
                        form.set(ContactForm::default());
                        toast.set(Some(ToastMessage::success(SUCCESS_TEXT)));
                        if let Some(el) = form_ref.cast::<HtmlElement>() {
                            let target = reuse_target(&pulse_target, el);
                            with_session(&session, |s| {
                                s.tween(
                                    Tween::new(target)
                                        .from_to(Property::Opacity, 0.5, 1.0)
                                        .from_to(Property::Scale, 0.98, 1.0)
                                        .duration(0.4)
                                        .ease(Ease::POWER2_OUT),
                                );
                            });
                        }
                    }
                    Err(err) => {
                        gloo_console::error!(format!("contact form failed: {}", err));
                        toast.set(Some(ToastMessage::from(&err)));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let close_toast = {
        let toast = toast.clone();
        Callback::from(move |_: ()| toast.set(None))
    };

    let phone_hint = format!("{}/{}", form.phone.len(), PHONE_DIGITS);

    html! {
        <>
            if let Some(message) = (*toast).clone() {
                <Toast {message} on_close={close_toast} />
            }
            <section id="contact" class="contact-section" ref={root}>
                <div class="container">
                    <div class="contact-header">
                        <span class="contact-badge">
                            <span class="badge-dot"></span>
                            {"Get In Touch"}
                        </span>
                        <h2 class="contact-title">{"Let's Start a "}<span>{"Conversation"}</span></h2>
                        <p class="contact-subtitle">
                            {"Have a project in mind? We'd love to hear about it. Send us a message and we'll respond as soon as possible."}
                        </p>
                    </div>

                    <div class="contact-main">
                        <div class="contact-form-container">
                            <form ref={form_ref} {onsubmit} class="contact-form-modern" novalidate=true>
                                <div class="form-grid">
                                    <TextField
                                        field={Field::Name}
                                        label="Your Name"
                                        value={form.name.clone()}
                                        required=true
                                        on_change={on_change.clone()}
                                    />
                                    <TextField
                                        field={Field::Email}
                                        label="Email Address"
                                        kind="email"
                                        value={form.email.clone()}
                                        required=true
                                        on_change={on_change.clone()}
                                    />
                                    <TextField
                                        field={Field::Phone}
                                        label="Phone Number"
                                        kind="tel"
                                        value={form.phone.clone()}
                                        invalid={form.phone_incomplete()}
                                        hint={Some(AttrValue::from(phone_hint))}
                                        on_change={on_change.clone()}
                                    />
                                    <ServicePicker
                                        selected={form.service.clone()}
                                        on_change={on_change.clone()}
                                    />
                                </div>
                                <div class={classes!("form-field", "form-field-full", (!form.message.is_empty()).then(|| "focused"))}>
                                    <textarea
                                        id="message"
                                        name="message"
                                        rows="4"
                                        required=true
                                        value={form.message.clone()}
                                        oninput={on_message}
                                    ></textarea>
                                    <label for="message">{"Tell us about your project"}</label>
                                    <div class="field-line"></div>
                                </div>
                                <button
                                    type="submit"
                                    class={classes!("contact-submit-btn", (*submitting).then(|| "submitting"))}
                                    disabled={*submitting}
                                >
                                    <span class="btn-text">
                                        { if *submitting { "Sending..." } else { "Send Message" } }
                                    </span>
                                </button>
                            </form>
                        </div>

                        <div class="contact-info-side">
                            <div class="info-card">
                                <div class="info-card-header">
                                    <h3>{"Contact Information"}</h3>
                                    <p>{"Fill out the form and we'll be in touch within 24 hours"}</p>
                                </div>
                                <div class="info-items">
                                    <a href="mailto:zyntexinfosoft@gmail.com" class="info-item">
                                        <span class="info-label">{"Email"}</span>
                                        <span class="info-value">{"zyntexinfosoft@gmail.com"}</span>
                                    </a>
                                    <a href="tel:+919664747560" class="info-item">
                                        <span class="info-label">{"Phone"}</span>
                                        <span class="info-value">{"+91 96647 47560"}</span>
                                    </a>
                                    <div class="info-item">
                                        <span class="info-label">{"Location"}</span>
                                        <span class="info-value">{"Bhavnagar, Gujarat, India"}</span>
                                    </div>
                                    <div class="info-item">
                                        <span class="info-label">{"Working Hours"}</span>
                                        <span class="info-value">{"Mon - Sat, 10AM - 7PM IST"}</span>
                                    </div>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
                <style>
                    {r#"
                        .contact-section { position: relative; padding: 120px 0; }
                        .contact-main { display: grid; grid-template-columns: 3fr 2fr; gap: 32px; margin-top: 48px; }
                        .form-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
                        .form-field { position: relative; margin-bottom: 20px; }
                        .form-field input, .form-field textarea {
                            width: 100%;
                            padding: 18px 14px 8px;
                            border: 1px solid rgba(255, 255, 255, 0.12);
                            border-radius: 10px;
                            background: rgba(255, 255, 255, 0.04);
                            color: #fff;
                        }
                        .form-field label {
                            position: absolute;
                            left: 14px;
                            top: 14px;
                            color: #94a3b8;
                            pointer-events: none;
                            transition: all 0.2s ease;
                        }
                        .form-field.focused label { top: 4px; font-size: 0.75rem; color: #06b6d4; }
                        .form-field.has-error input { border-color: #ef4444; }
                        .phone-hint { position: absolute; right: 12px; top: 16px; font-size: 0.75rem; color: #64748b; }
                        .custom-dropdown {
                            display: flex;
                            justify-content: space-between;
                            padding: 18px 14px 8px;
                            border: 1px solid rgba(255, 255, 255, 0.12);
                            border-radius: 10px;
                            cursor: pointer;
                        }
                        .dropdown-arrow.rotated { transform: rotate(180deg); }
                        .dropdown-options {
                            display: none;
                            position: absolute;
                            z-index: 20;
                            left: 0;
                            right: 0;
                            margin-top: 6px;
                            border-radius: 10px;
                            background: #111827;
                        }
                        .dropdown-options.show { display: block; }
                        .dropdown-option { display: flex; gap: 10px; padding: 10px 14px; cursor: pointer; }
                        .dropdown-option.selected { color: #06b6d4; }
                        .contact-submit-btn.submitting { opacity: 0.7; cursor: wait; }
                        .info-item { display: flex; flex-direction: column; padding: 12px 0; color: inherit; text-decoration: none; }
                        @media (max-width: 900px) {
                            .contact-main, .form-grid { grid-template-columns: 1fr; }
                        }
                    "#}
                </style>
            </section>
        </>
    }
}
