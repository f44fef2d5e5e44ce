use std::cell::Cell;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::TOAST_DISMISS_MS;
use crate::contact::ContactError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

thread_local! {
    static NEXT_TOAST_ID: Cell<u64> = Cell::new(0);
}

/// Every message gets its own id, so showing the same text twice still
/// counts as a new toast.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    fn new(kind: ToastKind, text: String) -> Self {
        let id = NEXT_TOAST_ID.with(|next| {
            next.set(next.get() + 1);
            next.get()
        });
        Self { id, kind, text }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, text.into())
    }
}

impl From<&ContactError> for ToastMessage {
    fn from(err: &ContactError) -> Self {
        ToastMessage::error(err.user_message())
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: ToastMessage,
    pub on_close: Callback<()>,
}

/// Slide-in notification. Closes itself after a few seconds; a new message
/// restarts the countdown.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(TOAST_DISMISS_MS, move || on_close.emit(()));
                // Dropping the handle cancels it if the toast goes first.
                move || drop(timeout)
            },
            props.message.id,
        );
    }

    let (class, icon) = match props.message.kind {
        ToastKind::Success => ("toast toast-success", "✓"),
        ToastKind::Error => ("toast toast-error", "!"),
    };
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={class} role="status">
            <span class="toast-icon">{icon}</span>
            <p class="toast-text">{&props.message.text}</p>
            <button class="toast-close" onclick={close} aria-label="Dismiss">{"×"}</button>
            <style>
                {r#"
                    .toast {
                        position: fixed;
                        right: 24px;
                        bottom: 24px;
                        z-index: 1200;
                        display: flex;
                        align-items: center;
                        gap: 12px;
                        max-width: 360px;
                        padding: 14px 18px;
                        border-radius: 12px;
                        color: #fff;
                        backdrop-filter: blur(8px);
                        animation: toastIn 0.3s ease-out;
                    }
                    .toast-success { background: rgba(16, 185, 129, 0.9); }
                    .toast-error { background: rgba(239, 68, 68, 0.9); }
                    .toast-text { margin: 0; flex: 1; }
                    .toast-close {
                        background: none;
                        border: none;
                        color: inherit;
                        font-size: 20px;
                        cursor: pointer;
                    }
                    @keyframes toastIn {
                        from { transform: translateY(20px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                "#}
            </style>
        </div>
    }
}
