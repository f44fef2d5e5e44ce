use std::rc::Rc;

use chrono::Local;
use web_sys::{Element, HtmlElement, HtmlInputElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::animation::dom::{reuse_target, ElementTarget};
use crate::animation::hook::{with_session, SessionSlot};
use crate::animation::{use_animation_session, Ease, Property, Tween};
use crate::chatbot::{respond, Conversation, Sender, OPEN_CHATBOT_EVENT, WELCOME};
use crate::config::{CHATBOT_CLOSE_MS, CHATBOT_THINKING_MS};

/// Runs `f` after `ms` on the widget's session so unmounting cancels it.
/// Nothing is scheduled while no session is mounted.
fn later(slot: &SessionSlot, ms: u32, f: impl FnOnce() + 'static) {
    with_session(slot, |session| session.after(ms as f64 / 1000.0, f));
}

/// Numbers close requests. Opening bumps the count, so a close that was
/// still waiting on its animation sees it is stale and leaves the window
/// open.
#[derive(Debug, Default)]
struct CloseTicket(u64);

impl CloseTicket {
    fn start_close(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    fn reopen(&mut self) {
        self.0 += 1;
    }

    fn still_closing(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

fn seeded() -> Conversation {
    let mut conversation = Conversation::new();
    conversation.push(Sender::Bot, WELCOME, Local::now());
    conversation
}

#[function_component(ChatWidget)]
pub fn chat_widget() -> Html {
    let root = use_node_ref();
    let window_ref = use_node_ref();
    let end_ref = use_node_ref();
    let open = use_state(|| false);
    let closing = use_state(|| false);
    let thinking = use_state(|| false);
    let input = use_state(String::new);
    let conversation = use_mut_ref(seeded);
    let redraw = use_force_update();
    let close_ticket = use_mut_ref(CloseTicket::default);
    let pop_target = use_mut_ref(|| None::<Rc<ElementTarget>>);

    let session = use_animation_session("chatbot", root.clone(), |_, _| {});

    {
        let open = open.clone();
        let closing = closing.clone();
        let close_ticket = close_ticket.clone();
        use_event_with_window(OPEN_CHATBOT_EVENT, move |_: Event| {
            log::info!("chat opened from page");
            close_ticket.borrow_mut().reopen();
            closing.set(false);
            open.set(true);
        });
    }

    // Pop the window in each time it opens.
    {
        let window_ref = window_ref.clone();
        let session = session.clone();
        let pop_target = pop_target.clone();
        use_effect_with_deps(
            move |is_open| {
                if *is_open {
                    if let Some(el) = window_ref.cast::<HtmlElement>() {
                        let target = reuse_target(&pop_target, el);
                        with_session(&session, |s| {
                            s.tween(
                                Tween::new(target)
                                    .from(Property::Opacity, 0.0)
                                    .from(Property::Scale, 0.9)
                                    .from(Property::Y, 20.0)
                                    .duration(0.3)
                                    .ease(Ease::POWER2_OUT),
                            );
                        });
                    }
                }
                || ()
            },
            *open,
        );
    }

    // Keep the newest message in view.
    {
        let end_ref = end_ref.clone();
        let count = conversation.borrow().len();
        use_effect_with_deps(
            move |_| {
                if let Some(end) = end_ref.cast::<Element>() {
                    end.scroll_into_view();
                }
                || ()
            },
            (count, *open, *thinking),
        );
    }

    let toggle = {
        let open = open.clone();
        let closing = closing.clone();
        let session = session.clone();
        let close_ticket = close_ticket.clone();
        Callback::from(move |_: MouseEvent| {
            if *closing {
                return;
            }
            if !*open {
                close_ticket.borrow_mut().reopen();
                open.set(true);
                return;
            }
            closing.set(true);
            let ticket = close_ticket.borrow_mut().start_close();
            let open = open.clone();
            let closing = closing.clone();
            let close_ticket = close_ticket.clone();
            later(&session, CHATBOT_CLOSE_MS, move || {
                if !close_ticket.borrow().still_closing(ticket) {
                    return;
                }
                open.set(false);
                closing.set(false);
            });
        })
    };

    let oninput = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let el: HtmlInputElement = e.target_unchecked_into();
            input.set(el.value());
        })
    };

    let onsubmit = {
        let input = input.clone();
        let thinking = thinking.clone();
        let conversation = conversation.clone();
        let redraw = redraw.clone();
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = input.trim().to_string();
            if text.is_empty() {
                return;
            }
            conversation.borrow_mut().push(Sender::User, text.as_str(), Local::now());
            input.set(String::new());
            thinking.set(true);
            redraw.force_update();

            let thinking = thinking.clone();
            let conversation = conversation.clone();
            let redraw = redraw.clone();
            later(&session, CHATBOT_THINKING_MS, move || {
                conversation.borrow_mut().push(Sender::Bot, respond(&text), Local::now());
                thinking.set(false);
                redraw.force_update();
            });
        })
    };

    let showing = *open || *closing;
    let can_send = !input.trim().is_empty();

    html! {
        <div class="chatbot-container" ref={root}>
            if showing {
                <div ref={window_ref} class={classes!("chatbot-window", (*closing).then(|| "closing"))}>
                    <div class="chat-header">
                        <div class="chat-header-info">
                            <div class="bot-avatar">
                                {"🤖"}
                                <div class="bot-status-dot"></div>
                            </div>
                            <div class="chat-title">
                                <h3>{"Zyntex AI"}</h3>
                                <p>{"Online"}</p>
                            </div>
                        </div>
                        <button class="close-btn" onclick={toggle.clone()} aria-label="Close chat">{"×"}</button>
                    </div>
                    <div class="chat-messages">
                        {
                            conversation.borrow().messages().iter().map(|msg| html! {
                                <div key={msg.id()} class={classes!("message", msg.sender().css_class())}>
                                    <div class="message-content">{msg.text()}</div>
                                    <span class="message-time">{msg.timestamp()}</span>
                                </div>
                            }).collect::<Html>()
                        }
                        if *thinking {
                            <div class="message bot typing">
                                <div class="message-content">
                                    <span class="dot"></span><span class="dot"></span><span class="dot"></span>
                                </div>
                            </div>
                        }
                        <div ref={end_ref}></div>
                    </div>
                    <form class="chat-input-area" {onsubmit}>
                        <input
                            type="text"
                            class="chat-input"
                            placeholder="Type a message..."
                            value={(*input).clone()}
                            {oninput}
                        />
                        <button type="submit" class="send-btn" disabled={!can_send}>{"➤"}</button>
                    </form>
                </div>
            }
            <button class="chatbot-toggle" onclick={toggle}>
                <div class={classes!("chatbot-icon", (*open).then(|| "open"))}>
                    { if *open { "×" } else { "🤖" } }
                </div>
                if !*open {
                    <span class="chatbot-text">{"Zyntex Bot"}</span>
                }
            </button>
            <style>
                {r#"
                    .chatbot-container { position: fixed; right: 24px; bottom: 24px; z-index: 1100; }
                    .chatbot-window {
                        position: absolute;
                        right: 0;
                        bottom: 72px;
                        width: 360px;
                        max-height: 520px;
                        display: flex;
                        flex-direction: column;
                        border-radius: 16px;
                        background: #0f172a;
                        box-shadow: 0 20px 50px rgba(0, 0, 0, 0.5);
                        overflow: hidden;
                    }
                    .chatbot-window.closing { animation: chatOut 0.3s ease forwards; }
                    .chat-header { display: flex; justify-content: space-between; padding: 14px 16px; background: linear-gradient(90deg, #06b6d4, #8b5cf6); }
                    .chat-header-info { display: flex; gap: 10px; align-items: center; }
                    .chat-title h3 { margin: 0; font-size: 1rem; }
                    .chat-title p { margin: 0; font-size: 0.75rem; opacity: 0.8; }
                    .close-btn { background: none; border: none; color: #fff; font-size: 22px; cursor: pointer; }
                    .chat-messages { flex: 1; overflow-y: auto; padding: 16px; display: flex; flex-direction: column; gap: 10px; }
                    .message { max-width: 80%; display: flex; flex-direction: column; }
                    .message.user { align-self: flex-end; align-items: flex-end; }
                    .message.bot { align-self: flex-start; }
                    .message-content { padding: 10px 14px; border-radius: 14px; background: rgba(255, 255, 255, 0.08); }
                    .message.user .message-content { background: #06b6d4; color: #001018; }
                    .message-time { font-size: 0.7rem; opacity: 0.6; margin-top: 2px; }
                    .typing .dot { display: inline-block; width: 6px; height: 6px; margin: 0 2px; border-radius: 50%; background: #94a3b8; animation: blink 1s infinite; }
                    .chat-input-area { display: flex; gap: 8px; padding: 12px; border-top: 1px solid rgba(255, 255, 255, 0.08); }
                    .chat-input { flex: 1; padding: 10px 12px; border-radius: 10px; border: none; background: rgba(255, 255, 255, 0.06); color: #fff; }
                    .send-btn:disabled { opacity: 0.4; }
                    .chatbot-toggle { display: flex; align-items: center; gap: 8px; padding: 12px 18px; border: none; border-radius: 999px; background: linear-gradient(90deg, #06b6d4, #8b5cf6); color: #fff; cursor: pointer; }
                    @keyframes chatOut { to { opacity: 0; transform: translateY(20px) scale(0.95); } }
                    @keyframes blink { 50% { opacity: 0.3; } }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_finishes_when_nothing_intervenes() {
        let mut tickets = CloseTicket::default();
        let ticket = tickets.start_close();
        assert!(tickets.still_closing(ticket));
    }

    #[test]
    fn reopening_cancels_a_pending_close() {
        let mut tickets = CloseTicket::default();
        let ticket = tickets.start_close();
        tickets.reopen();
        assert!(!tickets.still_closing(ticket));

        let next = tickets.start_close();
        assert!(!tickets.still_closing(ticket));
        assert!(tickets.still_closing(next));
    }
}
