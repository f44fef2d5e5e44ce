pub mod conversation;
pub mod responder;

pub use conversation::{ChatMessage, Conversation, Sender};
pub use responder::{respond, WELCOME};

/// Window event that opens the chat widget from anywhere on the page.
pub const OPEN_CHATBOT_EVENT: &str = "openChatbot";

/// Broadcasts [`OPEN_CHATBOT_EVENT`] on the window.
pub fn request_open() {
    let Some(window) = web_sys::window() else {
        return;
    };
    match web_sys::CustomEvent::new(OPEN_CHATBOT_EVENT) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(_) => gloo_console::error!("could not create openChatbot event"),
    }
}
