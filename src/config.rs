#[cfg(debug_assertions)]
pub fn get_form_relay_url() -> &'static str {
    "http://localhost:3001/submit"  // Local mock relay while developing
}

#[cfg(not(debug_assertions))]
pub fn get_form_relay_url() -> &'static str {
    "https://api.web3forms.com/submit"
}

// Public key; the relay only uses it to pick the inbox.
pub const FORM_ACCESS_KEY: &str = "840a0115-c932-4b3c-a1e9-4dcbb1bea623";
pub const FORM_FROM_NAME: &str = "Zyntex Website";

pub const PRELOADER_HOLD_MS: u32 = 5_000;
pub const PRELOADER_FADE_MS: u32 = 800;
pub const PRELOADER_TIMEOUT_MS: u32 = 8_000;

pub const CHATBOT_THINKING_MS: u32 = 1_000;
pub const CHATBOT_CLOSE_MS: u32 = 300;

pub const TOAST_DISMISS_MS: u32 = 5_000;

// Scroll offset for anchor jumps, the fixed header's height.
pub const NAV_OFFSET_PX: f64 = 80.0;
pub const NAV_SCROLLED_AFTER_PX: f64 = 100.0;
