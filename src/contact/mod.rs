pub mod form;
pub mod submit;

pub use form::{ContactError, ContactForm, Field, SERVICE_OPTIONS};
pub use submit::submit;
