use thiserror::Error;

pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ContactError {
    #[error("Please fill in your {0}")]
    MissingField(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone { digits: usize },
    #[error("network error: {0}")]
    Network(String),
    #[error("relay rejected the message: {0}")]
    Rejected(String),
    #[error("unreadable relay response: {0}")]
    Decode(String),
}

impl ContactError {
    /// Text shown in the error toast. Validation errors explain themselves;
    /// transport failures get a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            ContactError::MissingField(_) | ContactError::InvalidEmail | ContactError::InvalidPhone { .. } => {
                self.to_string()
            }
            _ => "Something went wrong. Please try again or contact us directly.".to_string(),
        }
    }
}

/// A selectable entry in the service dropdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ServiceOption {
    pub value: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

pub const SERVICE_OPTIONS: &[ServiceOption] = &[
    ServiceOption { value: "Web Development", icon: "🌐", label: "Web Development" },
    ServiceOption { value: "Mobile App", icon: "📱", label: "Mobile App Development" },
    ServiceOption { value: "UI/UX Design", icon: "🎨", label: "UI/UX Design" },
    ServiceOption { value: "Cloud Solutions", icon: "☁️", label: "Cloud Solutions" },
    ServiceOption { value: "AI & ML", icon: "🤖", label: "AI & Machine Learning" },
    ServiceOption { value: "Cybersecurity", icon: "🔒", label: "Cybersecurity" },
    ServiceOption { value: "Consulting", icon: "💼", label: "Consulting" },
    ServiceOption { value: "Other", icon: "✨", label: "Other" },
];

pub fn service_option(value: &str) -> Option<&'static ServiceOption> {
    SERVICE_OPTIONS.iter().find(|o| o.value == value)
}

/// Keeps digits only, at most ten. Applied on every keystroke.
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect()
}

/// Shape check standing in for the browser's `type="email"` validation,
/// which the form turns off: `local@domain.tld`, no spaces.
pub fn looks_like_email(input: &str) -> bool {
    let email = input.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Service,
    Message,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactForm {
    pub fn update(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = sanitize_phone(&value),
            Field::Service => self.service = value,
            Field::Message => self.message = value,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Service => &self.service,
            Field::Message => &self.message,
        }
    }

    /// True while a partially typed phone number would be rejected.
    pub fn phone_incomplete(&self) -> bool {
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        digits > 0 && digits != PHONE_DIGITS
    }

    /// The phone is optional; when given it must be exactly ten digits.
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, label) in [(&self.name, "name"), (&self.email, "email"), (&self.message, "message")] {
            if field.trim().is_empty() {
                return Err(ContactError::MissingField(label));
            }
        }
        if !looks_like_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits > 0 && digits != PHONE_DIGITS {
            return Err(ContactError::InvalidPhone { digits });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: String::new(),
            service: String::new(),
            message: "Need a dashboard".into(),
        }
    }

    #[test]
    fn sanitize_strips_and_truncates() {
        assert_eq!(sanitize_phone("(966) 474-7560"), "9664747560");
        assert_eq!(sanitize_phone("+91 96647 47560"), "9196647475");
        assert_eq!(sanitize_phone("abc"), "");
    }

    #[test]
    fn ten_digits_pass() {
        let mut form = filled();
        form.update(Field::Phone, "96647 47560".into());
        assert_eq!(form.phone, "9664747560");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn wrong_length_phone_is_rejected() {
        for raw in ["1", "123456789", "12-34"] {
            let mut form = filled();
            form.phone = raw.into();
            assert!(matches!(form.validate(), Err(ContactError::InvalidPhone { .. })), "{}", raw);
        }
        let mut form = filled();
        form.phone = "123456789012".into();
        assert_eq!(form.validate(), Err(ContactError::InvalidPhone { digits: 12 }));
    }

    #[test]
    fn phone_is_optional() {
        assert_eq!(filled().validate(), Ok(()));
        assert!(!filled().phone_incomplete());
    }

    #[test]
    fn required_fields_are_checked_in_order() {
        let mut form = filled();
        form.email = "  ".into();
        form.message.clear();
        assert_eq!(form.validate(), Err(ContactError::MissingField("email")));
    }

    #[test]
    fn malformed_email_is_rejected() {
        for raw in ["not an email", "asha@", "@example.com", "asha@example", "asha@@example.com", "asha@example..com"] {
            let mut form = filled();
            form.email = raw.into();
            assert_eq!(form.validate(), Err(ContactError::InvalidEmail), "{}", raw);
        }
        let mut form = filled();
        form.email = "  asha.k+site@mail.example.co  ".into();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn validation_errors_are_shown_verbatim() {
        let err = ContactError::InvalidPhone { digits: 4 };
        assert_eq!(err.user_message(), "Please enter a valid 10-digit phone number");
        assert_eq!(ContactError::InvalidEmail.user_message(), "Please enter a valid email address");
        let net = ContactError::Network("offline".into());
        assert!(net.user_message().starts_with("Something went wrong"));
    }

    #[test]
    fn service_lookup() {
        assert_eq!(service_option("AI & ML").map(|o| o.label), Some("AI & Machine Learning"));
        assert!(service_option("Plumbing").is_none());
    }
}
