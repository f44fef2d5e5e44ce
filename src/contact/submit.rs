use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use super::form::{ContactError, ContactForm};
use crate::config;

/// JSON body expected by the form relay.
#[derive(Debug, Serialize, PartialEq)]
pub struct RelayPayload {
    pub access_key: String,
    pub from_name: String,
    pub subject: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl RelayPayload {
    pub fn from_form(form: &ContactForm) -> Self {
        let phone: String = form.phone.chars().filter(|c| c.is_ascii_digit()).collect();
        Self {
            access_key: config::FORM_ACCESS_KEY.to_string(),
            from_name: config::FORM_FROM_NAME.to_string(),
            subject: format!("New Inquiry from {}", form.name.trim()),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: if phone.is_empty() { "Not provided".to_string() } else { phone },
            service: if form.service.is_empty() {
                "General Inquiry".to_string()
            } else {
                form.service.clone()
            },
            message: form.message.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayResponse {
    pub fn into_result(self) -> Result<(), ContactError> {
        if self.success {
            Ok(())
        } else {
            Err(ContactError::Rejected(self.message.unwrap_or_else(|| "no reason given".to_string())))
        }
    }
}

/// Validates and posts the form. Success is whatever the relay's
/// `success` flag says, regardless of HTTP status.
pub async fn submit(form: &ContactForm) -> Result<(), ContactError> {
    form.validate()?;
    let payload = RelayPayload::from_form(form);

    let response = Request::post(config::get_form_relay_url())
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .json(&payload)
        .map_err(|e| ContactError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ContactError::Network(e.to_string()))?;

    response
        .json::<RelayResponse>()
        .await
        .map_err(|e| ContactError::Decode(e.to_string()))?
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: " Ravi ".into(),
            email: "ravi@example.com".into(),
            phone: "9664747560".into(),
            service: String::new(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn payload_matches_relay_fields() {
        let value = serde_json::to_value(RelayPayload::from_form(&form())).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in ["access_key", "from_name", "subject", "name", "email", "phone", "service", "message"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(value["subject"], "New Inquiry from Ravi");
        assert_eq!(value["phone"], "9664747560");
        assert_eq!(value["service"], "General Inquiry");
    }

    #[test]
    fn empty_phone_is_marked_not_provided() {
        let mut f = form();
        f.phone.clear();
        f.service = "Consulting".into();
        let payload = RelayPayload::from_form(&f);
        assert_eq!(payload.phone, "Not provided");
        assert_eq!(payload.service, "Consulting");
    }

    #[test]
    fn relay_flag_decides_outcome() {
        let ok: RelayResponse = serde_json::from_str(r#"{"success": true, "message": "Email sent"}"#).unwrap();
        assert_eq!(ok.into_result(), Ok(()));
        let bad: RelayResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(matches!(bad.into_result(), Err(ContactError::Rejected(_))));
    }
}
