//! Contact and newsletter form validation.
//!
//! Nothing is sent anywhere; a valid form is only acknowledged locally.
use std::sync::LazyLock;

use regex::Regex;

use crate::error::QuoteError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Shown when any contact field is blank.
pub const MISSING_FIELDS: &str = "Please fill in all fields.";
/// Shown when the email does not look like `local@domain.tld`.
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
/// Shown after a contact form was accepted.
pub const THANKS: &str = "Thanks — your message was recorded locally.";

/// Contact form as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender's name.
    pub name: String,
    /// Reply address, checked by `validate_email`.
    pub email: String,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    /// Trim all fields and check them.
    ///
    /// Blank fields are reported before the email format.
    pub fn validate(&self) -> Result<ContactForm, QuoteError> {
        let form = ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
            return Err(QuoteError::Validation(MISSING_FIELDS.to_string()));
        }
        validate_email(&form.email)?;
        Ok(form)
    }
}

/// Newsletter sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Subscriber's address.
    pub email: String,
}

impl Subscription {
    /// Check and normalize the subscriber's address.
    pub fn validate(&self) -> Result<Subscription, QuoteError> {
        let email = self.email.trim();
        validate_email(email)?;
        Ok(Subscription {
            email: email.to_string(),
        })
    }
}

/// Basic `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> Result<(), QuoteError> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(QuoteError::Validation(INVALID_EMAIL.to_string()))
    }
}
