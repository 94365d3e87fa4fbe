//! # Contact Form
//!
//! Client-side validation and a simulated submit:
//!
//! ```text
//!   Idle ──submit (valid)──> Sending { until } ──deadline──> Idle (fields cleared)
//!    │                          │
//!    └─submit (invalid)─> Err   └─submit─> Err(AlreadySending)
//! ```

use std::time::Duration;

use regex::Regex;

use crate::error::{FormError, PageResult};

/// Email shape: something, `@`, something, `.`, something. No whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Submit button label while idle.
pub const SUBMIT_LABEL: &str = "Send Message";

/// Submit button label while sending.
pub const SENDING_LABEL: &str = "Sending...";

/// Notice shown once the simulated send completes.
pub const THANK_YOU: &str = "Thank you for your message! I'll get back to you soon.";

/// Form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Submission state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    /// Waiting for input.
    Idle,
    /// Simulated send in flight.
    Sending {
        /// When the send completes.
        until: Duration,
    },
}

/// Submit button look.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitButton {
    /// Button text.
    pub label: &'static str,
    /// Disabled while sending.
    pub disabled: bool,
}

/// The contact form.
#[derive(Clone, Debug)]
pub struct ContactForm {
    fields: ContactFields,
    state: FormState,
    email_pattern: Regex,
    submit_delay: Duration,
}

impl ContactForm {
    /// Creates an empty form.
    ///
    /// # Errors
    ///
    /// Returns `Pattern` if the email pattern fails to compile.
    pub fn new(submit_delay: Duration) -> PageResult<Self> {
        Ok(Self {
            fields: ContactFields::default(),
            state: FormState::Idle,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
            submit_delay,
        })
    }

    /// Replaces the field values.
    pub fn fill(&mut self, fields: ContactFields) {
        self.fields = fields;
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state
    }

    /// True for a plausible email address.
    #[must_use]
    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email_pattern.is_match(email)
    }

    /// Checks the fields without submitting.
    ///
    /// # Errors
    ///
    /// `MissingFields` if any field is empty, else `InvalidEmail` if the
    /// email does not match `EMAIL_PATTERN`.
    pub fn validate(&self) -> Result<(), FormError> {
        let f = &self.fields;
        if f.name.is_empty() || f.email.is_empty() || f.message.is_empty() {
            return Err(FormError::MissingFields);
        }
        if !self.is_valid_email(&f.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Validates and starts the simulated send.
    ///
    /// Returns the deadline at which `complete` should be called.
    ///
    /// # Errors
    ///
    /// `AlreadySending` while a send is in flight, otherwise as `validate`.
    pub fn submit(&mut self, now: Duration) -> Result<Duration, FormError> {
        if matches!(self.state, FormState::Sending { .. }) {
            return Err(FormError::AlreadySending);
        }
        self.validate()?;
        let until = now + self.submit_delay;
        self.state = FormState::Sending { until };
        tracing::info!(until_ms = until.as_millis() as u64, "contact form sending");
        Ok(until)
    }

    /// Finishes the send: clears the fields and re-enables the button.
    ///
    /// Returns `false` if no send was in flight.
    pub fn complete(&mut self) -> bool {
        if self.state == FormState::Idle {
            return false;
        }
        self.state = FormState::Idle;
        self.fields = ContactFields::default();
        tracing::info!("contact form sent");
        true
    }

    /// Current submit button look.
    #[must_use]
    pub fn button(&self) -> SubmitButton {
        match self.state {
            FormState::Idle => SubmitButton {
                label: SUBMIT_LABEL,
                disabled: false,
            },
            FormState::Sending { .. } => SubmitButton {
                label: SENDING_LABEL,
                disabled: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    fn form() -> ContactForm {
        ContactForm::new(Duration::from_millis(2000)).unwrap()
    }

    #[test]
    fn test_email_pattern() {
        let f = form();
        assert!(f.is_valid_email("a@b.co"));
        assert!(f.is_valid_email("first.last@mail.example.org"));
        assert!(!f.is_valid_email("a@b"));
        assert!(!f.is_valid_email("a b@c.de"));
        assert!(!f.is_valid_email("@b.co"));
        assert!(!f.is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_missing_fields_first() {
        let mut f = form();
        f.fill(fields("", "not an email", "hi"));
        assert_eq!(f.validate(), Err(FormError::MissingFields));
        assert_eq!(FormError::MissingFields.to_string(), "Please fill in all fields.");
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        let mut f = form();
        f.fill(fields(" ", "a@b.co", " "));
        assert_eq!(f.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_email() {
        let mut f = form();
        f.fill(fields("Ada", "ada@home", "hello"));
        assert_eq!(f.submit(Duration::ZERO), Err(FormError::InvalidEmail));
        assert_eq!(f.state(), FormState::Idle);
    }

    #[test]
    fn test_submit_cycle() {
        let mut f = form();
        f.fill(fields("Ada", "ada@example.com", "hello"));

        let until = f.submit(Duration::from_millis(500)).unwrap();
        assert_eq!(until, Duration::from_millis(2500));
        assert_eq!(f.button(), SubmitButton { label: SENDING_LABEL, disabled: true });
        assert_eq!(f.submit(Duration::from_millis(600)), Err(FormError::AlreadySending));

        assert!(f.complete());
        assert_eq!(f.fields(), &ContactFields::default());
        assert_eq!(f.button().label, SUBMIT_LABEL);
        assert!(!f.complete());
    }
}
