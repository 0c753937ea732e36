// Contact and newsletter form handlers
//
// Validation mirrors the page rules: required fields must be non-blank and
// email fields must match the address pattern. Handlers record the submit
// outcome and surface the result through a toast; the event order (submit,
// toast, failure / submit, payload, toast) is part of the recorded shape.

use crate::session::{self, SharedSession};
use crate::ui::toast::ToastRack;
use anyhow::Result;
use regex::Regex;
use serde_json::json;

/// One local part, one domain with a dot, no whitespace anywhere
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub struct FormValidator {
    email: Regex,
}

impl FormValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    /// Names of contact-form fields that fail validation, empty when valid
    pub fn contact_errors(&self, form: &ContactForm) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if form.name.trim().is_empty() {
            errors.push("name");
        }
        if form.email.trim().is_empty() || !self.is_valid_email(&form.email) {
            errors.push("email");
        }
        if form.message.trim().is_empty() {
            errors.push("message");
        }
        errors
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub budget: String,
    pub message: String,
}

pub struct ContactFormHandler {
    session: SharedSession,
    validator: FormValidator,
}

impl ContactFormHandler {
    pub fn new(session: SharedSession) -> Result<Self> {
        Ok(Self {
            session,
            validator: FormValidator::new()?,
        })
    }

    /// Returns true when the submission was accepted
    pub fn submit(&self, form: &ContactForm, toasts: &mut ToastRack) -> bool {
        session::record(&self.session, "contact_form_submitted");

        if !self.validator.contact_errors(form).is_empty() {
            toasts.error("Please fix the errors in the form");
            session::record(&self.session, "contact_form_validation_failed");
            return false;
        }

        let company = if form.company.is_empty() {
            "Not provided"
        } else {
            form.company.as_str()
        };
        session::record_with(
            &self.session,
            "contact_form_valid_submission",
            json!({
                "name": form.name,
                "email": form.email,
                "company": company,
                "budget": form.budget,
                "message": form.message,
            }),
        );
        toasts.success(&format!(
            "Thank you, {}! We'll be in touch shortly.",
            form.name
        ));
        true
    }
}

pub struct NewsletterSignup {
    session: SharedSession,
    validator: FormValidator,
}

impl NewsletterSignup {
    pub fn new(session: SharedSession) -> Result<Self> {
        Ok(Self {
            session,
            validator: FormValidator::new()?,
        })
    }

    /// Returns true when the address was accepted
    pub fn submit(&self, email: &str, toasts: &mut ToastRack) -> bool {
        if !self.validator.is_valid_email(email) {
            toasts.error("Please enter a valid email");
            session::record_with(
                &self.session,
                "newsletter_invalid_email",
                json!({ "email": email }),
            );
            return false;
        }
        session::record_with(&self.session, "newsletter_signup", json!({ "email": email }));
        toasts.success("✓ Subscribed! Check your inbox.");
        true
    }
}
