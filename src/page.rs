//! The bits of page markup the form controller reads and writes: the two
//! signup forms and the counter nodes. The page layout itself is someone
//! else's job.

use crate::domain::is_valid_email;
use crate::domain::trim_email_input;

pub const BORDER_NEUTRAL: &str = "var(--border-color)";
pub const BORDER_FOCUS: &str = "var(--accent-primary)";
pub const BORDER_VALID: &str = "var(--accent-success)";
pub const BORDER_INVALID: &str = "var(--accent-error)";

/// Inline feedback for an email field, derived from its value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFeedback {
    Neutral,
    Valid,
    Invalid,
}

impl FieldFeedback {
    pub fn for_input(value: &str) -> Self {
        let email = trim_email_input(value);
        if email.is_empty() {
            Self::Neutral
        } else if is_valid_email(email) {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    pub fn border_color(&self) -> &'static str {
        match self {
            Self::Neutral => BORDER_NEUTRAL,
            Self::Valid => BORDER_VALID,
            Self::Invalid => BORDER_INVALID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailInput {
    pub value: String,
    pub border_color: String,
}

/// The form's submit button. `label` is markup (it may hold a spinner icon).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub input: EmailInput,
    pub submit: SubmitControl,
}

impl FormState {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            input: EmailInput {
                value: String::new(),
                border_color: BORDER_NEUTRAL.to_string(),
            },
            submit: SubmitControl {
                label: submit_label.into(),
                disabled: false,
            },
        }
    }
}
