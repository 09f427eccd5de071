//! Contact form messages.

use serde::{Deserialize, Serialize};

use super::validation::{Validate, email, length};
use crate::Result;

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Contact form submission.
///
/// `name` 2–100 characters, `email` a valid address, `subject` at most 200
/// characters, `message` 10–5,000 characters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: None,
            message: message.into(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl Validate for NewContactMessage {
    fn validate(&self) -> Result<()> {
        length("name", &self.name, 2, 100)?;
        email("email", &self.email)?;
        if let Some(subject) = &self.subject {
            length("subject", subject, 0, 200)?;
        }
        length("message", &self.message, 10, 5_000)
    }
}

/// Admin-side update of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactMessagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
}

impl Validate for ContactMessagePatch {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
