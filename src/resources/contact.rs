//! Contact messages client.

use reqwest::Method;
use serde_json::{Value, json};

use super::{ContactMessagesApi, Resource, segment};
use crate::cache::Params;
use crate::types::{ContactMessage, ContactMessagePatch, NewContactMessage};
use crate::{ApiError, Result};

impl Resource for ContactMessage {
    const NAMESPACE: &'static str = "contact-messages";
    const PATH: &'static str = "/contact-messages";
    type Draft = NewContactMessage;
    type Patch = ContactMessagePatch;
}

impl ContactMessagesApi {
    /// Messages the admin has not opened yet.
    pub async fn get_unread(&self) -> Result<Vec<ContactMessage>> {
        let mut params = Params::new();
        params.insert("read".into(), Value::Bool(false));
        self.fetch("getUnread", params.clone(), ContactMessage::PATH.to_string(), params)
            .await
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<ContactMessage> {
        if id.trim().is_empty() {
            return Err(ApiError::validation("id", "is required"));
        }
        self.write(
            "markAsRead",
            Method::PATCH,
            format!("{}/{}/read", ContactMessage::PATH, segment(id)),
            None,
        )
        .await
    }

    pub async fn batch_mark_as_read(&self, ids: &[String]) -> Result<()> {
        require_ids(ids)?;
        self.write::<Value>(
            "batchMarkAsRead",
            Method::PATCH,
            format!("{}/batch/read", ContactMessage::PATH),
            Some(json!({ "ids": ids })),
        )
        .await
        .map(|_| ())
    }

    pub async fn batch_delete(&self, ids: &[String]) -> Result<()> {
        require_ids(ids)?;
        self.write::<Value>(
            "batchDelete",
            Method::POST,
            format!("{}/batch/delete", ContactMessage::PATH),
            Some(json!({ "ids": ids })),
        )
        .await
        .map(|_| ())
    }
}

fn require_ids(ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(ApiError::validation("ids", "at least one id is required"));
    }
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ApiError::validation("ids", "ids must not be blank"));
    }
    Ok(())
}
