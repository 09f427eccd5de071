//! Landing-page hero text.

use serde::{Deserialize, Serialize};

use super::validation::{Validate, optional, required};
use crate::Result;

/// Headline block of the landing page, including the phrases cycled by the
/// typewriter effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroText {
    #[serde(alias = "_id")]
    pub id: String,
    pub headline: String,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub typewriter_phrases: Vec<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHeroText {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    pub typewriter_phrases: Vec<String>,
    pub active: bool,
}

impl Validate for NewHeroText {
    fn validate(&self) -> Result<()> {
        required("headline", &self.headline, 300)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroTextPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typewriter_phrases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Validate for HeroTextPatch {
    fn validate(&self) -> Result<()> {
        optional(self.headline.as_deref(), |h| required("headline", h, 300))
    }
}
