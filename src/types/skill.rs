//! Skills shown on the public site.

use serde::{Deserialize, Serialize};

use super::validation::{Validate, at_most, optional, required};
use crate::Result;

/// Highest proficiency level.
pub const MAX_LEVEL: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Proficiency, 0–100.
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewSkill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NewSkill {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level,
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl Validate for NewSkill {
    fn validate(&self) -> Result<()> {
        required("name", &self.name, 100)?;
        at_most("level", self.level, MAX_LEVEL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Validate for SkillPatch {
    fn validate(&self) -> Result<()> {
        optional(self.name.as_deref(), |n| required("name", n, 100))?;
        self.level
            .map_or(Ok(()), |level| at_most("level", level, MAX_LEVEL))
    }
}
