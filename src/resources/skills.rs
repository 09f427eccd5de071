//! Skills client.

use serde_json::Value;

use super::{Resource, SkillsApi};
use crate::Result;
use crate::cache::Params;
use crate::types::{NewSkill, Skill, SkillPatch};

impl Resource for Skill {
    const NAMESPACE: &'static str = "skills";
    const PATH: &'static str = "/skills";
    type Draft = NewSkill;
    type Patch = SkillPatch;
}

impl SkillsApi {
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Skill>> {
        let mut params = Params::new();
        params.insert("category".into(), Value::from(category));
        self.fetch("getByCategory", params.clone(), Skill::PATH.to_string(), params)
            .await
    }
}
