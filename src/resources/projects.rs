//! Projects client.

use serde_json::Value;

use super::{ProjectsApi, Resource};
use crate::Result;
use crate::cache::Params;
use crate::types::{NewProject, Project, ProjectPatch};

impl Resource for Project {
    const NAMESPACE: &'static str = "projects";
    const PATH: &'static str = "/projects";
    type Draft = NewProject;
    type Patch = ProjectPatch;
}

impl ProjectsApi {
    /// Projects flagged for the landing page.
    pub async fn get_featured(&self) -> Result<Vec<Project>> {
        self.fetch(
            "getFeatured",
            Params::new(),
            format!("{}/featured", Project::PATH),
            Params::new(),
        )
        .await
    }

    /// Projects in one category (e.g. "web", "mobile").
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Project>> {
        let mut params = Params::new();
        params.insert("category".into(), Value::from(category));
        self.fetch("getByCategory", params.clone(), Project::PATH.to_string(), params)
            .await
    }
}
