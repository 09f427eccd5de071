//! Application-wide API handle.
//!
//! [`PortfolioApi`] owns the single [`ApiOptimizer`] of the process and hands
//! it to every resource client, so all clients share one cache, one
//! in-flight registry and one latency ledger.

mod builder;

pub use builder::PortfolioApiBuilder;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::optimizer::ApiOptimizer;
use crate::resources::{
    BlogPostsApi, ContactMessagesApi, HeroTextApi, ProjectsApi, ResourceClient, SkillsApi,
};
use crate::transport::Transport;
use crate::Result;

/// Entry point bundling every resource client.
#[derive(Clone)]
pub struct PortfolioApi {
    optimizer: ApiOptimizer,
    projects: ProjectsApi,
    blog_posts: BlogPostsApi,
    contact_messages: ContactMessagesApi,
    skills: SkillsApi,
    hero: HeroTextApi,
}

impl PortfolioApi {
    /// Create a new builder.
    pub fn builder() -> PortfolioApiBuilder {
        PortfolioApiBuilder::new()
    }

    /// Build from a config file and the environment (see [`ClientConfig::load`]).
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::load(None)?;
        PortfolioApiBuilder::from_config(&config).build()
    }

    /// Wire every client to `transport` and `optimizer`.
    pub fn new(transport: Arc<dyn Transport>, optimizer: ApiOptimizer) -> Self {
        Self {
            projects: ResourceClient::new(Arc::clone(&transport), optimizer.clone()),
            blog_posts: ResourceClient::new(Arc::clone(&transport), optimizer.clone()),
            contact_messages: ResourceClient::new(Arc::clone(&transport), optimizer.clone()),
            skills: ResourceClient::new(Arc::clone(&transport), optimizer.clone()),
            hero: ResourceClient::new(transport, optimizer.clone()),
            optimizer,
        }
    }

    pub fn projects(&self) -> &ProjectsApi {
        &self.projects
    }

    pub fn blog_posts(&self) -> &BlogPostsApi {
        &self.blog_posts
    }

    pub fn contact_messages(&self) -> &ContactMessagesApi {
        &self.contact_messages
    }

    pub fn skills(&self) -> &SkillsApi {
        &self.skills
    }

    pub fn hero(&self) -> &HeroTextApi {
        &self.hero
    }

    /// The shared optimizer, for cache control and latency statistics.
    pub fn optimizer(&self) -> &ApiOptimizer {
        &self.optimizer
    }
}
