//! Blog posts client.

use serde_json::{Value, json};
use tokio::task::JoinHandle;

use super::{BlogPostsApi, Resource, segment};
use crate::cache::Params;
use crate::optimizer::detach;
use crate::transport::Transport;
use crate::types::{BlogPost, BlogPostPatch, NewBlogPost};
use crate::{ApiError, Result};

impl Resource for BlogPost {
    const NAMESPACE: &'static str = "blog-posts";
    const PATH: &'static str = "/blog";
    type Draft = NewBlogPost;
    type Patch = BlogPostPatch;
}

impl BlogPostsApi {
    /// Posts visible on the public site.
    pub async fn get_published(&self) -> Result<Vec<BlogPost>> {
        let mut params = Params::new();
        params.insert("published".into(), Value::Bool(true));
        self.fetch("getPublished", params.clone(), BlogPost::PATH.to_string(), params)
            .await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<BlogPost> {
        if slug.trim().is_empty() {
            return Err(ApiError::validation("slug", "is required"));
        }
        let mut key_params = Params::new();
        key_params.insert("slug".into(), Value::from(slug));
        self.fetch(
            "getBySlug",
            key_params,
            format!("{}/slug/{}", BlogPost::PATH, segment(slug)),
            Params::new(),
        )
        .await
    }

    /// Bump the view counter of a post in the background.
    ///
    /// Best effort: the outcome is only logged, and cached reads are left as
    /// they are. Awaiting the handle is optional.
    pub fn increment_views(&self, id: &str) -> JoinHandle<()> {
        let transport = self.transport().clone();
        let path = format!("{}/{}/views", BlogPost::PATH, segment(id));
        detach("increment_views", path.clone(), async move {
            transport.post(&path, json!({})).await
        })
    }
}
