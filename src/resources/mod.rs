//! Per-entity API clients.
//!
//! [`ResourceClient`] provides the CRUD surface shared by every entity
//! (`get_all`, `get_by_id`, `search`, `create`, `update`, `delete`). Reads go
//! through the shared [`ApiOptimizer`] under the entity's cache namespace;
//! writes invalidate that namespace once they succeed. Entity-specific
//! operations live in the submodules as inherent impls on the concrete
//! client type (e.g. [`ProjectsApi::get_featured`]).

mod blog;
mod contact;
mod hero;
mod projects;
mod skills;

use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{Params, generate_key, namespaced};
use crate::optimizer::{ApiOptimizer, RequestOptions};
use crate::transport::Transport;
use crate::types::{BlogPost, ContactMessage, HeroText, Project, Skill, Validate};
use crate::{ApiError, Result};

/// An entity served by the REST API under its own path and cache namespace.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Cache key namespace, e.g. `"projects"`.
    const NAMESPACE: &'static str;
    /// Collection path relative to the API base URL, e.g. `"/projects"`.
    const PATH: &'static str;
    /// Payload for `create`.
    type Draft: Serialize + Validate + Send + Sync;
    /// Payload for `update`.
    type Patch: Serialize + Validate + Send + Sync;
}

pub type ProjectsApi = ResourceClient<Project>;
pub type BlogPostsApi = ResourceClient<BlogPost>;
pub type ContactMessagesApi = ResourceClient<ContactMessage>;
pub type SkillsApi = ResourceClient<Skill>;
pub type HeroTextApi = ResourceClient<HeroText>;

/// CRUD client for one entity type.
pub struct ResourceClient<T> {
    transport: Arc<dyn Transport>,
    optimizer: ApiOptimizer,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            optimizer: self.optimizer.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Resource> ResourceClient<T> {
    /// Create a client sharing `optimizer` with the rest of the application.
    pub fn new(transport: Arc<dyn Transport>, optimizer: ApiOptimizer) -> Self {
        Self {
            transport,
            optimizer,
            _entity: PhantomData,
        }
    }

    /// Cache namespace invalidated after writes.
    pub fn namespace(&self) -> &'static str {
        T::NAMESPACE
    }

    /// List entities, filtered by `params`.
    pub async fn get_all(&self, params: Params) -> Result<Vec<T>> {
        self.fetch("getAll", params.clone(), T::PATH.to_string(), params)
            .await
    }

    /// Fetch one entity by id.
    pub async fn get_by_id(&self, id: &str) -> Result<T> {
        require_id(id)?;
        self.fetch("getById", id_params(id), item_path::<T>(id), Params::new())
            .await
    }

    /// Full-text search.
    pub async fn search(&self, query: &str) -> Result<Vec<T>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::validation("query", "is required"));
        }
        let mut params = Params::new();
        params.insert("q".into(), Value::from(query));
        self.fetch("search", params.clone(), format!("{}/search", T::PATH), params)
            .await
    }

    /// Validate and create an entity.
    pub async fn create(&self, draft: &T::Draft) -> Result<T> {
        draft.validate()?;
        let body = serde_json::to_value(draft)?;
        self.write("create", Method::POST, T::PATH.to_string(), Some(body))
            .await
    }

    /// Validate and apply a partial update.
    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<T> {
        require_id(id)?;
        patch.validate()?;
        let body = serde_json::to_value(patch)?;
        self.write("update", Method::PUT, item_path::<T>(id), Some(body))
            .await
    }

    /// Delete an entity.
    pub async fn delete(&self, id: &str) -> Result<()> {
        require_id(id)?;
        self.write::<Value>("delete", Method::DELETE, item_path::<T>(id), None)
            .await
            .map(|_| ())
    }

    /// Cached read of `path` under `{namespace}_{operation}` and `key_params`.
    pub(crate) async fn fetch<R>(
        &self,
        operation: &str,
        key_params: Params,
        path: String,
        query: Params,
    ) -> Result<R>
    where
        R: Serialize + DeserializeOwned + Send + 'static,
    {
        let resource = namespaced(T::NAMESPACE, operation);
        let key = generate_key(&resource, &key_params);
        let options = RequestOptions::default()
            .cache_key(resource)
            .params(key_params);

        let transport = Arc::clone(&self.transport);
        let factory = move || {
            let transport = Arc::clone(&transport);
            let path = path.clone();
            let query = query.clone();
            async move { decode::<R>(transport.get(&path, &query).await?) }
        };
        self.optimizer.optimize_request(&key, factory, &options).await
    }

    /// Uncached write; invalidates the namespace on success.
    pub(crate) async fn write<R>(
        &self,
        operation: &str,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> Result<R>
    where
        R: Serialize + DeserializeOwned + Send + 'static,
    {
        let key = namespaced(T::NAMESPACE, operation);
        let transport = Arc::clone(&self.transport);
        let factory = move || {
            let transport = Arc::clone(&transport);
            let method = method.clone();
            let path = path.clone();
            let body = body.clone();
            async move {
                let response = transport
                    .request(method, &path, &Params::new(), body)
                    .await?;
                decode_or_null::<R>(response)
            }
        };
        let result = self
            .optimizer
            .optimize_request(&key, factory, &RequestOptions::mutation())
            .await?;
        self.optimizer.invalidate_cache(Some(T::NAMESPACE));
        Ok(result)
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

/// Responses may be bare or wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<R> {
    Wrapped { data: R },
    Bare(R),
}

impl<R> Envelope<R> {
    fn into_inner(self) -> R {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

fn decode<R: DeserializeOwned>(body: Value) -> Result<R> {
    if body.is_null() {
        return Err(ApiError::EmptyResponse);
    }
    decode_or_null(body)
}

fn decode_or_null<R: DeserializeOwned>(body: Value) -> Result<R> {
    Ok(serde_json::from_value::<Envelope<R>>(body)?.into_inner())
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ApiError::validation("id", "is required"));
    }
    Ok(())
}

fn id_params(id: &str) -> Params {
    let mut params = Params::new();
    params.insert("id".into(), Value::from(id));
    params
}

fn item_path<T: Resource>(id: &str) -> String {
    format!("{}/{}", T::PATH, segment(id))
}

/// Percent-encode a value used as one URL path segment.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
