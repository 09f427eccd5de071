//! portfolio-api - request-optimizing client for the portfolio REST API
//!
//! Every read issued by a resource client goes through one shared
//! [`ApiOptimizer`], which layers four independent features over the HTTP
//! transport:
//!
//! - a TTL cache keyed on `(resource, operation, sorted params)`,
//! - in-flight deduplication of concurrent identical requests,
//! - exponential-backoff retry that never retries client errors,
//! - a per-key latency ledger.
//!
//! Writes bypass the cache and invalidate their resource's namespace once
//! they succeed.
//!
//! # Example
//!
//! ```rust,no_run
//! use portfolio_api::{PortfolioApi, NewContactMessage};
//!
//! #[tokio::main]
//! async fn main() -> portfolio_api::Result<()> {
//!     let api = PortfolioApi::builder()
//!         .base_url("https://example.com/api")
//!         .build()?;
//!
//!     for project in api.projects().get_featured().await? {
//!         println!("{}", project.title);
//!     }
//!
//!     api.contact_messages()
//!         .create(&NewContactMessage::new(
//!             "Ada",
//!             "ada@example.com",
//!             "Loved the particle background!",
//!         ))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Optimizing arbitrary requests
//!
//! ```rust
//! use portfolio_api::{ApiError, ApiOptimizer, RequestOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> portfolio_api::Result<()> {
//! let optimizer = ApiOptimizer::default();
//! let options = RequestOptions::default().cache_key("stats_getAll");
//!
//! let first: u32 = optimizer.optimize_request("stats", || async { Ok::<_, ApiError>(42) }, &options).await?;
//! // Served from the cache; the factory is not called again.
//! let second: u32 = optimizer.optimize_request("stats", || async { Ok::<_, ApiError>(0) }, &options).await?;
//! assert_eq!(first, second);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod dedup;
pub mod error;
pub mod monitor;
pub mod optimizer;
pub mod portfolio;
pub mod resources;
pub mod retry;
pub mod telemetry;
pub mod transport;
pub mod types;
mod version;

// Re-export main types at crate root
pub use cache::{CacheStats, Params, TtlCache, generate_key};
pub use config::{ClientConfig, OptimizerConfig};
pub use dedup::RequestDeduplicator;
pub use error::{ApiError, Result};
pub use monitor::{PerformanceMonitor, TimingRecord};
pub use optimizer::{ApiOptimizer, RequestOptions, RequestSpec};
pub use portfolio::{PortfolioApi, PortfolioApiBuilder};
pub use resources::{
    BlogPostsApi, ContactMessagesApi, HeroTextApi, ProjectsApi, Resource, ResourceClient,
    SkillsApi,
};
pub use retry::{RetryConfig, retry_request};
pub use transport::{HttpTransport, Transport};
pub use types::{
    BlogPost, BlogPostPatch, ContactMessage, ContactMessagePatch, HeroText, HeroTextPatch,
    NewBlogPost, NewContactMessage, NewHeroText, NewProject, NewSkill, Project, ProjectPatch,
    Skill, SkillPatch, Validate,
};
pub use version::{PKG_VERSION, user_agent, version_string};
