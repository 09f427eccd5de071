//! Builder for configuring [`PortfolioApi`] instances

use std::sync::Arc;
use std::time::Duration;

use super::PortfolioApi;
use crate::config::{ClientConfig, OptimizerConfig};
use crate::optimizer::ApiOptimizer;
use crate::transport::{HttpTransport, Transport};
use crate::{ApiError, Result};

/// Builder for configuring [`PortfolioApi`] instances.
///
/// Either a base URL or a custom transport is required.
#[derive(Default)]
pub struct PortfolioApiBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    optimizer_config: OptimizerConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl PortfolioApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: Some(config.base_url.clone()),
            timeout: Some(config.timeout()),
            optimizer_config: config.optimizer.clone(),
            transport: None,
        }
    }

    /// Base URL of the REST API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout for the default HTTP transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Cache, retry and monitoring settings.
    pub fn optimizer_config(mut self, config: OptimizerConfig) -> Self {
        self.optimizer_config = config;
        self
    }

    /// Use a custom transport instead of [`HttpTransport`].
    ///
    /// Takes precedence over `base_url` and `timeout`.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and build the API.
    pub fn build(self) -> Result<PortfolioApi> {
        let optimizer = ApiOptimizer::new(&self.optimizer_config)?;

        let transport: Arc<dyn Transport> = match (self.transport, self.base_url) {
            (Some(transport), _) => transport,
            (None, Some(url)) => {
                let timeout = self.timeout.unwrap_or(Duration::from_secs(30));
                if timeout.is_zero() {
                    return Err(ApiError::Configuration(
                        "timeout must be greater than zero".into(),
                    ));
                }
                Arc::new(HttpTransport::with_timeout(url, timeout)?)
            }
            (None, None) => {
                return Err(ApiError::Configuration(
                    "either a base URL or a transport is required".into(),
                ));
            }
        };

        Ok(PortfolioApi::new(transport, optimizer))
    }
}
