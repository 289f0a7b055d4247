//! Gallery HTTP client

pub mod config;
pub mod error;
pub mod request;
pub mod sessions;
pub mod token_cache;
pub mod users;

pub use config::ClientConfig;
pub use error::ClientError;
pub use request::{ContentType, Endpoint, ResponseType, create_request};
pub use token_cache::TokenCache;

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("gallery-client/", env!("CARGO_PKG_VERSION"));

/// Transport half of a request: the reqwest client plus the backend base URL.
///
/// Carries no credentials. Auth state is passed to each call as a [`TokenCache`].
#[derive(Clone, Debug)]
pub struct GalleryClient {
    client: Client,
    base_url: String,
}

impl GalleryClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client pointed at the configured backend host
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Self::builder().base_url(config.backend_host.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Create a new client builder
    pub fn builder() -> GalleryClientBuilder {
        GalleryClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `users/login`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Create a bare request builder, no headers attached
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path))
    }
}

/// Builder for GalleryClient
#[derive(Default)]
pub struct GalleryClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl GalleryClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout. Ignored on wasm32, where fetch has no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GalleryClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout;

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );

        let client = client_builder.build()?;

        Ok(GalleryClient { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = GalleryClient::new("http://localhost:6060/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:6060");
    }

    #[test]
    fn test_url_joins_relative_paths() {
        let client = GalleryClient::new("http://localhost:6060").unwrap();
        assert_eq!(client.url("users/login"), "http://localhost:6060/users/login");
        assert_eq!(client.url("/users"), "http://localhost:6060/users");
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = GalleryClient::builder().build();
        assert!(matches!(result, Err(ClientError::Configuration(_))));

        let result = GalleryClient::new("/");
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }
}
