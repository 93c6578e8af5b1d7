use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use userproxy_shared::error::ProxyError;

use crate::config::DirectoryConfig;

/// Raw reply from the user directory. Status handling is left to the caller
/// because a failed profile lookup is not an error.
#[derive(Debug, Clone)]
pub struct DirectoryResponse {
    pub status: u16,
    pub body: Bytes,
}

impl DirectoryResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound access to the Discord user directory.
///
/// `Err` is reserved for transport failures; any HTTP reply, whatever its
/// status, comes back as `Ok`.
#[async_trait::async_trait]
pub trait DirectoryClient: Send + Sync {
    /// `GET /users/{user_id}`
    async fn fetch_user(&self, token: &str, user_id: &str)
        -> Result<DirectoryResponse, ProxyError>;

    /// `GET /users/{user_id}/profile`
    async fn fetch_user_profile(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<DirectoryResponse, ProxyError>;
}

/// Directory client backed by reqwest. Authenticates as a bot with the
/// caller-supplied token.
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self, ProxyError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ProxyError::Internal(format!(
                "invalid directory base URL {}: {e}",
                config.api_base_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ProxyError::Internal(format!(
                "directory base URL cannot be a base: {}",
                config.api_base_url
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ProxyError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// `{base}/users/{user_id}[/{suffix}]`, with `user_id` encoded as a
    /// single path segment.
    pub fn user_url(&self, user_id: &str, suffix: Option<&str>) -> Result<Url, ProxyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::Internal("directory base URL cannot be a base".into()))?
            .pop_if_empty()
            .push("users")
            .push(user_id)
            .extend(suffix);
        Ok(url)
    }

    async fn get(&self, url: Url, token: &str) -> Result<DirectoryResponse, ProxyError> {
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bot {token}"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(DirectoryResponse { status, body })
    }
}

#[async_trait::async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn fetch_user(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<DirectoryResponse, ProxyError> {
        let url = self.user_url(user_id, None)?;
        self.get(url, token).await
    }

    async fn fetch_user_profile(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<DirectoryResponse, ProxyError> {
        let url = self.user_url(user_id, Some("profile"))?;
        self.get(url, token).await
    }
}

fn transport_error(e: reqwest::Error) -> ProxyError {
    tracing::warn!(error = %e, "directory request failed");
    ProxyError::Internal(e.to_string())
}
