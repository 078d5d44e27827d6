//! HTTP client for the middletier subscription API.

use std::sync::Arc;

use axum::http::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::observability::RequestDecorator;

/// Errors from a middletier call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The outbound URL could not be constructed. Feed URLs are forwarded
    /// verbatim, so a value the URL parser rejects stops the request before
    /// anything is sent.
    #[error("invalid middletier request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The call could not be made or the body could not be read.
    #[error("middletier request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the middletier's `/middletier/rss/user/{username}` surface.
#[derive(Clone)]
pub struct MiddletierClient {
    http: reqwest::Client,
    host: String,
    decorator: Arc<dyn RequestDecorator>,
}

impl MiddletierClient {
    /// Create a client for the middletier at `host` (host:port, no scheme).
    pub fn new(host: impl Into<String>, decorator: Arc<dyn RequestDecorator>) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: host.into(),
            decorator,
        }
    }

    /// Fetch the user's current subscriptions and return the raw body.
    ///
    /// The status is logged but not interpreted; even a non-success body is
    /// handed back for decoding.
    pub async fn view_feeds(
        &self,
        username: &str,
        inbound: &HeaderMap,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.user_url(username, None)?;
        let request = self.decorator.decorate(inbound, self.http.get(url.clone()));
        let response = request.send().await?;

        tracing::debug!(url = %url, status = %response.status(), "middletier view response");

        Ok(response.bytes().await?.to_vec())
    }

    /// Subscribe the user to a feed.
    pub async fn add_feed(
        &self,
        username: &str,
        feed_url: &str,
        inbound: &HeaderMap,
    ) -> Result<StatusCode, ClientError> {
        let url = self.user_url(username, Some(feed_url))?;
        let request = self.decorator.decorate(inbound, self.http.post(url));
        let response = request.send().await?;
        Ok(response.status())
    }

    /// Unsubscribe the user from a feed.
    pub async fn delete_feed(
        &self,
        username: &str,
        feed_url: &str,
        inbound: &HeaderMap,
    ) -> Result<StatusCode, ClientError> {
        let url = self.user_url(username, Some(feed_url))?;
        let request = self.decorator.decorate(inbound, self.http.delete(url));
        let response = request.send().await?;
        Ok(response.status())
    }

    /// Build the per-user URL. The feed URL is appended to the query string
    /// without validation; the URL parser is the only gate.
    fn user_url(&self, username: &str, feed_url: Option<&str>) -> Result<Url, ClientError> {
        let mut raw = format!("http://{}/middletier/rss/user/{}", self.host, username);
        if let Some(feed) = feed_url {
            raw.push_str("?url=");
            raw.push_str(feed);
        }
        Ok(Url::parse(&raw)?)
    }
}
