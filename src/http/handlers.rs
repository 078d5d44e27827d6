//! Request dispatch for the feed page.
//!
//! # Responsibilities
//! - Decide exactly one action (view/add/delete) from the query parameters
//! - Drive the middletier call and shape the response
//! - Record per-request metrics

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::http::response;
use crate::http::server::AppState;
use crate::middletier::ClientError;
use crate::observability::metrics;
use crate::subscription;

/// Query parameters of `/jsp/rss.jsp`. All optional; empty values count as
/// absent, matching form semantics.
#[derive(Debug, Default, Deserialize)]
pub struct RssQuery {
    pub username: Option<String>,

    /// Feed to subscribe to.
    pub url: Option<String>,

    /// Feed to unsubscribe from. Wins over `url` when both are present.
    #[serde(rename = "delFeedUrl")]
    pub del_feed_url: Option<String>,
}

/// The one action selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    View,
    Add(String),
    Delete(String),
}

impl FeedAction {
    fn name(&self) -> &'static str {
        match self {
            FeedAction::View => "view",
            FeedAction::Add(_) => "add",
            FeedAction::Delete(_) => "delete",
        }
    }
}

/// Resolve the effective username and action. Delete is checked before add;
/// a missing or empty username becomes the literal `"default"`.
pub fn dispatch(query: &RssQuery) -> (String, FeedAction) {
    let username = match query.username.as_deref() {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => "default".to_string(),
    };

    let action = if let Some(del) = non_empty(&query.del_feed_url) {
        FeedAction::Delete(del)
    } else if let Some(add) = non_empty(&query.url) {
        FeedAction::Add(add)
    } else {
        FeedAction::View
    };

    (username, action)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Handler for `GET /jsp/rss.jsp`.
pub async fn rss(
    State(state): State<AppState>,
    Query(query): Query<RssQuery>,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let (username, action) = dispatch(&query);
    let action_name = action.name();

    let resp = match action {
        FeedAction::View => view_feeds(&state, &username, &headers).await,
        FeedAction::Add(feed_url) => add_feed(&state, &username, &feed_url, &headers).await,
        FeedAction::Delete(feed_url) => delete_feed(&state, &username, &feed_url, &headers).await,
    };

    metrics::record_request(action_name, resp.status().as_u16(), start);
    resp
}

/// Handler for `GET /healthcheck`.
pub async fn healthcheck() -> Html<&'static str> {
    Html("<h1>Healthcheck page</h1>")
}

async fn view_feeds(state: &AppState, username: &str, headers: &HeaderMap) -> Response {
    let payload = match state.middletier.view_feeds(username, headers).await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::error!(user = %username, error = %err, "view: middletier call failed");
            return response::error_page(&err);
        }
    };

    let subscription = subscription::normalize(&payload, username);

    match response::render_view(subscription) {
        Ok(page) => page.into_response(),
        Err(err) => {
            tracing::error!(user = %username, error = %err, "view: template render failed");
            response::error_page(&err)
        }
    }
}

async fn add_feed(
    state: &AppState,
    username: &str,
    feed_url: &str,
    headers: &HeaderMap,
) -> Response {
    match state.middletier.add_feed(username, feed_url, headers).await {
        Ok(status) => {
            tracing::debug!(user = %username, feed = %feed_url, %status, "add: middletier responded");
        }
        Err(err @ ClientError::InvalidUrl(_)) => {
            tracing::error!(user = %username, feed = %feed_url, error = %err, "add: request construction failed");
            return response::error_page(&err);
        }
        // Transport failures do not stop the redirect back to the feed page.
        Err(err) => {
            tracing::warn!(user = %username, feed = %feed_url, error = %err, "add: middletier call failed");
        }
    }

    response::redirect_to_feeds(username)
}

async fn delete_feed(
    state: &AppState,
    username: &str,
    feed_url: &str,
    headers: &HeaderMap,
) -> Response {
    match state.middletier.delete_feed(username, feed_url, headers).await {
        Ok(status) => {
            tracing::debug!(user = %username, feed = %feed_url, %status, "delete: middletier responded");
        }
        Err(err @ ClientError::InvalidUrl(_)) => {
            tracing::error!(user = %username, feed = %feed_url, error = %err, "delete: request construction failed");
            return response::error_page(&err);
        }
        Err(err) => {
            tracing::warn!(user = %username, feed = %feed_url, error = %err, "delete: middletier call failed");
        }
    }

    response::redirect_to_feeds(username)
}
