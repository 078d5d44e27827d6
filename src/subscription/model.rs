//! Canonical subscription shapes.

use serde::{Deserialize, Serialize};

/// A single entry within a feed. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub link: String,
}

/// A subscribed feed. The wire name of `source_url` is `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub title: String,

    #[serde(rename = "url", default)]
    pub source_url: String,

    #[serde(default)]
    pub items: Vec<FeedItem>,
}

/// A user's subscriptions, as handed to the renderer.
///
/// Constructed fresh per request and discarded after the response is
/// written. `feeds` is always present, even when the downstream payload
/// encoded a single feed rather than a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub feeds: Vec<Feed>,
    pub user: String,
}
