//! Decode middletier payloads into the canonical Subscription.
//!
//! The middletier encodes `subscriptions` either as a list of feeds or, for
//! some responses, as a single bare feed object. This is a protocol
//! inconsistency on the producer side; the fallback decode below is a
//! compatibility shim, not an intentional polymorphic format.
//! TODO: drop the single-feed fallback once the middletier always returns a
//! list.

use serde::Deserialize;

use crate::subscription::model::{Feed, Subscription};

/// Multi-feed wire shape: `{"subscriptions": [Feed, ...], ...}`.
#[derive(Debug, Deserialize)]
struct FeedListWire {
    #[serde(default)]
    subscriptions: Vec<Feed>,
}

/// Single-feed wire shape: `{"subscriptions": Feed, ...}`.
#[derive(Debug, Deserialize)]
struct SingleFeedWire {
    subscriptions: Feed,
}

/// Decode a raw middletier payload into the canonical shape.
///
/// The payload is decoded as the multi-feed shape first; on failure the same
/// original bytes are decoded as the single-feed shape and the feed is
/// wrapped into a one-element sequence. If both attempts fail, the errors
/// are logged and an empty feed list is returned.
///
/// The canonical `user` is always `username` from the request, never the
/// payload's own user field.
pub fn normalize(payload: &[u8], username: &str) -> Subscription {
    match serde_json::from_slice::<FeedListWire>(payload) {
        Ok(wire) => Subscription {
            feeds: wire.subscriptions,
            user: username.to_owned(),
        },
        Err(list_err) => match serde_json::from_slice::<SingleFeedWire>(payload) {
            Ok(wire) => {
                tracing::debug!(
                    user = %username,
                    "middletier returned a single-feed payload, wrapping into a list"
                );
                Subscription {
                    feeds: vec![wire.subscriptions],
                    user: username.to_owned(),
                }
            }
            Err(single_err) => {
                tracing::warn!(
                    user = %username,
                    %list_err,
                    %single_err,
                    "middletier payload matched neither subscription shape"
                );
                Subscription {
                    feeds: Vec::new(),
                    user: username.to_owned(),
                }
            }
        },
    }
}
