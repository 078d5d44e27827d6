//! Outbound client for the middletier service.
//!
//! # Responsibilities
//! - Issue the view/add/delete calls against the middletier REST surface
//! - Carry the feed URL verbatim in the query string
//! - Report transport failures without touching the response body
//!
//! Non-success downstream statuses are not interpreted here; the caller
//! decides what to do with whatever body came back.

pub mod client;

pub use client::{ClientError, MiddletierClient};
