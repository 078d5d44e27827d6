//! HTTP surface of the edge service.
//!
//! # Data Flow
//! ```text
//! GET /jsp/rss.jsp?username=&url=&delFeedUrl=
//!     → server.rs (Axum setup, request-id, timeout, trace layers)
//!     → handlers.rs (pick exactly one of view/add/delete)
//!     → middletier client call
//!     → response.rs (render template, redirect, or error page)
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
