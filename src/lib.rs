//! RSS edge service.
//!
//! Accepts browser requests for the RSS subscription feature, proxies them
//! to the downstream middletier service, and renders the result as HTML.
//!
//! ```text
//!     Browser ──▶ http (dispatch) ──▶ middletier (proxy call)
//!                      │                      │
//!                      │                      ▼
//!                      │           subscription (normalize JSON)
//!                      ▼                      │
//!            redirect (add/delete)            ▼
//!                                     view.html template
//! ```
//!
//! No state is held across requests; each request is a single proxy call
//! followed by a render or a redirect.

pub mod config;
pub mod http;
pub mod middletier;
pub mod observability;
pub mod subscription;

pub use config::EdgeConfig;
pub use http::HttpServer;
