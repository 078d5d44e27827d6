//! Configuration management.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → optional TOML file (path from EDGE_CONFIG)
//!     → environment overrides (EDGE_LISTEN_ADDR_PORT, MIDDLETIER_ADDR_PORT)
//!     → EdgeConfig (validated, immutable)
//!     → shared via Arc with the request handlers
//! ```
//!
//! Config is immutable once loaded; there is no reload path. All fields have
//! defaults so an empty config is valid.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::EdgeConfig;
