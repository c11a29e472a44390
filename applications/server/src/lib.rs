//! Lyrics Server Library
//!
//! HTTP API for the lyrics catalog: artists, albums, songs and
//! community-voted lyrics, with bearer-token authentication for voting.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use services::auth::AuthService;
pub use state::AppState;
