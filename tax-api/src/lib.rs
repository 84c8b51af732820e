pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schemas;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use router::create_router;
pub use schemas::AppState;
