pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod middleware;
pub mod router;
pub mod state;
pub mod student;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
