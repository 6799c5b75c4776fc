pub mod api;
pub mod config;
pub mod error;

pub use api::{build_router, serve, RelayState};
pub use config::RelayConfig;
pub use error::RelayError;
