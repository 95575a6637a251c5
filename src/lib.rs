pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::config::AppConfig;
pub use internal::dashboard::{Command, Dashboard, DashboardError};
pub use internal::gateway::{ErrorKind, GatewayError, HttpGateway, RequestConfig, Requester};
