pub mod error;
pub mod http_gateway;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod types;

// Re-export main types
pub use error::{ErrorKind, GatewayError};
pub use http_gateway::HttpGateway;
pub use types::{Method, Outcome, RequestConfig, Requester};
