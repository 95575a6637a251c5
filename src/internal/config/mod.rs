pub mod _config;

pub use _config::{
    get_version_info, AppConfig, GatewayConfig, LoggingConfig, NotificationConfig,
    ServiceEndpoints, ServicesConfig, VERSION,
};
