use tracing::{debug, error};
use student_dashboard::cli::{already_reported, build_cli, execute, parse_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = student_dashboard::internal::logger::init_logger(&config.logging) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    debug!("Student service: {}", config.services.student_service_url);
    debug!("College service: {}", config.services.college_service_url);
    debug!("Request timeout: {}ms", config.gateway.timeout_ms);

    if let Err(e) = execute(&matches, &config).await {
        if already_reported(&e) {
            debug!("Command failed: {:#}", e);
        } else {
            error!("Command failed: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
