use dotenvy::dotenv;
use lms_admin::config::{AppConfig, LoggingConfig};
use lms_admin::core::exit_codes;

/// Interactive bulk account creation. Takes no arguments.
#[tokio::main]
async fn main() {
    dotenv().ok();
    let log_guard = lms_admin::observability::init_logging(&LoggingConfig::from_env());

    let code = run().await;

    drop(log_guard);
    std::process::exit(code);
}

async fn run() -> i32 {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("❌ Configuration error: {}", e);
            return exit_codes::INTERNAL;
        }
    };

    lms_admin::cli::accounts::run_interactive(&config).await
}
