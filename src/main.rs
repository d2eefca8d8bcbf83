use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const DEV_SECRET: &str = "campusgraph-dev-secret";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let http_port: u16 = std::env::var("CAMPUSGRAPH_HTTP_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let secret = match std::env::var("CAMPUSGRAPH_JWT_SECRET") {
        Ok(s) if !s.is_empty() => s,
        _ => {
            warn!(target: "campusgraph", "CAMPUSGRAPH_JWT_SECRET unset, using the development secret");
            DEV_SECRET.to_string()
        }
    };
    info!(
        target: "campusgraph",
        "campusgraph starting: RUST_LOG='{}', http_port={}",
        rust_log, http_port
    );

    campusgraph::server::run_with_port(http_port, secret).await
}
