//!
//! memberlogin server binary
//! -------------------------
//! Command-line entry point. Configuration comes from CLI flags and
//! environment variables (see `config::USAGE`).

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use memberlogin::config::{has_flag, ServerConfig, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = ServerConfig::load(&args)?;
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "memberlogin",
        "memberlogin starting: RUST_LOG='{}', addr={}, cookie='{}', session_ttl={:?}, seed_demo={}",
        rust_log, config.bind_addr(), config.cookie_name, config.session_ttl, config.seed_demo_member
    );

    memberlogin::server::run(&config).await
}
