//! Serves declared endpoints as a fake server, or checks them against a real one.

use clap::Parser;
use mockingjay_core::config::load_endpoints;
use mockingjay_core::{serve, CheckerConfig, CompatibilityChecker, FakeServer};
use std::error::Error;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Command line parameters provided by the user.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Endpoint file path or glob pattern (YAML or JSON)
    #[arg(short, long, env = "MOCKINGJAY_CONFIG")]
    config: String,

    /// Port the fake server listens on
    #[arg(short, long, env = "MOCKINGJAY_PORT", default_value_t = 9090)]
    port: u16,

    /// Listen on all interfaces instead of localhost only
    #[arg(short, long)]
    expose: bool,

    /// Check the endpoints against this base URL instead of serving them
    #[arg(short, long, env = "MOCKINGJAY_REAL_URL")]
    real_url: Option<String>,

    /// Per-request timeout of the compatibility check, in seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

impl Args {
    fn listen_addr(&self) -> SocketAddr {
        let host = if self.expose {
            [0, 0, 0, 0]
        } else {
            [127, 0, 0, 1]
        };
        SocketAddr::from((host, self.port))
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!(
        "Starting {} V{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let endpoints = load_endpoints(&args.config).await?;
    tracing::info!("Loaded {} endpoint(s) from {}", endpoints.len(), args.config);

    match &args.real_url {
        Some(real_url) => check(endpoints, real_url, args.timeout_secs).await,
        None => {
            let listener = TcpListener::bind(args.listen_addr()).await?;
            serve(listener, FakeServer::new(endpoints), shutdown_signal()).await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn check(
    endpoints: Vec<mockingjay_core::Endpoint>,
    real_url: &str,
    timeout_secs: u64,
) -> Result<ExitCode, Box<dyn Error>> {
    let config = CheckerConfig::default().with_timeout(Duration::from_secs(timeout_secs));
    let checker = CompatibilityChecker::with_config(endpoints, &config)?;

    let report = checker.check(real_url).await;
    println!("{report}");

    if report.is_compatible() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
