use chrono::Local;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber;

use floodgate::config::FloodgateConfig;
use floodgate::ratelimit::RateLimiter;

/// Demo driver for the Floodgate rate limiter.
#[derive(Debug, Parser)]
#[command(name = "floodgate", version)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Burst capacity (overrides the configuration file)
    #[arg(long)]
    capacity: Option<u32>,

    /// Refill interval in milliseconds (overrides the configuration file)
    #[arg(long)]
    refill_interval_ms: Option<u64>,

    /// Number of sample requests to issue (overrides the configuration file)
    #[arg(long)]
    requests: Option<u32>,

    /// Delay between sample requests in milliseconds (overrides the
    /// configuration file)
    #[arg(long)]
    cadence_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting Floodgate demo driver");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Load configuration, then apply command-line overrides
    let mut config = match args.config {
        Some(ref path) => FloodgateConfig::from_file(path)?,
        None => FloodgateConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.limiter.capacity = capacity;
    }
    if let Some(interval_ms) = args.refill_interval_ms {
        config.limiter.refill_interval_ms = interval_ms;
    }
    if let Some(requests) = args.requests {
        config.driver.requests = requests;
    }
    if let Some(cadence_ms) = args.cadence_ms {
        config.driver.cadence_ms = cadence_ms;
    }

    info!(
        capacity = config.limiter.capacity,
        refill_interval_ms = config.limiter.refill_interval_ms,
        requests = config.driver.requests,
        cadence_ms = config.driver.cadence_ms,
        "Configuration loaded"
    );

    let limiter = RateLimiter::from_config(&config.limiter)?;
    info!("Rate limiter initialized");

    for request in 1..=config.driver.requests {
        let timestamp = Local::now().to_rfc2822();
        if limiter.try_acquire() {
            info!(request = request, timestamp = %timestamp, "Request sent successfully");
        } else {
            warn!(request = request, timestamp = %timestamp, "Request denied");
        }
        tokio::time::sleep(config.driver.cadence()).await;
    }

    limiter.stop();
    info!("Floodgate demo driver stopped");
    Ok(())
}
