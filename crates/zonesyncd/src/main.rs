// # zonesyncd - zone reconciliation daemon
//
// The zonesyncd daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Wiring the echo IP source, the Cloudflare provider, and the engine
// 4. Running the reconciliation schedule until a shutdown signal arrives
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `LOG_LEVEL`: log severity (trace, debug, info, warn, error; default: info)
// - `INTERVAL`: time between reconciliation cycles ("300", "30s", "5m", "2h")
// - `ZONE_NAME`: exact name of the DNS zone to manage
// - `CLOUDFLARE_API_TOKEN`: API token with Zone:Read and DNS:Edit permissions
//
// ## Example
//
// ```bash
// export LOG_LEVEL=info
// export INTERVAL=5m
// export ZONE_NAME=example.com
// export CLOUDFLARE_API_TOKEN=your_token
//
// zonesyncd
// ```
//
// ## Exit Codes
//
// - 0: clean shutdown (signal received)
// - 1: configuration or startup error
// - 2: runtime error (a reconciliation cycle failed fatally)

use anyhow::Result;
use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;
use zonesync_core::{CycleOutcome, Schedule, SyncConfig, SyncEngine};
use zonesync_ip_echo::EchoIpSource;
use zonesync_provider_cloudflare::CloudflareDns;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum SyncExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<SyncExitCode> for ExitCode {
    fn from(code: SyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Load configuration from environment variables
///
/// Only `LOG_LEVEL` has a default. The other values pass through as-is,
/// empty when unset; each is checked by the component that consumes it.
fn load_config() -> SyncConfig {
    SyncConfig {
        log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        interval: env::var("INTERVAL").unwrap_or_default(),
        zone_name: env::var("ZONE_NAME").unwrap_or_default(),
        api_token: env::var("CLOUDFLARE_API_TOKEN").unwrap_or_default(),
    }
}

fn main() -> ExitCode {
    let config = load_config();

    // Validate configuration (the log level, before logging exists)
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        return SyncExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SyncExitCode::ConfigError.into();
    }

    info!("Starting zonesyncd daemon");

    // Build the schedule and both components up front; any failure here is
    // a startup error.
    let schedule = match Schedule::parse(&config.interval) {
        Ok(schedule) => schedule,
        Err(e) => {
            error!("Invalid INTERVAL: {}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let ip_source = match EchoIpSource::new() {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to build IP source: {}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let provider = match CloudflareDns::new(config.api_token.clone()) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to build DNS provider: {}", e);
            return SyncExitCode::ConfigError.into();
        }
    };

    let engine = SyncEngine::new(Box::new(ip_source), Box::new(provider), config.zone_name);

    info!(
        "Managing zone {:?}, reconciling every {:?}",
        engine.zone_name(),
        schedule.period()
    );

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SyncExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(engine, schedule).await {
            Ok(()) => SyncExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {}", e);
                SyncExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Run the reconciliation schedule until it fails or a signal arrives
async fn run_daemon(engine: SyncEngine, schedule: Schedule) -> Result<()> {
    let engine = &engine;

    let job = move || async move {
        match engine.run_cycle().await? {
            CycleOutcome::Completed(summary) => {
                debug!(
                    "Cycle completed: {} updated, {} up to date, {} ignored, {} failed",
                    summary.updated, summary.up_to_date, summary.ignored, summary.failed
                );
            }
            // Abandoned cycles end without any output.
            CycleOutcome::ZonesUnavailable | CycleOutcome::ZoneNotFound => {}
        }
        Ok(())
    };

    tokio::select! {
        // The schedule only returns when a cycle failed fatally.
        result = schedule.run(job) => {
            result?;
            Ok(())
        }

        signal = wait_for_shutdown() => {
            let signal = signal?;
            info!("Received shutdown signal: {}", signal);
            info!("Shutting down daemon");
            Ok(())
        }
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    // Set up signal handlers for SIGTERM and SIGINT
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;

    Ok("SIGINT")
}
