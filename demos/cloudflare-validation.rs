// # Cloudflare Provider Real Environment Validation Tool
//
// This is a validation tool for testing the Cloudflare provider against
// the real Cloudflare API in a controlled environment.
//
// ## Usage
//
// ```bash
// # Dry-run mode (default - safe)
// ZONESYNC_MODE=dry-run \
// CLOUDFLARE_API_TOKEN=your_token \
// ZONE_NAME=example.com \
// cargo run --bin cloudflare_validation
//
// # Live mode (makes actual changes!)
// ZONESYNC_MODE=live \
// CLOUDFLARE_API_TOKEN=your_token \
// ZONE_NAME=example.com \
// cargo run --bin cloudflare_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `CLOUDFLARE_API_TOKEN`: Cloudflare API token
// - `ZONE_NAME`: Zone to validate against (e.g., "example.com")
//
// Optional:
// - `ZONESYNC_MODE`: "dry-run" or "live" (default: dry-run)
//
// Dry-run mode only reads: it discovers the zone, lists its records,
// resolves the host's public addresses, and reports what a live cycle
// would rewrite. Live mode runs one real reconciliation cycle.

use std::env;
use zonesync_core::traits::DnsProvider;
use zonesync_core::{CycleOutcome, SyncEngine};
use zonesync_ip_echo::EchoIpSource;
use zonesync_provider_cloudflare::CloudflareDns;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("=== Cloudflare Provider Real Environment Validation ===");

    // Read environment variables
    let api_token = env::var("CLOUDFLARE_API_TOKEN").unwrap_or_else(|_| {
        tracing::error!("CLOUDFLARE_API_TOKEN environment variable is required");
        std::process::exit(1);
    });

    let zone_name = env::var("ZONE_NAME").unwrap_or_else(|_| {
        tracing::error!("ZONE_NAME environment variable is required");
        std::process::exit(1);
    });

    let mode = env::var("ZONESYNC_MODE").unwrap_or_else(|_| "dry-run".to_string());
    let dry_run = mode.to_lowercase() != "live";

    if dry_run {
        tracing::warn!("Running in DRY-RUN mode - no changes will be made");
    } else {
        tracing::warn!("Running in LIVE mode - will make actual DNS changes!");
    }

    tracing::info!("Configuration:");
    tracing::info!("  Zone: {}", zone_name);
    tracing::info!("  Mode: {}", mode);

    // Create provider
    tracing::info!("--- Step 1: Creating Cloudflare Provider ---");
    let provider = CloudflareDns::new(api_token.clone())?;
    tracing::info!("Provider created successfully");
    tracing::info!("API token validated (not shown for security)");

    // Test 1: Zone discovery
    tracing::info!("--- Step 2: Discovering Zone ---");
    let zones = provider.list_zones().await?;
    tracing::info!("Credentials can see {} zone(s)", zones.len());

    let Some(zone) = zones.iter().find(|z| z.name == zone_name) else {
        tracing::error!("Zone {} is not visible to these credentials", zone_name);
        std::process::exit(1);
    };
    tracing::info!("Zone {} found (id: {})", zone.name, zone.id);

    // Test 2: Record listing
    tracing::info!("--- Step 3: Listing Records ---");
    let page = provider.list_records(&zone.id).await?;
    tracing::info!(
        "First page holds {} record(s), {} page(s) total",
        page.records.len(),
        page.total_pages
    );
    if page.total_pages > 1 {
        tracing::warn!("Only the first page is reconciled; consider trimming the zone");
    }
    for record in &page.records {
        tracing::info!("  {} {} {}", record.kind, record.name, record.content);
    }

    // Test 3: Resolve the public addresses the records should carry
    tracing::info!("--- Step 4: Resolving Public Addresses ---");
    let ip_source = EchoIpSource::new()?;

    if dry_run {
        use zonesync_core::traits::IpSource;

        let addrs = ip_source.resolve().await?;
        tracing::info!("Resolved IPv4: {}", addrs.ipv4.trim());
        tracing::info!("Resolved IPv6: {}", addrs.ipv6.trim());

        // Report what a live cycle would do, without writing anything
        tracing::info!("--- Step 5: Dry-Run Reconciliation ---");
        let mut stale = 0;
        for record in &page.records {
            let target = match record.kind.as_str() {
                "A" => &addrs.ipv4,
                "AAAA" => &addrs.ipv6,
                _ => continue,
            };
            if record.content == *target {
                tracing::info!("  {} ({}) is up to date", record.name, record.kind);
            } else {
                stale += 1;
                tracing::info!(
                    "  would update {} ({}) {} -> {}",
                    record.name,
                    record.kind,
                    record.content,
                    target
                );
            }
        }
        tracing::info!("{} record(s) would be rewritten", stale);
    } else {
        // Live mode runs one real cycle through the engine
        tracing::info!("--- Step 5: Live Reconciliation Cycle ---");
        let engine = SyncEngine::new(
            Box::new(ip_source),
            Box::new(CloudflareDns::new(api_token)?),
            zone_name.clone(),
        );

        match engine.run_cycle().await {
            Ok(CycleOutcome::Completed(summary)) => {
                tracing::info!(
                    "Cycle completed: {} updated, {} up to date, {} ignored, {} failed",
                    summary.updated,
                    summary.up_to_date,
                    summary.ignored,
                    summary.failed
                );
            }
            Ok(CycleOutcome::ZonesUnavailable) => {
                tracing::error!("Zone listing became unavailable mid-validation");
                std::process::exit(1);
            }
            Ok(CycleOutcome::ZoneNotFound) => {
                tracing::error!("Zone {} disappeared mid-validation", zone_name);
                std::process::exit(1);
            }
            Err(e) => {
                tracing::error!("Cycle failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Summary
    tracing::info!("=== Validation Summary ===");
    tracing::info!("Provider creation: OK");
    tracing::info!("Zone discovery: OK");
    tracing::info!("Record listing: OK");
    tracing::info!("Security: API token not logged");

    if dry_run {
        tracing::info!("=== DRY-RUN COMPLETE ===");
        tracing::info!("No changes were made to DNS records.");
        tracing::info!("To make actual changes, set ZONESYNC_MODE=live");
    } else {
        tracing::info!("=== LIVE MODE COMPLETE ===");
        tracing::info!("DNS records were reconciled.");
    }

    Ok(())
}
