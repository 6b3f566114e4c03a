//! Minimal embedding example for zonesync-core
//!
//! This example demonstrates using zonesync-core as a library in a custom
//! application. The cycle cadence is fully managed by the application.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use zonesync_core::traits::{
    DnsProvider, DnsRecord, IpSource, RecordPage, ResolvedAddresses, Zone,
};
use zonesync_core::{CycleOutcome, Result, Schedule, SyncEngine};

/// Custom IP source for embedded usage
struct EmbeddedIpSource {
    ipv4: String,
    ipv6: String,
}

#[async_trait::async_trait]
impl IpSource for EmbeddedIpSource {
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        Ok(ResolvedAddresses {
            ipv4: self.ipv4.clone(),
            ipv6: self.ipv6.clone(),
        })
    }
}

/// Custom DNS provider for embedded usage
struct EmbeddedProvider {
    update_calls: Arc<AtomicUsize>,
}

impl EmbeddedProvider {
    fn new() -> Self {
        Self {
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for EmbeddedProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        Ok(vec![Zone {
            id: "embedded-zone".to_string(),
            name: "example.com".to_string(),
        }])
    }

    async fn list_records(&self, _zone_id: &str) -> Result<RecordPage> {
        Ok(RecordPage {
            records: vec![
                DnsRecord {
                    id: "embedded-a".to_string(),
                    name: "example.com".to_string(),
                    kind: "A".to_string(),
                    content: "198.51.100.1".to_string(),
                },
                DnsRecord {
                    id: "embedded-aaaa".to_string(),
                    name: "example.com".to_string(),
                    kind: "AAAA".to_string(),
                    content: "2001:db8::1".to_string(),
                },
            ],
            total_pages: 1,
        })
    }

    async fn update_record(&self, _zone_id: &str, record_id: &str, content: &str) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        println!("[Embedded] Updating {} -> {}", record_id, content);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Embedded zonesync-core Example ===\n");

    // Create custom components
    let ip_source = EmbeddedIpSource {
        ipv4: "203.0.113.7".to_string(),
        ipv6: "2001:db8::7".to_string(),
    };
    let provider = EmbeddedProvider::new();
    let update_calls = Arc::clone(&provider.update_calls);

    // Create engine
    println!("1. Creating engine...");
    let engine = SyncEngine::new(Box::new(ip_source), Box::new(provider), "example.com");

    // Run a single cycle directly
    println!("2. Running one cycle directly...");
    match engine.run_cycle().await? {
        CycleOutcome::Completed(summary) => {
            println!(
                "   Cycle completed: {} updated, {} up to date, {} ignored, {} failed",
                summary.updated, summary.up_to_date, summary.ignored, summary.failed
            );
        }
        CycleOutcome::ZonesUnavailable => println!("   Zones unavailable, cycle abandoned"),
        CycleOutcome::ZoneNotFound => println!("   Zone not found, cycle abandoned"),
    }

    // Drive further cycles from a schedule, in the background
    println!("\n3. Driving cycles from a schedule in the background...");
    let schedule = Schedule::new(Duration::from_millis(100));
    let sync_handle = tokio::spawn(async move {
        let engine = &engine;
        schedule
            .run(move || async move {
                engine.run_cycle().await?;
                Ok(())
            })
            .await
    });

    println!("4. Application can do other work here.");
    println!("   (Cycle cadence is fully managed by the application)\n");

    // Simulate application work
    tokio::time::sleep(Duration::from_millis(350)).await;

    // Stop syncing by aborting the task
    println!("5. Stopping the schedule (by aborting the task)...");
    sync_handle.abort();
    let _ = sync_handle.await;

    println!(
        "\n6. Stopped cleanly after {} updates.",
        update_calls.load(Ordering::SeqCst)
    );
    println!("\n=== Embedding Successful ===");
    println!("Key Points:");
    println!("- Cycle cadence is fully controlled by the application");
    println!("- No global state");
    println!("- No reliance on process lifecycle");
    println!("- All components are custom (not zonesyncd defaults)");

    Ok(())
}
