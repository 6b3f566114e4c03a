//! Core reconciliation engine
//!
//! The SyncEngine is responsible for:
//! - Resolving the host's public addresses via IpSource
//! - Matching the configured zone among the provider's zones
//! - Updating stale A/AAAA records via DnsProvider
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Scheduler  │─── tick ───┐
//! └─────────────┘            │
//!                            ▼
//!                    ┌──────────────┐
//!                    │  SyncEngine  │
//!                    └──────────────┘
//!                            │
//!              ┌─────────────┴─────────────┐
//!              │                           │
//!              ▼                           ▼
//!      ┌─────────────┐           ┌──────────────┐
//!      │  IpSource   │           │ DnsProvider  │
//!      │  (resolve)  │           │ (list/update)│
//!      └─────────────┘           └──────────────┘
//! ```
//!
//! ## Cycle Flow
//!
//! 1. Resolve current public IPv4/IPv6 addresses
//! 2. List zones, select the one matching the configured name
//! 3. List the zone's records (first page)
//! 4. For each A/AAAA record whose content differs, issue an update
//! 5. Report the outcome as a [`CycleOutcome`]
//!
//! ## Failure Severity
//!
//! One cycle mixes four severities, and the distinction is part of the
//! engine's contract rather than an accident of implementation:
//!
//! - address resolution failure is returned as `Err` and ends the process;
//! - a zone-listing failure or an unmatched zone name ends the cycle early
//!   with no output at all ([`CycleOutcome::ZonesUnavailable`] /
//!   [`CycleOutcome::ZoneNotFound`]);
//! - a record-listing failure is returned as `Err` and ends the process;
//! - a single record update failure is logged and the remaining records
//!   are still processed.

use crate::error::Result;
use crate::traits::{DnsProvider, IpSource, ResolvedAddresses};
use tracing::{error, info, warn};

/// Outcome of one reconciliation cycle
///
/// The early-exit cases are ordinary values, not errors: the cycle is
/// abandoned without touching any record and without logging. Callers that
/// need to observe them (tests, the daemon) match on the variant instead of
/// scraping logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The configured zone was found and its records were walked
    Completed(CycleSummary),

    /// Listing zones failed; no records were examined
    ZonesUnavailable,

    /// No listed zone matched the configured zone name
    ZoneNotFound,
}

/// Per-record tallies for a completed cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Records rewritten with a new address
    pub updated: usize,

    /// Records whose content already matched
    pub up_to_date: usize,

    /// Records of types other than A/AAAA, never inspected
    pub ignored: usize,

    /// Update calls that failed (logged, cycle continued)
    pub failed: usize,
}

/// Core reconciliation engine
///
/// The engine executes one resolve-and-reconcile cycle per invocation.
/// It holds no state between cycles; every cycle rebuilds its view of the
/// zone from the provider.
///
/// ## Lifecycle
///
/// 1. Create with [`SyncEngine::new()`]
/// 2. Invoke [`SyncEngine::run_cycle()`] from the scheduler, once per tick
/// 3. Drop to cleanup
pub struct SyncEngine {
    /// Source of the host's public addresses
    ip_source: Box<dyn IpSource>,

    /// DNS provider for listing and updating records
    provider: Box<dyn DnsProvider>,

    /// Zone name to manage, matched exactly against listed zones
    zone_name: String,
}

impl SyncEngine {
    /// Create a new engine
    ///
    /// # Parameters
    ///
    /// - `ip_source`: address resolution implementation
    /// - `provider`: DNS provider implementation
    /// - `zone_name`: zone to manage, compared by exact name
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        zone_name: impl Into<String>,
    ) -> Self {
        Self {
            ip_source,
            provider,
            zone_name: zone_name.into(),
        }
    }

    /// Run one full reconciliation cycle
    ///
    /// Resolves the current public addresses, then reconciles the zone's
    /// records against them.
    ///
    /// # Returns
    ///
    /// - `Ok(CycleOutcome)`: the cycle ran (possibly abandoned early)
    /// - `Err(Error)`: resolution or record listing failed; the caller is
    ///   expected to treat this as fatal
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let addrs = self.ip_source.resolve().await?;
        self.reconcile(&addrs).await
    }

    /// Reconcile the configured zone's records against resolved addresses
    ///
    /// # Parameters
    ///
    /// - `addrs`: the addresses every A/AAAA record should carry
    pub async fn reconcile(&self, addrs: &ResolvedAddresses) -> Result<CycleOutcome> {
        // A zone-listing failure abandons the cycle with no log line.
        let zones = match self.provider.list_zones().await {
            Ok(zones) => zones,
            Err(_) => return Ok(CycleOutcome::ZonesUnavailable),
        };

        let Some(zone) = zones.iter().find(|z| z.name == self.zone_name) else {
            return Ok(CycleOutcome::ZoneNotFound);
        };

        // A record-listing failure is fatal to the whole process.
        let page = self.provider.list_records(&zone.id).await?;

        if page.total_pages > 1 {
            warn!(
                "Zone {} has more than one page of records, reconciliation might not work properly",
                zone.name
            );
        }

        let mut summary = CycleSummary::default();

        for record in &page.records {
            let target = match record.kind.as_str() {
                "A" => &addrs.ipv4,
                "AAAA" => &addrs.ipv6,
                _ => {
                    summary.ignored += 1;
                    continue;
                }
            };

            if record.content == *target {
                info!("Record {} ({}) is up to date", record.name, record.kind);
                summary.up_to_date += 1;
                continue;
            }

            match self
                .provider
                .update_record(&zone.id, &record.id, target)
                .await
            {
                Ok(()) => {
                    info!(
                        "Updated record {} ({}) -> {}",
                        record.name, record.kind, target
                    );
                    summary.updated += 1;
                }
                Err(e) => {
                    // Remaining records are still processed.
                    error!("Failed to update record {} ({}): {}", record.name, record.kind, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(CycleOutcome::Completed(summary))
    }

    /// Zone name this engine manages
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }
}
