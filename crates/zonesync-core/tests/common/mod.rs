//! Test doubles and common utilities for reconciliation contract tests
//!
//! This module provides scripted implementations of the core traits so
//! tests can drive one cycle deterministically and count every provider
//! call it makes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use zonesync_core::error::{Error, Result};
use zonesync_core::traits::{
    DnsProvider, DnsRecord, IpSource, RecordPage, ResolvedAddresses, Zone,
};

/// An IpSource that always resolves to the same pair of addresses
pub struct FixedIpSource {
    addrs: ResolvedAddresses,
    /// Call counter for resolve()
    resolve_call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ipv4: impl Into<String>, ipv6: impl Into<String>) -> Self {
        Self {
            addrs: ResolvedAddresses {
                ipv4: ipv4.into(),
                ipv6: ipv6.into(),
            },
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    /// Create a new FixedIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            addrs: other.addrs.clone(),
            resolve_call_count: Arc::clone(&other.resolve_call_count),
        }
    }
}

#[async_trait]
impl IpSource for FixedIpSource {
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.addrs.clone())
    }
}

/// An IpSource whose resolution always fails
pub struct FailingIpSource;

#[async_trait]
impl IpSource for FailingIpSource {
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        Err(Error::resolution("unable to fetch ip"))
    }
}

/// A mock DnsProvider serving scripted zones and records
///
/// Every trait call is counted, and every update attempt is recorded as a
/// `(zone_id, record_id, content)` triple whether or not it succeeds.
pub struct MockDnsProvider {
    /// Zones returned by list_zones()
    zones: Vec<Zone>,
    /// Record pages keyed by zone id
    pages: HashMap<String, RecordPage>,
    /// When set, list_zones() fails
    zone_listing_fails: bool,
    /// When set, list_records() fails
    record_listing_fails: bool,
    /// Record ids whose update calls fail
    rejected_record_ids: Vec<String>,
    /// Call counter for list_zones()
    list_zones_calls: Arc<AtomicUsize>,
    /// Call counter for list_records()
    list_records_calls: Arc<AtomicUsize>,
    /// Call counter for update_record()
    update_calls: Arc<AtomicUsize>,
    /// Every update attempt, in call order
    updates: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockDnsProvider {
    /// A provider with no zones at all
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            pages: HashMap::new(),
            zone_listing_fails: false,
            record_listing_fails: false,
            rejected_record_ids: Vec::new(),
            list_zones_calls: Arc::new(AtomicUsize::new(0)),
            list_records_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider with one zone holding the given records, single page
    pub fn with_zone(name: &str, id: &str, records: Vec<DnsRecord>) -> Self {
        Self::with_paged_zone(name, id, records, 1)
    }

    /// A provider with one zone whose listing reports `total_pages`
    pub fn with_paged_zone(name: &str, id: &str, records: Vec<DnsRecord>, total_pages: u32) -> Self {
        let mut provider = Self::new();
        provider.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        provider.pages.insert(
            id.to_string(),
            RecordPage {
                records,
                total_pages,
            },
        );
        provider
    }

    /// Add another zone with its own single-page record set
    pub fn and_zone(mut self, name: &str, id: &str, records: Vec<DnsRecord>) -> Self {
        self.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.pages.insert(
            id.to_string(),
            RecordPage {
                records,
                total_pages: 1,
            },
        );
        self
    }

    /// Make list_zones() fail
    pub fn failing_zone_listing(mut self) -> Self {
        self.zone_listing_fails = true;
        self
    }

    /// Make list_records() fail
    pub fn failing_record_listing(mut self) -> Self {
        self.record_listing_fails = true;
        self
    }

    /// Make update_record() fail for one record id
    pub fn rejecting_updates_for(mut self, record_id: &str) -> Self {
        self.rejected_record_ids.push(record_id.to_string());
        self
    }

    /// Get the number of times list_zones() was called
    pub fn list_zones_call_count(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times list_records() was called
    pub fn list_records_call_count(&self) -> usize {
        self.list_records_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Get every update attempt as `(zone_id, record_id, content)`
    pub fn updates(&self) -> Vec<(String, String, String)> {
        self.updates.lock().unwrap().clone()
    }

    /// Create a new MockDnsProvider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zones: other.zones.clone(),
            pages: other.pages.clone(),
            zone_listing_fails: other.zone_listing_fails,
            record_listing_fails: other.record_listing_fails,
            rejected_record_ids: other.rejected_record_ids.clone(),
            list_zones_calls: Arc::clone(&other.list_zones_calls),
            list_records_calls: Arc::clone(&other.list_records_calls),
            update_calls: Arc::clone(&other.update_calls),
            updates: Arc::clone(&other.updates),
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.list_zones_calls.fetch_add(1, Ordering::SeqCst);

        if self.zone_listing_fails {
            return Err(Error::provider("mock", "zone listing unavailable"));
        }
        Ok(self.zones.clone())
    }

    async fn list_records(&self, zone_id: &str) -> Result<RecordPage> {
        self.list_records_calls.fetch_add(1, Ordering::SeqCst);

        if self.record_listing_fails {
            return Err(Error::provider("mock", "record listing unavailable"));
        }
        self.pages
            .get(zone_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("zone {}", zone_id)))
    }

    async fn update_record(&self, zone_id: &str, record_id: &str, content: &str) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updates.lock().unwrap().push((
            zone_id.to_string(),
            record_id.to_string(),
            content.to_string(),
        ));

        if self.rejected_record_ids.iter().any(|id| id == record_id) {
            return Err(Error::provider(
                "mock",
                format!("update of {} rejected", record_id),
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Shorthand for building a record fixture
pub fn record(id: &str, kind: &str, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: "example.com".to_string(),
        kind: kind.to_string(),
        content: content.to_string(),
    }
}
