// # DNS Provider Trait
//
// Defines the interface for reading and updating zone records via provider APIs.
//
// ## Implementations
//
// - Cloudflare: `zonesync-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use zonesync_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zones = provider.list_zones().await?;
//     let page = provider.list_records(&zones[0].id).await?;
//     provider.update_record(&zones[0].id, &page.records[0].id, "203.0.113.7").await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A DNS zone as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned zone identifier
    pub id: String,
    /// Zone name (e.g., "example.com")
    pub name: String,
}

/// A DNS record as reported by the provider
///
/// The record type stays a plain string. Only `"A"` and `"AAAA"` are acted
/// on; every other type passes through the reconciler untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record identifier
    pub id: String,
    /// Record name (e.g., "example.com" or "www.example.com")
    pub name: String,
    /// Record type ("A", "AAAA", "TXT", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Record content (the address, for A and AAAA records)
    pub content: String,
}

/// One page of a zone's records
///
/// `total_pages` comes from the provider's pagination metadata. Callers
/// only ever receive the first page; the reconciler warns when more exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    /// The records on this page
    pub records: Vec<DnsRecord>,
    /// Total number of pages the provider reports for this listing
    pub total_pages: u32,
}

/// Trait for DNS provider implementations
///
/// This trait defines the zone and record operations one reconciliation
/// cycle needs. Implementations must handle the specifics of each
/// provider's API.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Error Handling
///
/// Implementations return errors without retrying. How a failure is
/// treated depends on which call failed, and that policy is owned by the
/// engine, not the provider.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List all zones visible to the configured credentials
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Zone>)`: the zones, possibly empty
    /// - `Err(Error)`: if the listing request failed
    async fn list_zones(&self) -> Result<Vec<Zone>, crate::Error>;

    /// List the DNS records of a zone
    ///
    /// Fetches a single page of results. The returned page carries the
    /// provider's total page count so callers can detect truncation.
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The provider-assigned zone identifier
    ///
    /// # Returns
    ///
    /// - `Ok(RecordPage)`: the first page of records
    /// - `Err(Error)`: if the listing request failed
    async fn list_records(&self, zone_id: &str) -> Result<RecordPage, crate::Error>;

    /// Rewrite the content of an existing record
    ///
    /// Only the content changes; name, type, TTL, and proxy settings are
    /// left as they are.
    ///
    /// # Idempotency
    ///
    /// Setting the content a record already has must be safe. Callers skip
    /// the call when the content matches, but implementations must not rely
    /// on that.
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The provider-assigned zone identifier
    /// - `record_id`: The provider-assigned record identifier
    /// - `content`: The new record content
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the provider accepted the update
    /// - `Err(Error)`: if the update failed
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "cloudflare")
    fn provider_name(&self) -> &'static str;
}
