//! Core traits for the zonesync system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Resolve the host's current public IP addresses
//! - [`DnsProvider`]: Read and update zone records via provider APIs

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{DnsProvider, DnsRecord, RecordPage, Zone};
pub use ip_source::{IpSource, ResolvedAddresses};
