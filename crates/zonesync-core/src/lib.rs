// # zonesync-core
//
// Core library for the scheduled DNS reconciler.
//
// ## Architecture Overview
//
// This library provides the core functionality for keeping a zone's
// address records aligned with the host's public addresses:
// - **IpSource**: Trait for resolving the current public IPv4/IPv6 addresses
// - **DnsProvider**: Trait for listing zones/records and updating records
// - **SyncEngine**: One resolve-and-reconcile cycle over those two seams
// - **Scheduler**: Fixed-interval driver that repeats the cycle forever
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Stateless Cycles**: Every cycle rebuilds its view from the provider
// 3. **Library-First**: All core functionality can be used as a library
// 4. **Explicit Outcomes**: Abandoned cycles are values, not hidden control flow

pub mod config;
pub mod engine;
pub mod error;
pub mod scheduler;
pub mod traits;

// Re-export core types for convenience
pub use config::SyncConfig;
pub use engine::{CycleOutcome, CycleSummary, SyncEngine};
pub use error::{Error, Result};
pub use scheduler::Schedule;
pub use traits::{DnsProvider, DnsRecord, IpSource, RecordPage, ResolvedAddresses, Zone};
