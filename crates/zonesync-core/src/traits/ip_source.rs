// # IP Source Trait
//
// Defines the interface for resolving the host's public IP addresses.
//
// ## Implementations
//
// - HTTP echo endpoints: `zonesync-ip-echo` crate
//
// ## Usage
//
// ```rust,ignore
// use zonesync_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let addrs = source.resolve().await?;
//     println!("IPv4: {} IPv6: {}", addrs.ipv4, addrs.ipv6);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// The pair of public addresses one resolution produced
///
/// Both fields hold the echo endpoint's response body exactly as received,
/// with no parsing or trimming. Record contents are compared against these
/// values byte for byte, so a body with trailing whitespace will never
/// match a bare address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddresses {
    /// Public IPv4 address, as reported over an IPv4-pinned socket
    pub ipv4: String,
    /// Public IPv6 address, as reported over an IPv6-pinned socket
    pub ipv6: String,
}

/// Trait for public-address resolution implementations
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Error Handling
///
/// `resolve()` performs live network I/O. Implementations report failure
/// only when the authoritative attempt fails; the engine treats that as a
/// fatal cycle error, so sources should not retry internally.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the host's current public IPv4 and IPv6 addresses
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedAddresses)`: both addresses as echoed back to us
    /// - `Err(Error)`: if the authoritative resolution attempt failed
    async fn resolve(&self) -> Result<ResolvedAddresses, crate::Error>;
}
