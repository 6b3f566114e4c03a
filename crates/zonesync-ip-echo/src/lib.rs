// # Echo-Endpoint IP Source
//
// This crate resolves the host's public addresses by querying HTTP echo
// services, which answer a plain GET with the caller's address as the
// response body.
//
// ## Family Pinning
//
// One endpoint serves both families, so which address comes back depends
// entirely on which socket family carried the request. The source holds
// two HTTP clients, each bound to the unspecified local address of one
// family; candidate addresses of the other family are never dialed, so a
// request cannot silently fall back and report the wrong family.
//
// ## Primary and Secondary Endpoints
//
// Every resolution queries the primary endpoint first and then the
// secondary endpoint unconditionally. The secondary's answer is the one
// returned, even when the primary answered too; a primary failure is
// logged and nothing more. Resolution as a whole fails only when the
// secondary attempt fails.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::error;
use zonesync_core::traits::{IpSource, ResolvedAddresses};
use zonesync_core::{Error, Result};

/// Default primary echo endpoint
pub const DEFAULT_PRIMARY_ENDPOINT: &str = "https://ifconfig.me";

/// Default secondary echo endpoint
pub const DEFAULT_SECONDARY_ENDPOINT: &str = "https://ipecho.net/plain";

/// Echo-endpoint IP source with one pinned client per address family
pub struct EchoIpSource {
    /// Primary endpoint URL
    primary_url: String,

    /// Secondary endpoint URL, the authoritative one
    secondary_url: String,

    /// Client whose connections are restricted to IPv4
    v4_client: reqwest::Client,

    /// Client whose connections are restricted to IPv6
    v6_client: reqwest::Client,
}

impl EchoIpSource {
    /// Create a source using the default endpoints
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_PRIMARY_ENDPOINT, DEFAULT_SECONDARY_ENDPOINT)
    }

    /// Create a source with explicit primary and secondary endpoints
    ///
    /// No request timeout is configured; the transport default applies.
    pub fn with_endpoints(
        primary_url: impl Into<String>,
        secondary_url: impl Into<String>,
    ) -> Result<Self> {
        let v4_client = reqwest::Client::builder()
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .build()
            .map_err(|e| Error::http(format!("failed to build IPv4 client: {}", e)))?;

        let v6_client = reqwest::Client::builder()
            .local_address(IpAddr::V6(Ipv6Addr::UNSPECIFIED))
            .build()
            .map_err(|e| Error::http(format!("failed to build IPv6 client: {}", e)))?;

        Ok(Self {
            primary_url: primary_url.into(),
            secondary_url: secondary_url.into(),
            v4_client,
            v6_client,
        })
    }

    /// Fetch both address families from one endpoint
    ///
    /// Both sub-fetches must succeed; a failure on either family fails the
    /// whole attempt and discards any partial result.
    async fn fetch_pair(&self, url: &str) -> Result<ResolvedAddresses> {
        let ipv4 = self.fetch_body(&self.v4_client, url).await?;
        let ipv6 = self.fetch_body(&self.v6_client, url).await?;
        Ok(ResolvedAddresses { ipv4, ipv6 })
    }

    /// GET `url` and return the raw response body
    ///
    /// The body is not trimmed or validated and the status code is not
    /// inspected; whatever the endpoint sends back is the answer.
    async fn fetch_body(&self, client: &reqwest::Client, url: &str) -> Result<String> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::http(format!("GET {} failed: {}", url, e)))?;

        response
            .text()
            .await
            .map_err(|e| Error::http(format!("reading body from {} failed: {}", url, e)))
    }
}

#[async_trait]
impl IpSource for EchoIpSource {
    /// Resolve both public addresses via the echo endpoints
    ///
    /// The primary attempt's outcome never affects the returned value; its
    /// failure is logged and its success is discarded when the secondary
    /// attempt overwrites it.
    async fn resolve(&self) -> Result<ResolvedAddresses> {
        if let Err(e) = self.fetch_pair(&self.primary_url).await {
            error!("Primary echo endpoint failed: {}", e);
        }

        match self.fetch_pair(&self.secondary_url).await {
            Ok(addrs) => Ok(addrs),
            Err(e) => {
                error!("Secondary echo endpoint failed: {}", e);
                Err(Error::resolution("unable to fetch ip"))
            }
        }
    }
}
