// # Cloudflare DNS Provider
//
// This crate implements the zonesync provider trait against the
// Cloudflare API v4.
//
// - Lists zones and DNS records, first result page only
// - Rewrites a record's content in place via PATCH, leaving name, type,
//   TTL, and proxy settings untouched
// - Propagates every API failure to the caller; retry policy is owned by
//   the engine
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones`
// - List DNS Records: GET `/zones/:zone_id/dns_records`
// - Update DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - Provider MUST fail fast if token is empty

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use zonesync_core::traits::{DnsProvider, DnsRecord, RecordPage, Zone};
use zonesync_core::{Error, Result};

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Provider name used in logs and error messages
const PROVIDER_NAME: &str = "cloudflare";

/// Envelope every Cloudflare v4 endpoint wraps its payload in
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result_info: Option<ResultInfo>,
}

impl<T> ApiEnvelope<T> {
    /// Flatten the envelope's error list into one message
    fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "request was not successful".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Extract the payload, treating a missing one as a provider error
    fn take_result(self, context: &str) -> Result<T> {
        self.result.ok_or_else(|| {
            Error::provider(PROVIDER_NAME, format!("{}: response carried no result", context))
        })
    }
}

/// One entry of the envelope's `errors` array
#[derive(Debug, Deserialize)]
struct ApiMessage {
    code: i64,
    message: String,
}

/// Pagination metadata attached to listing responses
#[derive(Debug, Deserialize)]
struct ResultInfo {
    total_pages: u32,
}

/// Cloudflare DNS provider
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareDns {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareDns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareDns")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl CloudflareDns {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:Read and DNS:Edit
    ///   permissions
    ///
    /// # Errors
    ///
    /// Fails when the token is empty or the HTTP client cannot be built.
    /// No request timeout is configured; the transport default applies.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();

        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder().build().map_err(|e| {
            Error::provider(PROVIDER_NAME, format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self { api_token, client })
    }

    /// GET `url` and parse the enveloped payload
    async fn get_envelope<T>(&self, url: &str, context: &str) -> Result<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                Error::provider(PROVIDER_NAME, format!("{}: HTTP request failed: {}", context, e))
            })?;

        self.parse_envelope(response, context).await
    }

    /// Map the response status, then parse and check the envelope
    ///
    /// Non-2xx statuses are turned into the matching error kind. A 2xx
    /// response whose envelope carries `success: false` is a provider
    /// error with the envelope's own messages.
    async fn parse_envelope<T>(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());

            return Err(match status.as_u16() {
                401 | 403 => Error::auth(format!(
                    "{}: invalid API token or insufficient permissions (status {})",
                    context, status
                )),
                404 => Error::not_found(format!("{}: {} (status {})", context, error_text, status)),
                429 => Error::rate_limited(format!(
                    "{}: rate limit exceeded, retry later (status {})",
                    context, status
                )),
                500..=599 => Error::provider(
                    PROVIDER_NAME,
                    format!(
                        "{}: server error (transient): {} - {}",
                        context, status, error_text
                    ),
                ),
                _ => Error::provider(
                    PROVIDER_NAME,
                    format!("{}: {} - {}", context, status, error_text),
                ),
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await.map_err(|e| {
            Error::provider(PROVIDER_NAME, format!("{}: failed to parse response: {}", context, e))
        })?;

        if !envelope.success {
            return Err(Error::provider(
                PROVIDER_NAME,
                format!("{}: {}", context, envelope.error_summary()),
            ));
        }

        Ok(envelope)
    }
}

#[async_trait]
impl DnsProvider for CloudflareDns {
    /// List all zones visible to the token
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones
    /// Authorization: Bearer <token>
    /// ```
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let url = format!("{}/zones", CLOUDFLARE_API_BASE);
        let envelope: ApiEnvelope<Vec<Zone>> = self.get_envelope(&url, "zone listing").await?;
        let zones = envelope.take_result("zone listing")?;

        debug!("Listed {} zone(s)", zones.len());
        Ok(zones)
    }

    /// List the first page of a zone's DNS records
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records
    /// Authorization: Bearer <token>
    /// ```
    async fn list_records(&self, zone_id: &str) -> Result<RecordPage> {
        let url = format!("{}/zones/{}/dns_records", CLOUDFLARE_API_BASE, zone_id);
        let envelope: ApiEnvelope<Vec<DnsRecord>> =
            self.get_envelope(&url, "record listing").await?;

        let total_pages = envelope.result_info.as_ref().map_or(1, |info| info.total_pages);
        let records = envelope.take_result("record listing")?;

        debug!(
            "Listed {} record(s) in zone {} ({} page(s) total)",
            records.len(),
            zone_id,
            total_pages
        );
        Ok(RecordPage {
            records,
            total_pages,
        })
    }

    /// Rewrite a record's content in place
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    /// {
    ///   "content": "203.0.113.7"
    /// }
    /// ```
    async fn update_record(&self, zone_id: &str, record_id: &str, content: &str) -> Result<()> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            CLOUDFLARE_API_BASE, zone_id, record_id
        );
        let payload = serde_json::json!({ "content": content });

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    PROVIDER_NAME,
                    format!("record update: HTTP request failed: {}", e),
                )
            })?;

        self.parse_envelope::<serde_json::Value>(response, "record update")
            .await?;

        debug!("Updated record {} in zone {}", record_id, zone_id);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
