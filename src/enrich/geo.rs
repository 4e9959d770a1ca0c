//! Reputation and geolocation lookup client

use crate::error::{IpIntelError, Result};
use serde::{Deserialize, Serialize};

/// Fields requested from the reputation service.
const IP_API_FIELDS: &str = "status,message,country,regionName,city,isp,org,as";

/// Organization and location metadata for one IP address. Fields the
/// service could not resolve stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub organization: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub isp: Option<String>,
    pub asn: Option<String>,
}

/// One reputation and geolocation lookup per IP address.
pub trait GeoLookup {
    fn lookup(&self, ip: &str) -> impl std::future::Future<Output = Result<GeoInfo>> + Send;
}

/// Wire format of the ip-api.com JSON endpoint.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default, rename = "regionName")]
    region_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default, rename = "as")]
    asn: Option<String>,
}

impl IpApiResponse {
    /// The service reports per-query failures in the payload, not via HTTP
    /// status. Anything but "success" is a failed lookup.
    fn into_geo_info(self) -> Result<GeoInfo> {
        if self.status != "success" {
            return Err(IpIntelError::Lookup(format!(
                "Reputation service rejected the query: {}",
                self.message.unwrap_or_else(|| "no reason given".to_string())
            )));
        }

        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Ok(GeoInfo {
            organization: present(self.org),
            country: present(self.country),
            region: present(self.region_name),
            city: present(self.city),
            isp: present(self.isp),
            asn: present(self.asn),
        })
    }
}

/// Reject non-success transport statuses before touching the body.
fn ensure_success(status: reqwest::StatusCode, ip: &str) -> Result<()> {
    if !status.is_success() {
        return Err(IpIntelError::Lookup(format!(
            "Reputation service returned HTTP {} for {}",
            status, ip
        )));
    }
    Ok(())
}

/// Client for the keyed ip-api.com endpoint.
pub struct IpApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl IpApiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl GeoLookup for IpApiClient {
    async fn lookup(&self, ip: &str) -> Result<GeoInfo> {
        let url = format!("{}/{}", self.endpoint, ip);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("fields", IP_API_FIELDS)])
            .send()
            .await
            .map_err(|e| {
                IpIntelError::Lookup(format!("Reputation request for {} failed: {}", ip, e))
            })?;

        ensure_success(response.status(), ip)?;

        let payload: IpApiResponse = response.json().await.map_err(|e| {
            IpIntelError::Lookup(format!("Undecodable reputation response for {}: {}", ip, e))
        })?;
        payload.into_geo_info()
    }
}
