//! HTTP transport.
//!
//! [`HttpClient`] talks to a management controller over HTTPS with a
//! blocking `ureq` agent. Resource URIs in documents are paths
//! (`/redfish/v1/...`); they are joined to the configured endpoint.
//!
//! # Certificates
//!
//! Controllers usually ship self-signed certificates. Set
//! [`ClientConfig::insecure`] to skip verification on trusted networks.

use crate::client::Client;
use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;

/// Largest document accepted from the service.
const MAX_BODY_SIZE: u64 = 16 * 1024 * 1024;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `https://10.0.0.5`.
    pub endpoint: String,
    /// Basic auth user.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for `endpoint` with no credentials.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: None,
            password: None,
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set basic auth credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Skip certificate verification.
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking HTTP implementation of [`Client`].
pub struct HttpClient {
    agent: ureq::Agent,
    endpoint: String,
    authorization: Option<String>,
}

impl HttpClient {
    /// Build a client from settings.
    ///
    /// Fails when the endpoint is not an `http(s)://` URL.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(Error::Config(format!(
                "endpoint must start with http:// or https://, got '{}'",
                config.endpoint
            )));
        }

        let tls = ureq::tls::TlsConfig::builder()
            .disable_verification(config.insecure)
            .build();
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .tls_config(tls)
            .build();

        let authorization = config.username.map(|user| {
            let password = config.password.unwrap_or_default();
            format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
        });

        Ok(Self {
            agent: ureq::Agent::new_with_config(agent_config),
            endpoint,
            authorization,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URL for a resource URI.
    fn url(&self, uri: &str) -> String {
        if uri.starts_with("https://") || uri.starts_with("http://") {
            uri.to_string()
        } else if uri.starts_with('/') {
            format!("{}{}", self.endpoint, uri)
        } else {
            format!("{}/{}", self.endpoint, uri)
        }
    }
}

impl Client for HttpClient {
    fn get(&self, uri: &str) -> Result<Vec<u8>> {
        let url = self.url(uri);
        log::trace!("GET {url}");

        let mut request = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .header("OData-Version", "4.0")
            .header("User-Agent", "redkit");
        if let Some(auth) = &self.authorization {
            request = request.header("Authorization", auth);
        }

        let mut response = request.call().map_err(|e| Error::from(e).at(uri))?;
        response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_vec()
            .map_err(|e| Error::from(e).at(uri))
    }

    fn patch(&self, uri: &str, payload: &[u8]) -> Result<()> {
        let url = self.url(uri);
        log::trace!("PATCH {url} ({} bytes)", payload.len());

        let mut request = self
            .agent
            .patch(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("OData-Version", "4.0")
            .header("User-Agent", "redkit");
        if let Some(auth) = &self.authorization {
            request = request.header("Authorization", auth);
        }

        request
            .send(payload)
            .map_err(|e| Error::from(e).at(uri))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_endpoint_without_scheme() {
        let err = HttpClient::new(ClientConfig::new("10.0.0.5")).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = HttpClient::new(ClientConfig::new("https://bmc.local/")).unwrap();
        assert_eq!(client.endpoint(), "https://bmc.local");
    }

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(ClientConfig::new("https://bmc.local")).unwrap();
        assert_eq!(
            client.url("/redfish/v1/Systems/1"),
            "https://bmc.local/redfish/v1/Systems/1"
        );
        assert_eq!(
            client.url("redfish/v1/Systems/1"),
            "https://bmc.local/redfish/v1/Systems/1"
        );
        assert_eq!(
            client.url("https://other/redfish/v1"),
            "https://other/redfish/v1"
        );
    }

    #[test]
    fn test_basic_auth_header() {
        let config = ClientConfig::new("https://bmc.local").credentials("admin", "secret");
        let client = HttpClient::new(config).unwrap();
        assert_eq!(
            client.authorization.as_deref(),
            Some("Basic YWRtaW46c2VjcmV0")
        );

        let anonymous = HttpClient::new(ClientConfig::new("https://bmc.local")).unwrap();
        assert!(anonymous.authorization.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("https://bmc.local")
            .insecure(true)
            .timeout(Duration::from_secs(5));
        assert!(config.insecure);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.username.is_none());
    }
}
