//! Client configuration: base URL, credentials and the shared connection pool.

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::time::Duration;

use crate::error::BuildError;
use crate::http::{Client, ReqwestTransport, Transport};

/// Connect timeout of the shared connection pool.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the account user ID (`User-ID`).
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("user-id");

/// Header carrying the account API key (`API-Key`).
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// Account credentials sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    api_key: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            api_key: api_key.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Converts the credentials into sensitive request headers.
    fn to_headers(&self) -> Result<HeaderMap, BuildError> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_ID_HEADER, &self.user_id),
            (API_KEY_HEADER, &self.api_key),
        ] {
            let mut value = HeaderValue::from_str(value).map_err(BuildError::InvalidCredentials)?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// API base URL. The named variants are the service's regional and cloud mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaseUrl {
    #[default]
    Multicloud,
    Aws,
    Gcp,
    Backup,
    EuGeofence,
    AuGeofence,
    UsGeofence,
    /// Any other base URL, kept verbatim. It must end with `/`, endpoint paths are appended as is.
    Custom(String),
}

impl BaseUrl {
    pub fn as_str(&self) -> &str {
        match self {
            BaseUrl::Multicloud => "https://neutrinoapi.net/",
            BaseUrl::Aws => "https://aws.neutrinoapi.net/",
            BaseUrl::Gcp => "https://gcp.neutrinoapi.net/",
            BaseUrl::Backup => "https://neutrinoapi.com/",
            BaseUrl::EuGeofence => "https://eu.neutrinoapi.net/",
            BaseUrl::AuGeofence => "https://aus.neutrinoapi.net/",
            BaseUrl::UsGeofence => "https://usa.neutrinoapi.net/",
            BaseUrl::Custom(url) => url,
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-client settings shared by every call.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: BaseUrl,
    pub(crate) auth_headers: HeaderMap,
}

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    credentials: Credentials,
    base_url: BaseUrl,
    connect_timeout: Duration,
    user_agent: String,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: BaseUrl::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: concat!("neutrinoapi-rust/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds a client backed by a reqwest connection pool.
    pub fn build(self) -> Result<Client, BuildError> {
        let pool = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(BuildError::HttpClient)?;

        self.build_with_transport(ReqwestTransport::new(pool))
    }

    /// Builds a client that dispatches through `transport`.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<Client<T>, BuildError> {
        let auth_headers = self.credentials.to_headers()?;
        debug!(
            "Client configured for {} (connect timeout {:?})",
            self.base_url, self.connect_timeout
        );

        Ok(Client::new(
            TransportConfig {
                base_url: self.base_url,
                auth_headers,
            },
            transport,
        ))
    }
}
