//! Turns a [`RequestSpec`] into a transport-ready request.

use reqwest::Url;
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::TransportConfig;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// One API call as described by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub endpoint_path: String,
    pub params: BTreeMap<String, String>,
    pub output_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl RequestSpec {
    pub fn new(
        method: HttpMethod,
        endpoint_path: impl Into<String>,
        params: BTreeMap<String, String>,
        timeout: Duration,
    ) -> Self {
        Self {
            method,
            endpoint_path: endpoint_path.into(),
            params,
            output_file: None,
            timeout,
        }
    }

    pub fn get(
        endpoint_path: impl Into<String>,
        params: BTreeMap<String, String>,
        timeout: Duration,
    ) -> Self {
        Self::new(HttpMethod::Get, endpoint_path, params, timeout)
    }

    pub fn post(
        endpoint_path: impl Into<String>,
        params: BTreeMap<String, String>,
        timeout: Duration,
    ) -> Self {
        Self::new(HttpMethod::Post, endpoint_path, params, timeout)
    }

    /// Stores a non-JSON success body at `path`.
    pub fn with_output_file(mut self, path: impl AsRef<Path>) -> Self {
        self.output_file = Some(path.as_ref().to_path_buf());
        self
    }
}

/// A fully built request. Nothing has been sent yet.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderMap,
    /// `application/x-www-form-urlencoded` body, POST only.
    pub form: Option<String>,
    pub timeout: Duration,
}

/// Builds the request for `spec`: GET params go into the query string, POST params
/// into a form body. Fails only when base URL plus endpoint path is not a valid URL.
pub fn build_request(config: &TransportConfig, spec: &RequestSpec) -> Result<TransportRequest, Error> {
    let raw = format!("{}{}", config.base_url, spec.endpoint_path);
    let mut url = Url::parse(&raw).map_err(|source| Error::UrlParse {
        url: raw.clone(),
        source,
    })?;

    let form = match spec.method {
        HttpMethod::Get => {
            if !spec.params.is_empty() {
                url.query_pairs_mut().extend_pairs(&spec.params);
            }
            None
        }
        HttpMethod::Post => Some(
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&spec.params)
                .finish(),
        ),
    };

    Ok(TransportRequest {
        method: spec.method,
        url,
        headers: config.auth_headers.clone(),
        form,
        timeout: spec.timeout,
    })
}
