//! API client: builds, sends and classifies one request per call.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::classify::classify;
use super::request::{RequestSpec, build_request};
use super::transport::{ReqwestTransport, Transport};
use crate::config::{ClientBuilder, Credentials, TransportConfig};
use crate::endpoint::Endpoint;
use crate::outcome::{ErrorResult, Outcome};

/// Client for the API.
///
/// Cloning is cheap; clones share the configuration and the connection pool.
/// Calls never fail with a `Result`: every failure is reported as [`Outcome::Error`].
pub struct Client<T: Transport = ReqwestTransport> {
    config: Arc<TransportConfig>,
    transport: Arc<T>,
}

impl<T: Transport> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Client {
    /// Starts configuring a client for the given account.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }
}

impl<T: Transport> Client<T> {
    pub(crate) fn new(config: TransportConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Performs one API call.
    #[tracing::instrument(skip(self, spec), fields(method = %spec.method, endpoint = %spec.endpoint_path))]
    pub async fn execute(&self, spec: RequestSpec) -> Outcome {
        let request = match build_request(&self.config, &spec) {
            Ok(request) => request,
            Err(e) => {
                warn!("Not sending {} request: {}", spec.endpoint_path, e);
                return ErrorResult::from_cause(None, None, e).into();
            }
        };

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = ErrorResult::from_cause(None, None, e);
                warn!(
                    "{} request to {} failed with {}",
                    spec.method, spec.endpoint_path, err.code
                );
                return err.into();
            }
        };

        let outcome = classify(response, spec.output_file.as_deref()).await;
        match &outcome {
            Outcome::Error(err) => debug!(
                "{} finished with error {} (HTTP {:?})",
                spec.endpoint_path, err.code, err.status
            ),
            _ => debug!("{} finished successfully", spec.endpoint_path),
        }
        outcome
    }

    /// Calls a catalog endpoint with its default verb and timeout.
    ///
    /// `output_file` only matters for endpoints that return files. Leaving it out for
    /// one of them is logged but still sent; a file response then ends as an error.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        params: BTreeMap<String, String>,
        output_file: Option<&Path>,
    ) -> Outcome {
        if endpoint.lacks_output_file(output_file) {
            warn!("{} returns a file but no output path was given", endpoint.name);
        }
        let mut spec = RequestSpec::new(
            endpoint.method,
            endpoint.name,
            params,
            Duration::from_secs(endpoint.timeout_secs),
        );
        spec.output_file = output_file.map(Path::to_path_buf);
        self.execute(spec).await
    }
}
