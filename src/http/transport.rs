//! Dispatches a [`TransportRequest`] over HTTP.

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::collections::VecDeque;
use std::fmt;

use super::request::TransportRequest;
use crate::error::Error;

/// Response status and headers, with the body still unread.
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Box<dyn BodyStream>,
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// A response body read chunk by chunk. Dropping it releases the connection.
#[async_trait]
pub trait BodyStream: Send {
    /// Returns the next chunk, or `None` once the body is exhausted.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, Error>;
}

#[async_trait]
impl BodyStream for reqwest::Response {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, Error> {
        Ok(self.chunk().await?)
    }
}

/// Body already held in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferedBody {
    chunks: VecDeque<Bytes>,
}

impl BufferedBody {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self::from_chunks([body.into()])
    }

    pub fn from_chunks(chunks: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }
}

#[async_trait]
impl BodyStream for BufferedBody {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, Error> {
        Ok(self.chunks.pop_front())
    }
}

/// Sends requests and hands back the raw response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<RawResponse, Error>;
}

/// [`Transport`] backed by a shared reqwest connection pool.
///
/// The pool is never reconfigured; each request carries its own timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<RawResponse, Error> {
        debug!(
            "{} {}{} (timeout {:?})...",
            request.method,
            request.url.origin().ascii_serialization(),
            request.url.path(),
            request.timeout
        );

        let mut builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers)
            .timeout(request.timeout);

        if let Some(form) = request.form {
            builder = builder
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .body(form);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        debug!("Received HTTP {} ({:?})", status, content_type);

        Ok(RawResponse {
            status,
            content_type,
            body: Box::new(response),
        })
    }
}

/// Reads the whole body into memory.
pub async fn read_body(body: &mut dyn BodyStream) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = body.next_chunk().await? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}
