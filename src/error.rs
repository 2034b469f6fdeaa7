//! Error codes reported in an [`Outcome`](crate::Outcome) and the mapping from
//! stage failures onto them.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure raised by one stage of a request.
///
/// Stage errors never leave the engine: [`Client::execute`](crate::Client::execute)
/// maps each one onto an [`ErrorCode`] and keeps it as the outcome's cause.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid request URL {url:?}: {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to write response body to {path:?}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Failure to construct a [`Client`](crate::Client).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Credentials contain characters not allowed in an HTTP header")]
    InvalidCredentials(#[source] reqwest::header::InvalidHeaderValue),

    #[error("Failed to initialise HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Closed set of error codes an API call can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Base URL plus endpoint path is not a valid URL.
    UrlParsingError,
    /// Connection refused, unreachable or not established in time.
    ConnectTimeout,
    /// No response within the call's timeout once connected.
    ReadTimeout,
    /// Host name could not be resolved.
    DnsLookupFailed,
    /// TLS handshake or certificate failure.
    TlsProtocolError,
    /// Output file could not be created or written.
    FileIoError,
    /// Any other transport failure.
    NetworkIoError,
    /// Body labelled as JSON did not parse as a JSON object.
    InvalidJsonResponse,
    /// Non-JSON error body, or a success body that could not be used.
    ApiGatewayError,
    /// Error reported by the API itself in its `api-error` field.
    Api(i64),
}

/// `api-error` value for a request parameter that failed validation.
pub const API_PARAMETER_ERROR: i64 = 1;

impl ErrorCode {
    /// Short description used as the message of locally raised errors.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UrlParsingError => "Unable to parse the request URL",
            ErrorCode::ConnectTimeout => "Failed to connect to the API",
            ErrorCode::ReadTimeout => "Timed out waiting for the API response",
            ErrorCode::DnsLookupFailed => "Failed to resolve the API host name",
            ErrorCode::TlsProtocolError => "TLS handshake with the API failed",
            ErrorCode::FileIoError => "Failed to write the output file",
            ErrorCode::NetworkIoError => "Network error while talking to the API",
            ErrorCode::InvalidJsonResponse => "The API returned an invalid JSON response",
            ErrorCode::ApiGatewayError => "The API gateway returned an unexpected response",
            ErrorCode::Api(_) => "The API reported an error",
        }
    }

    /// Whether the code was reported by the remote API rather than raised locally.
    pub fn is_remote(&self) -> bool {
        matches!(self, ErrorCode::Api(_))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::UrlParsingError => "URL_PARSING_ERROR",
            ErrorCode::ConnectTimeout => "CONNECT_TIMEOUT",
            ErrorCode::ReadTimeout => "READ_TIMEOUT",
            ErrorCode::DnsLookupFailed => "DNS_LOOKUP_FAILED",
            ErrorCode::TlsProtocolError => "TLS_PROTOCOL_ERROR",
            ErrorCode::FileIoError => "FILE_IO_ERROR",
            ErrorCode::NetworkIoError => "NETWORK_IO_ERROR",
            ErrorCode::InvalidJsonResponse => "INVALID_JSON_RESPONSE",
            ErrorCode::ApiGatewayError => "API_GATEWAY_ERROR",
            ErrorCode::Api(code) => return write!(f, "{}", code),
        };
        f.write_str(name)
    }
}

impl From<&Error> for ErrorCode {
    fn from(error: &Error) -> Self {
        match error {
            Error::UrlParse { .. } => ErrorCode::UrlParsingError,
            Error::Transport(e) => classify_transport_error(e),
            Error::FileIo { .. } => ErrorCode::FileIoError,
            Error::InvalidJson(_) => ErrorCode::InvalidJsonResponse,
        }
    }
}

/// Maps a reqwest failure onto an error code.
///
/// DNS and TLS failures surface as connect errors in reqwest, so they are
/// recognised from the source chain before the connect check.
pub fn classify_transport_error(error: &reqwest::Error) -> ErrorCode {
    if source_chain_matches(error, is_dns_failure) {
        return ErrorCode::DnsLookupFailed;
    }
    if source_chain_matches(error, is_tls_failure) {
        return ErrorCode::TlsProtocolError;
    }
    if error.is_connect() || source_chain_matches(error, is_refused) {
        return ErrorCode::ConnectTimeout;
    }
    if error.is_timeout() || source_chain_matches(error, is_timed_out) {
        return ErrorCode::ReadTimeout;
    }
    ErrorCode::NetworkIoError
}

fn source_chain_matches(error: &reqwest::Error, pred: fn(&(dyn StdError + 'static)) -> bool) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(e) = current {
        if pred(e) {
            return true;
        }
        current = e.source();
    }
    false
}

fn is_dns_failure(e: &(dyn StdError + 'static)) -> bool {
    let msg = e.to_string().to_lowercase();
    msg.contains("dns error")
        || msg.contains("failed to lookup address")
        || msg.contains("name or service not known")
        || msg.contains("no such host")
}

/// rustls errors reach us either directly or wrapped in an `io::Error`, whose
/// `source()` skips the wrapped error, so the payload is checked with `get_ref`.
fn is_tls_failure(e: &(dyn StdError + 'static)) -> bool {
    if e.downcast_ref::<rustls::Error>().is_some() {
        return true;
    }
    let wrapped = e
        .downcast_ref::<io::Error>()
        .and_then(io::Error::get_ref)
        .is_some_and(|inner| inner.downcast_ref::<rustls::Error>().is_some());
    wrapped || is_tls_message(e)
}

fn is_tls_message(e: &(dyn StdError + 'static)) -> bool {
    let msg = e.to_string().to_lowercase();
    msg.contains("certificate")
        || msg.contains("handshake")
        || msg.contains("tls")
        || msg.contains("invalid peer")
}

fn is_refused(e: &(dyn StdError + 'static)) -> bool {
    e.downcast_ref::<io::Error>().is_some_and(|io| {
        matches!(
            io.kind(),
            io::ErrorKind::ConnectionRefused
                | io::ErrorKind::HostUnreachable
                | io::ErrorKind::NetworkUnreachable
        )
    })
}

fn is_timed_out(e: &(dyn StdError + 'static)) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|io| io.kind() == io::ErrorKind::TimedOut)
}
