//! Request execution: building, sending and classifying API calls.

mod classify;
mod client;
mod request;
mod transport;

pub use classify::classify;
pub use client::Client;
pub use request::{HttpMethod, RequestSpec, TransportRequest, build_request};
pub use transport::{BodyStream, BufferedBody, RawResponse, ReqwestTransport, Transport, read_body};
