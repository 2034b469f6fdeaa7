//! Client for the Neutrino API.
//!
//! Every call goes through one engine: the request is built from the endpoint path and
//! parameters, sent with the endpoint's timeout and the response is classified into an
//! [`Outcome`]. Failures are values, never panics or `Err`s:
//!
//! ```no_run
//! use neutrinoapi::{Client, Credentials, Endpoint, Outcome};
//! use std::collections::BTreeMap;
//!
//! # async fn run() -> Result<(), neutrinoapi::BuildError> {
//! let client = Client::builder(Credentials::new("my-user-id", "my-api-key")).build()?;
//! let params = BTreeMap::from([("ip".to_string(), "1.1.1.1".to_string())]);
//!
//! match client.call(Endpoint::IP_INFO, params, None).await {
//!     Outcome::Json(result) => println!("{:?}", result.body.get("country")),
//!     Outcome::File(result) => println!("saved to {}", result.path.display()),
//!     Outcome::Error(err) => eprintln!("{}: {}", err.code, err.message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod outcome;

pub use config::{BaseUrl, ClientBuilder, Credentials};
pub use endpoint::{ENDPOINTS, Endpoint};
pub use error::{BuildError, Error, ErrorCode};
pub use http::{Client, HttpMethod, RequestSpec};
pub use outcome::{ErrorResult, FileResult, JsonResult, Outcome};
