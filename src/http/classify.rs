//! Decides which [`Outcome`] a raw HTTP response represents.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::transport::{BodyStream, RawResponse, read_body};
use crate::error::{API_PARAMETER_ERROR, Error, ErrorCode};
use crate::outcome::{ErrorResult, FileResult, JsonResult, Outcome};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Error body returned by the API with a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "api-error")]
    code: i64,
    #[serde(rename = "api-error-msg")]
    message: String,
    #[serde(rename = "api-parameter-name")]
    parameter_name: Option<String>,
    #[serde(rename = "api-parameter-type")]
    parameter_type: Option<String>,
}

impl ErrorEnvelope {
    fn into_code_and_message(self) -> (ErrorCode, String) {
        let message = if self.code == API_PARAMETER_ERROR {
            format!(
                "{}, Name: {}, Type: {}",
                self.message,
                self.parameter_name.unwrap_or_default(),
                self.parameter_type.unwrap_or_default()
            )
        } else {
            self.message
        };
        (ErrorCode::Api(self.code), message)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE))
}

/// Classifies `response`, writing a non-JSON success body to `output_file` when given.
///
/// The response body is consumed or dropped before this returns.
#[tracing::instrument(skip(response), fields(status = response.status))]
pub async fn classify(response: RawResponse, output_file: Option<&Path>) -> Outcome {
    let RawResponse {
        status,
        content_type,
        mut body,
    } = response;

    let result = classify_body(status, content_type.as_deref(), body.as_mut(), output_file).await;
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("HTTP {} response could not be handled: {}", status, e);
            ErrorResult::from_cause(Some(status), content_type, e).into()
        }
    }
}

async fn classify_body(
    status: u16,
    content_type: Option<&str>,
    body: &mut dyn BodyStream,
    output_file: Option<&Path>,
) -> Result<Outcome, Error> {
    let owned_content_type = content_type.map(str::to_string);
    let json = is_json(content_type);

    if is_success(status) {
        if json {
            let raw = read_body(body).await?;
            let object: Map<String, Value> = serde_json::from_slice(&raw)?;
            return Ok(Outcome::Json(JsonResult {
                status,
                content_type: owned_content_type.unwrap_or_default(),
                body: object,
            }));
        }

        if let Some(path) = output_file {
            let written = write_body_to_file(body, path).await?;
            if written == 0 {
                warn!("HTTP {} returned an empty body for {:?}", status, path);
                return Ok(ErrorResult::from_response(
                    status,
                    owned_content_type,
                    ErrorCode::ApiGatewayError,
                    format!("Empty response body written to {}", path.display()),
                )
                .into());
            }
            return Ok(Outcome::File(FileResult {
                status,
                content_type: owned_content_type.unwrap_or_default(),
                path: path.to_path_buf(),
            }));
        }

        let raw = read_body(body).await?;
        return Ok(gateway_error(status, owned_content_type, &raw));
    }

    let raw = read_body(body).await?;
    if json {
        let value: Value = serde_json::from_slice(&raw)?;
        if let Ok(envelope) = serde_json::from_value::<ErrorEnvelope>(value) {
            let (code, message) = envelope.into_code_and_message();
            debug!("API error {}: {}", code, message);
            return Ok(ErrorResult::from_response(status, owned_content_type, code, message).into());
        }
    }

    Ok(gateway_error(status, owned_content_type, &raw))
}

fn gateway_error(status: u16, content_type: Option<String>, raw: &[u8]) -> Outcome {
    ErrorResult::from_response(
        status,
        content_type,
        ErrorCode::ApiGatewayError,
        String::from_utf8_lossy(raw).into_owned(),
    )
    .into()
}

/// Streams the body into a newly created file and returns the file length.
///
/// The file handle is closed on every path, including a failed write.
async fn write_body_to_file(body: &mut dyn BodyStream, path: &Path) -> Result<u64, Error> {
    let file_err = |source: std::io::Error| Error::FileIo {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).await.map_err(file_err)?;
    while let Some(chunk) = body.next_chunk().await? {
        file.write_all(&chunk).await.map_err(file_err)?;
    }
    file.flush().await.map_err(file_err)?;
    drop(file);

    let len = tokio::fs::metadata(path).await.map_err(file_err)?.len();
    debug!(
        "Saved {:.2} MB to {:?}",
        len as f64 / (1024.0 * 1024.0),
        path
    );
    Ok(len)
}
