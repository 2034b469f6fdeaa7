use mockito::{Matcher, Server};
use neutrinoapi::{
    BaseUrl, Client, Credentials, Endpoint, ErrorCode, FileResult, Outcome, RequestSpec,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn client_for(url: &str) -> Client {
    Client::builder(Credentials::new("test-user", "test-key"))
        .base_url(BaseUrl::Custom(format!("{}/", url)))
        .build()
        .unwrap()
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_get_json_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/bin-lookup")
        .match_header("User-ID", "test-user")
        .match_header("API-Key", "test-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("bin-number".into(), "48334884".into()),
            Matcher::UrlEncoded("customer-ip".into(), "".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"found":true}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .call(
            Endpoint::BIN_LOOKUP,
            params(&[("bin-number", "48334884"), ("customer-ip", "")]),
            None,
        )
        .await;

    mock.assert_async().await;
    match outcome {
        Outcome::Json(result) => {
            assert_eq!(result.status, 200);
            assert_eq!(result.content_type, "application/json");
            assert_eq!(json!(result.body), json!({"found": true}));
        }
        other => panic!("Expected JSON outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_post_download_saved_to_file() {
    let payload: Vec<u8> = (0..1200u32).map(|i| (i % 251) as u8).collect();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/bin-list-download")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("include-iso3".into(), "true".into()),
            Matcher::UrlEncoded("output-encoding".into(), "".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(&payload)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("bin-list.csv");

    let client = client_for(&server.url());
    let outcome = client
        .call(
            Endpoint::BIN_LIST_DOWNLOAD,
            params(&[("include-iso3", "true"), ("output-encoding", "")]),
            Some(&path),
        )
        .await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        Outcome::File(FileResult {
            status: 200,
            content_type: "application/octet-stream".to_string(),
            path: path.clone(),
        })
    );
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 1200);
    assert_eq!(std::fs::read(&path).unwrap(), payload);
}

#[tokio::test]
async fn test_post_parameter_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/image-resize")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"api-error":1,"api-error-msg":"invalid parameter","api-parameter-name":"width","api-parameter-type":"integer"}"#,
        )
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("resized.png");

    let client = client_for(&server.url());
    let outcome = client
        .call(
            Endpoint::IMAGE_RESIZE,
            params(&[("width", "wide")]),
            Some(&path),
        )
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::Api(1));
            assert_eq!(err.message, "invalid parameter, Name: width, Type: integer");
            assert_eq!(err.status, Some(403));
        }
        other => panic!("Expected API error, got {:?}", other),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn test_unparsable_base_url() {
    let client = Client::builder(Credentials::new("test-user", "test-key"))
        .base_url(BaseUrl::Custom("https://neutrino api.net/".to_string()))
        .build()
        .unwrap();

    let outcome = client
        .execute(RequestSpec::get(
            "geocode-reverse",
            params(&[("latitude", "1.0")]),
            Duration::from_secs(30),
        ))
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::UrlParsingError);
            assert_eq!(err.status, None);
        }
        other => panic!("Expected URL parsing error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = client_for(&url);
    let outcome = client
        .call(Endpoint::IP_INFO, params(&[("ip", "8.8.8.8")]), None)
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::ConnectTimeout);
            assert!(err.cause.is_some());
            assert_eq!(err.message, ErrorCode::ConnectTimeout.description());
        }
        other => panic!("Expected connect error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_html_success_without_output_path() {
    let html = "<html><body>Maintenance</body></html>";
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", Matcher::Regex(r"^/ua-lookup".to_string()))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(html)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .call(Endpoint::UA_LOOKUP, params(&[("ua", "curl/8.0")]), None)
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::ApiGatewayError);
            assert_eq!(err.message, html);
            assert_eq!(err.status, Some(200));
        }
        other => panic!("Expected gateway error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_download_is_not_a_success() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/qr-code")
        .with_status(200)
        .with_header("content-type", "image/png")
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let path = dir.path().join("qr.png");

    let client = client_for(&server.url());
    let outcome = client
        .call(Endpoint::QR_CODE, params(&[("content", "hello")]), Some(&path))
        .await;

    assert_eq!(outcome.error_code(), Some(ErrorCode::ApiGatewayError));
}

#[tokio::test]
async fn test_gateway_error_page() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", Matcher::Regex(r"^/convert".to_string()))
        .with_status(503)
        .with_header("content-type", "text/plain")
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .call(Endpoint::CONVERT, params(&[("from-value", "10")]), None)
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::ApiGatewayError);
            assert_eq!(err.message, "upstream unavailable");
            assert_eq!(err.content_type.as_deref(), Some("text/plain"));
        }
        other => panic!("Expected gateway error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_success_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", Matcher::Regex(r"^/email-validate".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{\"valid\": tru")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let outcome = client
        .call(
            Endpoint::EMAIL_VALIDATE,
            params(&[("email", "a@example.com")]),
            None,
        )
        .await;

    assert_eq!(outcome.error_code(), Some(ErrorCode::InvalidJsonResponse));
}

#[tokio::test]
async fn test_unknown_host_is_dns_failure() {
    let client = client_for("http://no-such-host.invalid");
    let outcome = client
        .call(Endpoint::IP_INFO, params(&[("ip", "8.8.8.8")]), None)
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::DnsLookupFailed);
            assert_eq!(err.status, None);
            assert!(err.cause.is_some());
        }
        other => panic!("Expected DNS failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_https_to_plain_http_server_is_tls_error() {
    // Answers the TLS client hello with a plain HTTP response.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 400 Bad Request\r\ncontent-length: 0\r\n\r\n")
                    .await;
            });
        }
    });

    let client = client_for(&format!("https://{}", addr));
    let outcome = client
        .call(Endpoint::IP_INFO, params(&[("ip", "8.8.8.8")]), None)
        .await;

    match outcome {
        Outcome::Error(err) => {
            assert_eq!(err.code, ErrorCode::TlsProtocolError);
            assert_eq!(err.status, None);
            assert_eq!(err.message, ErrorCode::TlsProtocolError.description());
        }
        other => panic!("Expected TLS error, got {:?}", other),
    }
}
