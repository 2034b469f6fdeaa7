//! Catalog of API endpoints with their HTTP verb and default timeout.

use std::path::Path;

use crate::http::HttpMethod;

/// One named remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Path relative to the base URL.
    pub name: &'static str,
    pub method: HttpMethod,
    pub timeout_secs: u64,
    /// Whether a successful non-JSON response is expected, to be saved to a file.
    pub writes_file: bool,
}

impl Endpoint {
    pub const BAD_WORD_FILTER: &'static Endpoint = &Endpoint {
        name: "bad-word-filter",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const BIN_LIST_DOWNLOAD: &'static Endpoint = &Endpoint {
        name: "bin-list-download",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: true,
    };
    pub const BIN_LOOKUP: &'static Endpoint = &Endpoint {
        name: "bin-lookup",
        method: HttpMethod::Get,
        timeout_secs: 10,
        writes_file: false,
    };
    pub const BROWSER_BOT: &'static Endpoint = &Endpoint {
        name: "browser-bot",
        method: HttpMethod::Post,
        timeout_secs: 300,
        writes_file: false,
    };
    pub const CONVERT: &'static Endpoint = &Endpoint {
        name: "convert",
        method: HttpMethod::Get,
        timeout_secs: 10,
        writes_file: false,
    };
    pub const DOMAIN_LOOKUP: &'static Endpoint = &Endpoint {
        name: "domain-lookup",
        method: HttpMethod::Get,
        timeout_secs: 300,
        writes_file: false,
    };
    pub const EMAIL_VALIDATE: &'static Endpoint = &Endpoint {
        name: "email-validate",
        method: HttpMethod::Get,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const EMAIL_VERIFY: &'static Endpoint = &Endpoint {
        name: "email-verify",
        method: HttpMethod::Get,
        timeout_secs: 300,
        writes_file: false,
    };
    pub const GEOCODE_ADDRESS: &'static Endpoint = &Endpoint {
        name: "geocode-address",
        method: HttpMethod::Get,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const GEOCODE_REVERSE: &'static Endpoint = &Endpoint {
        name: "geocode-reverse",
        method: HttpMethod::Get,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const HLR_LOOKUP: &'static Endpoint = &Endpoint {
        name: "hlr-lookup",
        method: HttpMethod::Get,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const HOST_REPUTATION: &'static Endpoint = &Endpoint {
        name: "host-reputation",
        method: HttpMethod::Get,
        timeout_secs: 300,
        writes_file: false,
    };
    pub const HTML_CLEAN: &'static Endpoint = &Endpoint {
        name: "html-clean",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: true,
    };
    pub const HTML_RENDER: &'static Endpoint = &Endpoint {
        name: "html-render",
        method: HttpMethod::Post,
        timeout_secs: 300,
        writes_file: true,
    };
    pub const IMAGE_RESIZE: &'static Endpoint = &Endpoint {
        name: "image-resize",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: true,
    };
    pub const IMAGE_WATERMARK: &'static Endpoint = &Endpoint {
        name: "image-watermark",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: true,
    };
    pub const IP_BLOCKLIST: &'static Endpoint = &Endpoint {
        name: "ip-blocklist",
        method: HttpMethod::Get,
        timeout_secs: 10,
        writes_file: false,
    };
    pub const IP_BLOCKLIST_DOWNLOAD: &'static Endpoint = &Endpoint {
        name: "ip-blocklist-download",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: true,
    };
    pub const IP_INFO: &'static Endpoint = &Endpoint {
        name: "ip-info",
        method: HttpMethod::Get,
        timeout_secs: 10,
        writes_file: false,
    };
    pub const IP_PROBE: &'static Endpoint = &Endpoint {
        name: "ip-probe",
        method: HttpMethod::Get,
        timeout_secs: 300,
        writes_file: false,
    };
    pub const PHONE_PLAYBACK: &'static Endpoint = &Endpoint {
        name: "phone-playback",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const PHONE_VALIDATE: &'static Endpoint = &Endpoint {
        name: "phone-validate",
        method: HttpMethod::Get,
        timeout_secs: 10,
        writes_file: false,
    };
    pub const PHONE_VERIFY: &'static Endpoint = &Endpoint {
        name: "phone-verify",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const QR_CODE: &'static Endpoint = &Endpoint {
        name: "qr-code",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: true,
    };
    pub const SMS_VERIFY: &'static Endpoint = &Endpoint {
        name: "sms-verify",
        method: HttpMethod::Post,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const UA_LOOKUP: &'static Endpoint = &Endpoint {
        name: "ua-lookup",
        method: HttpMethod::Get,
        timeout_secs: 10,
        writes_file: false,
    };
    pub const URL_INFO: &'static Endpoint = &Endpoint {
        name: "url-info",
        method: HttpMethod::Get,
        timeout_secs: 30,
        writes_file: false,
    };
    pub const VERIFY_SECURITY_CODE: &'static Endpoint = &Endpoint {
        name: "verify-security-code",
        method: HttpMethod::Get,
        timeout_secs: 30,
        writes_file: false,
    };

    /// Finds an endpoint by path name.
    pub fn lookup(name: &str) -> Option<&'static Endpoint> {
        ENDPOINTS.iter().copied().find(|e| e.name == name)
    }

    /// True when this endpoint returns a file but the call has nowhere to save it.
    pub fn lacks_output_file(&self, output_file: Option<&Path>) -> bool {
        self.writes_file && output_file.is_none()
    }
}

/// Every endpoint known to the client.
pub const ENDPOINTS: &[&Endpoint] = &[
    Endpoint::BAD_WORD_FILTER,
    Endpoint::BIN_LIST_DOWNLOAD,
    Endpoint::BIN_LOOKUP,
    Endpoint::BROWSER_BOT,
    Endpoint::CONVERT,
    Endpoint::DOMAIN_LOOKUP,
    Endpoint::EMAIL_VALIDATE,
    Endpoint::EMAIL_VERIFY,
    Endpoint::GEOCODE_ADDRESS,
    Endpoint::GEOCODE_REVERSE,
    Endpoint::HLR_LOOKUP,
    Endpoint::HOST_REPUTATION,
    Endpoint::HTML_CLEAN,
    Endpoint::HTML_RENDER,
    Endpoint::IMAGE_RESIZE,
    Endpoint::IMAGE_WATERMARK,
    Endpoint::IP_BLOCKLIST,
    Endpoint::IP_BLOCKLIST_DOWNLOAD,
    Endpoint::IP_INFO,
    Endpoint::IP_PROBE,
    Endpoint::PHONE_PLAYBACK,
    Endpoint::PHONE_VALIDATE,
    Endpoint::PHONE_VERIFY,
    Endpoint::QR_CODE,
    Endpoint::SMS_VERIFY,
    Endpoint::UA_LOOKUP,
    Endpoint::URL_INFO,
    Endpoint::VERIFY_SECURITY_CODE,
];
