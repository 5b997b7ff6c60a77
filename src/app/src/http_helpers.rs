//! HTTP helper functions for Crux Core
//!
//! Response interpretation for the scan, update and translation endpoints,
//! split into thin `crux_http` adapters and pure functions over status and
//! body so the rules can be unit-tested.

use crux_http::Response;

use crate::types::{
    Device, ScanError, TranslationError, TranslationTable, UpdateError, UpdateResponse,
};

/// Base URL for API endpoints.
///
/// NOTE: This is a dummy prefix required because `crux_http` requires absolute
/// URLs and rejects relative paths (`RelativeUrlWithoutBase` error).
/// The shell strips this prefix before sending requests via `fetch()`.
pub const BASE_URL: &str = "https://relative";

/// Message used when a rejected update carries no error text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Constructs the full address from a given endpoint.
///
/// # Example
/// ```
/// use shelly_scanner_ui_core::http_helpers::build_url;
/// let url = build_url("/api/scan");
/// assert_eq!(url, "https://relative/api/scan");
/// ```
pub fn build_url(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

/// Endpoint triggering a firmware update on `ip`
pub fn update_endpoint(ip: &str) -> String {
    format!("/api/update/{ip}")
}

fn split_response(response: &mut Response<Vec<u8>>) -> (u16, Option<Vec<u8>>) {
    let status: u16 = response.status().into();
    (status, response.take_body())
}

/// Interpret a `GET /api/scan` answer
pub fn interpret_scan_response(
    status: u16,
    body: Option<&[u8]>,
) -> Result<Vec<Device>, ScanError> {
    if !(200..300).contains(&status) {
        return Err(ScanError::Status { status });
    }

    let body = body.ok_or_else(|| ScanError::Malformed("empty response body".to_string()))?;
    serde_json::from_slice(body).map_err(|e| ScanError::Malformed(e.to_string()))
}

/// Interpret a `POST /api/update/{ip}` answer.
///
/// Non-2xx is a rejection regardless of the body; a 2xx body that cannot be
/// read is treated like a broken connection.
pub fn interpret_update_response(status: u16, body: Option<&[u8]>) -> Result<(), UpdateError> {
    let parsed = body
        .filter(|b| !b.is_empty())
        .map(serde_json::from_slice::<UpdateResponse>);

    if !(200..300).contains(&status) {
        let error = parsed
            .and_then(Result::ok)
            .and_then(|r| r.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Err(UpdateError::Rejected(error));
    }

    match parsed {
        Some(Ok(UpdateResponse { success: true, .. })) => Ok(()),
        Some(Ok(UpdateResponse { error, .. })) => Err(UpdateError::Rejected(
            error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        )),
        Some(Err(e)) => Err(UpdateError::Transport(format!("invalid response: {e}"))),
        None => Err(UpdateError::Transport("empty response body".to_string())),
    }
}

/// Interpret a `GET {translations}/{language}.json` answer
pub fn interpret_translation_response(
    language: &str,
    status: u16,
    body: Option<&[u8]>,
) -> Result<TranslationTable, TranslationError> {
    if !(200..300).contains(&status) {
        return Err(TranslationError::Fetch {
            language: language.to_string(),
            reason: format!("HTTP {status}"),
        });
    }

    let body = body.unwrap_or_default();
    serde_json::from_slice(body).map_err(|e| TranslationError::Malformed {
        language: language.to_string(),
        reason: e.to_string(),
    })
}

/// Process HTTP response result of a scan
pub fn process_scan_response(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<Vec<Device>, ScanError> {
    match result {
        Ok(mut response) => {
            let (status, body) = split_response(&mut response);
            interpret_scan_response(status, body.as_deref())
        }
        Err(e) => Err(ScanError::Transport(e.to_string())),
    }
}

/// Process HTTP response result of a firmware update request
pub fn process_update_response(
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<(), UpdateError> {
    match result {
        Ok(mut response) => {
            let (status, body) = split_response(&mut response);
            interpret_update_response(status, body.as_deref())
        }
        Err(e) => Err(UpdateError::Transport(e.to_string())),
    }
}

/// Process HTTP response result of a translation table fetch
pub fn process_translation_response(
    language: &str,
    result: crux_http::Result<Response<Vec<u8>>>,
) -> Result<TranslationTable, TranslationError> {
    match result {
        Ok(mut response) => {
            let (status, body) = split_response(&mut response);
            interpret_translation_response(language, status, body.as_deref())
        }
        Err(e) => Err(TranslationError::Fetch {
            language: language.to_string(),
            reason: e.to_string(),
        }),
    }
}
