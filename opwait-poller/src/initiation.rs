//! Identifier extraction from initiating responses
//!
//! The server accepts a mutating request and answers immediately with an
//! operation identifier; the work happens out of band. Whether a response
//! is an acceptance or a rejection is a tagged union here, not an
//! exception path: callers branch on [`InitiationResult`].

use opwait_core::{OperationId, ProtocolError};
use opwait_http::HttpResponse;

/// Outcome of an initiating request: either an operation to observe, or a
/// terminal rejection payload. Never both.
#[derive(Debug, Clone)]
pub enum InitiationResult {
    /// The server accepted the request and tracks it as an operation
    Accepted { id: OperationId },

    /// The server rejected the request outright
    Rejected(Rejection),
}

impl InitiationResult {
    /// The operation identifier, when the request was accepted
    pub fn operation_id(&self) -> Option<&OperationId> {
        match self {
            InitiationResult::Accepted { id } => Some(id),
            InitiationResult::Rejected(_) => None,
        }
    }

    /// Unwrap into an identifier, handing back the rejection otherwise
    pub fn into_operation_id(self) -> Result<OperationId, Rejection> {
        match self {
            InitiationResult::Accepted { id } => Ok(id),
            InitiationResult::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Terminal rejection of an initiating request
#[derive(Debug, Clone)]
pub struct Rejection {
    /// HTTP status of the rejecting response
    pub status: u16,

    /// Structured server message, when one could be parsed from the body
    pub detail: Option<String>,

    /// Raw response body, for diagnostics
    pub body: String,
}

impl Rejection {
    fn from_response(response: &HttpResponse) -> Self {
        let body = response.text();
        let detail = response
            .json::<serde_json::Value>()
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .or_else(|| {
                        value
                            .get("error")
                            .and_then(|e| e.get("error"))
                            .and_then(|m| m.as_str())
                    })
                    .map(str::to_string)
            });

        Rejection {
            status: response.status().as_u16(),
            detail,
            body,
        }
    }

    /// Best available message for assertion diagnostics
    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.body)
    }
}

/// Extract the initiation result, expecting the conventional 202 accepted
/// status
pub fn initiated(response: &HttpResponse) -> Result<InitiationResult, ProtocolError> {
    initiated_as(response, 202)
}

/// Extract the initiation result against a call-site-specific accepted
/// status.
///
/// For an accepted response the identifier is the trailing path segment of
/// the `Location` header, falling back to the `taskUri` body field. An
/// accepted response carrying neither is a protocol violation: the remote
/// contract changed, and retrying blindly would hide that.
pub fn initiated_as(
    response: &HttpResponse,
    accepted_status: u16,
) -> Result<InitiationResult, ProtocolError> {
    if response.status().as_u16() != accepted_status {
        return Ok(InitiationResult::Rejected(Rejection::from_response(
            response,
        )));
    }

    if let Some(location) = response.header("location") {
        let id = OperationId::from_uri(location)?;
        return Ok(InitiationResult::Accepted { id });
    }

    if let Ok(body) = response.json::<serde_json::Value>() {
        if let Some(uri) = body.get("taskUri").and_then(|v| v.as_str()) {
            let id = OperationId::from_uri(uri)?;
            return Ok(InitiationResult::Accepted { id });
        }
    }

    Err(ProtocolError::MissingIdentifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
    use reqwest::StatusCode;

    fn accepted_with_location(location: &'static str) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static(location));
        HttpResponse::new(StatusCode::ACCEPTED, headers, Vec::new())
    }

    #[test]
    fn test_identifier_from_location_header() {
        let response = accepted_with_location("/tasks/abc-123");
        let result = initiated(&response).unwrap();
        assert_eq!(result.operation_id().unwrap().as_str(), "abc-123");
    }

    #[test]
    fn test_identifier_from_task_uri_body() {
        let response = HttpResponse::new(
            StatusCode::ACCEPTED,
            HeaderMap::new(),
            br#"{"taskUri": "/api/v1/tasks/T7"}"#.to_vec(),
        );
        let result = initiated(&response).unwrap();
        assert_eq!(result.operation_id().unwrap().as_str(), "T7");
    }

    #[test]
    fn test_location_header_wins_over_body() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("/tasks/from-header"));
        let response = HttpResponse::new(
            StatusCode::ACCEPTED,
            headers,
            br#"{"taskUri": "/tasks/from-body"}"#.to_vec(),
        );
        let result = initiated(&response).unwrap();
        assert_eq!(result.operation_id().unwrap().as_str(), "from-header");
    }

    #[test]
    fn test_missing_identifier_is_protocol_violation() {
        let response = HttpResponse::new(StatusCode::ACCEPTED, HeaderMap::new(), b"{}".to_vec());
        assert_eq!(
            initiated(&response).unwrap_err(),
            ProtocolError::MissingIdentifier
        );
    }

    #[test]
    fn test_rejection_with_structured_message() {
        let response = HttpResponse::new(
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
            br#"{"message": "asset already protected"}"#.to_vec(),
        );
        let result = initiated(&response).unwrap();
        match result {
            InitiationResult::Rejected(rejection) => {
                assert_eq!(rejection.status, 400);
                assert_eq!(rejection.message(), "asset already protected");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_with_nested_error_message() {
        let response = HttpResponse::new(
            StatusCode::CONFLICT,
            HeaderMap::new(),
            br#"{"error": {"error": "backup already in progress", "errorCode": 409}}"#.to_vec(),
        );
        let result = initiated(&response).unwrap();
        match result {
            InitiationResult::Rejected(rejection) => {
                assert_eq!(rejection.detail.as_deref(), Some("backup already in progress"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_without_json_body_keeps_raw_text() {
        let response = HttpResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            HeaderMap::new(),
            b"gateway exploded".to_vec(),
        );
        let result = initiated(&response).unwrap();
        match result {
            InitiationResult::Rejected(rejection) => {
                assert!(rejection.detail.is_none());
                assert_eq!(rejection.message(), "gateway exploded");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_accepted_status() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("/tasks/T9"));
        let response = HttpResponse::new(StatusCode::CREATED, headers, Vec::new());

        // 201 is a rejection under the default expectation
        assert!(matches!(
            initiated(&response).unwrap(),
            InitiationResult::Rejected(_)
        ));

        // but an acceptance when the call site expects 201
        let result = initiated_as(&response, 201).unwrap();
        assert_eq!(result.operation_id().unwrap().as_str(), "T9");
    }

    #[test]
    fn test_into_operation_id() {
        let response = accepted_with_location("/tasks/T10");
        let id = initiated(&response).unwrap().into_operation_id().unwrap();
        assert_eq!(id.as_str(), "T10");
    }
}
