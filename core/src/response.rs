//! Classification of raw responses into success values or typed errors.
//!
//! # Design
//! `classify` is the single decision point: any status of 300 or above is
//! an `HttpError`, everything below is a `OneSignalResponse`. Both the
//! blocking and async dispatchers go through it, so they cannot disagree.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;
use crate::http::HttpResponse;

/// A successful (status below 300) response with its parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct OneSignalResponse {
    pub status_code: u16,
    pub body: Value,
    pub http_response: HttpResponse,
}

impl OneSignalResponse {
    /// Deserialize the body into a caller-defined type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// The service answered with a status code of 300 or above.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("OneSignal returned HTTP {status_code}: {message}")]
pub struct HttpError {
    pub status_code: u16,
    pub message: String,
    pub http_response: HttpResponse,
}

impl HttpError {
    pub fn new(http_response: HttpResponse) -> Self {
        Self {
            status_code: http_response.status,
            message: error_message(&http_response),
            http_response,
        }
    }
}

/// First entry of the body's `errors` array, or a generic message.
fn error_message(response: &HttpResponse) -> String {
    let first = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("errors")?.as_array()?.first().cloned());
    match first {
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => format!("Unexpected http status code {}.", response.status),
    }
}

/// Turn a raw response into a `OneSignalResponse` or an `Error::Http`.
///
/// A success body that is not valid JSON is returned as `Error::Json`.
pub fn classify(response: HttpResponse) -> Result<OneSignalResponse, Error> {
    if response.status >= 300 {
        let err = HttpError::new(response);
        match err.http_response.header("location") {
            Some(location) => warn!(
                status = err.status_code,
                error = %err.message,
                location,
                "request redirected, not followed"
            ),
            None => warn!(status = err.status_code, error = %err.message, "request rejected"),
        }
        return Err(err.into());
    }

    let body: Value = serde_json::from_str(&response.body)?;
    debug!(status = response.status, "request succeeded");
    Ok(OneSignalResponse {
        status_code: response.status,
        body,
        http_response: response,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body)
    }

    #[test]
    fn success_wraps_status_and_body() {
        let ok = classify(response(200, r#"{"id":"n1","recipients":3}"#)).unwrap();
        assert_eq!(ok.status_code, 200);
        assert_eq!(ok.body, json!({"id": "n1", "recipients": 3}));
        assert_eq!(ok.http_response.body, r#"{"id":"n1","recipients":3}"#);
    }

    #[test]
    fn status_299_is_still_success() {
        let ok = classify(response(299, "{}")).unwrap();
        assert_eq!(ok.status_code, 299);
    }

    #[test]
    fn first_error_is_the_message() {
        let err = classify(response(400, r#"{"errors":["X","Y"]}"#)).unwrap_err();
        let http = err.as_http().unwrap();
        assert_eq!(http.status_code, 400);
        assert_eq!(http.message, "X");
    }

    #[test]
    fn status_300_is_a_failure() {
        let err = classify(response(300, "{}")).unwrap_err();
        assert_eq!(err.status_code(), Some(300));
    }

    #[test]
    #[traced_test]
    fn redirect_keeps_location_and_logs_it() {
        let mut moved = response(302, r#"{"errors":["moved"]}"#);
        moved.headers.push(("Location".to_string(), "/elsewhere".to_string()));

        let err = classify(moved).unwrap_err();
        let http = err.as_http().unwrap();
        assert_eq!(http.status_code, 302);
        assert_eq!(http.http_response.header("location"), Some("/elsewhere"));
        assert!(logs_contain("request redirected, not followed"));
        assert!(logs_contain("/elsewhere"));
    }

    #[test]
    fn missing_errors_key_uses_generic_message() {
        let err = classify(response(500, "{}")).unwrap_err();
        assert_eq!(err.as_http().unwrap().message, "Unexpected http status code 500.");
    }

    #[test]
    fn empty_errors_list_uses_generic_message() {
        let err = classify(response(404, r#"{"errors":[]}"#)).unwrap_err();
        assert_eq!(err.as_http().unwrap().message, "Unexpected http status code 404.");
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        let err = classify(response(400, r#"{"errors":[{"field":"app_id"}]}"#)).unwrap_err();
        assert_eq!(err.as_http().unwrap().message, r#"{"field":"app_id"}"#);
    }

    #[test]
    fn non_json_failure_body_uses_generic_message() {
        let err = classify(response(502, "<html>Bad Gateway</html>")).unwrap_err();
        assert_eq!(err.as_http().unwrap().message, "Unexpected http status code 502.");
    }

    #[test]
    fn errors_object_uses_generic_message() {
        let err =
            classify(response(400, r#"{"errors":{"invalid_player_ids":["p1"]}}"#)).unwrap_err();
        assert_eq!(err.as_http().unwrap().message, "Unexpected http status code 400.");
    }

    #[test]
    fn raw_response_is_kept_on_failure() {
        let raw = response(404, r#"{"errors":["Notification not found"]}"#);
        let err = classify(raw.clone()).unwrap_err();
        assert_eq!(err.as_http().unwrap().http_response, raw);
        assert_eq!(
            err.to_string(),
            "OneSignal returned HTTP 404: Notification not found"
        );
    }

    #[test]
    fn malformed_success_body_propagates_json_error() {
        let err = classify(response(200, "not json")).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn json_deserializes_into_caller_type() {
        #[derive(serde::Deserialize)]
        struct Created {
            id: String,
        }
        let ok = classify(response(200, r#"{"id":"n1"}"#)).unwrap();
        let created: Created = ok.json().unwrap();
        assert_eq!(created.id, "n1");
    }
}
