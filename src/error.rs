use std::path::PathBuf;

use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument was rejected before any request was sent.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The service answered with something other than HTTP 200.
    #[error(
        "API request failed: HTTP {status} for endpoint ({endpoint}){}",
        detail_suffix(.message)
    )]
    RequestFailed {
        status: u16,
        endpoint: String,
        message: Option<String>,
    },

    /// Timeout, DNS failure, refused connection or a broken response body.
    #[error("could not reach endpoint ({endpoint})")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse API JSON (endpoint={endpoint})")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Config(String),

    #[error("failed to read configuration file {}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status of a `RequestFailed` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn detail_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!("\n{m}"),
        None => String::new(),
    }
}

// The NPS API reports failures as {"error": {"code": ..., "message": ...}}.
// The upstream gateway sometimes answers with a bare {"message": ...} instead.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct NpsErrorResponse {
    #[serde(default)]
    error: Option<NpsErrorBody>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct NpsErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub(crate) fn request_failed(status: StatusCode, endpoint: &str, body: &str) -> Error {
    let parsed = serde_json::from_str::<NpsErrorResponse>(body).ok();
    let message = parsed.and_then(|e| describe(status, &e));

    Error::RequestFailed {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
        message,
    }
}

fn describe(status: StatusCode, e: &NpsErrorResponse) -> Option<String> {
    let code = e.error.as_ref().and_then(|b| b.code.as_deref()).unwrap_or("");
    let text = e
        .error
        .as_ref()
        .and_then(|b| b.message.as_deref())
        .or(e.message.as_deref())
        .unwrap_or("");

    if code.is_empty() && text.is_empty() {
        return None;
    }

    // A missing or bad key is by far the most common failure.
    if code.starts_with("API_KEY") || status == StatusCode::FORBIDDEN {
        return Some(format!(
            "NPS API key rejected ({}): {}\n- Check NPS_API_KEY or the `key:` entry in .npsrc\n- Keys are issued at https://www.nps.gov/subjects/developer/get-started.htm",
            if code.is_empty() { "no code" } else { code },
            text
        ));
    }

    if code.is_empty() {
        Some(text.to_string())
    } else {
        Some(format!("{code}: {text}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_error_envelope() {
        let body = r#"{"error":{"code":"API_KEY_INVALID","message":"An invalid api_key was supplied."}}"#;
        let err = request_failed(StatusCode::FORBIDDEN, "/parks", body);

        match &err {
            Error::RequestFailed {
                status,
                endpoint,
                message,
            } => {
                assert_eq!(*status, 403);
                assert_eq!(endpoint, "/parks");
                let message = message.as_deref().unwrap();
                assert!(message.contains("API_KEY_INVALID"));
                assert!(message.contains("An invalid api_key was supplied."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn bare_message_is_kept() {
        let err = request_failed(StatusCode::BAD_GATEWAY, "/topics", r#"{"message":"upstream down"}"#);
        assert_eq!(
            err.to_string(),
            "API request failed: HTTP 502 for endpoint (/topics)\nupstream down"
        );
    }

    #[test]
    fn non_json_body_has_no_message() {
        let err = request_failed(StatusCode::INTERNAL_SERVER_ERROR, "/campgrounds", "<html>oops</html>");
        assert_eq!(
            err.to_string(),
            "API request failed: HTTP 500 for endpoint (/campgrounds)"
        );
    }

    #[test]
    fn invalid_argument_display() {
        let err = Error::invalid_argument("start", "must not be negative (got -1)");
        assert_eq!(
            err.to_string(),
            "invalid argument `start`: must not be negative (got -1)"
        );
        assert_eq!(err.status(), None);
    }
}
