use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub chunks: u64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body returned by the backend on non-2xx responses.
///
/// The payload is untrusted: `detail` is only picked up when it is a
/// non-empty string, anything else (missing field, wrong type, body that
/// is not JSON at all) yields `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorResponse {
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn from_body(body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(serde_json::Value::String(detail)) if !detail.is_empty() => {
                    Some(detail.clone())
                }
                _ => None,
            });

        Self { detail }
    }
}
