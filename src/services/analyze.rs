//! Analyze backend integration
//!
//! Submits the raw chat text plus an optional image attachment as a
//! multipart form and decodes the JSON risk assessment. Non-JSON or
//! malformed responses surface as recoverable errors, never as a crash:
//! every failure becomes a single user-facing `Error` state and the user
//! may retry.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::env;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, TrueGuardError};
use crate::types::AnalysisResult;

/// Configuration for the HTTP analyze backend
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Backend base URL; the analyze endpoint is `{base_url}/analyze`
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("TRUEGUARD_BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            timeout: Duration::from_secs(30),
        }
    }
}

/// One optional image attachment; the engine only validates on its presence
#[derive(Debug, Clone)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One analyze submission
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub chat_text: String,
    pub photo: Option<PhotoAttachment>,
}

impl AnalyzeRequest {
    pub fn text(chat_text: impl Into<String>) -> Self {
        Self {
            chat_text: chat_text.into(),
            photo: None,
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}

/// The analyze call seam
///
/// The sole asynchronous, suspending operation in the engine. Implementations
/// must settle every call (success or error); staleness of a late settlement
/// is the caller's concern, handled by the submission sequence guard.
#[async_trait]
pub trait AnalyzeBackend: Send + Sync {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult>;
}

/// HTTP implementation speaking the backend's multipart form protocol
pub struct HttpAnalyzeBackend {
    config: AnalyzeConfig,
    client: reqwest::Client,
}

impl HttpAnalyzeBackend {
    /// Create a backend client with custom config
    pub fn new(config: AnalyzeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Create with default config
    pub fn with_default() -> Result<Self> {
        Self::new(AnalyzeConfig::default())
    }

    fn endpoint(&self) -> String {
        format!("{}/analyze", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AnalyzeBackend for HttpAnalyzeBackend {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        debug!(endpoint = %self.endpoint(), has_photo = request.has_photo(), "submitting analyze request");

        // Field names are what the backend's form handler expects
        let mut form = reqwest::multipart::Form::new()
            .text("username", "")
            .text("bio", "")
            .text("chat_text", request.chat_text);

        if let Some(photo) = request.photo {
            let part = reqwest::multipart::Part::bytes(photo.bytes).file_name(photo.file_name);
            form = form.part("photo", part);
        }

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await?;

        let is_success = response.status().is_success();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        decode_response(is_success, &content_type, &body)
    }
}

/// Decode an analyze response body into a normalized result
///
/// Split out of the transport so the mapping rules are testable offline:
/// non-JSON content is a malformed response, an error object surfaces its
/// human-readable `detail`, and a JSON payload missing required fields is
/// malformed rather than a panic.
pub fn decode_response(
    is_success: bool,
    content_type: &str,
    body: &str,
) -> Result<AnalysisResult> {
    if !content_type.contains("application/json") {
        return Err(TrueGuardError::MalformedResponse(format!(
            "Сервер JSON қайтармады: {}",
            snippet(body)
        )));
    }

    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        TrueGuardError::MalformedResponse(format!("invalid JSON ({}): {}", e, snippet(body)))
    })?;

    if !is_success {
        let detail = value
            .get("detail")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string());
        return Err(TrueGuardError::Backend(detail));
    }

    let result: AnalysisResult = serde_json::from_value(value)
        .map_err(|e| TrueGuardError::MalformedResponse(e.to_string()))?;
    Ok(result.normalized())
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    const PAYLOAD: &str = r#"{
        "risk_score": 84,
        "scam_type": "investment",
        "manipulation_score": 90,
        "vulnerability_score": 70,
        "reasons": ["guaranteed returns"],
        "safety_coach": "Тоқтаңыз.",
        "safe_reply": "Жоқ, рахмет."
    }"#;

    #[test]
    fn test_decode_success_normalizes() {
        let result = decode_response(true, "application/json", PAYLOAD).unwrap();
        assert_eq!(result.level(), RiskLevel::High);
        assert!(!result.from_cache);
    }

    #[test]
    fn test_non_json_content_is_malformed() {
        let err = decode_response(true, "text/html", "<html>502</html>").unwrap_err();
        assert!(matches!(err, TrueGuardError::MalformedResponse(_)));
    }

    #[test]
    fn test_error_object_surfaces_detail() {
        let err =
            decode_response(false, "application/json", r#"{"detail": "Мәтін немесе фото керек"}"#)
                .unwrap_err();
        let TrueGuardError::Backend(detail) = err else {
            panic!("expected Backend");
        };
        assert_eq!(detail, "Мәтін немесе фото керек");
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let err = decode_response(true, "application/json", r#"{"risk_score": 10}"#).unwrap_err();
        assert!(matches!(err, TrueGuardError::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = decode_response(true, "application/json", "not json at all").unwrap_err();
        assert!(matches!(err, TrueGuardError::MalformedResponse(_)));
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let backend = HttpAnalyzeBackend::new(AnalyzeConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:8000/analyze");
    }

    #[test]
    fn test_default_config_reads_env() {
        let config = AnalyzeConfig::default();
        assert!(!config.base_url.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
