//! Integration tests for the full submission-to-presentation lifecycle
//!
//! Drives the session controller against a scripted analyze backend the way
//! a surface would: begin a submission, let the backend settle, resolve with
//! the submission token, and read the presentation model.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use trueguard_core::error::{Result, TrueGuardError};
use trueguard_core::presentation::{PresentationModel, PresentationState, SessionController};
use trueguard_core::reply::ReplyTab;
use trueguard_core::services::{AnalyzeBackend, AnalyzeRequest};
use trueguard_core::types::{AnalysisResult, RiskLevel};

/// Scripted backend: returns a fixed outcome and counts invocations
struct ScriptedBackend {
    outcome: std::result::Result<AnalysisResult, String>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn success(result: AnalysisResult) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(result),
            calls: AtomicUsize::new(0),
        })
    }

    fn failure(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalyzeBackend for ScriptedBackend {
    async fn analyze(&self, _request: AnalyzeRequest) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(TrueGuardError::MalformedResponse(message.clone())),
        }
    }
}

fn result_with_score(score: u8) -> AnalysisResult {
    AnalysisResult {
        risk_score: score,
        risk_level: None,
        scam_type: "романтикалық алаяқтық".to_string(),
        manipulation_score: 75,
        vulnerability_score: 55,
        reasons: vec!["ақша сұрайды".to_string()],
        safety_coach: "Тоқтаңыз.".to_string(),
        safe_reply: "Сәлем. Мен ақша аудара алмаймын.".to_string(),
        from_cache: false,
        request_id: None,
        created_at: None,
    }
}

/// Submit the way a surface does: begin, call the backend, resolve
async fn drive(
    controller: &mut SessionController,
    backend: &Arc<ScriptedBackend>,
    text: &str,
    has_photo: bool,
) {
    let token = match controller.begin_submission(text, has_photo) {
        Ok(token) => token,
        Err(_) => return,
    };
    match backend.analyze(AnalyzeRequest::text(text)).await {
        Ok(result) => controller.resolve_success(token, result, Instant::now()),
        Err(err) => controller.resolve_failure(token, err.to_string()),
    };
}

#[tokio::test]
async fn test_empty_submission_never_reaches_backend() {
    let backend = ScriptedBackend::success(result_with_score(10));
    let mut controller = SessionController::new();

    drive(&mut controller, &backend, "   ", false).await;

    assert_eq!(backend.call_count(), 0);
    assert!(matches!(
        controller.state(),
        PresentationState::Error { .. }
    ));
}

#[tokio::test]
async fn test_photo_only_submission_reaches_backend() {
    let backend = ScriptedBackend::success(result_with_score(10));
    let mut controller = SessionController::new();

    drive(&mut controller, &backend, "", true).await;

    assert_eq!(backend.call_count(), 1);
    assert!(controller.state().is_ready());
}

#[tokio::test]
async fn test_backend_failure_surfaces_as_error_state() {
    let backend = ScriptedBackend::failure("Сервер JSON қайтармады");
    let mut controller = SessionController::new();

    drive(&mut controller, &backend, "срочно переведи", false).await;

    let PresentationState::Error { message } = controller.state() else {
        panic!("expected Error");
    };
    assert!(message.contains("Сервер JSON қайтармады"));

    // Recoverable: the user may retry and succeed
    let backend = ScriptedBackend::success(result_with_score(20));
    drive(&mut controller, &backend, "срочно переведи", false).await;
    assert!(controller.state().is_ready());
}

#[tokio::test]
async fn test_high_risk_gate_lifecycle() {
    let backend = ScriptedBackend::success(result_with_score(90));
    let mut controller = SessionController::new();

    drive(&mut controller, &backend, "ақша аудар", false).await;

    let gate = controller.gate().unwrap();
    assert!(gate.is_open());

    // Confirm before acknowledging: no-op
    assert!(!controller.confirm_gate());
    assert!(controller.gate().unwrap().is_open());

    // Acknowledge, then confirm: reply use enabled
    controller.set_gate_acknowledged(true);
    assert!(controller.confirm_gate());
    assert!(controller.gate().unwrap().allows_reply_use());

    // A new HIGH analysis re-opens the gate independently
    drive(&mut controller, &backend, "ақша аудар тағы", false).await;
    assert!(controller.gate().unwrap().is_open());
    assert!(!controller.gate().unwrap().is_acknowledged());
}

#[tokio::test]
async fn test_medium_risk_never_opens_gate() {
    let backend = ScriptedBackend::success(result_with_score(50));
    let mut controller = SessionController::new();

    drive(&mut controller, &backend, "карта", false).await;

    let gate = controller.gate().unwrap();
    assert!(!gate.is_open());
    assert!(gate.allows_reply_use());
}

#[tokio::test]
async fn test_stale_response_cannot_overwrite_newer_state() {
    let mut controller = SessionController::new();

    // First submission goes out and stalls; user resets and resubmits
    let stale_token = controller.begin_submission("бірінші", false).unwrap();
    controller.reset();
    let fresh_token = controller.begin_submission("екінші", false).unwrap();
    assert!(controller.resolve_success(fresh_token, result_with_score(20), Instant::now()));

    // The stalled response finally arrives and must be discarded
    assert!(!controller.resolve_success(stale_token, result_with_score(95), Instant::now()));

    let PresentationState::Ready { result, .. } = controller.state() else {
        panic!("expected Ready");
    };
    assert_eq!(result.risk_score, 20);
    assert_eq!(result.level(), RiskLevel::Low);
}

#[tokio::test]
async fn test_tab_selection_and_model_snapshot() {
    let backend = ScriptedBackend::success(result_with_score(40));
    let mut controller = SessionController::new();

    drive(&mut controller, &backend, "kaspi", false).await;
    assert_eq!(backend.call_count(), 1);

    controller.select_tab(ReplyTab::Short);
    // Selecting a tab must not re-trigger analysis
    assert_eq!(backend.call_count(), 1);

    let model = PresentationModel::snapshot(&controller, Instant::now());
    let PresentationModel::Ready(ready) = model else {
        panic!("expected Ready");
    };
    assert_eq!(ready.tab, ReplyTab::Short);
    assert_eq!(ready.reply_text, "Сәлем.");
    assert_eq!(ready.tier_color, RiskLevel::Medium.color());
    assert!(!ready.gate_open);
}
