//! Result presentation state machine
//!
//! One [`SessionController`] owns the single live [`PresentationState`] and
//! is the only writer. Event handling is strictly sequential; the analyze
//! call is the sole suspending operation, and its resolution is accepted or
//! discarded by a submission sequence number so a stale response can never
//! overwrite the state a newer submission produced.

use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{Result, TrueGuardError};
use crate::presentation::animation::ScoreAnimations;
use crate::presentation::gate::DisclosureGate;
use crate::reply::{variant, ReplyTab};
use crate::types::AnalysisResult;

/// Lifecycle of one analysis cycle
///
/// Exactly one instance is live at a time. `Ready` carries everything the
/// original kept in free-floating globals: the result, the selected reply
/// tab, the disclosure gate, and the running score animations.
#[derive(Debug, Clone)]
pub enum PresentationState {
    /// No input submitted yet
    Empty,
    /// Analyze call in flight, identified by its submission sequence
    Submitting { seq: u64 },
    /// Submission failed; the message is the user-facing failure reason
    Error { message: String },
    /// Successful, well-formed result being presented
    Ready {
        result: AnalysisResult,
        tab: ReplyTab,
        gate: DisclosureGate,
        scores: ScoreAnimations,
    },
}

impl PresentationState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, PresentationState::Submitting { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PresentationState::Ready { .. })
    }
}

/// Single-writer owner of the presentation state
#[derive(Debug)]
pub struct SessionController {
    state: PresentationState,
    /// Monotonic submission sequence; the staleness guard for resolutions
    seq: u64,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            state: PresentationState::Empty,
            seq: 0,
        }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Start a new analysis cycle.
    ///
    /// Rejects locally, without any backend contact, when both text and
    /// photo are absent (the validation error becomes the presentation
    /// state) or when a submission is already pending (state untouched, the
    /// surface keeps its in-flight view). On success returns the submission
    /// token that must accompany the resolution.
    pub fn begin_submission(&mut self, text: &str, has_photo: bool) -> Result<u64> {
        if self.state.is_submitting() {
            warn!("submission rejected: analysis already in flight");
            return Err(TrueGuardError::AnalysisPending);
        }

        if text.trim().is_empty() && !has_photo {
            let err = TrueGuardError::EmptySubmission;
            self.state = PresentationState::Error {
                message: err.to_string(),
            };
            return Err(err);
        }

        self.seq += 1;
        debug!(seq = self.seq, "submission started");
        self.state = PresentationState::Submitting { seq: self.seq };
        Ok(self.seq)
    }

    /// Resolve a submission with a successful payload.
    ///
    /// A token from a superseded submission is discarded without touching
    /// state. Returns whether the result was accepted.
    pub fn resolve_success(&mut self, token: u64, result: AnalysisResult, now: Instant) -> bool {
        if token != self.seq {
            debug!(token, current = self.seq, "discarding stale analyze result");
            return false;
        }

        let result = result.normalized();
        let gate = DisclosureGate::for_level(result.level());
        let scores = ScoreAnimations::start(&result, now);
        debug!(
            seq = token,
            level = %result.level(),
            "analysis ready"
        );
        self.state = PresentationState::Ready {
            result,
            tab: ReplyTab::Polite,
            gate,
            scores,
        };
        true
    }

    /// Resolve a submission with a failure message.
    ///
    /// Same staleness rule as [`Self::resolve_success`].
    pub fn resolve_failure(&mut self, token: u64, message: impl Into<String>) -> bool {
        if token != self.seq {
            debug!(token, current = self.seq, "discarding stale analyze failure");
            return false;
        }

        let message = message.into();
        warn!(seq = token, %message, "analysis failed");
        self.state = PresentationState::Error { message };
        true
    }

    /// Select a reply tab without re-triggering analysis; no-op outside `Ready`
    pub fn select_tab(&mut self, selected: ReplyTab) {
        if let PresentationState::Ready { tab, .. } = &mut self.state {
            *tab = selected;
        }
    }

    /// Cycle to the next reply tab in display order
    pub fn cycle_tab(&mut self) {
        if let PresentationState::Ready { tab, .. } = &mut self.state {
            *tab = tab.next();
        }
    }

    /// Set the gate's acknowledgement checkbox
    pub fn set_gate_acknowledged(&mut self, checked: bool) {
        if let PresentationState::Ready { gate, .. } = &mut self.state {
            gate.set_acknowledged(checked);
        }
    }

    /// Confirm the disclosure gate; returns whether reply use is now enabled
    pub fn confirm_gate(&mut self) -> bool {
        if let PresentationState::Ready { gate, .. } = &mut self.state {
            gate.confirm()
        } else {
            false
        }
    }

    /// The disclosure gate of the presented result, if any
    pub fn gate(&self) -> Option<DisclosureGate> {
        if let PresentationState::Ready { gate, .. } = &self.state {
            Some(*gate)
        } else {
            None
        }
    }

    /// The reply text for the currently selected tab, if presenting a result
    pub fn active_reply(&self) -> Option<String> {
        if let PresentationState::Ready { result, tab, .. } = &self.state {
            Some(variant(*tab, &result.safe_reply))
        } else {
            None
        }
    }

    /// Discard any result or error and return to `Empty`.
    ///
    /// Also invalidates an in-flight submission: its eventual resolution
    /// arrives with a stale token and is discarded.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.state = PresentationState::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;
    use std::time::Duration;

    fn result_with_level(score: u8) -> AnalysisResult {
        AnalysisResult {
            risk_score: score,
            risk_level: None,
            scam_type: "test".to_string(),
            manipulation_score: 40,
            vulnerability_score: 30,
            reasons: vec![],
            safety_coach: "note".to_string(),
            safe_reply: "Сәлем. Жоқ, рахмет.".to_string(),
            from_cache: false,
            request_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_submission_is_local_error() {
        let mut controller = SessionController::new();
        let err = controller.begin_submission("   ", false).unwrap_err();
        assert!(matches!(err, TrueGuardError::EmptySubmission));
        assert!(matches!(
            controller.state(),
            PresentationState::Error { .. }
        ));
    }

    #[test]
    fn test_photo_only_submission_is_valid() {
        let mut controller = SessionController::new();
        assert!(controller.begin_submission("", true).is_ok());
        assert!(controller.state().is_submitting());
    }

    #[test]
    fn test_resubmission_while_pending_is_rejected() {
        let mut controller = SessionController::new();
        let first = controller.begin_submission("text", false).unwrap();
        let err = controller.begin_submission("more", false).unwrap_err();
        assert!(matches!(err, TrueGuardError::AnalysisPending));
        // The pending submission is still the live one
        assert!(controller.resolve_success(first, result_with_level(10), Instant::now()));
    }

    #[test]
    fn test_success_enters_ready_with_defaults() {
        let mut controller = SessionController::new();
        let token = controller.begin_submission("text", false).unwrap();
        controller.resolve_success(token, result_with_level(80), Instant::now());

        let PresentationState::Ready {
            result, tab, gate, ..
        } = controller.state()
        else {
            panic!("expected Ready");
        };
        assert_eq!(result.level(), RiskLevel::High);
        assert_eq!(*tab, ReplyTab::Polite);
        assert!(gate.is_open());
    }

    #[test]
    fn test_stale_success_is_discarded() {
        let mut controller = SessionController::new();
        let stale = controller.begin_submission("first", false).unwrap();
        controller.resolve_failure(stale, "timeout");

        let fresh = controller.begin_submission("second", false).unwrap();
        controller.resolve_success(fresh, result_with_level(10), Instant::now());

        // The first submission's late success must not clobber the new state
        assert!(!controller.resolve_success(stale, result_with_level(90), Instant::now()));
        let PresentationState::Ready { result, .. } = controller.state() else {
            panic!("expected Ready");
        };
        assert_eq!(result.risk_score, 10);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut controller = SessionController::new();
        let stale = controller.begin_submission("first", false).unwrap();
        controller.resolve_success(stale, result_with_level(10), Instant::now());

        let fresh = controller.begin_submission("second", false).unwrap();
        controller.resolve_success(fresh, result_with_level(20), Instant::now());

        assert!(!controller.resolve_failure(stale, "late network error"));
        assert!(controller.state().is_ready());
    }

    #[test]
    fn test_new_submission_discards_prior_ready_and_gate() {
        let mut controller = SessionController::new();
        let token = controller.begin_submission("text", false).unwrap();
        controller.resolve_success(token, result_with_level(90), Instant::now());
        controller.set_gate_acknowledged(true);
        controller.confirm_gate();

        let token = controller.begin_submission("again", false).unwrap();
        assert!(controller.state().is_submitting());
        controller.resolve_success(token, result_with_level(95), Instant::now());

        // Gate re-opens independently for the new result
        let PresentationState::Ready { gate, .. } = controller.state() else {
            panic!("expected Ready");
        };
        assert!(gate.is_open());
        assert!(!gate.is_acknowledged());
    }

    #[test]
    fn test_tab_selection_does_not_resubmit() {
        let mut controller = SessionController::new();
        let token = controller.begin_submission("text", false).unwrap();
        controller.resolve_success(token, result_with_level(10), Instant::now());

        controller.select_tab(ReplyTab::Strict);
        let reply = controller.active_reply().unwrap();
        assert!(reply.starts_with(crate::reply::REFUSAL_PREFIX));
        assert!(controller.state().is_ready());
    }

    #[test]
    fn test_reset_invalidates_inflight_submission() {
        let mut controller = SessionController::new();
        let token = controller.begin_submission("text", false).unwrap();
        controller.reset();
        assert!(!controller.resolve_success(token, result_with_level(50), Instant::now()));
        assert!(matches!(controller.state(), PresentationState::Empty));
    }

    #[test]
    fn test_animation_restarts_on_new_result() {
        let mut controller = SessionController::new();
        let token = controller.begin_submission("text", false).unwrap();
        let t0 = Instant::now();
        controller.resolve_success(token, result_with_level(100), t0);

        // Second result arrives mid-animation; counters restart from 0
        let token = controller.begin_submission("again", false).unwrap();
        let t1 = t0 + Duration::from_millis(500);
        controller.resolve_success(token, result_with_level(100), t1);

        let PresentationState::Ready { scores, .. } = controller.state() else {
            panic!("expected Ready");
        };
        assert_eq!(scores.risk.value_at(t1), 0);
    }
}
