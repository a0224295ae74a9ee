//! Rendering-technology-neutral presentation model
//!
//! A [`PresentationModel`] is a point-in-time snapshot of the session state:
//! everything a surface needs to draw one frame (status pill, tier identity,
//! animated values, evidence, reply, gate flags) and nothing it must compute
//! itself. The engine does not assume any particular rendering technology.

use std::time::Instant;

use serde::Serialize;

use crate::presentation::state::{PresentationState, SessionController};
use crate::reply::{variant, ReplyTab};

/// Status pill while the analyze call is in flight
pub const STATUS_LOADING: &str = "● Анализдеу...";
/// Status pill once a result is presented
pub const STATUS_READY: &str = "● Дайын";
/// Status pill after a failed submission
pub const STATUS_ERROR: &str = "● Қате";

/// Placeholder shown instead of an empty evidence list
pub const EMPTY_EVIDENCE_PLACEHOLDER: &str = "Ерекше белгілер анықталмады";

/// One-frame snapshot of the presentation state
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PresentationModel {
    Empty,
    Loading { status: &'static str },
    Error { status: &'static str, message: String },
    Ready(Box<ReadyModel>),
}

/// Snapshot of a presented result
#[derive(Debug, Clone, Serialize)]
pub struct ReadyModel {
    pub status: &'static str,

    /// Final risk score and its animated display value at snapshot time
    pub risk_score: u8,
    pub animated_risk: u8,

    pub manipulation_score: u8,
    pub animated_manipulation: u8,

    pub vulnerability_score: u8,
    pub animated_vulnerability: u8,

    /// Tier identity derived from the risk level
    pub tier_label: &'static str,
    pub tier_color: &'static str,

    pub scam_type: String,

    /// Evidence, verbatim and in order; never empty — the placeholder is
    /// substituted when the backend sent no reasons
    pub reasons: Vec<String>,

    pub coach_note: String,

    /// Selected reply tab and the reply text it produces
    pub tab: ReplyTab,
    pub reply_text: String,

    pub gate_open: bool,
    pub gate_acknowledged: bool,
    pub reply_enabled: bool,

    pub from_cache: bool,
}

impl PresentationModel {
    /// Snapshot the controller's state, sampling animations at `now`
    pub fn snapshot(controller: &SessionController, now: Instant) -> Self {
        match controller.state() {
            PresentationState::Empty => PresentationModel::Empty,
            PresentationState::Submitting { .. } => PresentationModel::Loading {
                status: STATUS_LOADING,
            },
            PresentationState::Error { message } => PresentationModel::Error {
                status: STATUS_ERROR,
                message: message.clone(),
            },
            PresentationState::Ready {
                result,
                tab,
                gate,
                scores,
            } => {
                let level = result.level();
                let reasons = if result.reasons.is_empty() {
                    vec![EMPTY_EVIDENCE_PLACEHOLDER.to_string()]
                } else {
                    result.reasons.clone()
                };

                PresentationModel::Ready(Box::new(ReadyModel {
                    status: STATUS_READY,
                    risk_score: result.risk_score,
                    animated_risk: scores.risk.value_at(now),
                    manipulation_score: result.manipulation_score,
                    animated_manipulation: scores.manipulation.value_at(now),
                    vulnerability_score: result.vulnerability_score,
                    animated_vulnerability: scores.vulnerability.value_at(now),
                    tier_label: level.label(),
                    tier_color: level.color(),
                    scam_type: result.scam_type.clone(),
                    reasons,
                    coach_note: result.coach_note().to_string(),
                    tab: *tab,
                    reply_text: variant(*tab, &result.safe_reply),
                    gate_open: gate.is_open(),
                    gate_acknowledged: gate.is_acknowledged(),
                    reply_enabled: gate.allows_reply_use(),
                    from_cache: result.from_cache,
                }))
            }
        }
    }
}
