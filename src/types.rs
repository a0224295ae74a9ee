//! Core data types for the TrueGuard engine
//!
//! This module defines the risk assessment payload consumed from the analyze
//! backend and the coarse risk tiers that drive presentation: tier colors,
//! localized labels, and score-derived bucketing.

use serde::{Deserialize, Serialize};

/// Score threshold at or above which a result is HIGH risk
pub const HIGH_RISK_THRESHOLD: u8 = 66;

/// Score threshold at or above which a result is MEDIUM risk
pub const MEDIUM_RISK_THRESHOLD: u8 = 31;

/// Maximum number of reasons surfaced per result
pub const MAX_REASONS: usize = 10;

/// Fallback coach note when the backend sends none
pub const DEFAULT_COACH_NOTE: &str = "Абай болыңыз.";

/// Coarse risk verdict bucket
///
/// Drives tier color, localized label, and disclosure gating. The backend
/// normally sends the level explicitly; [`RiskLevel::from_score`] repairs
/// payloads that omit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Derive the risk tier from a 0-100 score
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Fixed tier color as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::High => "#ef4444",
            RiskLevel::Medium => "#fbbf24",
            RiskLevel::Low => "#34d399",
        }
    }

    /// Localized tier label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "🔴 ЖОҒАРЫ ҚАУІП",
            RiskLevel::Medium => "🟡 ОРТАША ҚАУІП",
            RiskLevel::Low => "🟢 ҚАУІП ТӨМЕН",
        }
    }

    /// Whether this tier requires the disclosure gate
    pub fn is_high(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

/// Risk assessment payload produced by the analyze backend
///
/// Consumed, never produced, by the engine. Owned by the presentation state
/// machine for the duration of one analysis cycle and replaced wholesale on
/// the next successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall risk score, 0-100
    pub risk_score: u8,

    /// Coarse verdict bucket; derived from the score when absent
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,

    /// Human-readable scam classification (e.g. "investment scam")
    pub scam_type: String,

    /// Manipulation pressure score, 0-100
    pub manipulation_score: u8,

    /// Target vulnerability score, 0-100
    pub vulnerability_score: u8,

    /// Evidence list, rendered verbatim in order
    pub reasons: Vec<String>,

    /// Safety coach note shown alongside the verdict
    pub safety_coach: String,

    /// Canonical safe reply the variants derive from
    pub safe_reply: String,

    /// Whether the backend served this result from its cache
    #[serde(default)]
    pub from_cache: bool,

    /// Backend request identifier, passed through for display/debugging
    #[serde(default)]
    pub request_id: Option<String>,

    /// Backend-side creation timestamp (RFC 3339), passed through
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AnalysisResult {
    /// Normalize a freshly parsed payload: clamp scores into 0-100, derive a
    /// missing risk level, cap the evidence list.
    pub fn normalized(mut self) -> Self {
        self.risk_score = self.risk_score.min(100);
        self.manipulation_score = self.manipulation_score.min(100);
        self.vulnerability_score = self.vulnerability_score.min(100);
        if self.risk_level.is_none() {
            self.risk_level = Some(RiskLevel::from_score(self.risk_score));
        }
        self.reasons.truncate(MAX_REASONS);
        self
    }

    /// Effective risk tier (explicit level, or derived from the score)
    pub fn level(&self) -> RiskLevel {
        self.risk_level
            .unwrap_or_else(|| RiskLevel::from_score(self.risk_score))
    }

    /// Coach note with the localized fallback applied
    pub fn coach_note(&self) -> &str {
        if self.safety_coach.trim().is_empty() {
            DEFAULT_COACH_NOTE
        } else {
            &self.safety_coach
        }
    }
}
