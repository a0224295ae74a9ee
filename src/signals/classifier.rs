//! Signal classification over free text
//!
//! `classify` scans the full text against every catalog category and reports
//! which categories are present, in catalog order. Categories are evaluated
//! independently; overlap between them is expected ("срочно переведи деньги"
//! trips both urgency and money).
//!
//! The scan is a pure function: fresh match iterators per call, no cursors,
//! no side effects, no I/O. It never fails — empty or unmatched input is a
//! valid, empty result.

use super::catalog::{catalog, SignalKind};

/// Chip placeholder shown when no signal is present
pub const NO_SIGNALS_LABEL: &str = "Сигнал жоқ";

/// Set of signal categories detected in one classification pass
///
/// Ephemeral: recomputed on every text change and discarded after render.
/// Iteration order is catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationResult {
    detected: Vec<SignalKind>,
}

impl ClassificationResult {
    /// Detected categories, in catalog order
    pub fn kinds(&self) -> &[SignalKind] {
        &self.detected
    }

    /// Whether a specific category was detected
    pub fn contains(&self, kind: SignalKind) -> bool {
        self.detected.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.detected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.detected.len()
    }

    /// Chip labels for the detected categories, or the localized
    /// "no signals" placeholder when nothing matched
    pub fn chip_labels(&self) -> Vec<&'static str> {
        if self.detected.is_empty() {
            vec![NO_SIGNALS_LABEL]
        } else {
            self.detected.iter().map(|k| k.category().label).collect()
        }
    }
}

/// Classify text into the set of signal categories present
///
/// A category counts as detected if any of its patterns matches anywhere in
/// the text. Runs synchronously; suitable for per-keystroke feedback.
pub fn classify(text: &str) -> ClassificationResult {
    let mut detected = Vec::new();

    for category in catalog() {
        if category.patterns.iter().any(|p| p.is_match(text)) {
            detected.push(category.kind);
        }
    }

    ClassificationResult { detected }
}
