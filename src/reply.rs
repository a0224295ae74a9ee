//! Safe-reply variants
//!
//! The backend supplies one canonical safe reply; the engine derives the
//! "short" and "strict" phrasings from it on demand. All variants are pure
//! functions of the base string and are recomputed per render, never cached
//! across results.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum display length of the short variant, in characters
/// (the trailing period is appended after truncation)
pub const SHORT_MAX_CHARS: usize = 120;

/// Fixed refusal sentence the strict variant leads with
pub const REFUSAL_PREFIX: &str = "Мен бұл сұраныстан бас тартамын. ";

/// Leading greeting/softener sentence, stripped by the strict variant.
/// Matched only at the very start of the reply.
static SOFTENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(сәлем|рахмет|жарайды)[^.]*\.\s*").expect("valid softener regex")
});

/// Selectable reply phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyTab {
    Polite,
    Short,
    Strict,
}

impl ReplyTab {
    /// All tabs, in display order
    pub fn all() -> [ReplyTab; 3] {
        [ReplyTab::Polite, ReplyTab::Short, ReplyTab::Strict]
    }

    /// Localized tab label
    pub fn label(&self) -> &'static str {
        match self {
            ReplyTab::Polite => "Сыпайы",
            ReplyTab::Short => "Қысқа",
            ReplyTab::Strict => "Қатаң",
        }
    }

    /// Next tab in display order, wrapping around
    pub fn next(&self) -> ReplyTab {
        match self {
            ReplyTab::Polite => ReplyTab::Short,
            ReplyTab::Short => ReplyTab::Strict,
            ReplyTab::Strict => ReplyTab::Polite,
        }
    }
}

/// Render the selected variant of the canonical safe reply
pub fn variant(tab: ReplyTab, base: &str) -> String {
    match tab {
        ReplyTab::Polite => base.to_string(),
        ReplyTab::Short => shorten(base),
        ReplyTab::Strict => strictify(base),
    }
}

/// First sentence-terminated segment, truncated to the display cap,
/// trailing period enforced
pub fn shorten(base: &str) -> String {
    let first = base.split(['.', '!', '?']).next().unwrap_or("");
    let segment = if first.is_empty() { base } else { first };

    let mut out: String = segment.trim().chars().take(SHORT_MAX_CHARS).collect();
    out.push('.');
    out
}

/// Strip a leading softener sentence and lead with the fixed refusal
pub fn strictify(base: &str) -> String {
    let stripped = SOFTENER.replace(base, "");
    let body: &str = if stripped.is_empty() { base } else { &stripped };
    format!("{}{}", REFUSAL_PREFIX, body)
}
