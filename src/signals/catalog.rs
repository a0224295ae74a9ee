//! Static catalog of manipulation-signal categories
//!
//! Each category is a data record: display identity plus an ordered set of
//! pre-compiled patterns. All patterns are case-insensitive and must work on
//! mixed Cyrillic/Latin text, so the deployed sets carry Kazakh and Russian
//! variants side by side. Adding a category means adding a record here;
//! the classifier and renderer iterate the catalog and need no changes.
//!
//! Catalog order is the documented rendering-priority order: when two
//! matches overlap, the later category in the catalog wins the contested
//! region (see `highlight::resolve_overlaps`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Kinds of manipulation signal the catalog recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Time pressure ("срочно", "дереу", "қазір")
    Urgency,
    /// Secrecy / isolation pressure ("ешкімге айтпа", "никому")
    Secrecy,
    /// Financial transfer request ("ақша", "перевод", "IBAN")
    Money,
    /// Credential / one-time-code request ("код", "OTP", "пароль")
    Code,
}

/// A signal category: display identity plus its matching patterns
pub struct SignalCategory {
    pub kind: SignalKind,
    /// Chip label shown while typing
    pub label: &'static str,
    /// Style key for the detected-signal chip
    pub chip_class: &'static str,
    /// Style key for inline highlight wrappers
    pub highlight_class: &'static str,
    /// Ordered pattern set; a category is detected if any pattern matches
    pub patterns: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid signal pattern"))
        .collect()
}

static CATALOG: Lazy<Vec<SignalCategory>> = Lazy::new(|| {
    vec![
        SignalCategory {
            kind: SignalKind::Urgency,
            label: "ШҰҒЫЛ",
            chip_class: "chip-urgency",
            highlight_class: "hl-urgency",
            patterns: compile(&[
                "срочно",
                r"тез\b",
                "қазір",
                "шұғыл",
                "дереу",
                "жылдам",
                "немедленно",
                "сейчас",
            ]),
        },
        SignalCategory {
            kind: SignalKind::Secrecy,
            label: "ҚҰПИЯ",
            chip_class: "chip-secrecy",
            highlight_class: "hl-secrecy",
            patterns: compile(&[
                "ешкімге айтпа",
                "құпия",
                "никому",
                "не говори",
                "тайно",
                "жасырын",
            ]),
        },
        SignalCategory {
            kind: SignalKind::Money,
            label: "АҚША",
            chip_class: "chip-money",
            highlight_class: "hl-money",
            patterns: compile(&[
                "ақша",
                "kaspi",
                "аудар",
                "IBAN",
                "карта",
                "деньги",
                "перевод",
                "счёт",
                "тенге",
                r"сом\b",
            ]),
        },
        SignalCategory {
            kind: SignalKind::Code,
            label: "КОД",
            chip_class: "chip-code",
            highlight_class: "hl-code",
            patterns: compile(&[
                "ссылка",
                r"\bкод\b",
                r"\bSMS\b",
                r"\bOTP\b",
                "сілтеме",
                "пароль",
                "PIN",
            ]),
        },
    ]
});

/// The full ordered signal catalog
pub fn catalog() -> &'static [SignalCategory] {
    &CATALOG
}

impl SignalKind {
    /// Position of this kind in the catalog; doubles as overlap priority
    pub fn catalog_index(&self) -> usize {
        catalog()
            .iter()
            .position(|c| c.kind == *self)
            .expect("kind present in catalog")
    }

    /// The catalog record for this kind
    pub fn category(&self) -> &'static SignalCategory {
        &catalog()[self.catalog_index()]
    }
}
