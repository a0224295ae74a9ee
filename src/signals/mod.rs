//! Manipulation-signal detection over pasted chat text
//!
//! Three pieces, layered leaf-first:
//! - [`catalog`]: the static table of signal categories and their
//!   pre-compiled patterns (urgency, secrecy, money, code)
//! - [`classifier`]: which categories are present in a text
//! - [`highlight`]: overlap-safe inline highlighting of every match
//!
//! Classification and highlighting run synchronously on every edit, so both
//! are pure functions over the current text: no caches, no match cursors,
//! no I/O.

pub mod catalog;
pub mod classifier;
pub mod highlight;

pub use catalog::{catalog, SignalCategory, SignalKind};
pub use classifier::{classify, ClassificationResult, NO_SIGNALS_LABEL};
pub use highlight::{escape, render, strip_marks, MatchSpan};
