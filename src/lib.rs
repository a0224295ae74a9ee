//! TrueGuard - Scam Signal Classification & Risk Presentation Engine
//!
//! A Rust engine that helps a user spot manipulation signals in a pasted
//! conversation and presents an externally produced risk assessment safely:
//! - Catalog-driven signal classification (urgency, secrecy, money, code)
//!   with live, overlap-safe inline highlighting
//! - A staged, cancellable presentation state machine with animated score
//!   counters and a stale-response guard
//! - A mandatory disclosure gate before a high-risk reply can be reused
//! - Safe-reply variants (polite, short, strict) derived from one canonical
//!   reply
//!
//! # Architecture
//!
//! The system is organized into several layers:
//! - **Signals**: catalog, classifier, and highlight renderer
//! - **Presentation**: state machine, animations, gate, view model
//! - **Services**: the analyze backend collaborator
//! - **TUI**: an interactive terminal surface over the engine
//!
//! # Example
//!
//! ```
//! use trueguard_core::signals::{classify, render};
//!
//! let text = "Дереу ақша аудар";
//! let detected = classify(text);
//! assert_eq!(detected.len(), 2);
//!
//! // Highlighted markup round-trips the escaped text
//! let marked = render(text);
//! assert!(marked.contains("<mark"));
//! ```

pub mod error;
pub mod presentation;
pub mod reply;
pub mod services;
pub mod signals;
pub mod tui;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TrueGuardError};
pub use presentation::{
    DisclosureGate, PresentationModel, PresentationState, SessionController,
};
pub use reply::ReplyTab;
pub use services::{AnalyzeBackend, AnalyzeConfig, AnalyzeRequest, HttpAnalyzeBackend};
pub use signals::{classify, render, ClassificationResult, SignalKind};
pub use types::{AnalysisResult, RiskLevel};
