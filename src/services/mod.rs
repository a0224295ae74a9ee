//! External collaborators, specified at their interface
//!
//! The engine never computes a risk score itself; it submits the chat text
//! (and optional photo) to an analyze backend and presents whatever comes
//! back. [`analyze::AnalyzeBackend`] is the seam — the HTTP implementation
//! lives here, test doubles implement the same trait.

pub mod analyze;

pub use analyze::{
    AnalyzeBackend, AnalyzeConfig, AnalyzeRequest, HttpAnalyzeBackend, PhotoAttachment,
};
