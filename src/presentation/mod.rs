//! Result presentation: state machine, gating, and visual derivation
//!
//! The presentation layer turns an asynchronous risk assessment into a
//! staged, gated display: the [`state::SessionController`] owns the single
//! live [`state::PresentationState`], [`animation`] derives the animated
//! score values, [`gate`] blocks reply reuse on HIGH verdicts until
//! acknowledged, and [`model`] snapshots it all into a rendering-technology
//! neutral view for whatever surface is attached.

pub mod animation;
pub mod gate;
pub mod model;
pub mod state;

pub use animation::{ScoreAnimation, ScoreAnimations};
pub use gate::DisclosureGate;
pub use model::{PresentationModel, ReadyModel};
pub use state::{PresentationState, SessionController};
