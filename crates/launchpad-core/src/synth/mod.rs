//! Plan synthesis: the request contract, the synthesizer trait, and the
//! shipped template implementation.
//!
//! # Architecture
//!
//! ```text
//! WizardController
//!     |
//!     | PlanRequest::from(&AnswerRecord)
//!     v
//! &dyn PlanSynthesizer --generate(request)--> Result<PlanSet, SynthesisError>
//!     |
//!     +-- TemplateSynthesizer (deterministic, simulated latency)
//! ```

pub mod request;
pub mod template;
pub mod trait_def;

use std::time::Duration;

pub use request::{Brand, Business, Campaign, Delivery, PLAN_COUNT, PlanRequest, PlanSet};
pub use template::{DEFAULT_LATENCY, TemplateSynthesizer, render_plans};
pub use trait_def::PlanSynthesizer;

/// Why a synthesis produced no plans.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("plan backend failed: {0}")]
    Backend(String),

    #[error("expected {expected} plans from the backend, got {got}")]
    WrongPlanCount { expected: usize, got: usize },

    #[error("plan synthesis timed out after {0:?}")]
    TimedOut(Duration),
}
