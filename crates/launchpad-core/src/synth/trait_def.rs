//! The `PlanSynthesizer` trait -- the seam between the wizard and whatever
//! turns answers into plans.
//!
//! The shipped implementation is the deterministic
//! [`super::TemplateSynthesizer`]. A text-generation backend plugs in by
//! implementing this trait; the wizard only ever sees three strings or a
//! [`SynthesisError`].

use async_trait::async_trait;

use super::SynthesisError;
use super::request::{PlanRequest, PlanSet};

/// Produces three marketing plans from a [`PlanRequest`].
///
/// The trait is object-safe so the CLI can hold an
/// `Arc<dyn PlanSynthesizer>` and move it into a spawned task.
#[async_trait]
pub trait PlanSynthesizer: Send + Sync {
    /// Short name used in logs (e.g. "template").
    fn name(&self) -> &str;

    /// Generate the plans. All-or-nothing: either exactly three plans or
    /// an error.
    async fn generate(&self, request: &PlanRequest) -> Result<PlanSet, SynthesisError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn PlanSynthesizer) {}
};
