//! Core logic for the launchpad marketing-plan wizard.
//!
//! - [`answers`]: the answer record, its patch/merge rules, and choice lists
//! - [`wizard`]: the step-by-step controller and its phase machine
//! - [`synth`]: the synthesizer contract and the template synthesizer
//! - [`export`]: writing the selected plan to `marketing-plan.txt`

pub mod answers;
pub mod export;
pub mod synth;
pub mod wizard;

pub use answers::{AnswerError, AnswerPatch, AnswerRecord};
pub use export::{EXPORT_FILENAME, ExportArtifact, ExportError};
pub use synth::{PlanRequest, PlanSet, PlanSynthesizer, SynthesisError, TemplateSynthesizer};
pub use wizard::{Phase, Step, SubmitOutcome, TOTAL_STEPS, WizardController, WizardError};
