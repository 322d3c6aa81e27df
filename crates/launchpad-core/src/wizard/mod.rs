//! The wizard controller: steps, answers, submission, and results.
//!
//! The controller is an explicit state machine:
//!
//! ```text
//! Form(Welcome) <-> Form(BusinessName) <-> ... <-> Form(BudgetTimeframe)
//!                                                        |
//!                                                   begin_submit
//!                                                        v
//!                                                   Submitting
//!                                                        |
//!                                                   finish_submit
//!                                                        v
//!                                           Results (3 plans, or 0 + notice)
//! ```
//!
//! Forward moves are gated by [`can_advance`]; backward moves never are.
//! Only one submission can be in flight because `begin_submit` refuses to
//! leave any phase other than the last form step.

pub mod step;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::answers::{AnswerError, AnswerPatch, AnswerRecord};
use crate::export::ExportArtifact;
use crate::synth::{PlanRequest, PlanSet, PlanSynthesizer, SynthesisError};

pub use step::{BUDGET_PLACEHOLDER, Step, TIMEFRAME_PLACEHOLDER, TOTAL_STEPS, can_advance};

/// Message shown to the user when synthesis fails.
pub const FAILURE_NOTICE: &str = "There was an error generating the plan.";

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Form(Step),
    Submitting,
    Results,
}

/// What a finished submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Generated,
    Failed(SynthesisError),
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("plans can only be submitted from the last step (currently on step {step})")]
    NotOnFinalStep { step: usize },

    #[error("step {} ({}) is not complete", .0.index(), .0.title())]
    Incomplete(Step),

    #[error("a plan request is already in flight")]
    AlreadySubmitting,

    #[error("no plan request is in flight")]
    NotSubmitting,

    #[error("answers can no longer be changed once submitted")]
    RecordFrozen,

    #[error("plan {index} does not exist ({available} available)")]
    PlanOutOfRange { index: usize, available: usize },

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// Owns the whole wizard state. All changes go through its methods.
#[derive(Debug, Clone)]
pub struct WizardController {
    phase: Phase,
    record: AnswerRecord,
    plans: Option<PlanSet>,
    active_plan: usize,
    notice: Option<String>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self::with_record(AnswerRecord::default())
    }

    /// Start on the first step with answers already filled in.
    pub fn with_record(record: AnswerRecord) -> Self {
        Self {
            phase: Phase::Form(Step::FIRST),
            record,
            plans: None,
            active_plan: 0,
            notice: None,
        }
    }

    // -- Queries --

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The form step being shown, if any.
    pub fn current_step(&self) -> Option<Step> {
        match self.phase {
            Phase::Form(step) => Some(step),
            _ => None,
        }
    }

    /// Numeric step: `0..TOTAL_STEPS` while filling in the form (the last
    /// step is kept while submitting), `TOTAL_STEPS` on the results screen.
    pub fn step_index(&self) -> usize {
        match self.phase {
            Phase::Form(step) => step.index(),
            Phase::Submitting => Step::LAST.index(),
            Phase::Results => TOTAL_STEPS,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    /// Generated plans: empty, or exactly three.
    pub fn plans(&self) -> &[String] {
        self.plans.as_ref().map(PlanSet::as_slice).unwrap_or(&[])
    }

    /// The generated plans as a set, once synthesis has succeeded.
    pub fn plan_set(&self) -> Option<&PlanSet> {
        self.plans.as_ref()
    }

    pub fn active_plan(&self) -> usize {
        self.active_plan
    }

    pub fn active_plan_text(&self) -> Option<&str> {
        self.plans.as_ref().and_then(|p| p.get(self.active_plan))
    }

    /// Blocking message left by a failed submission.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the current form step's predicate holds.
    pub fn can_advance(&self) -> bool {
        self.current_step()
            .is_some_and(|step| can_advance(step, &self.record))
    }

    /// Whether [`Self::begin_submit`] would succeed.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Form(Step::LAST) && can_advance(Step::LAST, &self.record)
    }

    // -- Form navigation --

    /// Move one step forward if the current step is complete.
    ///
    /// Saturates on the last step; leaving it goes through
    /// [`Self::begin_submit`]. Returns `true` if the step changed.
    pub fn advance(&mut self) -> bool {
        let Phase::Form(step) = self.phase else {
            return false;
        };
        if !can_advance(step, &self.record) {
            debug!(step = step.index(), "advance blocked by incomplete step");
            return false;
        }
        let next = step.next();
        if next == step {
            return false;
        }
        self.phase = Phase::Form(next);
        debug!(from = step.index(), to = next.index(), "wizard advanced");
        true
    }

    /// Move one step back. Saturates on the first step.
    pub fn retreat(&mut self) {
        if let Phase::Form(step) = self.phase {
            self.phase = Phase::Form(step.prev());
        }
    }

    /// Merge `patch` into the answers.
    ///
    /// Goal exclusivity and the channel cap are enforced by the merge; a
    /// rejected patch changes nothing. Answers are frozen once submitted.
    pub fn update_field(&mut self, patch: AnswerPatch) -> Result<(), WizardError> {
        if !matches!(self.phase, Phase::Form(_)) {
            return Err(WizardError::RecordFrozen);
        }
        self.record.apply(patch)?;
        Ok(())
    }

    // -- Submission --

    /// Enter the submitting phase and return the request to synthesize.
    ///
    /// Plans from any earlier run are cleared.
    pub fn begin_submit(&mut self) -> Result<PlanRequest, WizardError> {
        match self.phase {
            Phase::Submitting => return Err(WizardError::AlreadySubmitting),
            Phase::Form(Step::LAST) => {}
            _ => {
                return Err(WizardError::NotOnFinalStep {
                    step: self.step_index(),
                });
            }
        }
        if !can_advance(Step::LAST, &self.record) {
            return Err(WizardError::Incomplete(Step::LAST));
        }

        self.phase = Phase::Submitting;
        self.plans = None;
        self.active_plan = 0;
        self.notice = None;

        let request = PlanRequest::from(&self.record);
        info!(business = %request.business.name_and_offer, "plan request submitted");
        Ok(request)
    }

    /// Record the synthesis result and move to the results screen.
    ///
    /// Both success and failure end in [`Phase::Results`]. A failure leaves
    /// the plan list empty and sets [`Self::notice`].
    pub fn finish_submit(
        &mut self,
        result: Result<PlanSet, SynthesisError>,
    ) -> Result<SubmitOutcome, WizardError> {
        if self.phase != Phase::Submitting {
            return Err(WizardError::NotSubmitting);
        }

        let outcome = match result {
            Ok(plans) => {
                info!(count = plans.as_slice().len(), "plans generated");
                self.plans = Some(plans);
                self.active_plan = 0;
                SubmitOutcome::Generated
            }
            Err(e) => {
                warn!(error = %e, "plan synthesis failed");
                self.plans = None;
                self.notice = Some(format!("{FAILURE_NOTICE} {e}"));
                SubmitOutcome::Failed(e)
            }
        };

        self.phase = Phase::Results;
        Ok(outcome)
    }

    /// Submit and wait for `synth`, optionally bounded by `timeout`.
    pub async fn submit(
        &mut self,
        synth: &dyn PlanSynthesizer,
        timeout: Option<Duration>,
    ) -> Result<SubmitOutcome, WizardError> {
        let request = self.begin_submit()?;
        let result = run_synthesis(synth, &request, timeout).await;
        self.finish_submit(result)
    }

    // -- Results --

    pub fn select_plan(&mut self, index: usize) -> Result<(), WizardError> {
        let available = self.plans().len();
        if index >= available {
            return Err(WizardError::PlanOutOfRange { index, available });
        }
        self.active_plan = index;
        Ok(())
    }

    /// Close the failure notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The selected plan as a downloadable file, or `None` with no plans.
    pub fn export_active_plan(&self) -> Option<ExportArtifact> {
        self.active_plan_text().map(ExportArtifact::new)
    }
}

/// Run `synth` on `request`, turning an expired `timeout` into
/// [`SynthesisError::TimedOut`].
pub async fn run_synthesis(
    synth: &dyn PlanSynthesizer,
    request: &PlanRequest,
    timeout: Option<Duration>,
) -> Result<PlanSet, SynthesisError> {
    debug!(synthesizer = synth.name(), ?timeout, "plan synthesis started");
    match timeout {
        Some(limit) => tokio::time::timeout(limit, synth.generate(request))
            .await
            .map_err(|_| SynthesisError::TimedOut(limit))?,
        None => synth.generate(request).await,
    }
}
