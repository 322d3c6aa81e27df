//! Shared test fixtures for launchpad integration tests.
//!
//! - [`joes_coffee`]: a fully answered record that passes every step
//! - [`FailingSynthesizer`] / [`ScriptedSynthesizer`]: stand-ins for a
//!   plan backend that fail, or return canned plans and count calls
//! - [`walk_to_last_step`]: drive a controller through the form

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use launchpad_core::answers::{Channel, Customer, Goal, Tone};
use launchpad_core::synth::{PlanRequest, PlanSet, PlanSynthesizer, SynthesisError};
use launchpad_core::wizard::{Step, WizardController};
use launchpad_core::{AnswerPatch, AnswerRecord};

/// The answers used throughout the docs: a small coffee shop.
pub fn joes_coffee_patch() -> AnswerPatch {
    AnswerPatch::default()
        .business_name("Joe's Coffee")
        .main_customers(vec![Customer::Students])
        .main_goal(Goal::NewCustomers)
        .special_offer("20% off")
        .tone(Tone::FunCreative)
        .unique("Organic beans")
        .channels(vec![Channel::Instagram, Channel::Facebook])
        .budget("$500")
        .timeframe("1 month")
}

pub fn joes_coffee() -> AnswerRecord {
    let mut record = AnswerRecord::default();
    record
        .apply(joes_coffee_patch())
        .expect("fixture answers are valid");
    record
}

/// The same answers as an answers file.
pub const JOES_COFFEE_TOML: &str = r#"business_name = "Joe's Coffee"
main_customers = ["Students"]
main_goal = "Get new customers"
special_offer = "20% off"
tone = "Fun & creative"
unique = "Organic beans"
channels = ["Instagram", "Facebook"]
budget = "$500"
timeframe = "1 month"
"#;

/// Advance `wizard` until it stops, and assert it reached the last step.
pub fn walk_to_last_step(wizard: &mut WizardController) {
    while wizard.advance() {}
    assert_eq!(
        wizard.current_step(),
        Some(Step::LAST),
        "wizard stopped early; answers are incomplete"
    );
}

/// A synthesizer whose backend is always down.
pub struct FailingSynthesizer {
    pub message: String,
}

impl FailingSynthesizer {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl PlanSynthesizer for FailingSynthesizer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _request: &PlanRequest) -> Result<PlanSet, SynthesisError> {
        Err(SynthesisError::Backend(self.message.clone()))
    }
}

/// A synthesizer that returns a canned plan list and counts calls.
///
/// The list goes through `PlanSet::try_from`, so a list of the wrong
/// length behaves like a backend returning partial results.
pub struct ScriptedSynthesizer {
    plans: Vec<String>,
    calls: AtomicUsize,
}

impl ScriptedSynthesizer {
    pub fn new(plans: &[&str]) -> Self {
        Self {
            plans: plans.iter().map(|p| p.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanSynthesizer for ScriptedSynthesizer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _request: &PlanRequest) -> Result<PlanSet, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        PlanSet::try_from(self.plans.clone())
    }
}
