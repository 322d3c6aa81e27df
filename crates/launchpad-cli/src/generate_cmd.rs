//! `launchpad generate` command: run the wizard non-interactively from an
//! answers file and print or export the resulting plan.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use launchpad_core::AnswerRecord;
use launchpad_core::synth::{
    PLAN_COUNT, PlanRequest, PlanSet, PlanSynthesizer, TemplateSynthesizer,
};
use launchpad_core::wizard::{Step, SubmitOutcome, WizardController, can_advance};

use crate::config::LaunchpadConfig;

/// What `generate` should do with the plans.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// 1-based plan number to print or export.
    pub plan: Option<usize>,
    /// Print all plans as JSON instead of the selected plan's text.
    pub json: bool,
    /// Write the selected plan to the export directory.
    pub export: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    selected: usize,
    request: PlanRequest,
    plans: &'a PlanSet,
}

/// Run the generate command.
pub async fn run_generate(
    answers_path: &Path,
    options: &GenerateOptions,
    config: &LaunchpadConfig,
) -> Result<()> {
    let selected = options.plan.unwrap_or(1);
    if !(1..=PLAN_COUNT).contains(&selected) {
        bail!("plan must be between 1 and {PLAN_COUNT} (got {selected})");
    }

    let record = AnswerRecord::load(answers_path)
        .with_context(|| format!("cannot use answers file {}", answers_path.display()))?;

    let synth = TemplateSynthesizer::new(config.latency);
    let mut wizard = generate_plans(record, &synth, config).await?;

    wizard
        .select_plan(selected - 1)
        .with_context(|| format!("cannot select plan {selected}"))?;

    if options.json {
        if let Some(plans) = wizard.plan_set() {
            let out = JsonOutput {
                selected,
                request: PlanRequest::from(wizard.record()),
                plans,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    } else if let Some(text) = wizard.active_plan_text() {
        print!("{text}");
    }

    if options.export {
        if let Some(artifact) = wizard.export_active_plan() {
            let path = artifact
                .write_to(&config.export_dir)
                .context("failed to export plan")?;
            eprintln!("Exported plan {selected} to {}", path.display());
        }
    }

    Ok(())
}

/// Drive a controller through every step with `record` and submit it.
///
/// Fails on the first step whose answers are incomplete, or if synthesis
/// fails.
pub async fn generate_plans(
    record: AnswerRecord,
    synth: &dyn PlanSynthesizer,
    config: &LaunchpadConfig,
) -> Result<WizardController> {
    let mut wizard = WizardController::with_record(record);
    complete_form(&mut wizard)?;

    match wizard.submit(synth, config.timeout).await? {
        SubmitOutcome::Generated => Ok(wizard),
        SubmitOutcome::Failed(e) => {
            let notice = wizard.notice().unwrap_or_default().to_string();
            Err(anyhow::Error::new(e).context(notice))
        }
    }
}

/// Advance through the form, stopping with an error at the first
/// incomplete step.
pub fn complete_form(wizard: &mut WizardController) -> Result<()> {
    while wizard.advance() {}

    let step = wizard
        .current_step()
        .context("wizard is no longer on the form")?;
    if step != Step::LAST || !can_advance(step, wizard.record()) {
        bail!(
            "answers are incomplete: step {} ({}) is not satisfied",
            step.index(),
            step.title()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use launchpad_core::AnswerPatch;
    use launchpad_core::answers::{Channel, Tone};
    use launchpad_test_utils::{FailingSynthesizer, JOES_COFFEE_TOML, joes_coffee};

    fn instant_config() -> LaunchpadConfig {
        LaunchpadConfig {
            latency: Duration::ZERO,
            timeout: None,
            export_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn complete_form_names_the_first_gap() {
        let mut record = AnswerRecord::default();
        record
            .apply(AnswerPatch::default().business_name("Joe's Coffee"))
            .unwrap();
        let mut wizard = WizardController::with_record(record);

        let err = complete_form(&mut wizard).unwrap_err().to_string();
        assert!(err.contains("step 2"), "unexpected error: {err}");
        assert!(err.contains("Main Customers"), "unexpected error: {err}");
    }

    #[test]
    fn complete_form_rejects_missing_budget() {
        let mut record = AnswerRecord::default();
        record
            .apply(
                AnswerPatch::default()
                    .business_name("Joe's Coffee")
                    .custom_customer("Locals")
                    .custom_goal("More regulars")
                    .special_offer("Free cookie")
                    .tone(Tone::FriendlyCasual)
                    .unique("Baked daily")
                    .channels(vec![Channel::Instagram])
                    .timeframe("1 month"),
            )
            .unwrap();
        let mut wizard = WizardController::with_record(record);

        let err = complete_form(&mut wizard).unwrap_err().to_string();
        assert!(err.contains("step 11"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn generate_plans_returns_three() {
        let record = AnswerRecord::from_toml_str(JOES_COFFEE_TOML).unwrap();

        let synth = TemplateSynthesizer::instant();
        let wizard = generate_plans(record, &synth, &instant_config()).await.unwrap();
        assert_eq!(wizard.plans().len(), 3);
        assert!(wizard.plans()[0].contains("Business: Joe's Coffee\n"));
    }

    #[tokio::test]
    async fn generate_plans_surfaces_backend_failure() {
        let synth = FailingSynthesizer::new("quota exceeded");
        let err = generate_plans(joes_coffee(), &synth, &instant_config())
            .await
            .unwrap_err();

        let msg = format!("{err:#}");
        assert!(
            msg.contains("There was an error generating the plan."),
            "unexpected error: {msg}"
        );
        assert!(msg.contains("quota exceeded"), "unexpected error: {msg}");
    }

    #[tokio::test]
    async fn run_generate_exports_selected_plan() {
        let tmp = tempfile::TempDir::new().unwrap();
        let answers = tmp.path().join("answers.toml");
        std::fs::write(&answers, JOES_COFFEE_TOML).unwrap();

        let config = LaunchpadConfig {
            export_dir: tmp.path().join("out"),
            ..instant_config()
        };
        let options = GenerateOptions {
            plan: Some(3),
            json: false,
            export: true,
        };
        run_generate(&answers, &options, &config).await.unwrap();

        let exported =
            std::fs::read_to_string(tmp.path().join("out/marketing-plan.txt")).unwrap();
        assert!(exported.contains("Measurement Plan:"));
        assert!(!exported.contains("Drip Sequence"));
    }

    #[tokio::test]
    async fn run_generate_rejects_plan_zero_and_four() {
        let tmp = tempfile::TempDir::new().unwrap();
        let answers = tmp.path().join("answers.toml");
        std::fs::write(&answers, JOES_COFFEE_TOML).unwrap();

        for plan in [0, 4] {
            let options = GenerateOptions {
                plan: Some(plan),
                ..GenerateOptions::default()
            };
            let err = run_generate(&answers, &options, &instant_config())
                .await
                .unwrap_err()
                .to_string();
            assert!(err.contains("between 1 and 3"), "unexpected error: {err}");
        }
    }

    #[tokio::test]
    async fn out_of_range_plan_fails_before_loading_answers() {
        // The answers file does not exist and synthesis would take a minute:
        // the range error must come first.
        let config = LaunchpadConfig {
            latency: Duration::from_secs(60),
            ..instant_config()
        };
        let options = GenerateOptions {
            plan: Some(4),
            ..GenerateOptions::default()
        };

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            run_generate(Path::new("missing.toml"), &options, &config),
        )
        .await
        .expect("range check should not wait on synthesis")
        .unwrap_err()
        .to_string();

        assert!(err.contains("plan must be between 1 and 3"), "unexpected error: {err}");
    }
}
