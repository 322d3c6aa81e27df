//! End-to-end wizard runs: answers in, plans out, file exported.

use launchpad_core::answers::{Channel, Goal, Tone};
use launchpad_core::synth::{PlanSynthesizer, TemplateSynthesizer};
use launchpad_core::wizard::{FAILURE_NOTICE, Phase, Step};
use launchpad_core::{
    AnswerPatch, AnswerRecord, EXPORT_FILENAME, SubmitOutcome, TOTAL_STEPS, WizardController,
};
use launchpad_test_utils::{
    FailingSynthesizer, JOES_COFFEE_TOML, ScriptedSynthesizer, joes_coffee, joes_coffee_patch,
    walk_to_last_step,
};

/// Fill in the form one screen at a time, the way a user would.
#[tokio::test]
async fn step_by_step_run_produces_three_plans() {
    let mut wizard = WizardController::new();

    let answers = [
        (Step::BusinessName, AnswerPatch::default().business_name("Joe's Coffee")),
        (Step::Customers, AnswerPatch::default().custom_customer("Night owls")),
        (Step::MainGoal, AnswerPatch::default().main_goal(Goal::PromoteEvent)),
        (Step::SpecialOffer, AnswerPatch::default().special_offer("Open mic night")),
        (Step::Tone, AnswerPatch::default().tone(Tone::FriendlyCasual)),
        (Step::Unique, AnswerPatch::default().unique("Live music")),
        (Step::Channels, AnswerPatch::default().channels(vec![Channel::TikTok])),
        (
            Step::BudgetTimeframe,
            AnswerPatch::default().budget("$200").timeframe("2 weeks"),
        ),
    ];

    for (step, patch) in answers {
        while wizard.current_step() != Some(step) {
            assert!(wizard.advance(), "stuck before {step:?}");
        }
        assert!(!wizard.can_advance(), "{step:?} should start incomplete");
        wizard.update_field(patch).unwrap();
        assert!(wizard.can_advance(), "{step:?} should now be complete");
    }

    let synth = TemplateSynthesizer::instant();
    let outcome = wizard.submit(&synth, None).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Generated);
    assert_eq!(wizard.phase(), Phase::Results);
    assert_eq!(wizard.plans().len(), 3);
    for plan in wizard.plans() {
        assert!(plan.contains("Audience: Night owls\n"));
        assert!(plan.contains("Channels: TikTok\n"));
    }
}

#[tokio::test]
async fn joes_coffee_header_carries_every_answer() {
    let mut wizard = WizardController::with_record(joes_coffee());
    walk_to_last_step(&mut wizard);
    wizard
        .submit(&TemplateSynthesizer::instant(), None)
        .await
        .unwrap();

    for plan in wizard.plans() {
        let header: String = plan.lines().take(8).collect::<Vec<_>>().join("\n");
        for expected in [
            "Joe's Coffee",
            "Get new customers",
            "Students",
            "Fun & creative",
            "Organic beans",
            "Instagram, Facebook",
            "$500",
            "1 month",
        ] {
            assert!(header.contains(expected), "header missing {expected:?}:\n{header}");
        }
    }
}

#[tokio::test]
async fn failed_synthesis_still_reaches_results() {
    let mut wizard = WizardController::with_record(joes_coffee());
    walk_to_last_step(&mut wizard);

    let outcome = wizard
        .submit(&FailingSynthesizer::new("503 from backend"), None)
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(!wizard.is_loading());
    assert_eq!(wizard.step_index(), TOTAL_STEPS);
    assert!(wizard.plans().is_empty());
    assert!(wizard.notice().unwrap().starts_with(FAILURE_NOTICE));
}

#[tokio::test]
async fn partial_results_are_treated_as_failure() {
    let mut wizard = WizardController::with_record(joes_coffee());
    walk_to_last_step(&mut wizard);

    let synth = ScriptedSynthesizer::new(&["only", "two"]);
    let outcome = wizard.submit(&synth, None).await.unwrap();

    assert_eq!(synth.calls(), 1);
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(wizard.plans().is_empty());
}

#[tokio::test]
async fn export_writes_the_selected_plan_verbatim() {
    let mut wizard = WizardController::new();
    wizard.update_field(joes_coffee_patch()).unwrap();
    walk_to_last_step(&mut wizard);

    let synth = ScriptedSynthesizer::new(&["plan zero", "plan one\n• exact\n", "plan two"]);
    wizard.submit(&synth, None).await.unwrap();
    wizard.select_plan(1).unwrap();

    let artifact = wizard.export_active_plan().unwrap();
    assert_eq!(artifact.filename(), EXPORT_FILENAME);

    let tmp = tempfile::TempDir::new().unwrap();
    let path = artifact.write_to(tmp.path()).unwrap();
    assert_eq!(path, tmp.path().join("marketing-plan.txt"));
    assert_eq!(std::fs::read(&path).unwrap(), wizard.plans()[1].as_bytes());
}

#[tokio::test]
async fn template_is_pure() {
    let request = launchpad_core::PlanRequest::from(&joes_coffee());
    let synth = TemplateSynthesizer::instant();
    let first = synth.generate(&request).await.unwrap();
    let second = synth.generate(&request).await.unwrap();
    assert_eq!(first, second);
}

#[test]
fn answers_file_matches_the_fixture() {
    let loaded = AnswerRecord::from_toml_str(JOES_COFFEE_TOML).unwrap();
    assert_eq!(loaded, joes_coffee());
}

#[test]
fn answers_file_loads_from_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("answers.toml");
    std::fs::write(&path, JOES_COFFEE_TOML).unwrap();
    assert_eq!(AnswerRecord::load(&path).unwrap(), joes_coffee());

    let missing = AnswerRecord::load(&tmp.path().join("nope.toml")).unwrap_err();
    assert!(missing.to_string().contains("nope.toml"));
}
