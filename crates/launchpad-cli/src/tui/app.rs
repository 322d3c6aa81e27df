//! TUI application state and key handling.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::task::JoinHandle;

use launchpad_core::answers::{Channel, Customer, Goal, Tone};
use launchpad_core::synth::{PlanSet, PlanSynthesizer, SynthesisError};
use launchpad_core::wizard::{
    BUDGET_PLACEHOLDER, Phase, Step, TIMEFRAME_PLACEHOLDER, WizardController, run_synthesis,
};
use launchpad_core::{AnswerPatch, AnswerRecord};

use crate::config::LaunchpadConfig;

/// A free-text input on one of the form steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    BusinessName,
    CustomCustomer,
    CustomGoal,
    SpecialOffer,
    Unique,
    Budget,
    Timeframe,
}

impl TextField {
    pub fn value(self, record: &AnswerRecord) -> &str {
        match self {
            TextField::BusinessName => &record.business_name,
            TextField::CustomCustomer => &record.custom_customer,
            TextField::CustomGoal => &record.custom_goal,
            TextField::SpecialOffer => &record.special_offer,
            TextField::Unique => &record.unique,
            TextField::Budget => &record.budget,
            TextField::Timeframe => &record.timeframe,
        }
    }

    fn patch(self, value: String) -> AnswerPatch {
        let patch = AnswerPatch::default();
        match self {
            TextField::BusinessName => patch.business_name(value),
            TextField::CustomCustomer => patch.custom_customer(value),
            TextField::CustomGoal => patch.custom_goal(value),
            TextField::SpecialOffer => patch.special_offer(value),
            TextField::Unique => patch.unique(value),
            TextField::Budget => patch.budget(value),
            TextField::Timeframe => patch.timeframe(value),
        }
    }

    /// Label drawn next to the input, if the step has more than one widget.
    pub fn label(self) -> Option<&'static str> {
        match self {
            TextField::CustomCustomer | TextField::CustomGoal => Some("Other (specify)"),
            TextField::Budget => Some("Budget"),
            TextField::Timeframe => Some("Time-frame"),
            _ => None,
        }
    }

    pub fn placeholder(self, step: Step) -> Option<&'static str> {
        match self {
            TextField::Budget => Some(BUDGET_PLACEHOLDER),
            TextField::Timeframe => Some(TIMEFRAME_PLACEHOLDER),
            _ => step.placeholder(),
        }
    }
}

/// One row of a choice list as the UI draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRow {
    pub label: &'static str,
    pub checked: bool,
    pub enabled: bool,
    /// Radio rows allow one pick; checkbox rows allow several.
    pub radio: bool,
}

/// Choice list rows for `step`, in display order.
pub fn choice_rows(step: Step, record: &AnswerRecord) -> Vec<ChoiceRow> {
    match step {
        Step::Customers => Customer::ALL
            .iter()
            .map(|&c| ChoiceRow {
                label: c.label(),
                checked: record.main_customers.contains(&c),
                enabled: true,
                radio: false,
            })
            .collect(),
        Step::MainGoal => Goal::ALL
            .iter()
            .map(|&g| ChoiceRow {
                label: g.label(),
                checked: record.main_goal == Some(g),
                enabled: true,
                radio: true,
            })
            .collect(),
        Step::Tone => Tone::ALL
            .iter()
            .map(|&t| ChoiceRow {
                label: t.label(),
                checked: record.tone == Some(t),
                enabled: true,
                radio: true,
            })
            .collect(),
        Step::Channels => Channel::ALL
            .iter()
            .map(|&c| ChoiceRow {
                label: c.label(),
                checked: record.channels.contains(&c),
                enabled: record.channel_selectable(c),
                radio: false,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Text inputs on `step`, drawn after its choice list.
pub fn text_fields(step: Step) -> &'static [TextField] {
    match step {
        Step::BusinessName => &[TextField::BusinessName],
        Step::Customers => &[TextField::CustomCustomer],
        Step::MainGoal => &[TextField::CustomGoal],
        Step::SpecialOffer => &[TextField::SpecialOffer],
        Step::Unique => &[TextField::Unique],
        Step::BudgetTimeframe => &[TextField::Budget, TextField::Timeframe],
        _ => &[],
    }
}

fn choice_count(step: Step) -> usize {
    match step {
        Step::Customers => Customer::ALL.len(),
        Step::MainGoal => Goal::ALL.len(),
        Step::Tone => Tone::ALL.len(),
        Step::Channels => Channel::ALL.len(),
        _ => 0,
    }
}

/// The widget that has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Choice(usize),
    Text(TextField),
}

/// Application state for the TUI.
pub struct App {
    pub wizard: WizardController,
    pub synth: Arc<dyn PlanSynthesizer>,
    pub config: LaunchpadConfig,
    /// Index into the current step's widgets: choices first, then text inputs.
    pub focus_index: usize,
    pending: Option<JoinHandle<Result<PlanSet, SynthesisError>>>,
    pub ticks: usize,
    pub tick_rate: Duration,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(synth: Arc<dyn PlanSynthesizer>, config: LaunchpadConfig) -> Self {
        Self {
            wizard: WizardController::new(),
            synth,
            config,
            focus_index: 0,
            pending: None,
            ticks: 0,
            tick_rate: Duration::from_millis(100),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn focus(&self) -> Option<Focus> {
        let step = self.wizard.current_step()?;
        let choices = choice_count(step);
        if self.focus_index < choices {
            return Some(Focus::Choice(self.focus_index));
        }
        text_fields(step)
            .get(self.focus_index - choices)
            .copied()
            .map(Focus::Text)
    }

    fn widget_count(&self) -> usize {
        self.wizard
            .current_step()
            .map(|step| choice_count(step) + text_fields(step).len())
            .unwrap_or(0)
    }

    /// Whether a synthesis task is still running.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    // -- Keys --

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.wizard.phase() {
            Phase::Submitting => {}
            Phase::Results => self.handle_results_key(key),
            Phase::Form(step) => self.handle_form_key(step, key),
        }
    }

    fn handle_form_key(&mut self, step: Step, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if step == Step::FIRST {
                    self.should_quit = true;
                } else {
                    self.wizard.retreat();
                    self.focus_index = 0;
                }
            }
            KeyCode::Enter => self.next(step),
            KeyCode::Down | KeyCode::Tab => self.move_focus(1),
            KeyCode::Up | KeyCode::BackTab => self.move_focus(-1),
            KeyCode::Char(' ') if matches!(self.focus(), Some(Focus::Choice(_))) => {
                self.toggle_focused(step);
            }
            KeyCode::Char(c) => self.edit_focused(|value| value.push(c)),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        if self.wizard.notice().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.wizard.dismiss_notice();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                if let Err(e) = self.wizard.select_plan(index) {
                    self.status_message = Some(e.to_string());
                }
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.cycle_plan(1),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.cycle_plan(-1),
            KeyCode::Char('e') => self.export_selected(),
            _ => {}
        }
    }

    // -- Form actions --

    fn next(&mut self, step: Step) {
        if step == Step::LAST {
            if self.wizard.can_submit() {
                self.start_submit();
            }
            return;
        }
        if self.wizard.advance() {
            self.focus_index = 0;
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.widget_count();
        if count == 0 {
            return;
        }
        self.focus_index = (self.focus_index as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn toggle_focused(&mut self, step: Step) {
        let Some(Focus::Choice(i)) = self.focus() else {
            return;
        };
        let record = self.wizard.record();
        let patch = match step {
            Step::Customers => record.toggle_customer(Customer::ALL[i]),
            Step::MainGoal => AnswerPatch::default().main_goal(Goal::ALL[i]),
            Step::Tone => AnswerPatch::default().tone(Tone::ALL[i]),
            Step::Channels => {
                let channel = Channel::ALL[i];
                if !record.channel_selectable(channel) {
                    self.status_message = Some("Pick at most 3 channels".to_string());
                    return;
                }
                record.toggle_channel(channel)
            }
            _ => return,
        };
        if let Err(e) = self.wizard.update_field(patch) {
            self.status_message = Some(e.to_string());
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(Focus::Text(field)) = self.focus() else {
            return;
        };
        let mut value = field.value(self.wizard.record()).to_string();
        edit(&mut value);
        if let Err(e) = self.wizard.update_field(field.patch(value)) {
            self.status_message = Some(e.to_string());
        }
    }

    // -- Submission --

    fn start_submit(&mut self) {
        match self.wizard.begin_submit() {
            Ok(request) => {
                let synth = Arc::clone(&self.synth);
                let timeout = self.config.timeout;
                self.pending = Some(tokio::spawn(async move {
                    run_synthesis(synth.as_ref(), &request, timeout).await
                }));
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Hand a finished synthesis result to the wizard. Does not block.
    pub async fn poll_submission(&mut self) -> Result<()> {
        if self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            self.await_submission().await?;
        }
        Ok(())
    }

    /// Wait for the running synthesis, if any, and hand its result over.
    pub async fn await_submission(&mut self) -> Result<()> {
        let Some(handle) = self.pending.take() else {
            return Ok(());
        };
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SynthesisError::Backend(format!("synthesis task failed: {e}"))),
        };
        self.wizard.finish_submit(result)?;
        Ok(())
    }

    /// Stop a running synthesis. Used when quitting mid-submit.
    pub fn abort_submission(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    // -- Results actions --

    fn cycle_plan(&mut self, delta: isize) {
        let count = self.wizard.plans().len();
        if count == 0 {
            return;
        }
        let next = (self.wizard.active_plan() as isize + delta).rem_euclid(count as isize);
        if let Err(e) = self.wizard.select_plan(next as usize) {
            self.status_message = Some(e.to_string());
        }
    }

    fn export_selected(&mut self) {
        let Some(artifact) = self.wizard.export_active_plan() else {
            self.status_message = Some("Nothing to export yet".to_string());
            return;
        };
        self.status_message = Some(match artifact.write_to(&self.config.export_dir) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
