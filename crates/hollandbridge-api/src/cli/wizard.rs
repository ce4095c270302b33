//! Interactive five-step questionnaire (`hbridge run`).
//!
//! Each pass of the loop renders the current step's widgets, then offers a
//! navigation menu. Answers live in a local `WizardSession`, so the CLI
//! follows the same submission rules as the REST API.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};

use hollandbridge_core::wizard::session::WizardSession;
use hollandbridge_core::wizard::state::WizardState;
use hollandbridge_infra::filesystem::write_file;
use hollandbridge_types::answers::{AdmiredSlot, AnswerRecord, AnswerUpdate, UpdateOutcome};
use hollandbridge_types::holland::{HollandCode, MAX_HOLLAND_CODES};
use hollandbridge_types::traits::TraitCategory;
use hollandbridge_types::values::{CoreValue, MAX_CORE_VALUES};
use hollandbridge_types::wizard::WizardStep;

use super::prompt::load_answers;
use crate::state::AppState;

const LEAVE_UNSET: &str = "(leave unset)";

/// Options for `hbridge run`.
pub struct RunOptions {
    pub output: PathBuf,
    pub answers: Option<PathBuf>,
    pub save_answers: Option<PathBuf>,
    pub json: bool,
}

/// One entry in the navigation menu shown after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChoice {
    Next,
    Back,
    Submit,
    Quit,
}

impl NavChoice {
    fn label(&self) -> &'static str {
        match self {
            NavChoice::Next => "Next →",
            NavChoice::Back => "← Back",
            NavChoice::Submit => "Submit",
            NavChoice::Quit => "Quit",
        }
    }
}

/// Menu entries valid on `step`, in display order.
pub fn nav_choices(step: WizardStep) -> Vec<NavChoice> {
    let mut choices = Vec::with_capacity(3);
    if step.is_last() {
        choices.push(NavChoice::Submit);
    } else {
        choices.push(NavChoice::Next);
    }
    if !step.is_first() {
        choices.push(NavChoice::Back);
    }
    choices.push(NavChoice::Quit);
    choices
}

/// Combine a multi-select result with the previous selection.
///
/// Items kept from before stay in their original order; new picks follow
/// in display order.
pub fn merge_selection<T: Copy + PartialEq>(previous: &[T], chosen: &[T]) -> Vec<T> {
    previous
        .iter()
        .filter(|item| chosen.contains(item))
        .chain(chosen.iter().filter(|item| !previous.contains(item)))
        .copied()
        .collect()
}

/// Run the wizard until the user submits successfully or quits.
pub async fn run(state: &AppState, options: RunOptions) -> Result<()> {
    let wizard = match &options.answers {
        Some(path) => WizardState::with_answers(load_answers(path).await?),
        None => WizardState::new(),
    };
    let mut session = WizardSession::new(wizard);

    println!();
    println!(
        "  {} {}",
        style("🌉").bold(),
        style("The Holland Bridge").cyan().bold()
    );

    loop {
        let step = session.step();
        println!();
        println!("  {}", style(format!("── {step} ──")).dim());
        println!();

        render_step(&mut session)?;

        let choices = nav_choices(step);
        let labels: Vec<&str> = choices.iter().map(NavChoice::label).collect();
        let picked = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match choices[picked] {
            NavChoice::Next => {
                session.advance()?;
            }
            NavChoice::Back => {
                session.retreat()?;
            }
            NavChoice::Quit => {
                println!("  {}", style("No report generated.").dim());
                return Ok(());
            }
            NavChoice::Submit => {
                if submit(state, &mut session, &options).await? {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns `true` once a report has been written.
async fn submit(
    state: &AppState,
    session: &mut WizardSession,
    options: &RunOptions,
) -> Result<bool> {
    let snapshot = session.begin_submission()?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("Generating AI insights...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = state.generate(&snapshot).await;
    spinner.finish_and_clear();
    session.finish_submission(&result);

    if let Ok(report) = &result {
        write_file(&options.output, &report.markup)
            .await
            .with_context(|| format!("failed to write report to {}", options.output.display()))?;
    }

    if let Some(path) = &options.save_answers {
        match save_answers(path, session.answers()).await {
            Ok(()) => tracing::info!(path = %path.display(), "answers saved"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to save answers");
                eprintln!(
                    "  {} Could not save answers to {}",
                    style("!").yellow().bold(),
                    path.display()
                );
            }
        }
    }

    match result {
        Ok(report) => {
            if options.json {
                let out = serde_json::json!({
                    "report": options.output.display().to_string(),
                    "model": report.model,
                    "generated_at": report.generated_at.to_rfc3339(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!();
                println!(
                    "  {} Your personalized career insights are ready: {}",
                    style("✨").bold(),
                    style(options.output.display()).cyan()
                );
                println!();
            }
            Ok(true)
        }
        Err(e) => {
            tracing::warn!(error = %e, "submission failed");
            println!();
            println!(
                "  {} Error generating insights. Please try again.",
                style("✗").red().bold()
            );
            Ok(false)
        }
    }
}

async fn save_answers(path: &Path, answers: &AnswerRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(answers)?;
    write_file(path, &json)
        .await
        .with_context(|| format!("failed to save answers to {}", path.display()))
}

fn render_step(session: &mut WizardSession) -> Result<()> {
    match session.step().number() {
        1 => pick_holland_codes(session),
        2 => pick_core_values(session),
        3 => edit_admired_lives(session),
        4 => pick_traits(session),
        _ => edit_contact(session),
    }
}

fn pick_holland_codes(session: &mut WizardSession) -> Result<()> {
    let previous = session.answers().holland_codes().to_vec();
    let labels: Vec<&str> = HollandCode::ALL.iter().map(|c| c.label()).collect();
    let checked: Vec<bool> = HollandCode::ALL.iter().map(|c| previous.contains(c)).collect();

    loop {
        let picked = MultiSelect::new()
            .with_prompt(format!("Choose up to {MAX_HOLLAND_CODES} (space to toggle)"))
            .items(&labels)
            .defaults(&checked)
            .interact()?;
        let chosen: Vec<HollandCode> = picked.iter().map(|&i| HollandCode::ALL[i]).collect();

        let merged = merge_selection(&previous, &chosen);
        match session.apply(AnswerUpdate::SetHollandCodes(merged))? {
            UpdateOutcome::CapReached => cap_notice(MAX_HOLLAND_CODES, "Holland codes"),
            _ => return Ok(()),
        }
    }
}

fn pick_core_values(session: &mut WizardSession) -> Result<()> {
    let previous = session.answers().core_values().to_vec();
    let labels: Vec<&str> = CoreValue::ALL.iter().map(|v| v.label()).collect();
    let checked: Vec<bool> = CoreValue::ALL.iter().map(|v| previous.contains(v)).collect();

    loop {
        let picked = MultiSelect::new()
            .with_prompt(format!("Choose up to {MAX_CORE_VALUES} (space to toggle)"))
            .items(&labels)
            .defaults(&checked)
            .interact()?;
        let chosen: Vec<CoreValue> = picked.iter().map(|&i| CoreValue::ALL[i]).collect();

        let merged = merge_selection(&previous, &chosen);
        match session.apply(AnswerUpdate::SetCoreValues(merged))? {
            UpdateOutcome::CapReached => cap_notice(MAX_CORE_VALUES, "values"),
            _ => return Ok(()),
        }
    }
}

fn cap_notice(cap: usize, what: &str) {
    println!(
        "  {} You can select up to {cap} {what}.",
        style("!").yellow().bold()
    );
}

fn edit_admired_lives(session: &mut WizardSession) -> Result<()> {
    for slot in AdmiredSlot::ALL {
        println!("  {}", style(format!("Person {slot}")).bold());
        let life = session.answers().admired_life(slot).clone();

        let name = text_input(&format!("Name of Person {slot}"), life.name.as_deref())?;
        session.apply(AnswerUpdate::AdmiredName { slot, text: name })?;

        let admire = text_input("What do you admire?", life.admire.as_deref())?;
        session.apply(AnswerUpdate::AdmiredAdmire { slot, text: admire })?;

        let reject = text_input("What do you reject?", life.reject.as_deref())?;
        session.apply(AnswerUpdate::AdmiredReject { slot, text: reject })?;
    }
    Ok(())
}

fn pick_traits(session: &mut WizardSession) -> Result<()> {
    for category in TraitCategory::ALL {
        let options = category.options();
        let mut labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
        labels.push(LEAVE_UNSET);

        let current = session.answers().traits().get(category);
        let default = current
            .and_then(|selected| options.iter().position(|o| *o == selected))
            .unwrap_or(options.len());

        let picked = Select::new()
            .with_prompt(category.heading())
            .items(&labels)
            .default(default)
            .interact()?;

        let update = match options.get(picked) {
            Some(option) => AnswerUpdate::SelectTrait(*option),
            None => AnswerUpdate::ClearTrait(category),
        };
        session.apply(update)?;
    }
    Ok(())
}

fn edit_contact(session: &mut WizardSession) -> Result<()> {
    let contact = session.answers().contact().clone();

    let name = text_input("First Name", contact.name.as_deref())?;
    session.apply(AnswerUpdate::ContactName(name))?;

    let email = text_input("Email", contact.email.as_deref())?;
    session.apply(AnswerUpdate::ContactEmail(email))?;

    let avoid = text_input(
        "Industries you'd like to avoid (optional)",
        contact.industries_to_avoid.as_deref(),
    )?;
    session.apply(AnswerUpdate::IndustriesToAvoid(avoid))?;
    Ok(())
}

fn text_input(prompt: &str, current: Option<&str>) -> Result<String> {
    let text = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}
