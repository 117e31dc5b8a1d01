//! Terminal host for the wizard: a landing menu plus one menu per step.
//!
//! Each step menu lists the editable fields first, then one jump entry per
//! sidebar step, then the action row (`Next`/`Create`, `Back`, `Cancel`).

use std::env;

use tracing::debug;

use crate::cli::output::{self, OutputPreferences};
use crate::cli::submitter::JsonFileSubmitter;
use crate::cli::ui::prompts::{choice_menu, text_input, ChoicePromptResult, TextPromptResult};
use crate::config::{ConfigManager, WizardConfig};
use crate::errors::WizardError;
use crate::wizard::conditional::RegistrationChoice;
use crate::wizard::form_model::{CredentialField, DestinationKind, FieldChange};
use crate::wizard::navigation::{Action, Control, FieldView, StepView};
use crate::wizard::session::{
    EventOutcome, ImageSubmitter, SubmissionReceipt, WizardEvent, WizardHost, WizardSession,
};
use crate::wizard::state_machine::{IgnoredReason, NavOutcome};
use crate::wizard::steps::StepId;

const LANDING_TITLE: &str = "Image Builder";
const CREATE_KEY: &str = "create";
const EXIT_KEY: &str = "exit";

/// Host side of a mounted wizard: reports the session's exit points.
#[derive(Debug, Default)]
pub struct CliHost {
    landings: usize,
}

impl CliHost {
    pub fn landings(&self) -> usize {
        self.landings
    }
}

impl WizardHost for CliHost {
    fn show_landing(&mut self) {
        self.landings += 1;
        output::info("Image creation cancelled.");
    }

    fn request_submitted(&mut self, receipt: &SubmissionReceipt) {
        match &receipt.location {
            Some(path) => output::success(format!(
                "Image request {} saved to {}",
                receipt.id,
                path.display()
            )),
            None => output::success(format!("Image request {} submitted", receipt.id)),
        }
    }
}

/// Entry point for the interactive CLI.
pub fn run_cli() -> Result<(), WizardError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    if !manager.path().exists() {
        manager.save(&config)?;
        debug!(path = %manager.path().display(), "wrote default configuration");
    }
    let plain_mode = config.plain_mode || env::var_os("NO_COLOR").is_some();
    output::set_preferences(OutputPreferences { plain_mode });

    loop {
        let options = vec![
            (CREATE_KEY.to_string(), "Create a new image".to_string()),
            (EXIT_KEY.to_string(), "Exit".to_string()),
        ];
        match choice_menu(LANDING_TITLE, None, &options, None)? {
            ChoicePromptResult::Value(key) if key == CREATE_KEY => {
                let submitter = JsonFileSubmitter::new(manager.output_dir(&config));
                let session = WizardSession::new(config.clone(), CliHost::default(), submitter);
                run_wizard(session)?;
            }
            _ => return Ok(()),
        }
    }
}

/// Drives one session until it is cancelled or an image request is created.
pub fn run_wizard<S: ImageSubmitter>(
    mut session: WizardSession<CliHost, S>,
) -> Result<(), WizardError> {
    let plain = output::current_preferences().plain_mode;
    while session.is_active() {
        let view = session.view();
        let options = menu_options(&view);
        let context = view.render_text(plain);
        let selection = choice_menu(view.heading, Some(context.as_str()), &options, None)?;
        let key = match selection {
            ChoicePromptResult::Value(key) => key,
            ChoicePromptResult::Cancel => "action:cancel".to_string(),
        };
        debug!(step = %view.step, selection = %key, "menu selection");
        let Some(event) = event_for(&key, &view, session.config())? else {
            continue;
        };
        match session.dispatch(event) {
            Ok(outcome) => report(outcome),
            Err(err) => output::error(err),
        }
    }
    Ok(())
}

fn menu_options(view: &StepView) -> Vec<(String, String)> {
    let mut options = Vec::new();
    for field in view.fields().filter(|field| field.is_enabled()) {
        let label = match field.control {
            Control::Radio { .. } => field.label.clone(),
            _ => format!("Edit {}", field.label),
        };
        options.push((format!("field:{}", field.test_id), label));
    }
    for entry in &view.sidebar {
        options.push((
            format!("jump:{}", entry.step.key()),
            format!("Go to {}", entry.label),
        ));
    }
    for button in &view.actions {
        let label = if button.disabled {
            format!("{} (disabled)", button.label())
        } else {
            button.label().to_string()
        };
        let key = match button.action {
            Action::Next => "action:next",
            Action::Back => "action:back",
            Action::Cancel => "action:cancel",
            Action::Create => "action:create",
        };
        options.push((key.to_string(), label));
    }
    options
}

fn event_for(
    key: &str,
    view: &StepView,
    config: &WizardConfig,
) -> Result<Option<WizardEvent>, WizardError> {
    if let Some(action) = key.strip_prefix("action:") {
        return Ok(match action {
            "next" => Some(WizardEvent::Next),
            "back" => Some(WizardEvent::Back),
            "create" => Some(WizardEvent::Create),
            _ => Some(WizardEvent::Cancel),
        });
    }
    if let Some(step) = key.strip_prefix("jump:") {
        return Ok(Some(WizardEvent::JumpTo(step.parse::<StepId>()?)));
    }
    let Some(field) = key
        .strip_prefix("field:")
        .and_then(|test_id| view.field_by_test_id(test_id))
    else {
        return Ok(None);
    };
    Ok(edit_field(field, config)?.map(WizardEvent::Change))
}

fn edit_field(
    field: &FieldView,
    config: &WizardConfig,
) -> Result<Option<FieldChange>, WizardError> {
    match &field.control {
        Control::Radio { .. } => Ok(RegistrationChoice::ALL
            .into_iter()
            .find(|choice| choice.test_id() == field.test_id)
            .map(FieldChange::SelectRegistration)),
        Control::Select { options } => {
            let default = if field.value().is_empty() {
                config.default_release.as_deref()
            } else {
                Some(field.value())
            };
            let key = match choice_menu(&field.label, None, options, default)? {
                ChoicePromptResult::Value(key) => key,
                ChoicePromptResult::Cancel => return Ok(None),
            };
            Ok(match field.test_id {
                "destination-select" => {
                    DestinationKind::from_key(&key).map(FieldChange::SelectDestination)
                }
                _ => Some(FieldChange::SelectRelease(key)),
            })
        }
        Control::Text { secret } => {
            let value = match text_input(&field.label, field.value(), *secret)? {
                TextPromptResult::Value(value) => value,
                TextPromptResult::Keep | TextPromptResult::Cancel => return Ok(None),
            };
            Ok(match field.test_id {
                "subscription-organization" => Some(FieldChange::SetOrganizationId(value)),
                "subscription-activation" => Some(FieldChange::SetActivationKey(value)),
                test_id => CredentialField::from_test_id(test_id)
                    .map(|credential| FieldChange::SetCredential(credential, value)),
            })
        }
    }
}

fn report(outcome: EventOutcome) {
    match outcome {
        EventOutcome::Navigated(NavOutcome::Ignored(IgnoredReason::AtFirstStep)) => {
            output::warning("Back is disabled on the first step.")
        }
        EventOutcome::Navigated(NavOutcome::Ignored(IgnoredReason::AtLastStep)) => {
            output::warning("Already on the last step.")
        }
        EventOutcome::Navigated(NavOutcome::Ignored(IgnoredReason::UnknownStep)) => {
            output::warning("That step is not part of this wizard.")
        }
        EventOutcome::SubmissionFailed(message) => output::error(message),
        EventOutcome::Navigated(_)
        | EventOutcome::FieldUpdated
        | EventOutcome::Cancelled
        | EventOutcome::Created(_) => {}
    }
}
