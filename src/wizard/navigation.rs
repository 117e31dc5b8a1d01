//! Host-facing view of the current step: heading, sidebar, body fields and
//! the action row. Views are rebuilt from the state machine and form model on
//! every render.

use super::conditional::{registration_fields, target_fields, FieldState, RegistrationChoice};
use super::form_model::{DestinationKind, FormModel};
use super::review::{ReviewAggregator, REVIEW_INTRO};
use super::state_machine::WizardStateMachine;
use super::steps::StepId;
use crate::config::WizardConfig;

pub const WIZARD_TITLE: &str = "Create a new image";
pub const REGISTRATION_PROMPT: &str = "Register the system";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Back,
    Cancel,
    Create,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "Next",
            Action::Back => "Back",
            Action::Cancel => "Cancel",
            Action::Create => "Create",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: Action,
    pub disabled: bool,
}

impl ActionButton {
    pub fn label(&self) -> &'static str {
        self.action.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub step: StepId,
    pub label: &'static str,
    pub current: bool,
    pub visited: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Select { options: Vec<(String, String)> },
    Text { secret: bool },
    Radio { checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub test_id: &'static str,
    pub control: Control,
    pub state: FieldState,
}

impl FieldView {
    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn is_required(&self) -> bool {
        self.state.required
    }

    pub fn value(&self) -> &str {
        &self.state.value
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.control, Control::Radio { checked: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    Text(String),
    Field(FieldView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub title: &'static str,
    pub step: StepId,
    pub heading: &'static str,
    pub sidebar: Vec<SidebarEntry>,
    pub body: Vec<BodyItem>,
    pub actions: Vec<ActionButton>,
}

impl StepView {
    pub fn fields(&self) -> impl Iterator<Item = &FieldView> {
        self.body.iter().filter_map(|item| match item {
            BodyItem::Field(field) => Some(field),
            BodyItem::Text(_) => None,
        })
    }

    pub fn field_by_label(&self, label: &str) -> Option<&FieldView> {
        self.fields().find(|field| field.label == label)
    }

    pub fn field_by_test_id(&self, test_id: &str) -> Option<&FieldView> {
        self.fields().find(|field| field.test_id == test_id)
    }

    pub fn button(&self, action: Action) -> Option<&ActionButton> {
        self.actions.iter().find(|button| button.action == action)
    }

    /// Whether `text` appears anywhere in the rendered output.
    pub fn contains_text(&self, text: &str) -> bool {
        self.title == text
            || self.heading == text
            || self.sidebar.iter().any(|entry| entry.label == text)
            || self.body.iter().any(|item| match item {
                BodyItem::Text(line) => line == text,
                BodyItem::Field(field) => field.label == text,
            })
            || self.actions.iter().any(|button| button.label() == text)
    }

    pub fn sidebar_lines(&self, plain: bool) -> Vec<String> {
        let pointer = if plain { ">" } else { "▸" };
        self.sidebar
            .iter()
            .map(|entry| {
                let marker = if entry.current { pointer } else { " " };
                format!("{marker} {}", entry.label)
            })
            .collect()
    }

    pub fn body_lines(&self, plain: bool) -> Vec<String> {
        self.body
            .iter()
            .map(|item| match item {
                BodyItem::Text(line) => line.clone(),
                BodyItem::Field(field) => field_line(field, plain),
            })
            .collect()
    }

    pub fn action_line(&self) -> String {
        self.actions
            .iter()
            .map(|button| {
                if button.disabled {
                    format!("[ {} (disabled) ]", button.label())
                } else {
                    format!("[ {} ]", button.label())
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Plain-text rendering of the whole step.
    pub fn render_text(&self, plain: bool) -> String {
        let mut lines = vec![self.title.to_string(), String::new()];
        lines.extend(self.sidebar_lines(plain));
        lines.push(String::new());
        lines.push(format!("-- {} --", self.heading));
        lines.extend(self.body_lines(plain));
        lines.push(String::new());
        lines.push(self.action_line());
        lines.join("\n")
    }
}

fn field_line(field: &FieldView, plain: bool) -> String {
    if let Control::Radio { checked } = field.control {
        let mark = match (checked, plain) {
            (true, true) => "(x)",
            (true, false) => "(●)",
            (false, _) => "( )",
        };
        return format!("{mark} {}", field.label);
    }
    let required = if field.is_required() { " *" } else { "" };
    let value = match &field.control {
        Control::Select { options } => options
            .iter()
            .find(|(key, _)| key == field.value())
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| field.value().to_string()),
        Control::Text { secret: true } if !field.value().is_empty() => "********".into(),
        _ => field.value().to_string(),
    };
    let value = if value.is_empty() { "-".to_string() } else { value };
    let mut line = format!("{}{}: {}", field.label, required, value);
    if !field.is_enabled() {
        line.push_str(" (disabled)");
    } else if field.state.is_missing() {
        line.push_str(" [required]");
    }
    line
}

/// Builds step views for the host.
pub struct NavigationSurface<'a> {
    config: &'a WizardConfig,
}

impl<'a> NavigationSurface<'a> {
    pub fn new(config: &'a WizardConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, machine: &WizardStateMachine, model: &FormModel) -> StepView {
        let definition = machine.current_definition();
        let step = definition.id;
        let sidebar = machine
            .registry()
            .iter()
            .map(|entry| SidebarEntry {
                step: entry.id,
                label: entry.label,
                current: entry.id == step,
                visited: entry.ordinal <= machine.furthest_visited(),
            })
            .collect();

        let body = match step {
            StepId::Release => self.release_body(model),
            StepId::TargetEnvironment => self.target_body(model),
            StepId::Registration => registration_body(model),
            StepId::Review => self.review_body(model),
        };

        let forward = if step == StepId::Review {
            Action::Create
        } else {
            Action::Next
        };
        let actions = vec![
            ActionButton {
                action: forward,
                disabled: false,
            },
            ActionButton {
                action: Action::Back,
                disabled: !definition.back_enabled,
            },
            ActionButton {
                action: Action::Cancel,
                disabled: false,
            },
        ];

        StepView {
            title: WIZARD_TITLE,
            step,
            heading: definition.heading(),
            sidebar,
            body,
            actions,
        }
    }

    fn release_body(&self, model: &FormModel) -> Vec<BodyItem> {
        let options = self
            .config
            .releases
            .iter()
            .map(|r| (r.id.clone(), r.label.clone()))
            .collect();
        vec![BodyItem::Field(FieldView {
            label: "Release".into(),
            test_id: "release-select",
            control: Control::Select { options },
            state: FieldState::editable(model.release.release.clone(), true),
        })]
    }

    fn target_body(&self, model: &FormModel) -> Vec<BodyItem> {
        let mut destinations: Vec<DestinationKind> = self.config.destinations.clone();
        if !destinations.contains(&model.target.destination) {
            destinations.push(model.target.destination);
        }
        let options = destinations
            .iter()
            .map(|kind| (kind.key().to_string(), kind.label().to_string()))
            .collect();
        let mut body = vec![BodyItem::Field(FieldView {
            label: "Destination".into(),
            test_id: "destination-select",
            control: Control::Select { options },
            state: FieldState::editable(model.target.destination.key(), true),
        })];
        body.extend(
            target_fields(&model.target)
                .into_iter()
                .filter(|(_, state)| state.visible)
                .map(|(field, state)| {
                    BodyItem::Field(FieldView {
                        label: field.label().into(),
                        test_id: field.test_id(),
                        control: Control::Text {
                            secret: field.is_secret(),
                        },
                        state,
                    })
                }),
        );
        body
    }

    fn review_body(&self, model: &FormModel) -> Vec<BodyItem> {
        let summary = ReviewAggregator::new(&self.config.releases).summarize(model);
        let mut body = vec![BodyItem::Text(REVIEW_INTRO.to_string())];
        body.extend(summary.lines().into_iter().map(BodyItem::Text));
        body
    }
}

fn registration_body(model: &FormModel) -> Vec<BodyItem> {
    let fields = registration_fields(&model.registration);
    let mut body = vec![BodyItem::Text(REGISTRATION_PROMPT.to_string())];
    for choice in RegistrationChoice::ALL {
        body.push(BodyItem::Field(FieldView {
            label: choice.label().into(),
            test_id: choice.test_id(),
            control: Control::Radio {
                checked: choice == fields.choice,
            },
            state: FieldState::editable("", false),
        }));
    }
    if fields.organization_id.visible {
        body.push(BodyItem::Field(FieldView {
            label: "Organization ID".into(),
            test_id: "subscription-organization",
            control: Control::Text { secret: false },
            state: fields.organization_id,
        }));
    }
    if fields.activation_key.visible {
        body.push(BodyItem::Field(FieldView {
            label: "Activation key".into(),
            test_id: "subscription-activation",
            control: Control::Text { secret: false },
            state: fields.activation_key,
        }));
    }
    body
}
