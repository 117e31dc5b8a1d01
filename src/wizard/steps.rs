//! Ordered step definitions. The registry is configuration, not runtime state.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use strsim::levenshtein;

use super::conditional::{registration_fields, target_fields};
use super::form_model::FormModel;
use crate::errors::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepId {
    Release,
    TargetEnvironment,
    Registration,
    Review,
}

impl StepId {
    pub const ALL: [StepId; 4] = [
        Self::Release,
        Self::TargetEnvironment,
        Self::Registration,
        Self::Review,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::TargetEnvironment => "target-environment",
            Self::Registration => "registration",
            Self::Review => "review",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::TargetEnvironment => "Target environment",
            Self::Registration => "Registration",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StepId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        if let Some(step) = Self::ALL.into_iter().find(|step| {
            step.key() == needle || step.label().eq_ignore_ascii_case(&needle)
        }) {
            return Ok(step);
        }
        let suggestion = Self::ALL
            .into_iter()
            .map(|step| (levenshtein(step.key(), &needle), step.key()))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, key)| key.to_string());
        Err(WizardError::UnknownStep {
            name: s.trim().to_string(),
            suggestion,
        })
    }
}

/// A field-level problem found by a step's validity predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field_id: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            field_id,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn has_error_for(&self, field_id: &str) -> bool {
        self.errors.iter().any(|e| e.field_id == field_id)
    }
}

pub type Validator = fn(&FormModel) -> ValidationResult;

pub struct StepDefinition {
    pub id: StepId,
    pub ordinal: usize,
    pub label: &'static str,
    pub back_enabled: bool,
    validator: Validator,
}

impl StepDefinition {
    fn new(id: StepId, ordinal: usize, validator: Validator) -> Self {
        Self {
            id,
            ordinal,
            label: id.label(),
            back_enabled: ordinal > 0,
            validator,
        }
    }

    /// Heading announced when the step becomes current.
    pub fn heading(&self) -> &'static str {
        self.label
    }

    pub fn validate(&self, model: &FormModel) -> ValidationResult {
        (self.validator)(model)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("ordinal", &self.ordinal)
            .field("back_enabled", &self.back_enabled)
            .finish()
    }
}

#[derive(Debug)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

static STANDARD: Lazy<StepRegistry> = Lazy::new(|| {
    StepRegistry::new(vec![
        (StepId::Release, validate_release as Validator),
        (
            StepId::TargetEnvironment,
            validate_target_environment as Validator,
        ),
        (StepId::Registration, validate_registration as Validator),
        (StepId::Review, validate_review as Validator),
    ])
});

impl StepRegistry {
    /// Ordinals and Back policy follow list position.
    pub fn new(entries: Vec<(StepId, Validator)>) -> Self {
        let steps = entries
            .into_iter()
            .enumerate()
            .map(|(ordinal, (id, validator))| StepDefinition::new(id, ordinal, validator))
            .collect();
        Self { steps }
    }

    pub fn standard() -> &'static StepRegistry {
        &STANDARD
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn find(&self, id: StepId) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }
}

fn validate_release(model: &FormModel) -> ValidationResult {
    let mut result = ValidationResult::valid();
    if model.release.release.trim().is_empty() {
        result.add_error(ValidationError::new("release-select", "Select a release"));
    }
    result
}

fn validate_target_environment(model: &FormModel) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for (field, state) in target_fields(&model.target) {
        if state.is_missing() {
            result.add_error(ValidationError::new(
                field.test_id(),
                format!("{} is required", field.label()),
            ));
        }
    }
    result
}

fn validate_registration(model: &FormModel) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let fields = registration_fields(&model.registration);
    if fields.organization_id.is_missing() {
        result.add_error(ValidationError::new(
            "subscription-organization",
            "Organization ID is required",
        ));
    }
    if fields.activation_key.is_missing() {
        result.add_error(ValidationError::new(
            "subscription-activation",
            "Activation key is required",
        ));
    }
    result
}

fn validate_review(model: &FormModel) -> ValidationResult {
    let mut result = validate_release(model);
    result.merge(validate_target_environment(model));
    result.merge(validate_registration(model));
    result
}
