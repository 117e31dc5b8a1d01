//! Derived visibility and enablement of conditional sub-fields.
//!
//! Every record here is recomputed from the form model on demand. Nothing is
//! cached, so a mode switch can never leave a field enabled or required after
//! it stopped applying.

use super::form_model::{
    ActivationSubMode, CredentialField, FieldChange, FormModel, RegistrationMode,
    RegistrationState, TargetEnvironmentState,
};

/// Presentation state of one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub visible: bool,
    pub enabled: bool,
    pub required: bool,
    pub value: String,
}

impl FieldState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    pub fn editable(value: impl Into<String>, required: bool) -> Self {
        Self {
            visible: true,
            enabled: true,
            required,
            value: value.into(),
        }
    }

    pub fn is_editable(&self) -> bool {
        self.visible && self.enabled
    }

    /// Required, reachable, and still blank.
    pub fn is_missing(&self) -> bool {
        self.visible && self.enabled && self.required && self.value.trim().is_empty()
    }
}

/// The radio group on the Registration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationChoice {
    EmbedActivationKey,
    ManualOrganization,
    RegisterLater,
}

impl RegistrationChoice {
    pub const ALL: [RegistrationChoice; 3] = [
        Self::EmbedActivationKey,
        Self::ManualOrganization,
        Self::RegisterLater,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::EmbedActivationKey => "Embed an activation key and register systems on first boot",
            Self::ManualOrganization => "Register manually with an organization ID",
            Self::RegisterLater => "Register the system later",
        }
    }

    pub fn test_id(self) -> &'static str {
        match self {
            Self::EmbedActivationKey => "subscription-register-now",
            Self::ManualOrganization => "subscription-register-manual",
            Self::RegisterLater => "subscription-register-later",
        }
    }

    /// Mode pair selected by this radio. `RegisterLater` leaves the sub-mode alone.
    pub fn modes(self) -> (RegistrationMode, Option<ActivationSubMode>) {
        match self {
            Self::EmbedActivationKey => (
                RegistrationMode::RegisterNow,
                Some(ActivationSubMode::UseActivationKey),
            ),
            Self::ManualOrganization => {
                (RegistrationMode::RegisterNow, Some(ActivationSubMode::Manual))
            }
            Self::RegisterLater => (RegistrationMode::RegisterLater, None),
        }
    }

    pub fn from_state(state: &RegistrationState) -> Self {
        match (state.mode, state.sub_mode) {
            (RegistrationMode::RegisterLater, _) => Self::RegisterLater,
            (RegistrationMode::RegisterNow, ActivationSubMode::UseActivationKey) => {
                Self::EmbedActivationKey
            }
            (RegistrationMode::RegisterNow, ActivationSubMode::Manual) => Self::ManualOrganization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFields {
    pub choice: RegistrationChoice,
    pub organization_id: FieldState,
    pub activation_key: FieldState,
}

pub fn registration_fields(state: &RegistrationState) -> RegistrationFields {
    let choice = RegistrationChoice::from_state(state);
    let (organization_id, activation_key) = match choice {
        RegistrationChoice::RegisterLater => (FieldState::hidden(), FieldState::hidden()),
        RegistrationChoice::EmbedActivationKey => (
            FieldState::disabled(),
            FieldState::editable(state.activation_key.clone(), true),
        ),
        RegistrationChoice::ManualOrganization => (
            FieldState::editable(state.organization_id.clone(), true),
            FieldState::disabled(),
        ),
    };
    RegistrationFields {
        choice,
        organization_id,
        activation_key,
    }
}

/// Credential inputs for every destination; inactive destinations are hidden.
pub fn target_fields(state: &TargetEnvironmentState) -> Vec<(CredentialField, FieldState)> {
    CredentialField::ALL
        .into_iter()
        .map(|field| {
            let fs = if field.destination() == state.destination {
                FieldState::editable(state.credential(field), true)
            } else {
                FieldState::hidden()
            };
            (field, fs)
        })
        .collect()
}

/// Whether the input written by `change` is currently shown and enabled.
/// Selectors and radios are always editable on their own step.
pub fn accepts_change(model: &FormModel, change: &FieldChange) -> bool {
    match change {
        FieldChange::SetOrganizationId(_) => registration_fields(&model.registration)
            .organization_id
            .is_editable(),
        FieldChange::SetActivationKey(_) => registration_fields(&model.registration)
            .activation_key
            .is_editable(),
        FieldChange::SetCredential(field, _) => field.destination() == model.target.destination,
        FieldChange::SelectRelease(_)
        | FieldChange::SelectDestination(_)
        | FieldChange::SelectRegistration(_)
        | FieldChange::SetRegistrationMode(_)
        | FieldChange::SetActivationSubMode(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::form_model::DestinationKind;

    fn state(mode: RegistrationMode, sub_mode: ActivationSubMode) -> RegistrationState {
        RegistrationState {
            mode,
            sub_mode,
            organization_id: "org-42".into(),
            activation_key: "key-7".into(),
        }
    }

    #[test]
    fn register_later_hides_everything() {
        for sub_mode in [ActivationSubMode::UseActivationKey, ActivationSubMode::Manual] {
            let fields = registration_fields(&state(RegistrationMode::RegisterLater, sub_mode));
            assert_eq!(fields.choice, RegistrationChoice::RegisterLater);
            assert_eq!(fields.organization_id, FieldState::hidden());
            assert_eq!(fields.activation_key, FieldState::hidden());
        }
    }

    #[test]
    fn activation_key_mode_disables_organization() {
        let fields = registration_fields(&state(
            RegistrationMode::RegisterNow,
            ActivationSubMode::UseActivationKey,
        ));
        assert!(fields.organization_id.visible);
        assert!(!fields.organization_id.enabled);
        assert!(!fields.organization_id.required);
        assert!(fields.organization_id.value.is_empty());
        assert!(fields.activation_key.enabled);
        assert!(fields.activation_key.required);
        assert_eq!(fields.activation_key.value, "key-7");
    }

    #[test]
    fn manual_mode_restores_organization() {
        let fields = registration_fields(&state(
            RegistrationMode::RegisterNow,
            ActivationSubMode::Manual,
        ));
        assert!(fields.organization_id.enabled);
        assert!(fields.organization_id.required);
        assert_eq!(fields.organization_id.value, "org-42");
        assert!(!fields.activation_key.enabled);
        assert!(!fields.activation_key.required);
        assert!(fields.activation_key.value.is_empty());
    }

    #[test]
    fn choice_round_trips_through_modes() {
        for choice in RegistrationChoice::ALL {
            let mut registration = RegistrationState::default();
            let (mode, sub_mode) = choice.modes();
            registration.mode = mode;
            if let Some(sub_mode) = sub_mode {
                registration.sub_mode = sub_mode;
            }
            assert_eq!(RegistrationChoice::from_state(&registration), choice);
        }
    }

    #[test]
    fn only_active_destination_fields_are_visible() {
        let target = TargetEnvironmentState {
            destination: DestinationKind::Azure,
            ..TargetEnvironmentState::default()
        };
        let visible: Vec<_> = target_fields(&target)
            .into_iter()
            .filter(|(_, fs)| fs.visible)
            .map(|(field, _)| field)
            .collect();
        assert_eq!(visible, DestinationKind::Azure.credential_fields());
    }

    #[test]
    fn only_enabled_inputs_accept_values() {
        let mut model = FormModel::new();
        assert!(!accepts_change(&model, &FieldChange::SetOrganizationId("1".into())));
        assert!(!accepts_change(&model, &FieldChange::SetActivationKey("k".into())));

        model.registration.mode = RegistrationMode::RegisterNow;
        model.registration.sub_mode = ActivationSubMode::UseActivationKey;
        assert!(!accepts_change(&model, &FieldChange::SetOrganizationId("1".into())));
        assert!(accepts_change(&model, &FieldChange::SetActivationKey("k".into())));

        model.registration.sub_mode = ActivationSubMode::Manual;
        assert!(accepts_change(&model, &FieldChange::SetOrganizationId("1".into())));
        assert!(!accepts_change(&model, &FieldChange::SetActivationKey("k".into())));
    }

    #[test]
    fn only_active_destination_accepts_credentials() {
        let model = FormModel::new();
        assert!(accepts_change(
            &model,
            &FieldChange::SetCredential(CredentialField::AwsBucket, "b".into())
        ));
        assert!(!accepts_change(
            &model,
            &FieldChange::SetCredential(CredentialField::AzureTenantId, "t".into())
        ));
    }

    #[test]
    fn blank_required_field_is_missing() {
        assert!(FieldState::editable("  ", true).is_missing());
        assert!(!FieldState::editable("x", true).is_missing());
        assert!(!FieldState::disabled().is_missing());
    }
}
