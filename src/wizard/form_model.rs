//! Cumulative record of the selections made across the wizard's steps.
//!
//! The model is a single owned aggregate. Steps never keep private copies of
//! their values, so moving between steps cannot lose data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::conditional::{accepts_change, RegistrationChoice};
use super::steps::StepId;

/// Where the built image is uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    #[default]
    Aws,
    Azure,
    Gcp,
}

impl DestinationKind {
    pub const ALL: [DestinationKind; 3] = [Self::Aws, Self::Azure, Self::Gcp];

    pub fn key(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aws => "Amazon Web Services",
            Self::Azure => "Microsoft Azure",
            Self::Gcp => "Google Cloud Platform",
        }
    }

    /// Image format produced for this destination.
    pub fn image_type(self) -> &'static str {
        match self {
            Self::Aws => "ami",
            Self::Azure => "vhd",
            Self::Gcp => "gcp",
        }
    }

    /// Credential inputs this destination asks for, in display order.
    pub fn credential_fields(self) -> &'static [CredentialField] {
        match self {
            Self::Aws => &[
                CredentialField::AwsAccessKeyId,
                CredentialField::AwsSecretAccessKey,
                CredentialField::AwsBucket,
            ],
            Self::Azure => &[
                CredentialField::AzureTenantId,
                CredentialField::AzureSubscriptionId,
                CredentialField::AzureResourceGroup,
            ],
            Self::Gcp => &[CredentialField::GcpAccountEmail],
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provider-specific credential inputs of the Target environment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialField {
    AwsAccessKeyId,
    AwsSecretAccessKey,
    AwsBucket,
    AzureTenantId,
    AzureSubscriptionId,
    AzureResourceGroup,
    GcpAccountEmail,
}

impl CredentialField {
    pub const ALL: [CredentialField; 7] = [
        Self::AwsAccessKeyId,
        Self::AwsSecretAccessKey,
        Self::AwsBucket,
        Self::AzureTenantId,
        Self::AzureSubscriptionId,
        Self::AzureResourceGroup,
        Self::GcpAccountEmail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AwsAccessKeyId => "Access key ID",
            Self::AwsSecretAccessKey => "Secret access key",
            Self::AwsBucket => "Bucket",
            Self::AzureTenantId => "Tenant ID",
            Self::AzureSubscriptionId => "Subscription ID",
            Self::AzureResourceGroup => "Resource group",
            Self::GcpAccountEmail => "Google account email",
        }
    }

    pub fn test_id(self) -> &'static str {
        match self {
            Self::AwsAccessKeyId => "aws-access-key",
            Self::AwsSecretAccessKey => "aws-secret-access-key",
            Self::AwsBucket => "aws-bucket",
            Self::AzureTenantId => "azure-tenant-id",
            Self::AzureSubscriptionId => "azure-subscription-id",
            Self::AzureResourceGroup => "azure-resource-group",
            Self::GcpAccountEmail => "gcp-account-email",
        }
    }

    pub fn destination(self) -> DestinationKind {
        match self {
            Self::AwsAccessKeyId | Self::AwsSecretAccessKey | Self::AwsBucket => {
                DestinationKind::Aws
            }
            Self::AzureTenantId | Self::AzureSubscriptionId | Self::AzureResourceGroup => {
                DestinationKind::Azure
            }
            Self::GcpAccountEmail => DestinationKind::Gcp,
        }
    }

    /// Secrets are masked wherever they are echoed back.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::AwsSecretAccessKey)
    }

    pub fn from_test_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.test_id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegistrationMode {
    RegisterNow,
    #[default]
    RegisterLater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationSubMode {
    #[default]
    UseActivationKey,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseState {
    pub release: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetEnvironmentState {
    pub destination: DestinationKind,
    /// Values survive destination switches; only the active destination's
    /// fields are rendered or submitted.
    pub credentials: BTreeMap<CredentialField, String>,
}

impl TargetEnvironmentState {
    pub fn credential(&self, field: CredentialField) -> &str {
        self.credentials
            .get(&field)
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationState {
    pub mode: RegistrationMode,
    pub sub_mode: ActivationSubMode,
    pub organization_id: String,
    pub activation_key: String,
}

impl RegistrationState {
    pub fn set_mode(&mut self, mode: RegistrationMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        match mode {
            RegistrationMode::RegisterLater => {
                self.organization_id.clear();
                self.activation_key.clear();
            }
            RegistrationMode::RegisterNow => self.reset_for_sub_mode(),
        }
    }

    pub fn set_sub_mode(&mut self, sub_mode: ActivationSubMode) {
        if self.sub_mode == sub_mode {
            return;
        }
        self.sub_mode = sub_mode;
        self.reset_for_sub_mode();
    }

    fn reset_for_sub_mode(&mut self) {
        match self.sub_mode {
            ActivationSubMode::UseActivationKey => {
                self.organization_id.clear();
                self.activation_key.clear();
            }
            ActivationSubMode::Manual => self.activation_key.clear(),
        }
    }
}

/// A single user edit, scoped to the step that owns the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    SelectRelease(String),
    SelectDestination(DestinationKind),
    SetCredential(CredentialField, String),
    SelectRegistration(RegistrationChoice),
    SetRegistrationMode(RegistrationMode),
    SetActivationSubMode(ActivationSubMode),
    SetOrganizationId(String),
    SetActivationKey(String),
}

impl FieldChange {
    pub fn step(&self) -> StepId {
        match self {
            Self::SelectRelease(_) => StepId::Release,
            Self::SelectDestination(_) | Self::SetCredential(..) => StepId::TargetEnvironment,
            Self::SelectRegistration(_)
            | Self::SetRegistrationMode(_)
            | Self::SetActivationSubMode(_)
            | Self::SetOrganizationId(_)
            | Self::SetActivationKey(_) => StepId::Registration,
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::SelectRelease(_) => "release-select",
            Self::SelectDestination(_) => "destination-select",
            Self::SetCredential(field, _) => field.test_id(),
            Self::SelectRegistration(_) | Self::SetRegistrationMode(_) => "subscription-mode",
            Self::SetActivationSubMode(_) => "subscription-activation-mode",
            Self::SetOrganizationId(_) => "subscription-organization",
            Self::SetActivationKey(_) => "subscription-activation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormModel {
    pub release: ReleaseState,
    pub target: TargetEnvironmentState,
    pub registration: RegistrationState,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one edit. Writes to hidden or disabled inputs are dropped.
    pub fn apply(&mut self, change: FieldChange) {
        if !accepts_change(self, &change) {
            return;
        }
        match change {
            FieldChange::SelectRelease(id) => self.release.release = id.trim().to_string(),
            FieldChange::SelectDestination(kind) => self.target.destination = kind,
            FieldChange::SetCredential(field, value) => {
                self.target.credentials.insert(field, value);
            }
            FieldChange::SelectRegistration(choice) => {
                let (mode, sub_mode) = choice.modes();
                self.registration.set_mode(mode);
                if let Some(sub_mode) = sub_mode {
                    self.registration.set_sub_mode(sub_mode);
                }
            }
            FieldChange::SetRegistrationMode(mode) => self.registration.set_mode(mode),
            FieldChange::SetActivationSubMode(sub_mode) => {
                self.registration.set_sub_mode(sub_mode)
            }
            FieldChange::SetOrganizationId(value) => self.registration.organization_id = value,
            FieldChange::SetActivationKey(value) => self.registration.activation_key = value,
        }
    }
}
