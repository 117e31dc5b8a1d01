//! Read-only projection of the form model for the Review step, and the
//! request payload handed to the submission collaborator on Create.

use serde::{Deserialize, Serialize};

use super::conditional::{registration_fields, RegistrationChoice};
use super::form_model::{CredentialField, DestinationKind, FormModel};
use super::steps::{StepId, StepRegistry};
use crate::config::ReleaseOption;
use crate::errors::WizardError;

const UNFILLED: &str = "[unfilled]";
const MASK: &str = "********";

pub const REVIEW_INTRO: &str =
    "Review the information and click Create image to create the image using the following criteria.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: &'static str,
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewSummary {
    pub sections: Vec<ReviewSection>,
}

impl ReviewSummary {
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in &self.sections {
            lines.push(format!("{}:", section.title));
            for (label, value) in &section.entries {
                lines.push(format!("  {}: {}", label, value));
            }
        }
        lines
    }
}

/// Renders a best-effort summary; missing values are shown as unfilled.
pub struct ReviewAggregator<'a> {
    releases: &'a [ReleaseOption],
}

impl<'a> ReviewAggregator<'a> {
    pub fn new(releases: &'a [ReleaseOption]) -> Self {
        Self { releases }
    }

    pub fn summarize(&self, model: &FormModel) -> ReviewSummary {
        ReviewSummary {
            sections: vec![
                self.release_section(model),
                self.target_section(model),
                self.registration_section(model),
            ],
        }
    }

    fn release_section(&self, model: &FormModel) -> ReviewSection {
        let id = model.release.release.as_str();
        let value = if id.is_empty() {
            UNFILLED.to_string()
        } else {
            self.releases
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.label.clone())
                .unwrap_or_else(|| id.to_string())
        };
        ReviewSection {
            title: StepId::Release.label(),
            entries: vec![("Release".into(), value)],
        }
    }

    fn target_section(&self, model: &FormModel) -> ReviewSection {
        let destination = model.target.destination;
        let mut entries = vec![("Destination".to_string(), destination.label().to_string())];
        for field in destination.credential_fields() {
            let raw = model.target.credential(*field);
            let value = if raw.trim().is_empty() {
                UNFILLED.to_string()
            } else if field.is_secret() {
                MASK.to_string()
            } else {
                raw.to_string()
            };
            entries.push((field.label().to_string(), value));
        }
        ReviewSection {
            title: StepId::TargetEnvironment.label(),
            entries,
        }
    }

    fn registration_section(&self, model: &FormModel) -> ReviewSection {
        let fields = registration_fields(&model.registration);
        let mut entries = vec![("Registration".to_string(), fields.choice.label().to_string())];
        match fields.choice {
            RegistrationChoice::RegisterLater => {}
            RegistrationChoice::EmbedActivationKey => {
                entries.push(("Activation key".into(), or_unfilled(&fields.activation_key.value)));
            }
            RegistrationChoice::ManualOrganization => {
                entries.push((
                    "Organization ID".into(),
                    or_unfilled(&fields.organization_id.value),
                ));
            }
        }
        ReviewSection {
            title: StepId::Registration.label(),
            entries,
        }
    }
}

fn or_unfilled(value: &str) -> String {
    if value.trim().is_empty() {
        UNFILLED.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub distribution: String,
    pub image_requests: Vec<ImageRequestItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Customizations>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequestItem {
    pub architecture: String,
    pub image_type: String,
    pub upload_request: UploadRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "type")]
    pub kind: DestinationKind,
    pub options: UploadOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadOptions {
    Aws {
        access_key_id: String,
        secret_access_key: String,
        bucket: String,
    },
    Azure {
        tenant_id: String,
        subscription_id: String,
        resource_group: String,
    },
    Gcp {
        share_with_accounts: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customizations {
    pub subscription: Subscription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(rename = "activation-key", default, skip_serializing_if = "Option::is_none")]
    pub activation_key: Option<String>,
    #[serde(rename = "server-url")]
    pub server_url: String,
    #[serde(rename = "base-url")]
    pub base_url: String,
    pub insights: bool,
}

const ARCHITECTURE: &str = "x86_64";
const SUBSCRIPTION_SERVER_URL: &str = "subscription.rhsm.redhat.com";
const SUBSCRIPTION_BASE_URL: &str = "https://cdn.redhat.com/";

impl ImageRequest {
    /// Builds the payload, or reports every problem the Review step would flag.
    pub fn from_model(model: &FormModel) -> Result<Self, WizardError> {
        let review = StepRegistry::standard()
            .find(StepId::Review)
            .map(|step| step.validate(model))
            .unwrap_or_default();
        if !review.is_valid() {
            return Err(WizardError::IncompleteRequest(
                review.errors().iter().map(|e| e.message.clone()).collect(),
            ));
        }

        let target = &model.target;
        let value = |field: CredentialField| target.credential(field).trim().to_string();
        let options = match target.destination {
            DestinationKind::Aws => UploadOptions::Aws {
                access_key_id: value(CredentialField::AwsAccessKeyId),
                secret_access_key: value(CredentialField::AwsSecretAccessKey),
                bucket: value(CredentialField::AwsBucket),
            },
            DestinationKind::Azure => UploadOptions::Azure {
                tenant_id: value(CredentialField::AzureTenantId),
                subscription_id: value(CredentialField::AzureSubscriptionId),
                resource_group: value(CredentialField::AzureResourceGroup),
            },
            DestinationKind::Gcp => UploadOptions::Gcp {
                share_with_accounts: vec![format!(
                    "user:{}",
                    value(CredentialField::GcpAccountEmail)
                )],
            },
        };

        let fields = registration_fields(&model.registration);
        let subscription = match fields.choice {
            RegistrationChoice::RegisterLater => None,
            RegistrationChoice::EmbedActivationKey => Some(Subscription {
                organization: None,
                activation_key: Some(fields.activation_key.value.trim().to_string()),
                server_url: SUBSCRIPTION_SERVER_URL.into(),
                base_url: SUBSCRIPTION_BASE_URL.into(),
                insights: true,
            }),
            RegistrationChoice::ManualOrganization => Some(Subscription {
                organization: Some(fields.organization_id.value.trim().to_string()),
                activation_key: None,
                server_url: SUBSCRIPTION_SERVER_URL.into(),
                base_url: SUBSCRIPTION_BASE_URL.into(),
                insights: true,
            }),
        };

        Ok(Self {
            distribution: model.release.release.clone(),
            image_requests: vec![ImageRequestItem {
                architecture: ARCHITECTURE.into(),
                image_type: target.destination.image_type().into(),
                upload_request: UploadRequest {
                    kind: target.destination,
                    options,
                },
            }],
            customizations: subscription.map(|subscription| Customizations { subscription }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardConfig;
    use crate::wizard::form_model::FieldChange;

    fn complete_model() -> FormModel {
        let mut model = FormModel::new();
        model.apply(FieldChange::SelectRelease("rhel-8".into()));
        model.apply(FieldChange::SetCredential(
            CredentialField::AwsAccessKeyId,
            "AKIA".into(),
        ));
        model.apply(FieldChange::SetCredential(
            CredentialField::AwsSecretAccessKey,
            "s3cr3t".into(),
        ));
        model.apply(FieldChange::SetCredential(
            CredentialField::AwsBucket,
            "images".into(),
        ));
        model
    }

    #[test]
    fn summary_is_best_effort_for_empty_model() {
        let config = WizardConfig::default();
        let summary = ReviewAggregator::new(&config.releases).summarize(&FormModel::new());
        assert_eq!(summary.value_of("Release"), Some(UNFILLED));
        assert_eq!(summary.value_of("Destination"), Some("Amazon Web Services"));
        assert_eq!(summary.value_of("Secret access key"), Some(UNFILLED));
        assert_eq!(
            summary.value_of("Registration"),
            Some("Register the system later")
        );
    }

    #[test]
    fn summary_uses_release_labels_and_masks_secrets() {
        let config = WizardConfig::default();
        let model = complete_model();
        let summary = ReviewAggregator::new(&config.releases).summarize(&model);
        assert_eq!(
            summary.value_of("Release"),
            Some("Red Hat Enterprise Linux (RHEL) 8")
        );
        assert_eq!(summary.value_of("Secret access key"), Some(MASK));
        assert_eq!(summary.value_of("Bucket"), Some("images"));
    }

    #[test]
    fn summarize_does_not_mutate_model() {
        let model = complete_model();
        let before = model.clone();
        let _ = ReviewAggregator::new(&[]).summarize(&model);
        assert_eq!(model, before);
    }

    #[test]
    fn incomplete_model_is_rejected_with_reasons() {
        match ImageRequest::from_model(&FormModel::new()) {
            Err(WizardError::IncompleteRequest(problems)) => {
                assert!(problems.contains(&"Select a release".to_string()));
                assert!(problems.contains(&"Secret access key is required".to_string()));
            }
            other => panic!("expected incomplete request, got {:?}", other),
        }
    }

    #[test]
    fn request_carries_activation_key_subscription() {
        let mut model = complete_model();
        model.apply(FieldChange::SelectRegistration(
            RegistrationChoice::EmbedActivationKey,
        ));
        model.apply(FieldChange::SetActivationKey("my-key".into()));
        let request = ImageRequest::from_model(&model).expect("complete request");
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["distribution"], "rhel-8");
        assert_eq!(json["image_requests"][0]["image_type"], "ami");
        assert_eq!(json["image_requests"][0]["upload_request"]["type"], "aws");
        assert_eq!(
            json["image_requests"][0]["upload_request"]["options"]["bucket"],
            "images"
        );
        let subscription = &json["customizations"]["subscription"];
        assert_eq!(subscription["activation-key"], "my-key");
        assert!(subscription.get("organization").is_none());
        assert_eq!(subscription["insights"], true);
    }

    #[test]
    fn register_later_omits_customizations() {
        let request = ImageRequest::from_model(&complete_model()).expect("complete request");
        assert!(request.customizations.is_none());
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("customizations").is_none());
    }
}
