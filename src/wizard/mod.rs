//! The Create Image wizard core: form model, conditional fields, step
//! registry, navigation state machine, review projection, and the session
//! that ties them to a host.

pub mod conditional;
pub mod form_model;
pub mod navigation;
pub mod review;
pub mod session;
pub mod state_machine;
pub mod steps;

pub use conditional::{FieldState, RegistrationChoice};
pub use form_model::{
    ActivationSubMode, CredentialField, DestinationKind, FieldChange, FormModel,
    RegistrationMode,
};
pub use navigation::{Action, NavigationSurface, StepView};
pub use review::{ImageRequest, ReviewAggregator, ReviewSummary};
pub use session::{
    EventOutcome, ImageSubmitter, SessionPhase, SubmissionReceipt, WizardEvent, WizardHost,
    WizardSession,
};
pub use state_machine::{IgnoredReason, NavOutcome, WizardStateMachine};
pub use steps::{StepDefinition, StepId, StepRegistry};
