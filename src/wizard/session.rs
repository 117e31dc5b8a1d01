//! One mounted wizard: the owned form model, the state machine, and the two
//! external collaborators (host landing surface and image submitter).
//!
//! Events run to completion one at a time. Cancel and a successful Create end
//! the session and discard the form model; every later event is rejected with
//! [`WizardError::SessionClosed`].

use std::path::PathBuf;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::conditional::accepts_change;
use super::form_model::{FieldChange, FormModel};
use super::navigation::{NavigationSurface, StepView};
use super::review::ImageRequest;
use super::state_machine::{NavOutcome, WizardStateMachine};
use super::steps::StepId;
use crate::config::WizardConfig;
use crate::errors::WizardError;

/// The host application the wizard is mounted in.
pub trait WizardHost {
    /// Present the host's landing view. Called once, on Cancel.
    fn show_landing(&mut self);

    /// Notified after the submitter accepted a request.
    fn request_submitted(&mut self, _receipt: &SubmissionReceipt) {}
}

/// Receives the aggregated request (or the reason it could not be built).
pub trait ImageSubmitter {
    fn submit(
        &mut self,
        request: Result<ImageRequest, WizardError>,
    ) -> Result<SubmissionReceipt, WizardError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub location: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Back,
    JumpTo(StepId),
    Cancel,
    Create,
    Change(FieldChange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Navigated(NavOutcome),
    FieldUpdated,
    Cancelled,
    Created(SubmissionReceipt),
    SubmissionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Cancelled,
    Created(SubmissionReceipt),
}

pub struct WizardSession<H: WizardHost, S: ImageSubmitter> {
    config: WizardConfig,
    machine: WizardStateMachine,
    model: FormModel,
    phase: SessionPhase,
    host: H,
    submitter: S,
}

impl<H: WizardHost, S: ImageSubmitter> WizardSession<H, S> {
    /// Mounts a wizard with an empty form model on the first step.
    pub fn new(config: WizardConfig, host: H, submitter: S) -> Self {
        debug!("wizard mounted");
        Self {
            config,
            machine: WizardStateMachine::new(),
            model: FormModel::new(),
            phase: SessionPhase::Active,
            host,
            submitter,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn machine(&self) -> &WizardStateMachine {
        &self.machine
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn current_step(&self) -> StepId {
        self.machine.current_step()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn view(&self) -> StepView {
        NavigationSurface::new(&self.config).render(&self.machine, &self.model)
    }

    pub fn dispatch(&mut self, event: WizardEvent) -> Result<EventOutcome, WizardError> {
        if !self.is_active() {
            return Err(WizardError::SessionClosed);
        }
        match event {
            WizardEvent::Next => Ok(EventOutcome::Navigated(self.machine.next(&self.model))),
            WizardEvent::Back => Ok(EventOutcome::Navigated(self.machine.back())),
            WizardEvent::JumpTo(step) => Ok(EventOutcome::Navigated(self.machine.jump_to(step))),
            WizardEvent::Change(change) => self.change(change),
            WizardEvent::Cancel => Ok(self.cancel()),
            WizardEvent::Create => self.create(),
        }
    }

    pub fn next(&mut self) -> Result<EventOutcome, WizardError> {
        self.dispatch(WizardEvent::Next)
    }

    pub fn back(&mut self) -> Result<EventOutcome, WizardError> {
        self.dispatch(WizardEvent::Back)
    }

    pub fn jump_to(&mut self, step: StepId) -> Result<EventOutcome, WizardError> {
        self.dispatch(WizardEvent::JumpTo(step))
    }

    pub fn apply(&mut self, change: FieldChange) -> Result<EventOutcome, WizardError> {
        self.dispatch(WizardEvent::Change(change))
    }

    fn change(&mut self, change: FieldChange) -> Result<EventOutcome, WizardError> {
        let current = self.machine.current_step();
        if change.step() != current {
            return Err(WizardError::FieldOutOfScope {
                field: change.field_name().to_string(),
                current: current.label().to_string(),
            });
        }
        if !accepts_change(&self.model, &change) {
            warn!(field = change.field_name(), "write to inactive field rejected");
            return Err(WizardError::FieldDisabled {
                field: change.field_name().to_string(),
            });
        }
        debug!(field = change.field_name(), step = %current, "field changed");
        self.model.apply(change);
        Ok(EventOutcome::FieldUpdated)
    }

    fn cancel(&mut self) -> EventOutcome {
        info!(step = %self.machine.current_step(), "wizard cancelled");
        self.model = FormModel::new();
        self.phase = SessionPhase::Cancelled;
        self.host.show_landing();
        EventOutcome::Cancelled
    }

    fn create(&mut self) -> Result<EventOutcome, WizardError> {
        if self.machine.current_step() != StepId::Review {
            return Err(WizardError::NotAtReview);
        }
        let request = ImageRequest::from_model(&self.model);
        match self.submitter.submit(request) {
            Ok(receipt) => {
                info!(id = %receipt.id, "image request submitted");
                self.model = FormModel::new();
                self.phase = SessionPhase::Created(receipt.clone());
                self.host.request_submitted(&receipt);
                Ok(EventOutcome::Created(receipt))
            }
            Err(err) => {
                warn!(error = %err, "image request was not accepted");
                Ok(EventOutcome::SubmissionFailed(err.to_string()))
            }
        }
    }
}
