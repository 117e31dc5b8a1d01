use image_wizard::config::WizardConfig;
use image_wizard::errors::WizardError;
use image_wizard::wizard::{
    ImageRequest, ImageSubmitter, SubmissionReceipt, WizardHost, WizardSession,
};
use uuid::Uuid;

/// Host double that counts landing transitions and submitted receipts.
#[derive(Default)]
pub struct RecordingHost {
    pub landings: usize,
    pub submitted: Vec<Uuid>,
}

impl WizardHost for RecordingHost {
    fn show_landing(&mut self) {
        self.landings += 1;
    }

    fn request_submitted(&mut self, receipt: &SubmissionReceipt) {
        self.submitted.push(receipt.id);
    }
}

/// Submitter double that keeps every request it was handed.
#[derive(Default)]
pub struct RecordingSubmitter {
    pub accepted: Vec<ImageRequest>,
    pub rejected: usize,
}

impl ImageSubmitter for RecordingSubmitter {
    fn submit(
        &mut self,
        request: Result<ImageRequest, WizardError>,
    ) -> Result<SubmissionReceipt, WizardError> {
        match request {
            Ok(request) => {
                self.accepted.push(request);
                Ok(SubmissionReceipt {
                    id: Uuid::new_v4(),
                    location: None,
                })
            }
            Err(err) => {
                self.rejected += 1;
                Err(err)
            }
        }
    }
}

pub type TestSession = WizardSession<RecordingHost, RecordingSubmitter>;

pub fn new_session() -> TestSession {
    WizardSession::new(
        WizardConfig::default(),
        RecordingHost::default(),
        RecordingSubmitter::default(),
    )
}
