use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::WizardError;
use crate::utils::persistence::{ensure_dir, save_json_atomic};
use crate::wizard::review::ImageRequest;
use crate::wizard::session::{ImageSubmitter, SubmissionReceipt};

/// On-disk record of one submitted request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub request: ImageRequest,
}

/// Writes each accepted request as a JSON file in a requests directory.
pub struct JsonFileSubmitter {
    dir: PathBuf,
}

impl JsonFileSubmitter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSubmitter for JsonFileSubmitter {
    fn submit(
        &mut self,
        request: Result<ImageRequest, WizardError>,
    ) -> Result<SubmissionReceipt, WizardError> {
        let request = request?;
        ensure_dir(&self.dir)?;
        let envelope = RequestEnvelope {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            request,
        };
        let file_name = format!(
            "{}_{}.json",
            envelope.created_at.format("%Y%m%d_%H%M%S"),
            envelope.id
        );
        let path = self.dir.join(file_name);
        save_json_atomic(&envelope, &path)?;
        debug!(path = %path.display(), "image request written");
        Ok(SubmissionReceipt {
            id: envelope.id,
            location: Some(path),
        })
    }
}
