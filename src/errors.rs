use thiserror::Error;

/// Error type covering wizard misuse, persistence, and submission failures.
///
/// Field validation is not represented here; invalid input is carried as
/// presentation state on the rendered step instead.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown step `{name}`{}", suggestion_suffix(.suggestion))]
    UnknownStep {
        name: String,
        suggestion: Option<String>,
    },
    #[error("Field `{field}` does not belong to the current step ({current})")]
    FieldOutOfScope { field: String, current: String },
    #[error("Field `{field}` is not editable in the current state")]
    FieldDisabled { field: String },
    #[error("Create is only available on the Review step")]
    NotAtReview,
    #[error("The wizard session has already ended")]
    SessionClosed,
    #[error("Image request is incomplete: {}", .0.join("; "))]
    IncompleteRequest(Vec<String>),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean `{}`?)", s))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_step_mentions_suggestion() {
        let err = WizardError::UnknownStep {
            name: "reveiw".into(),
            suggestion: Some("review".into()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown step `reveiw` (did you mean `review`?)"
        );
    }

    #[test]
    fn incomplete_request_lists_problems() {
        let err = WizardError::IncompleteRequest(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Image request is incomplete: a; b");
    }
}
