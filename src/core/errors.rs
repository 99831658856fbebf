use thiserror::Error;

use super::models::SearchFieldId;

#[derive(Error, Debug)]
pub enum LexineError {
    #[error("Unrecognized search field: {0:?}")]
    UnrecognizedField(SearchFieldId),

    #[error("Failed to create entry: {0}")]
    CreationFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LexineError: {0}")]
    Custom(String),
}
