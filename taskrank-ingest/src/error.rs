use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of tasks")]
    NotAnArray,

    #[error("task at index {index} is not an object")]
    NotAnObject { index: usize },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Errors caused by the shape of the caller's input rather than I/O.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IngestError::Json(_) | IngestError::NotAnArray | IngestError::NotAnObject { .. }
        )
    }
}
