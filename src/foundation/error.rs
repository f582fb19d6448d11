/// Convenience result type used across Cutline.
pub type CutlineResult<T> = Result<T, CutlineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Pending data (metadata not probed yet, transcription in flight) is never
/// an error; it is carried as explicit state on the clip.
#[derive(thiserror::Error, Debug)]
pub enum CutlineError {
    /// Invalid user-provided project or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating the timeline for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failure reported by the external transcription service.
    #[error("transcription error: {0}")]
    Transcription(String),

    /// Failure reported by the render backend during export.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CutlineError {
    /// Build a [`CutlineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CutlineError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`CutlineError::Transcription`] value.
    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    /// Build a [`CutlineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CutlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CutlineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
