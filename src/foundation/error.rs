/// Convenience result type used across planewarp.
pub type PlanewarpResult<T> = Result<T, PlanewarpError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degenerate matrices and samples that land outside the raster are absorbed as documented
/// behavior and never show up here.
#[derive(thiserror::Error, Debug)]
pub enum PlanewarpError {
    /// Invalid step count, matrix coefficients, canvas size, source field or audio settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors while building or presenting rasters.
    #[error("render error: {0}")]
    Render(String),

    /// Errors in the sonification layer.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanewarpError {
    /// Build a [`PlanewarpError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PlanewarpError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlanewarpError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`PlanewarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error was raised by configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
