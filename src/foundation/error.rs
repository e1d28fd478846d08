/// Crate-wide result alias.
pub type TessellaResult<T> = Result<T, TessellaError>;

/// Crate-wide error type.
///
/// Engine-internal placement failures never surface here: a blocked search degrades to the
/// fallback rectangle and a missing aspect ratio degrades to an unconstrained box. Errors are
/// reserved for invalid configuration, measurement failures reported by the host, and the
/// host's element-mutation seam.
#[derive(thiserror::Error, Debug)]
pub enum TessellaError {
    /// Invalid configuration or model input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Aspect-ratio measurement failure (decode or network error reported by the host).
    #[error("measure error: {0}")]
    Measure(String),

    /// Failure propagated from the host's element-mutation API.
    #[error("host error: {0}")]
    Host(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TessellaError {
    /// Build a [`TessellaError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TessellaError::Measure`].
    pub fn measure(msg: impl Into<String>) -> Self {
        Self::Measure(msg.into())
    }

    /// Build a [`TessellaError::Host`].
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}
