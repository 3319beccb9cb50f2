use thiserror::Error;

/// Errors raised while constructing a [`crate::engine::SimulationEngine`].
///
/// Stepping and steering never fail, so construction is the only fallible
/// entry point.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
