//! Input context errors

/// Errors returned by lifecycle and registry operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("input context is not initialized")]
    NotInitialized,
    #[error("input context is already initialized")]
    AlreadyInitialized,
}
