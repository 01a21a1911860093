//! Error types for scene mutations.

use thiserror::Error;

/// Errors that can occur when writing to the scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("atom not found: {0}")]
    AtomNotFound(String),

    #[error("storable not found: {atom}/{storable}")]
    StorableNotFound { atom: String, storable: String },

    #[error("controller not found: {atom}/{controller}")]
    ControllerNotFound { atom: String, controller: String },
}
