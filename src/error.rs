//! Error types for the director coordinator.

use director_scene::SceneError;
use thiserror::Error;

/// Errors that can occur while coordinating the view.
#[derive(Debug, Error)]
pub enum DirectorError {
    /// No waypoint source was attached at initialization.
    #[error("no waypoint source attached")]
    NoWaypointSource,

    /// The secondary camera atom named in the settings does not exist.
    #[error("secondary camera atom not found: {0}")]
    SecondaryCameraMissing(String),

    /// A scene write failed mid-frame.
    #[error(transparent)]
    Scene(#[from] SceneError),
}
