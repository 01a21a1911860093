//! Director
//!
//! Scripted camera-view coordination: follows a timeline-driven sequence of
//! spatial waypoints with the viewer rig or a secondary camera proxy, hands
//! the view off to per-step passenger targets where configured, fades the
//! shared exposure scalar across waypoint changes, and restores the
//! viewer's original state exactly when deactivated.
//!
//! World and timeline access go through the collaborator traits in
//! [`director_scene`] and [`director_timeline`]; in-memory implementations
//! of both make the whole coordinator testable without a host.

pub mod coordinator;
pub mod error;
pub mod passenger;
pub mod placement;
pub mod settings;
pub mod snapshot;
pub mod status;
pub mod transition;

pub use coordinator::{Director, Mode};
pub use error::DirectorError;
pub use passenger::{FailureLatches, PassengerLink};
pub use settings::DirectorSettings;
pub use snapshot::{CameraSnapshot, RigSnapshot};
pub use status::status_line;
pub use transition::Transition;

pub use director_scene::{MemoryRig, MemoryScene, Scene, SceneError, Transform, ViewerRig};
pub use director_timeline::{ScriptedTimeline, Timeline, Waypoint};
