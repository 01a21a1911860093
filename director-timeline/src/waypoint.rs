//! Waypoint data type.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// An externally authored spatial target with a timeline offset.
///
/// `atom` names the scene entity the waypoint belongs to; the coordinator
/// uses it both as the waypoint's identity and as the host for per-step
/// configuration storables. `is_current` is driven by timeline playback
/// and is the only field that changes after authoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Owning scene atom; doubles as the waypoint identity.
    pub atom: String,
    /// Target position in world space.
    pub position: Vec3,
    /// Target orientation.
    pub rotation: Quat,
    /// Position of this waypoint on the timeline, in seconds.
    pub timeline_offset: f32,
    /// Duration of the fade-in when this waypoint becomes current; zero
    /// means "use the coordinator's default".
    pub transition_in: f32,
    /// Whether timeline playback currently points at this waypoint.
    #[serde(default)]
    pub is_current: bool,
}

impl Waypoint {
    /// Create a waypoint with no explicit fade-in duration.
    pub fn new(atom: &str, position: Vec3, rotation: Quat, timeline_offset: f32) -> Self {
        Self {
            atom: atom.to_string(),
            position,
            rotation,
            timeline_offset,
            transition_in: 0.0,
            is_current: false,
        }
    }

    /// Set the fade-in duration.
    pub fn with_transition_in(mut self, seconds: f32) -> Self {
        self.transition_in = seconds;
        self
    }
}
