//! Coordinator configuration.

use serde::{Deserialize, Serialize};

use crate::coordinator::Mode;

/// Configuration for the director coordinator.
///
/// The name fields encode the host's discovery conventions: the secondary
/// camera proxy is resolved by a well-known atom name, and per-step
/// passenger configuration is discovered by storable-id suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorSettings {
    /// Mode entered when the coordinator is activated.
    pub mode: Mode,
    /// Default fade-in duration for waypoints without an explicit one, in
    /// seconds.
    pub transition_duration: f32,
    /// Lead window before a waypoint boundary in which the fade-out starts
    /// (and its duration), in seconds. Zero disables fade-outs.
    pub extended_transition_duration: f32,
    /// Emit a per-frame status line at debug level.
    pub diagnostics: bool,
    /// Well-known name of the secondary camera proxy atom.
    pub secondary_camera_atom: String,
    /// Storable on the camera atom that owns the enable flag.
    pub camera_storable: String,
    /// Boolean parameter that turns the camera on.
    pub camera_on_param: String,
    /// Free controller used to drive the camera proxy.
    pub camera_controller: String,
    /// Suffix marking a per-step configuration storable.
    pub step_storable_suffix: String,
    /// Suffix marking the companion storable on a passenger target.
    pub passenger_storable_suffix: String,
    /// String parameter on the step storable naming the passenger target.
    pub passenger_param: String,
    /// Boolean parameter on the companion storable that engages the
    /// passenger.
    pub passenger_active_param: String,
}

impl Default for DirectorSettings {
    fn default() -> Self {
        Self {
            mode: Mode::NavigationRig,
            transition_duration: 0.5,
            extended_transition_duration: 1.0,
            diagnostics: false,
            secondary_camera_atom: "WindowCamera".to_string(),
            camera_storable: "CameraControl".to_string(),
            camera_on_param: "cameraOn".to_string(),
            camera_controller: "control".to_string(),
            step_storable_suffix: "DirectorStep".to_string(),
            passenger_storable_suffix: "Passenger".to_string(),
            passenger_param: "Passenger".to_string(),
            passenger_active_param: "Active".to_string(),
        }
    }
}
