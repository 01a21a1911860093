//! Viewer rig collaborator interface and an in-memory implementation.

use glam::{Quat, Vec3};

/// The viewer's movable reference frame plus the tracked-head readouts the
/// coordinator needs for placement.
///
/// Angles are in radians. `exposure` is the shared scalar the transition
/// engine fades during waypoint changes; hosts map it onto whatever visual
/// parameter masks the cut.
pub trait ViewerRig {
    /// Rig position in world space.
    fn position(&self) -> Vec3;

    /// Move the rig.
    fn set_position(&mut self, position: Vec3);

    /// Rig orientation.
    fn rotation(&self) -> Quat;

    /// Rotate the rig.
    fn set_rotation(&mut self, rotation: Quat);

    /// Rig up axis (derived from the current rotation).
    fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// The user's seated-height trim, kept separate from rig position.
    fn height_adjust(&self) -> f32;

    /// Set the seated-height trim.
    fn set_height_adjust(&mut self, height: f32);

    /// Anchor position of the tracked viewer head.
    fn head_anchor_position(&self) -> Vec3;

    /// Heading (yaw, radians) of the tracked viewer head.
    fn head_heading(&self) -> f32;

    /// Whether the flat monitor view, not the tracked headset view, is the
    /// active presentation.
    fn monitor_view_active(&self) -> bool;

    /// The shared exposure-like fade scalar.
    fn exposure(&self) -> f32;

    /// Set the fade scalar.
    fn set_exposure(&mut self, exposure: f32);
}

/// In-memory [`ViewerRig`] used by tests and demos.
///
/// The head anchor is modelled as a fixed offset from the rig position so
/// it follows rig moves the way a seated user would; real hosts feed live
/// tracking data instead.
#[derive(Debug, Clone)]
pub struct MemoryRig {
    position: Vec3,
    rotation: Quat,
    height_adjust: f32,
    head_offset: Vec3,
    head_heading: f32,
    monitor_view_active: bool,
    exposure: f32,
}

impl MemoryRig {
    /// Create a rig at the origin with a head anchor 1.6m up.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            height_adjust: 0.0,
            head_offset: Vec3::new(0.0, 1.6, 0.0),
            head_heading: 0.0,
            monitor_view_active: false,
            exposure: 1.0,
        }
    }

    /// Set the rig position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the rig rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the head anchor offset relative to the rig.
    pub fn with_head_offset(mut self, offset: Vec3) -> Self {
        self.head_offset = offset;
        self
    }

    /// Set the head heading (yaw, radians).
    pub fn with_head_heading(mut self, heading: f32) -> Self {
        self.head_heading = heading;
        self
    }

    /// Select the monitor view instead of the tracked view.
    pub fn with_monitor_view(mut self, active: bool) -> Self {
        self.monitor_view_active = active;
        self
    }

    /// Set the initial exposure scalar.
    pub fn with_exposure(mut self, exposure: f32) -> Self {
        self.exposure = exposure;
        self
    }
}

impl Default for MemoryRig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerRig for MemoryRig {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn height_adjust(&self) -> f32 {
        self.height_adjust
    }

    fn set_height_adjust(&mut self, height: f32) {
        self.height_adjust = height;
    }

    fn head_anchor_position(&self) -> Vec3 {
        self.position + self.head_offset
    }

    fn head_heading(&self) -> f32 {
        self.head_heading
    }

    fn monitor_view_active(&self) -> bool {
        self.monitor_view_active
    }

    fn exposure(&self) -> f32 {
        self.exposure
    }

    fn set_exposure(&mut self, exposure: f32) {
        self.exposure = exposure;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_follows_rotation() {
        let rig = MemoryRig::new().with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
        assert!((rig.up() - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_head_anchor_follows_rig() {
        let mut rig = MemoryRig::new().with_head_offset(Vec3::new(0.0, 1.5, 0.2));
        rig.set_position(Vec3::new(10.0, 0.0, -3.0));
        assert_eq!(rig.head_anchor_position(), Vec3::new(10.0, 1.5, -2.8));
    }
}
