//! Direct transform placement of the viewer rig onto a waypoint.

use director_scene::ViewerRig;
use director_timeline::Waypoint;
use glam::{EulerRot, Quat};

/// Yaw (radians) of a rotation, Y-axis first.
pub fn yaw_of(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::YXZ).0
}

/// Snap the rig onto a waypoint while preserving the user's gaze direction
/// and seated-height trim.
///
/// Rotation: the waypoint orientation, yaw-corrected by the difference
/// between the rig heading and the tracked head heading so the user keeps
/// looking the same way relative to the new frame. The correction is
/// skipped when the monitor view is active because there is no tracked
/// head to preserve.
///
/// Position: the rig is offset so the head anchor lands on the waypoint,
/// except that the vertical component (along the rig's new up axis) is
/// folded into the height-adjust parameter instead of the rig position.
/// This keeps manual height calibration intact across teleports.
pub fn place_rig(rig: &mut dyn ViewerRig, waypoint: &Waypoint) {
    let mut rotation = waypoint.rotation;
    if !rig.monitor_view_active() {
        rotation *= Quat::from_rotation_y(yaw_of(rig.rotation()) - rig.head_heading());
    }
    rig.set_rotation(rotation);

    let up = rig.up();
    let offset = rig.position() + waypoint.position - rig.head_anchor_position();
    let height_delta = (offset - rig.position()).dot(up);
    rig.set_position(offset - up * height_delta);
    rig.set_height_adjust(rig.height_adjust() + height_delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use director_scene::MemoryRig;
    use glam::Vec3;

    fn waypoint_at(position: Vec3, rotation: Quat) -> Waypoint {
        Waypoint::new("Step", position, rotation, 0.0)
    }

    #[test]
    fn test_vertical_delta_folds_into_height_adjust() {
        let mut rig = MemoryRig::new().with_head_offset(Vec3::new(0.0, 1.6, 0.0));
        let waypoint = waypoint_at(Vec3::new(4.0, 2.0, -1.0), Quat::IDENTITY);

        place_rig(&mut rig, &waypoint);

        // offset = waypoint - head_offset; the Y component moves into the
        // height trim, the rest into the rig position.
        assert!((rig.position() - Vec3::new(4.0, 0.0, -1.0)).length() < 1e-5);
        assert!((rig.height_adjust() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_monitor_view_takes_rotation_verbatim() {
        let mut rig = MemoryRig::new()
            .with_monitor_view(true)
            .with_head_heading(1.0)
            .with_rotation(Quat::from_rotation_y(0.25));
        let target = Quat::from_rotation_y(2.0);
        let waypoint = waypoint_at(Vec3::ZERO, target);

        place_rig(&mut rig, &waypoint);
        assert!(rig.rotation().angle_between(target) < 1e-5);
    }

    #[test]
    fn test_tracked_view_preserves_gaze_offset() {
        // Head looks 0.5 rad left of the rig; after the teleport the head
        // should still be 0.5 rad left of the waypoint heading.
        let rig_yaw = 0.9_f32;
        let head_yaw = 1.4_f32;
        let mut rig = MemoryRig::new()
            .with_rotation(Quat::from_rotation_y(rig_yaw))
            .with_head_heading(head_yaw);
        let target_yaw = -0.3_f32;
        let waypoint = waypoint_at(Vec3::ZERO, Quat::from_rotation_y(target_yaw));

        place_rig(&mut rig, &waypoint);

        let expected = Quat::from_rotation_y(target_yaw + (rig_yaw - head_yaw));
        assert!(rig.rotation().angle_between(expected) < 1e-4);
    }
}
