//! Backup/restore of viewer and camera-proxy state.
//!
//! Both snapshot kinds share one contract: `capture` is a pure read taken
//! the moment a mode becomes active, and `restore` consumes the snapshot by
//! value so it can only ever run once.

use director_scene::{Scene, SceneError, Transform, ViewerRig};
use glam::{Quat, Vec3};

use crate::settings::DirectorSettings;

/// Viewer rig state captured when navigation-rig mode activates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSnapshot {
    position: Vec3,
    rotation: Quat,
    height_adjust: f32,
}

impl RigSnapshot {
    /// Read the rig's current state.
    pub fn capture(rig: &dyn ViewerRig) -> Self {
        Self {
            position: rig.position(),
            rotation: rig.rotation(),
            height_adjust: rig.height_adjust(),
        }
    }

    /// Put the rig back exactly where it was captured.
    pub fn restore(self, rig: &mut dyn ViewerRig) {
        rig.set_rotation(self.rotation);
        rig.set_position(self.position);
        rig.set_height_adjust(self.height_adjust);
    }
}

/// Secondary camera proxy state captured when it is attached.
///
/// The addressing fields are captured alongside the values so a later
/// settings change cannot misdirect the restore.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSnapshot {
    atom: String,
    storable: String,
    on_param: String,
    controller: String,
    enabled: bool,
    transform: Transform,
}

impl CameraSnapshot {
    /// Read the camera proxy's current state, or `None` when the atom does
    /// not exist.
    pub fn capture(scene: &dyn Scene, settings: &DirectorSettings) -> Option<Self> {
        let atom = settings.secondary_camera_atom.clone();
        let transform = scene.transform(&atom)?;
        let enabled = scene
            .bool_param(&atom, &settings.camera_storable, &settings.camera_on_param)
            .unwrap_or(false);
        Some(Self {
            atom,
            storable: settings.camera_storable.clone(),
            on_param: settings.camera_on_param.clone(),
            controller: settings.camera_controller.clone(),
            enabled,
            transform,
        })
    }

    /// Name of the captured camera atom.
    pub fn atom(&self) -> &str {
        &self.atom
    }

    /// Detach the proxy: put its transform back, force the camera off,
    /// release the controller grab, and un-hide the containing atom.
    ///
    /// The enable flag is forced off rather than restored because the proxy
    /// is owned exclusively by the coordinator while attached.
    pub fn restore(self, scene: &mut dyn Scene) -> Result<(), SceneError> {
        scene.set_transform(&self.atom, self.transform)?;
        scene.set_bool_param(&self.atom, &self.storable, &self.on_param, false)?;
        if scene.controller_grab(&self.atom, &self.controller).is_some() {
            scene.set_controller_transform(&self.atom, &self.controller, self.transform)?;
            scene.set_controller_grab(&self.atom, &self.controller, false, false)?;
        }
        scene.set_hidden(&self.atom, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use director_scene::{MemoryRig, MemoryScene};

    #[test]
    fn test_rig_snapshot_restores_exact_values() {
        let mut rig = MemoryRig::new()
            .with_position(Vec3::new(1.5, 0.0, -2.25))
            .with_rotation(Quat::from_rotation_y(0.7));
        rig.set_height_adjust(0.12);

        let snapshot = RigSnapshot::capture(&rig);

        rig.set_position(Vec3::new(9.0, 3.0, 9.0));
        rig.set_rotation(Quat::from_rotation_y(-2.0));
        rig.set_height_adjust(1.0);

        snapshot.restore(&mut rig);
        assert_eq!(rig.position(), Vec3::new(1.5, 0.0, -2.25));
        assert_eq!(rig.rotation(), Quat::from_rotation_y(0.7));
        assert_eq!(rig.height_adjust(), 0.12);
    }

    #[test]
    fn test_camera_capture_requires_atom() {
        let scene = MemoryScene::new();
        assert!(CameraSnapshot::capture(&scene, &DirectorSettings::default()).is_none());
    }

    #[test]
    fn test_camera_restore_forces_detached_state() {
        let settings = DirectorSettings::default();
        let home = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let mut scene = MemoryScene::new()
            .with_atom("WindowCamera", home)
            .with_bool_param("WindowCamera", "CameraControl", "cameraOn", true)
            .with_controller("WindowCamera", "control");

        let snapshot = CameraSnapshot::capture(&scene, &settings).unwrap();

        scene
            .set_transform("WindowCamera", Transform::from_position(Vec3::splat(7.0)))
            .unwrap();
        scene.set_hidden("WindowCamera", true).unwrap();
        scene
            .set_controller_grab("WindowCamera", "control", true, true)
            .unwrap();

        snapshot.restore(&mut scene).unwrap();
        assert_eq!(scene.transform("WindowCamera"), Some(home));
        assert_eq!(
            scene.bool_param("WindowCamera", "CameraControl", "cameraOn"),
            Some(false)
        );
        assert_eq!(scene.is_hidden("WindowCamera"), Some(false));
        assert_eq!(
            scene.controller_grab("WindowCamera", "control"),
            Some((false, false))
        );
    }

    #[test]
    fn test_camera_restore_missing_atom_errors() {
        let settings = DirectorSettings::default();
        let scene_with_camera =
            MemoryScene::new().with_atom("WindowCamera", Transform::IDENTITY);
        let snapshot = CameraSnapshot::capture(&scene_with_camera, &settings).unwrap();

        let mut empty = MemoryScene::new();
        assert!(snapshot.restore(&mut empty).is_err());
    }
}
