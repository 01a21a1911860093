//! Scene collaborator interface and an in-memory implementation.
//!
//! The coordinator only ever talks to the world through the [`Scene`] trait:
//! atoms addressed by name, storables (named sub-objects carrying typed
//! parameters) addressed by id, and free controllers usable as grabbable
//! transform proxies. Hosts adapt their own scene graph behind this trait;
//! [`MemoryScene`] is the reference implementation used by tests and demos.

use std::collections::BTreeMap;

use crate::error::SceneError;
use crate::transform::Transform;

/// Read/write access to the world model.
///
/// All lookups are by name and return `None` when the addressed object does
/// not exist; mutations return [`SceneError`] instead so callers can
/// distinguish "absent" from "failed to write".
pub trait Scene {
    /// Names of every atom in the scene.
    fn atom_names(&self) -> Vec<String>;

    /// Whether an atom with this name exists.
    fn has_atom(&self, atom: &str) -> bool;

    /// Read an atom's root transform.
    fn transform(&self, atom: &str) -> Option<Transform>;

    /// Write an atom's root transform.
    fn set_transform(&mut self, atom: &str, transform: Transform) -> Result<(), SceneError>;

    /// Read an atom's hidden flag.
    fn is_hidden(&self, atom: &str) -> Option<bool>;

    /// Write an atom's hidden flag.
    fn set_hidden(&mut self, atom: &str, hidden: bool) -> Result<(), SceneError>;

    /// Identifiers of the storables attached to an atom. Order is
    /// unspecified.
    fn storable_ids(&self, atom: &str) -> Vec<String>;

    /// Read a named boolean parameter.
    fn bool_param(&self, atom: &str, storable: &str, param: &str) -> Option<bool>;

    /// Write a named boolean parameter. Creates the parameter if the
    /// storable exists but the parameter does not.
    fn set_bool_param(
        &mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: bool,
    ) -> Result<(), SceneError>;

    /// Read a named float parameter.
    fn float_param(&self, atom: &str, storable: &str, param: &str) -> Option<f32>;

    /// Write a named float parameter.
    fn set_float_param(
        &mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: f32,
    ) -> Result<(), SceneError>;

    /// Read a named string parameter.
    fn string_param(&self, atom: &str, storable: &str, param: &str) -> Option<String>;

    /// Write a named string parameter.
    fn set_string_param(
        &mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: &str,
    ) -> Result<(), SceneError>;

    /// Identifiers of an atom's free controllers.
    fn controller_ids(&self, atom: &str) -> Vec<String>;

    /// Read a free controller's transform.
    fn controller_transform(&self, atom: &str, controller: &str) -> Option<Transform>;

    /// Write a free controller's transform.
    fn set_controller_transform(
        &mut self,
        atom: &str,
        controller: &str,
        transform: Transform,
    ) -> Result<(), SceneError>;

    /// Read a free controller's (position, rotation) grab flags.
    fn controller_grab(&self, atom: &str, controller: &str) -> Option<(bool, bool)>;

    /// Write a free controller's grab flags.
    fn set_controller_grab(
        &mut self,
        atom: &str,
        controller: &str,
        position: bool,
        rotation: bool,
    ) -> Result<(), SceneError>;
}

#[derive(Debug, Default, Clone)]
struct Storable {
    bools: BTreeMap<String, bool>,
    floats: BTreeMap<String, f32>,
    strings: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
struct FreeController {
    transform: Transform,
    grab_position: bool,
    grab_rotation: bool,
}

#[derive(Debug, Default, Clone)]
struct Atom {
    transform: Transform,
    hidden: bool,
    storables: BTreeMap<String, Storable>,
    controllers: BTreeMap<String, FreeController>,
}

/// In-memory [`Scene`] with builder-style construction.
///
/// `with_*` builders create missing atoms and storables on the fly so test
/// scenes can be declared in one expression.
#[derive(Debug, Default, Clone)]
pub struct MemoryScene {
    atoms: BTreeMap<String, Atom>,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom at the given transform.
    pub fn with_atom(mut self, name: &str, transform: Transform) -> Self {
        self.atoms.entry(name.to_string()).or_default().transform = transform;
        self
    }

    /// Add a free controller to an atom.
    pub fn with_controller(mut self, atom: &str, controller: &str) -> Self {
        self.atoms
            .entry(atom.to_string())
            .or_default()
            .controllers
            .entry(controller.to_string())
            .or_default();
        self
    }

    /// Set a boolean parameter, creating the atom and storable as needed.
    pub fn with_bool_param(mut self, atom: &str, storable: &str, param: &str, value: bool) -> Self {
        self.storable_entry(atom, storable)
            .bools
            .insert(param.to_string(), value);
        self
    }

    /// Set a float parameter, creating the atom and storable as needed.
    pub fn with_float_param(mut self, atom: &str, storable: &str, param: &str, value: f32) -> Self {
        self.storable_entry(atom, storable)
            .floats
            .insert(param.to_string(), value);
        self
    }

    /// Set a string parameter, creating the atom and storable as needed.
    pub fn with_string_param(
        mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: &str,
    ) -> Self {
        self.storable_entry(atom, storable)
            .strings
            .insert(param.to_string(), value.to_string());
        self
    }

    /// Remove an atom entirely, as a host would when the user deletes it
    /// mid-session.
    pub fn remove_atom(&mut self, name: &str) {
        self.atoms.remove(name);
    }

    fn storable_entry(&mut self, atom: &str, storable: &str) -> &mut Storable {
        self.atoms
            .entry(atom.to_string())
            .or_default()
            .storables
            .entry(storable.to_string())
            .or_default()
    }

    fn atom_mut(&mut self, atom: &str) -> Result<&mut Atom, SceneError> {
        self.atoms
            .get_mut(atom)
            .ok_or_else(|| SceneError::AtomNotFound(atom.to_string()))
    }

    fn storable_mut(&mut self, atom: &str, storable: &str) -> Result<&mut Storable, SceneError> {
        self.atom_mut(atom)?
            .storables
            .get_mut(storable)
            .ok_or_else(|| SceneError::StorableNotFound {
                atom: atom.to_string(),
                storable: storable.to_string(),
            })
    }

    fn controller_mut(
        &mut self,
        atom: &str,
        controller: &str,
    ) -> Result<&mut FreeController, SceneError> {
        self.atom_mut(atom)?
            .controllers
            .get_mut(controller)
            .ok_or_else(|| SceneError::ControllerNotFound {
                atom: atom.to_string(),
                controller: controller.to_string(),
            })
    }
}

impl Scene for MemoryScene {
    fn atom_names(&self) -> Vec<String> {
        self.atoms.keys().cloned().collect()
    }

    fn has_atom(&self, atom: &str) -> bool {
        self.atoms.contains_key(atom)
    }

    fn transform(&self, atom: &str) -> Option<Transform> {
        self.atoms.get(atom).map(|a| a.transform)
    }

    fn set_transform(&mut self, atom: &str, transform: Transform) -> Result<(), SceneError> {
        self.atom_mut(atom)?.transform = transform;
        Ok(())
    }

    fn is_hidden(&self, atom: &str) -> Option<bool> {
        self.atoms.get(atom).map(|a| a.hidden)
    }

    fn set_hidden(&mut self, atom: &str, hidden: bool) -> Result<(), SceneError> {
        self.atom_mut(atom)?.hidden = hidden;
        Ok(())
    }

    fn storable_ids(&self, atom: &str) -> Vec<String> {
        self.atoms
            .get(atom)
            .map(|a| a.storables.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn bool_param(&self, atom: &str, storable: &str, param: &str) -> Option<bool> {
        self.atoms
            .get(atom)?
            .storables
            .get(storable)?
            .bools
            .get(param)
            .copied()
    }

    fn set_bool_param(
        &mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: bool,
    ) -> Result<(), SceneError> {
        self.storable_mut(atom, storable)?
            .bools
            .insert(param.to_string(), value);
        Ok(())
    }

    fn float_param(&self, atom: &str, storable: &str, param: &str) -> Option<f32> {
        self.atoms
            .get(atom)?
            .storables
            .get(storable)?
            .floats
            .get(param)
            .copied()
    }

    fn set_float_param(
        &mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: f32,
    ) -> Result<(), SceneError> {
        self.storable_mut(atom, storable)?
            .floats
            .insert(param.to_string(), value);
        Ok(())
    }

    fn string_param(&self, atom: &str, storable: &str, param: &str) -> Option<String> {
        self.atoms
            .get(atom)?
            .storables
            .get(storable)?
            .strings
            .get(param)
            .cloned()
    }

    fn set_string_param(
        &mut self,
        atom: &str,
        storable: &str,
        param: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        self.storable_mut(atom, storable)?
            .strings
            .insert(param.to_string(), value.to_string());
        Ok(())
    }

    fn controller_ids(&self, atom: &str) -> Vec<String> {
        self.atoms
            .get(atom)
            .map(|a| a.controllers.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn controller_transform(&self, atom: &str, controller: &str) -> Option<Transform> {
        self.atoms
            .get(atom)?
            .controllers
            .get(controller)
            .map(|c| c.transform)
    }

    fn set_controller_transform(
        &mut self,
        atom: &str,
        controller: &str,
        transform: Transform,
    ) -> Result<(), SceneError> {
        self.controller_mut(atom, controller)?.transform = transform;
        Ok(())
    }

    fn controller_grab(&self, atom: &str, controller: &str) -> Option<(bool, bool)> {
        self.atoms
            .get(atom)?
            .controllers
            .get(controller)
            .map(|c| (c.grab_position, c.grab_rotation))
    }

    fn set_controller_grab(
        &mut self,
        atom: &str,
        controller: &str,
        position: bool,
        rotation: bool,
    ) -> Result<(), SceneError> {
        let ctrl = self.controller_mut(atom, controller)?;
        ctrl.grab_position = position;
        ctrl.grab_rotation = rotation;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_builder_creates_atoms_and_params() {
        let scene = MemoryScene::new()
            .with_atom("Camera", Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .with_bool_param("Camera", "CameraControl", "cameraOn", false)
            .with_string_param("Step 1", "plugin#0_DirectorStep", "Passenger", "None");

        assert!(scene.has_atom("Camera"));
        assert!(scene.has_atom("Step 1"));
        assert_eq!(
            scene.bool_param("Camera", "CameraControl", "cameraOn"),
            Some(false)
        );
        assert_eq!(
            scene.string_param("Step 1", "plugin#0_DirectorStep", "Passenger"),
            Some("None".to_string())
        );
    }

    #[test]
    fn test_missing_atom_reads_return_none() {
        let scene = MemoryScene::new();
        assert_eq!(scene.transform("ghost"), None);
        assert_eq!(scene.is_hidden("ghost"), None);
        assert!(scene.storable_ids("ghost").is_empty());
    }

    #[test]
    fn test_missing_atom_writes_error() {
        let mut scene = MemoryScene::new();
        let err = scene.set_hidden("ghost", true).unwrap_err();
        assert_eq!(err, SceneError::AtomNotFound("ghost".to_string()));
    }

    #[test]
    fn test_set_bool_param_requires_storable() {
        let mut scene = MemoryScene::new().with_atom("A", Transform::IDENTITY);
        let err = scene.set_bool_param("A", "missing", "Active", true).unwrap_err();
        assert!(matches!(err, SceneError::StorableNotFound { .. }));

        let mut scene = scene.with_bool_param("A", "present", "Active", false);
        scene.set_bool_param("A", "present", "Active", true).unwrap();
        assert_eq!(scene.bool_param("A", "present", "Active"), Some(true));
    }

    #[test]
    fn test_controller_grab_roundtrip() {
        let mut scene = MemoryScene::new().with_controller("Camera", "control");
        assert_eq!(scene.controller_grab("Camera", "control"), Some((false, false)));
        scene.set_controller_grab("Camera", "control", true, true).unwrap();
        assert_eq!(scene.controller_grab("Camera", "control"), Some((true, true)));
    }
}
