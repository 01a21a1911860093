//! Passenger delegation: handing viewpoint placement to another entity.
//!
//! A waypoint may name a passenger target in its step configuration. When
//! the target resolves, the coordinator flips the target's activation flag
//! instead of moving the rig itself; the target then owns the view until
//! the link is released.

use director_scene::Scene;
use tracing::{debug, warn};

use crate::settings::DirectorSettings;

/// Sentinel selection meaning "no delegation".
pub const NO_PASSENGER: &str = "None";

/// A resolved handle to a passenger target's activation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerLink {
    atom: String,
    storable: String,
    param: String,
}

impl PassengerLink {
    /// The target atom this link controls.
    pub fn atom(&self) -> &str {
        &self.atom
    }

    /// Set the target's activation flag true. The target owns the view
    /// until released.
    pub fn engage(&self, scene: &mut dyn Scene) -> Result<(), director_scene::SceneError> {
        debug!("engaging passenger {}", self.atom);
        scene.set_bool_param(&self.atom, &self.storable, &self.param, true)
    }

    /// Set the target's activation flag false before the link is dropped.
    ///
    /// Release never fails the frame: a target deleted mid-session has
    /// nothing left to deactivate.
    pub fn release(&self, scene: &mut dyn Scene) {
        debug!("releasing passenger {}", self.atom);
        if let Err(e) = scene.set_bool_param(&self.atom, &self.storable, &self.param, false) {
            warn!("failed to release passenger {}: {}", self.atom, e);
        }
    }
}

/// One-shot failure reporting, reset on mode (re)activation.
///
/// A missing target is re-resolved on the next waypoint change but only
/// reported once per episode to keep the log quiet.
#[derive(Debug, Default, Clone)]
pub struct FailureLatches {
    target_missing: bool,
    companion_missing: bool,
}

impl FailureLatches {
    /// Clear all latches; called when a mode (re)activates.
    pub fn reset(&mut self) {
        self.target_missing = false;
        self.companion_missing = false;
    }

    /// Whether the missing-target failure has been reported this episode.
    pub fn target_missing(&self) -> bool {
        self.target_missing
    }

    /// Whether the missing-companion failure has been reported this
    /// episode.
    pub fn companion_missing(&self) -> bool {
        self.companion_missing
    }
}

/// Resolve the passenger link for a waypoint, if it has one.
///
/// Discovery is by storable-id suffix, first match wins in unspecified
/// order: the step configuration is the first storable on the waypoint
/// atom ending in `step_storable_suffix`, and the companion is the first
/// storable on the target atom ending in `passenger_storable_suffix`.
/// Multiple matches are not an error.
pub fn resolve(
    scene: &dyn Scene,
    settings: &DirectorSettings,
    waypoint_atom: &str,
    latches: &mut FailureLatches,
) -> Option<PassengerLink> {
    let step_storable = find_by_suffix(scene, waypoint_atom, &settings.step_storable_suffix)?;
    let target = scene.string_param(waypoint_atom, &step_storable, &settings.passenger_param)?;
    if target == NO_PASSENGER {
        return None;
    }

    if !scene.has_atom(&target) {
        if !latches.target_missing {
            latches.target_missing = true;
            warn!(
                "passenger target '{}' for waypoint '{}' not found",
                target, waypoint_atom
            );
        }
        return None;
    }

    match find_by_suffix(scene, &target, &settings.passenger_storable_suffix) {
        Some(storable) => Some(PassengerLink {
            atom: target,
            storable,
            param: settings.passenger_active_param.clone(),
        }),
        None => {
            if !latches.companion_missing {
                latches.companion_missing = true;
                warn!(
                    "passenger target '{}' has no '{}' storable",
                    target, settings.passenger_storable_suffix
                );
            }
            None
        }
    }
}

fn find_by_suffix(scene: &dyn Scene, atom: &str, suffix: &str) -> Option<String> {
    scene
        .storable_ids(atom)
        .into_iter()
        .find(|id| id.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use director_scene::{MemoryScene, Transform};

    fn settings() -> DirectorSettings {
        DirectorSettings::default()
    }

    fn scene_with_link(target: &str) -> MemoryScene {
        MemoryScene::new()
            .with_atom("Step 1", Transform::IDENTITY)
            .with_string_param("Step 1", "plugin#0_DirectorStep", "Passenger", target)
    }

    #[test]
    fn test_resolve_full_chain() {
        let scene = scene_with_link("Person")
            .with_bool_param("Person", "plugin#0_Passenger", "Active", false);
        let mut latches = FailureLatches::default();

        let link = resolve(&scene, &settings(), "Step 1", &mut latches).unwrap();
        assert_eq!(link.atom(), "Person");
        assert!(!latches.target_missing());
    }

    #[test]
    fn test_none_selection_means_no_delegation() {
        let scene = scene_with_link(NO_PASSENGER);
        let mut latches = FailureLatches::default();
        assert!(resolve(&scene, &settings(), "Step 1", &mut latches).is_none());
        assert!(!latches.target_missing());
    }

    #[test]
    fn test_waypoint_without_step_config() {
        let scene = MemoryScene::new().with_atom("Step 1", Transform::IDENTITY);
        let mut latches = FailureLatches::default();
        assert!(resolve(&scene, &settings(), "Step 1", &mut latches).is_none());
    }

    #[test]
    fn test_missing_target_latches_once() {
        let scene = scene_with_link("Ghost");
        let mut latches = FailureLatches::default();

        assert!(resolve(&scene, &settings(), "Step 1", &mut latches).is_none());
        assert!(latches.target_missing());

        // Second resolution hits the latch; still no delegation.
        assert!(resolve(&scene, &settings(), "Step 1", &mut latches).is_none());
        assert!(latches.target_missing());
    }

    #[test]
    fn test_missing_companion_latches() {
        let scene = scene_with_link("Person").with_atom("Person", Transform::IDENTITY);
        let mut latches = FailureLatches::default();

        assert!(resolve(&scene, &settings(), "Step 1", &mut latches).is_none());
        assert!(latches.companion_missing());

        latches.reset();
        assert!(!latches.companion_missing());
    }

    #[test]
    fn test_engage_and_release_toggle_flag() {
        let mut scene = scene_with_link("Person")
            .with_bool_param("Person", "plugin#0_Passenger", "Active", false);
        let mut latches = FailureLatches::default();
        let link = resolve(&scene, &settings(), "Step 1", &mut latches).unwrap();

        link.engage(&mut scene).unwrap();
        assert_eq!(
            scene.bool_param("Person", "plugin#0_Passenger", "Active"),
            Some(true)
        );

        link.release(&mut scene);
        assert_eq!(
            scene.bool_param("Person", "plugin#0_Passenger", "Active"),
            Some(false)
        );
    }
}
