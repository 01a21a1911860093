//! The director coordinator: mode state machine and per-frame update.
//!
//! The coordinator owns no world state of its own beyond the snapshots it
//! takes at activation; every frame it reads the timeline cursor, follows
//! the current waypoint, and writes through the injected [`Scene`] and
//! [`ViewerRig`] collaborators. All deactivation paths (explicit toggle,
//! mode switch, frame failure, teardown) funnel through [`Director::deactivate`]
//! so restoration is always complete and exactly once.

use director_scene::{Scene, SceneError, Transform, ViewerRig};
use director_timeline::{Timeline, Waypoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::DirectorError;
use crate::passenger::{self, FailureLatches, PassengerLink};
use crate::placement::place_rig;
use crate::settings::DirectorSettings;
use crate::snapshot::{CameraSnapshot, RigSnapshot};
use crate::status;
use crate::transition::Transition;

/// Epsilon used when comparing cursor positions to waypoint offsets.
const SEEK_EPSILON: f32 = 1e-4;

/// Which view-redirection mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Fully restored and idle.
    #[default]
    Off,
    /// The viewer rig itself follows the waypoints.
    NavigationRig,
    /// A secondary camera proxy follows the waypoints.
    SecondaryCamera,
}

/// Coordinates the viewer's effective viewpoint along timeline waypoints.
pub struct Director {
    settings: DirectorSettings,
    mode: Mode,
    initialized: bool,
    rig_snapshot: Option<RigSnapshot>,
    camera_snapshot: Option<CameraSnapshot>,
    exposure_baseline: Option<f32>,
    passenger: Option<PassengerLink>,
    transition: Option<Transition>,
    last_waypoint: Option<String>,
    last_cursor: Option<f32>,
    stop_when_finished: bool,
    latches: FailureLatches,
}

impl Director {
    /// Create an inert coordinator; call [`Director::init`] before use.
    pub fn new(settings: DirectorSettings) -> Self {
        Self {
            settings,
            mode: Mode::Off,
            initialized: false,
            rig_snapshot: None,
            camera_snapshot: None,
            exposure_baseline: None,
            passenger: None,
            transition: None,
            last_waypoint: None,
            last_cursor: None,
            stop_when_finished: false,
            latches: FailureLatches::default(),
        }
    }

    /// Validate that a waypoint source is attached. On failure the
    /// coordinator stays inert: activation and updates are ignored.
    pub fn init(&mut self, timeline: &dyn Timeline) -> Result<(), DirectorError> {
        if timeline.waypoints().is_empty() {
            error!("failed to initialize: no waypoint source attached");
            self.initialized = false;
            return Err(DirectorError::NoWaypointSource);
        }
        self.initialized = true;
        info!("director initialized with {} waypoints", timeline.waypoints().len());
        Ok(())
    }

    /// Whether initialization succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The currently active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether any mode is active.
    pub fn is_active(&self) -> bool {
        self.mode != Mode::Off
    }

    /// Current settings.
    pub fn settings(&self) -> &DirectorSettings {
        &self.settings
    }

    /// Set the default fade-in duration in seconds.
    pub fn set_transition_duration(&mut self, seconds: f32) {
        self.settings.transition_duration = seconds.max(0.0);
    }

    /// Set the fade-out lead window in seconds.
    pub fn set_extended_transition_duration(&mut self, seconds: f32) {
        self.settings.extended_transition_duration = seconds.max(0.0);
    }

    /// Enable or disable the per-frame status line.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.settings.diagnostics = enabled;
    }

    /// Identity of the waypoint last applied, if any.
    pub fn current_waypoint_atom(&self) -> Option<&str> {
        self.last_waypoint.as_deref()
    }

    /// Atom of the currently engaged passenger, if any.
    pub fn passenger_atom(&self) -> Option<&str> {
        self.passenger.as_ref().map(|link| link.atom())
    }

    /// Whether a passenger currently owns the view.
    pub fn passenger_engaged(&self) -> bool {
        self.passenger.is_some()
    }

    /// Whether a fade is currently live.
    pub fn transition_active(&self) -> bool {
        self.transition.is_some()
    }

    /// Turn the coordinator on (entering the selected mode) or off.
    pub fn set_active(
        &mut self,
        active: bool,
        scene: &mut dyn Scene,
        rig: &mut dyn ViewerRig,
    ) -> Result<(), DirectorError> {
        let target = if active { self.settings.mode } else { Mode::Off };
        self.enter(target, scene, rig)
    }

    /// Change the selected mode; switches live when currently active.
    pub fn select_mode(
        &mut self,
        mode: Mode,
        scene: &mut dyn Scene,
        rig: &mut dyn ViewerRig,
    ) -> Result<(), DirectorError> {
        let was_active = self.is_active();
        self.settings.mode = mode;
        if was_active || mode == Mode::Off {
            self.enter(mode, scene, rig)?;
        }
        Ok(())
    }

    /// Restore everything captured at activation and return to [`Mode::Off`].
    ///
    /// Safe to call at any time; a no-op when nothing is active. This is
    /// the single restoration path used by explicit deactivation, mode
    /// switches, frame-failure recovery, and teardown.
    pub fn deactivate(&mut self, scene: &mut dyn Scene, rig: &mut dyn ViewerRig) {
        if let Some(link) = self.passenger.take() {
            link.release(scene);
        }
        self.transition = None;
        if let Some(baseline) = self.exposure_baseline.take() {
            rig.set_exposure(baseline);
        }
        if let Some(snapshot) = self.rig_snapshot.take() {
            snapshot.restore(rig);
        }
        if let Some(snapshot) = self.camera_snapshot.take() {
            if let Err(e) = snapshot.restore(scene) {
                warn!("failed to restore secondary camera: {}", e);
            }
        }
        self.last_waypoint = None;
        self.last_cursor = None;
        self.stop_when_finished = false;
        if self.mode != Mode::Off {
            info!("director deactivated");
        }
        self.mode = Mode::Off;
    }

    fn enter(
        &mut self,
        mode: Mode,
        scene: &mut dyn Scene,
        rig: &mut dyn ViewerRig,
    ) -> Result<(), DirectorError> {
        if !self.initialized {
            warn!("director not initialized, ignoring activation");
            return Ok(());
        }
        self.deactivate(scene, rig);
        match mode {
            Mode::Off => Ok(()),
            Mode::NavigationRig => {
                self.rig_snapshot = Some(RigSnapshot::capture(rig));
                self.exposure_baseline = Some(rig.exposure());
                self.latches.reset();
                self.mode = Mode::NavigationRig;
                info!("navigation-rig mode active");
                Ok(())
            }
            Mode::SecondaryCamera => {
                let Some(snapshot) = CameraSnapshot::capture(scene, &self.settings) else {
                    error!(
                        "secondary camera atom '{}' not found, staying off",
                        self.settings.secondary_camera_atom
                    );
                    return Err(DirectorError::SecondaryCameraMissing(
                        self.settings.secondary_camera_atom.clone(),
                    ));
                };
                self.camera_snapshot = Some(snapshot);
                if let Err(e) = self.attach_camera(scene) {
                    self.deactivate(scene, rig);
                    return Err(e.into());
                }
                self.exposure_baseline = Some(rig.exposure());
                self.latches.reset();
                self.mode = Mode::SecondaryCamera;
                info!(
                    "secondary-camera mode active, driving '{}'",
                    self.settings.secondary_camera_atom
                );
                Ok(())
            }
        }
    }

    fn attach_camera(&mut self, scene: &mut dyn Scene) -> Result<(), SceneError> {
        let atom = self.settings.secondary_camera_atom.clone();
        scene.set_bool_param(
            &atom,
            &self.settings.camera_storable,
            &self.settings.camera_on_param,
            true,
        )?;
        scene.set_hidden(&atom, true)?;
        if scene
            .controller_grab(&atom, &self.settings.camera_controller)
            .is_some()
        {
            scene.set_controller_grab(&atom, &self.settings.camera_controller, true, true)?;
        }
        Ok(())
    }

    /// Per-frame update; call once per rendered frame after the host has
    /// advanced the timeline. A no-op when off or uninitialized.
    ///
    /// Any failure inside the frame is logged and answered with a full
    /// deactivation, never a half-restored view.
    pub fn update(
        &mut self,
        dt: f32,
        scene: &mut dyn Scene,
        rig: &mut dyn ViewerRig,
        timeline: &mut dyn Timeline,
    ) {
        if !self.initialized || self.mode == Mode::Off {
            return;
        }
        if let Err(e) = self.tick(dt, scene, rig, timeline) {
            error!("frame update failed, deactivating: {}", e);
            self.deactivate(scene, rig);
        }
    }

    fn tick(
        &mut self,
        dt: f32,
        scene: &mut dyn Scene,
        rig: &mut dyn ViewerRig,
        timeline: &mut dyn Timeline,
    ) -> Result<(), DirectorError> {
        let cursor = timeline.current_time();
        let playing = self.last_cursor.is_some_and(|prev| prev != cursor);
        self.last_cursor = Some(cursor);

        let current = timeline.current_waypoint().cloned();

        if self.stop_when_finished && cursor >= timeline.total_duration() {
            self.stop_when_finished = false;
            info!("timeline finished, turning director off");
            self.deactivate(scene, rig);
            timeline.pause();
            timeline.reset();
            return Ok(());
        }

        if let Some(waypoint) = current {
            if playing {
                self.advance_transition(dt, rig);
                self.maybe_start_fade_out(cursor, &waypoint, timeline, rig);
            }

            if self.mode == Mode::SecondaryCamera {
                self.follow_with_camera(scene, &waypoint)?;
            }

            let changed = self.last_waypoint.as_deref() != Some(waypoint.atom.as_str());
            if changed {
                if playing {
                    self.start_fade_in(&waypoint, rig);
                }
                self.last_waypoint = Some(waypoint.atom.clone());

                if self.mode == Mode::NavigationRig {
                    if let Some(link) = self.passenger.take() {
                        link.release(scene);
                    }
                    match passenger::resolve(scene, &self.settings, &waypoint.atom, &mut self.latches)
                    {
                        Some(link) => {
                            link.engage(scene)?;
                            self.passenger = Some(link);
                        }
                        None => place_rig(rig, &waypoint),
                    }
                }
            }
        }

        if self.settings.diagnostics {
            debug!("{}", status::status_line(self, timeline));
        }
        Ok(())
    }

    fn advance_transition(&mut self, dt: f32, rig: &mut dyn ViewerRig) {
        if let Some(transition) = self.transition.as_mut() {
            let value = transition.advance(dt);
            rig.set_exposure(value);
            if transition.finished() && transition.destroy_on_complete() {
                self.transition = None;
            }
        }
    }

    /// Start fading the exposure toward zero when the cursor enters the
    /// lead window before the next waypoint boundary. The fade does not
    /// self-destruct so it keeps holding zero until the fade-in on the
    /// boundary crossing supersedes it.
    fn maybe_start_fade_out(
        &mut self,
        cursor: f32,
        waypoint: &Waypoint,
        timeline: &dyn Timeline,
        rig: &mut dyn ViewerRig,
    ) {
        if self.transition.is_some() {
            return;
        }
        let lead = self.settings.extended_transition_duration;
        if lead <= 0.0 {
            return;
        }
        let Some(next_offset) = next_offset_after(timeline.waypoints(), waypoint.timeline_offset)
        else {
            return;
        };
        if cursor >= next_offset - lead && cursor < next_offset {
            let baseline = self.exposure_baseline.unwrap_or(1.0);
            self.start_transition(rig, Transition::new(baseline, 0.0, lead, false));
        }
    }

    fn start_fade_in(&mut self, waypoint: &Waypoint, rig: &mut dyn ViewerRig) {
        let duration = if waypoint.transition_in > 0.0 {
            waypoint.transition_in
        } else {
            self.settings.transition_duration
        };
        let baseline = self.exposure_baseline.unwrap_or(1.0);
        self.start_transition(rig, Transition::new(0.0, baseline, duration, true));
    }

    /// Replace the live transition, forcing the old one to its end value
    /// first so the parameter never abandons a ramp mid-way.
    fn start_transition(&mut self, rig: &mut dyn ViewerRig, transition: Transition) {
        if let Some(old) = self.transition.take() {
            rig.set_exposure(old.end_value());
        }
        self.transition = Some(transition);
    }

    /// Copy the waypoint transform onto the camera proxy. Runs every frame
    /// rather than only on waypoint change so the proxy keeps moving
    /// smoothly mid-transition.
    fn follow_with_camera(
        &self,
        scene: &mut dyn Scene,
        waypoint: &Waypoint,
    ) -> Result<(), SceneError> {
        let atom = &self.settings.secondary_camera_atom;
        let target = Transform::new(waypoint.position, waypoint.rotation);
        scene.set_transform(atom, target)?;
        if scene
            .controller_transform(atom, &self.settings.camera_controller)
            .is_some()
        {
            scene.set_controller_transform(atom, &self.settings.camera_controller, target)?;
        }
        Ok(())
    }

    /// Arm the one-shot stop flag and play the timeline from the start,
    /// activating the selected mode if the coordinator is off.
    pub fn play_once_from_start(
        &mut self,
        scene: &mut dyn Scene,
        rig: &mut dyn ViewerRig,
        timeline: &mut dyn Timeline,
    ) -> Result<(), DirectorError> {
        if !self.is_active() {
            self.enter(self.settings.mode, scene, rig)?;
        }
        if !self.is_active() {
            return Ok(());
        }
        self.stop_when_finished = true;
        timeline.reset_and_play();
        Ok(())
    }

    /// Seek the timeline to the next waypoint's offset, if there is one.
    pub fn next_waypoint(&self, timeline: &mut dyn Timeline) {
        let cursor = timeline.current_time();
        let target = timeline
            .waypoints()
            .iter()
            .map(|w| w.timeline_offset)
            .filter(|offset| *offset > cursor + SEEK_EPSILON)
            .min_by(f32::total_cmp);
        if let Some(offset) = target {
            timeline.seek(offset);
        }
    }

    /// Seek the timeline to the previous waypoint's offset, if there is
    /// one.
    pub fn previous_waypoint(&self, timeline: &mut dyn Timeline) {
        let cursor = timeline.current_time();
        let target = timeline
            .waypoints()
            .iter()
            .map(|w| w.timeline_offset)
            .filter(|offset| *offset < cursor - SEEK_EPSILON)
            .max_by(f32::total_cmp);
        if let Some(offset) = target {
            timeline.seek(offset);
        }
    }

    /// Seek the timeline to the offset of the waypoint at `index`.
    pub fn jump_to_waypoint(&self, timeline: &mut dyn Timeline, index: usize) {
        if let Some(offset) = timeline.waypoints().get(index).map(|w| w.timeline_offset) {
            timeline.seek(offset);
        }
    }
}

fn next_offset_after(waypoints: &[Waypoint], offset: f32) -> Option<f32> {
    waypoints
        .iter()
        .map(|w| w.timeline_offset)
        .filter(|candidate| *candidate > offset)
        .min_by(f32::total_cmp)
}
