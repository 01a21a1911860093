//! Timeline collaborator interface and a scripted implementation.

use tracing::debug;

use crate::waypoint::Waypoint;

/// The animation timeline the coordinator reads from and issues transport
/// commands to.
///
/// The coordinator never advances the timeline itself; the host does that
/// once per frame before calling the coordinator. The coordinator only
/// reads the cursor, scans the waypoint list, and uses the transport ops.
pub trait Timeline {
    /// The ordered waypoint sequence.
    fn waypoints(&self) -> &[Waypoint];

    /// Current cursor position in seconds.
    fn current_time(&self) -> f32;

    /// Total duration of the timeline in seconds.
    fn total_duration(&self) -> f32;

    /// Playback speed multiplier.
    fn speed(&self) -> f32;

    /// Whether the transport is in the playing state.
    fn is_playing(&self) -> bool;

    /// Start playback from the current cursor.
    fn play(&mut self);

    /// Pause playback, keeping the cursor.
    fn pause(&mut self);

    /// Move the cursor back to zero without starting playback.
    fn reset(&mut self);

    /// Move the cursor back to zero and start playback.
    fn reset_and_play(&mut self);

    /// Move the cursor to an arbitrary time.
    fn seek(&mut self, time: f32);

    /// The waypoint playback currently points at, if any.
    fn current_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints().iter().find(|w| w.is_current)
    }
}

/// A cursor-driven [`Timeline`] over an authored waypoint list.
///
/// Waypoints are kept sorted by offset. The current waypoint is the latest
/// one whose offset the cursor has reached; before the first offset no
/// waypoint is current.
#[derive(Debug, Clone)]
pub struct ScriptedTimeline {
    waypoints: Vec<Waypoint>,
    cursor: f32,
    duration: Option<f32>,
    speed: f32,
    playing: bool,
}

impl ScriptedTimeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            cursor: 0.0,
            duration: None,
            speed: 1.0,
            playing: false,
        }
    }

    /// Append a waypoint, keeping the sequence sorted by offset.
    pub fn with_waypoint(mut self, waypoint: Waypoint) -> Self {
        self.waypoints.push(waypoint);
        self.waypoints
            .sort_by(|a, b| a.timeline_offset.total_cmp(&b.timeline_offset));
        self.mark_current();
        self
    }

    /// Override the total duration (defaults to the last waypoint offset).
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Set the playback speed multiplier.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Advance the cursor by a frame delta when playing. Host-side; the
    /// coordinator never calls this.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        let total = self.total_duration();
        self.cursor = (self.cursor + dt * self.speed).min(total);
        self.mark_current();
    }

    fn mark_current(&mut self) {
        let current = self
            .waypoints
            .iter()
            .rposition(|w| w.timeline_offset <= self.cursor);
        for (i, waypoint) in self.waypoints.iter_mut().enumerate() {
            waypoint.is_current = Some(i) == current;
        }
    }
}

impl Default for ScriptedTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline for ScriptedTimeline {
    fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    fn current_time(&self) -> f32 {
        self.cursor
    }

    fn total_duration(&self) -> f32 {
        self.duration.unwrap_or_else(|| {
            self.waypoints
                .last()
                .map(|w| w.timeline_offset)
                .unwrap_or(0.0)
        })
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn reset(&mut self) {
        debug!("timeline reset");
        self.cursor = 0.0;
        self.mark_current();
    }

    fn reset_and_play(&mut self) {
        self.cursor = 0.0;
        self.playing = true;
        self.mark_current();
    }

    fn seek(&mut self, time: f32) {
        self.cursor = time.clamp(0.0, self.total_duration());
        self.mark_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn three_steps() -> ScriptedTimeline {
        ScriptedTimeline::new()
            .with_waypoint(Waypoint::new("Step 2", Vec3::X, Quat::IDENTITY, 5.0))
            .with_waypoint(Waypoint::new("Step 1", Vec3::ZERO, Quat::IDENTITY, 0.0))
            .with_waypoint(Waypoint::new("Step 3", Vec3::Z, Quat::IDENTITY, 10.0))
    }

    #[test]
    fn test_waypoints_sorted_by_offset() {
        let timeline = three_steps();
        let atoms: Vec<&str> = timeline.waypoints().iter().map(|w| w.atom.as_str()).collect();
        assert_eq!(atoms, vec!["Step 1", "Step 2", "Step 3"]);
    }

    #[test]
    fn test_current_is_latest_reached_offset() {
        let mut timeline = three_steps();
        assert_eq!(timeline.current_waypoint().unwrap().atom, "Step 1");

        timeline.seek(5.0);
        assert_eq!(timeline.current_waypoint().unwrap().atom, "Step 2");

        timeline.seek(9.9);
        assert_eq!(timeline.current_waypoint().unwrap().atom, "Step 2");

        timeline.seek(10.0);
        assert_eq!(timeline.current_waypoint().unwrap().atom, "Step 3");
    }

    #[test]
    fn test_no_current_before_first_offset() {
        let timeline = ScriptedTimeline::new()
            .with_waypoint(Waypoint::new("Step 1", Vec3::ZERO, Quat::IDENTITY, 2.0));
        assert!(timeline.current_waypoint().is_none());
    }

    #[test]
    fn test_advance_honors_speed_and_clamps() {
        let mut timeline = three_steps().with_speed(2.0);
        timeline.play();
        timeline.advance(2.0);
        assert_eq!(timeline.current_time(), 4.0);
        timeline.advance(100.0);
        assert_eq!(timeline.current_time(), timeline.total_duration());
    }

    #[test]
    fn test_advance_is_a_noop_when_paused() {
        let mut timeline = three_steps();
        timeline.advance(1.0);
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn test_reset_and_play() {
        let mut timeline = three_steps();
        timeline.seek(7.0);
        timeline.reset_and_play();
        assert_eq!(timeline.current_time(), 0.0);
        assert!(timeline.is_playing());
        assert_eq!(timeline.current_waypoint().unwrap().atom, "Step 1");
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut timeline = three_steps().with_duration(12.0);
        timeline.seek(50.0);
        assert_eq!(timeline.current_time(), 12.0);
        timeline.seek(-3.0);
        assert_eq!(timeline.current_time(), 0.0);
    }
}
