//! Human-readable coordinator status.

use director_timeline::Timeline;

use crate::coordinator::Director;

/// One-line status describing the coordinator and timeline. Advisory only;
/// the format is not a contract.
pub fn status_line(director: &Director, timeline: &dyn Timeline) -> String {
    format!(
        "mode={:?} waypoint={} passenger={} fade={} t={:.2}/{:.2} x{:.2}",
        director.mode(),
        director.current_waypoint_atom().unwrap_or("-"),
        director.passenger_atom().unwrap_or("-"),
        if director.transition_active() { "live" } else { "-" },
        timeline.current_time(),
        timeline.total_duration(),
        timeline.speed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::Mode;
    use crate::settings::DirectorSettings;
    use director_timeline::{ScriptedTimeline, Waypoint};
    use glam::{Quat, Vec3};

    #[test]
    fn test_status_line_mentions_mode_and_timing() {
        let timeline = ScriptedTimeline::new()
            .with_waypoint(Waypoint::new("Step 1", Vec3::ZERO, Quat::IDENTITY, 0.0))
            .with_duration(8.0);
        let mut director = Director::new(DirectorSettings {
            mode: Mode::NavigationRig,
            ..DirectorSettings::default()
        });
        director.init(&timeline).unwrap();

        let line = status_line(&director, &timeline);
        assert!(line.contains("mode=Off"));
        assert!(line.contains("t=0.00/8.00"));
    }
}
