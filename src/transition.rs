//! Time-bounded linear interpolation of a single scalar.

/// A timed ramp of one scalar from a start to an end value.
///
/// `advance` moves elapsed time by the frame delta and returns the current
/// value; the interpolation input is not clamped by the caller because
/// [`Transition::value`] clamps at the bounds itself. Out-transitions are
/// built with `destroy_on_complete = false` so they keep holding the end
/// value until an in-transition supersedes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    destroy_on_complete: bool,
}

impl Transition {
    /// Create a transition. A non-positive duration completes immediately
    /// at the end value.
    pub fn new(from: f32, to: f32, duration: f32, destroy_on_complete: bool) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            destroy_on_complete,
        }
    }

    /// Advance elapsed time by the frame delta and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }

    /// Current value: the linear interpolation of from to to at
    /// `elapsed / duration`, clamped at the bounds.
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    /// The value this transition ends at.
    pub fn end_value(&self) -> f32 {
        self.to
    }

    /// Whether elapsed time has reached or passed the duration.
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Whether the transition should be dropped once finished.
    pub fn destroy_on_complete(&self) -> bool {
        self.destroy_on_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp_samples() {
        let mut t = Transition::new(0.0, 1.0, 2.0, true);
        assert_eq!(t.value(), 0.0);
        assert!(!t.finished());

        let mid = t.advance(1.0);
        assert!((mid - 0.5).abs() < 1e-6);
        assert!(!t.finished());

        let end = t.advance(1.0);
        assert_eq!(end, 1.0);
        assert!(t.finished());
    }

    #[test]
    fn test_overshoot_clamps_at_end_value() {
        let mut t = Transition::new(0.25, 0.75, 1.0, false);
        assert_eq!(t.advance(100.0), 0.75);
        assert!(t.finished());
    }

    #[test]
    fn test_descending_ramp() {
        let mut t = Transition::new(1.0, 0.0, 4.0, false);
        assert!((t.advance(1.0) - 0.75).abs() < 1e-6);
        assert!((t.advance(1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let t = Transition::new(0.0, 1.0, 0.0, true);
        assert_eq!(t.value(), 1.0);
        assert!(t.finished());
    }
}
