use std::time::{Duration, Instant};

/// Drives the wave's phase factor from wall-clock time.
///
/// The driver starts lazily on the first poll and advances the phase factor
/// by 1.0 per cycle from then on; the renderer itself holds no animation
/// state.
#[derive(Debug, Clone)]
pub struct PhaseDriver {
    cycle: Duration,
    start_time: Option<Instant>,
}

impl PhaseDriver {
    pub fn new(cycle: Duration) -> Self {
        // floor the cycle to keep the phase finite
        Self { cycle: cycle.max(Duration::from_millis(1)), start_time: None }
    }

    /// The phase factor at `now`, monotonically increasing across polls.
    pub fn phase_factor_at(&mut self, now: Instant) -> f32 {
        let start = *self.start_time.get_or_insert(now);
        now.duration_since(start).as_secs_f32() / self.cycle.as_secs_f32()
    }
}

/// Tracks the enable/disable blend the track colors are resolved with.
///
/// The blend moves linearly towards the current target over `duration`,
/// starting from wherever it was when the target last flipped, so rapid
/// toggles reverse smoothly instead of jumping.
#[derive(Debug, Clone)]
pub struct EnableTransition {
    duration: Duration,
    target: bool,
    origin: f32,
    changed_at: Option<Instant>,
}

impl EnableTransition {
    pub fn new(duration: Duration, initially_enabled: bool) -> Self {
        Self {
            duration: duration.max(Duration::from_millis(1)),
            target: initially_enabled,
            origin: if initially_enabled { 1.0 } else { 0.0 },
            changed_at: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.target
    }

    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled == self.target {
            return;
        }
        self.origin = self.blend_at(now);
        self.target = enabled;
        self.changed_at = Some(now);
    }

    /// The blend in `[0, 1]` at `now`: 0 fully disabled, 1 fully enabled.
    pub fn blend_at(&self, now: Instant) -> f32 {
        let Some(changed_at) = self.changed_at else {
            return self.origin;
        };
        let target = if self.target { 1.0 } else { 0.0 };
        let progress =
            (now.duration_since(changed_at).as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.origin + (target - self.origin) * progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_starts_at_zero_and_advances_per_cycle() {
        let mut driver = PhaseDriver::new(Duration::from_secs(2));
        let start = Instant::now();
        assert_eq!(driver.phase_factor_at(start), 0.0);
        assert_eq!(driver.phase_factor_at(start + Duration::from_secs(1)), 0.5);
        assert_eq!(driver.phase_factor_at(start + Duration::from_secs(5)), 2.5);
    }

    #[test]
    fn transition_is_settled_until_toggled() {
        let now = Instant::now();
        let transition = EnableTransition::new(Duration::from_secs(1), true);
        assert_eq!(transition.blend_at(now), 1.0);
        assert_eq!(transition.blend_at(now + Duration::from_secs(60)), 1.0);

        let transition = EnableTransition::new(Duration::from_secs(1), false);
        assert_eq!(transition.blend_at(now), 0.0);
    }

    #[test]
    fn transition_ramps_towards_target() {
        let start = Instant::now();
        let mut transition = EnableTransition::new(Duration::from_secs(2), true);
        transition.set_enabled(false, start);
        assert!(!transition.is_enabled());
        assert_eq!(transition.blend_at(start), 1.0);
        assert_eq!(transition.blend_at(start + Duration::from_secs(1)), 0.5);
        assert_eq!(transition.blend_at(start + Duration::from_secs(2)), 0.0);
        assert_eq!(transition.blend_at(start + Duration::from_secs(10)), 0.0);
    }

    #[test]
    fn mid_transition_toggle_reverses_from_current_blend() {
        let start = Instant::now();
        let mut transition = EnableTransition::new(Duration::from_secs(2), true);
        transition.set_enabled(false, start);
        // half-way down, flip back up
        let mid = start + Duration::from_secs(1);
        transition.set_enabled(true, mid);
        assert_eq!(transition.blend_at(mid), 0.5);
        assert_eq!(transition.blend_at(mid + Duration::from_secs(1)), 0.75);
        assert_eq!(transition.blend_at(mid + Duration::from_secs(2)), 1.0);
    }

    #[test]
    fn redundant_toggle_is_ignored() {
        let start = Instant::now();
        let mut transition = EnableTransition::new(Duration::from_secs(2), true);
        transition.set_enabled(true, start);
        assert_eq!(transition.blend_at(start + Duration::from_secs(1)), 1.0);
    }
}
