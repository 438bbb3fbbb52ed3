//! # Fixed-Interval Accumulator
//!
//! Turns variable frame deltas into a deterministic pass count.
//!
//! ## Design
//!
//! Every frame adds its delta to an accumulator. While the accumulator holds
//! at least one interval, one interval is subtracted and one pass is due.
//! Late frames therefore catch up instead of drifting, and the number of
//! passes over any span of frames depends only on the summed time.

use std::time::Duration;

/// Fixed-interval stepping controller.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval {
    /// Target time between passes.
    interval: Duration,
    /// Time not yet consumed by a pass.
    accumulator: Duration,
}

impl FixedInterval {
    /// Creates a controller for the given interval in seconds.
    ///
    /// Non-finite or non-positive values are clamped to one nanosecond; the
    /// configuration layer rejects them before they get here.
    #[must_use]
    pub fn from_secs(interval: f32) -> Self {
        Self {
            interval: Self::to_duration(interval),
            accumulator: Duration::ZERO,
        }
    }

    /// Changes the interval, keeping the accumulated time.
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = Self::to_duration(interval);
    }

    /// Returns the accumulated time not yet consumed.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Adds a frame delta and returns how many passes are now due.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn accumulate(&mut self, delta_secs: f32) -> u32 {
        if let Ok(delta) = Duration::try_from_secs_f32(delta_secs) {
            self.accumulator += delta;
        }

        let mut due = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            due += 1;
        }

        due
    }

    fn to_duration(secs: f32) -> Duration {
        Duration::try_from_secs_f32(secs)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(Duration::from_nanos(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catches_up_instead_of_drifting() {
        let mut timer = FixedInterval::from_secs(0.010);

        assert_eq!(timer.accumulate(0.025), 2);
        assert_eq!(timer.accumulate(0.005), 1);
        assert_eq!(timer.accumulate(0.004), 0);
        assert!(timer.pending() < Duration::from_millis(10));
    }

    #[test]
    fn test_pass_count_depends_only_on_total_time() {
        let mut steady = FixedInterval::from_secs(0.25);
        let mut jittery = FixedInterval::from_secs(0.25);

        let steady_passes: u32 = (0..8).map(|_| steady.accumulate(0.125)).sum();
        let jittery_passes: u32 = [0.5, 0.0, 0.25, 0.125, 0.125]
            .iter()
            .map(|&dt| jittery.accumulate(dt))
            .sum();

        assert_eq!(steady_passes, 4);
        assert_eq!(jittery_passes, 4);
    }

    #[test]
    fn test_invalid_deltas_ignored() {
        let mut timer = FixedInterval::from_secs(0.5);
        assert_eq!(timer.accumulate(-1.0), 0);
        assert_eq!(timer.accumulate(f32::NAN), 0);
        assert_eq!(timer.pending(), Duration::ZERO);
    }

    #[test]
    fn test_set_interval_keeps_accumulator() {
        let mut timer = FixedInterval::from_secs(1.0);
        assert_eq!(timer.accumulate(0.5), 0);
        timer.set_interval(0.25);
        assert_eq!(timer.accumulate(0.0), 2);
    }
}
