//! Platform abstraction layer
//!
//! The simulation never reads a clock. Hosts feed real frame time into a
//! [`FrameClock`] and run as many fixed ticks as it hands back.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::SIM_DT;
use crate::settings::Settings;

/// Longest frame honored; anything slower (tab switch, debugger) is cut
pub const MAX_FRAME_SECS: f32 = 0.1;

/// Fixed timestep accumulator
///
/// The tick length is always [`SIM_DT`]: physics constants are per tick.
pub struct FrameClock {
    /// The fixed delta time per tick
    dt: f32,
    max_substeps: u32,
    /// Accumulated time from variable frame deltas
    accumulator: f32,
}

impl FrameClock {
    pub fn new(max_substeps: u32) -> Self {
        Self {
            dt: SIM_DT,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_substeps)
    }

    /// Add frame time; returns the number of fixed ticks to run now
    ///
    /// At most `max_substeps` ticks are returned per frame to prevent a
    /// spiral of death. Time owed beyond that is dropped.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_SECS);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).clamp(0.0, 1.0)
    }

    /// The fixed delta time
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_exact() {
        let mut clock = FrameClock::new(4);
        assert_eq!(clock.accumulate(clock.dt()), 1);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new(4);
        assert_eq!(clock.accumulate(0.008), 0);
        assert_eq!(clock.accumulate(0.010), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new(4);
        assert_eq!(clock.accumulate(1.0), 4);
        // Owed time was dropped: an idle frame runs at most one more tick
        assert!(clock.accumulate(0.0) <= 1);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut clock = FrameClock::new(4);
        assert_eq!(clock.accumulate(-5.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_alpha_in_range() {
        let mut clock = FrameClock::new(4);
        clock.accumulate(0.008);
        let alpha = clock.alpha();
        assert!((0.0..=1.0).contains(&alpha), "alpha was {alpha}");
        clock.reset();
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_steady_frames_average_out() {
        let mut clock = FrameClock::new(4);
        let ticks: u32 = (0..120).map(|_| clock.accumulate(1.0 / 120.0)).sum();
        assert!((59..=60).contains(&ticks));
    }

    #[test]
    fn test_game_speed_ignores_frame_rate() {
        // The same real second runs the same number of ticks at 30 or 144 fps
        let mut slow = FrameClock::new(4);
        let mut fast = FrameClock::new(4);
        let slow_ticks: u32 = (0..30).map(|_| slow.accumulate(1.0 / 30.0)).sum();
        let fast_ticks: u32 = (0..144).map(|_| fast.accumulate(1.0 / 144.0)).sum();
        assert!((59..=60).contains(&slow_ticks));
        assert!((59..=60).contains(&fast_ticks));
        assert_eq!(slow.dt(), SIM_DT);
    }

    #[test]
    fn test_settings_only_cap_substeps() {
        let settings = Settings {
            max_substeps: 2,
            ..Default::default()
        };
        let mut clock = FrameClock::from_settings(&settings);
        assert_eq!(clock.dt(), SIM_DT);
        assert_eq!(clock.accumulate(MAX_FRAME_SECS), 2);
    }
}
