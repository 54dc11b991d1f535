//! Continuous animation widget: a phase clock and its derived sample.
//!
//! The animation has no external mutation input at all. Its state is a
//! tick counter advanced once per base-timer tick; the phase and every
//! derived field (RGB color, orbit position) are pure functions of that
//! counter, so a sample after `k` ticks is bit-for-bit reproducible
//! from `k` alone.
//!
//! The phase advances by `2*pi / (5 s * 30 ticks/s)` per tick, one full
//! rotation every five seconds. Color channels sit at independent phase
//! offsets of `0`, `pi`, and `3*pi/2`; each is scaled by 255, rounded,
//! and clamped to the unsigned 8-bit range.
//!
//! This is the only widget whose timer is stopped outright while the
//! subscriber set is empty (via [`Widget::idle_pauses_timer`]) and
//! restarted by the first subscribe.

use std::convert::Infallible;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

use liveboard_types::AnimationSample;

use crate::grid::GridError;
use crate::hub::Widget;

/// Animation timer ticks per second.
pub const TICKS_PER_SECOND: u32 = 30;

/// Period of the animation timer (1/30 s).
pub const TICK_PERIOD: Duration = Duration::from_micros(33_333);

/// Phase advance per tick: one full rotation every 5 seconds at 30
/// ticks per second, `2*pi / 150`.
pub const PHASE_STEP: f64 = TAU / 150.0;

/// Orbit radius in pixels.
const ORBIT_RADIUS: f64 = 50.0;

/// Orbit center coordinate (both axes) in pixels.
const ORBIT_CENTER: f64 = 100.0;

/// Tick counter from which the phase and sample are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationClock {
    ticks: u64,
}

impl AnimationClock {
    /// Start at phase zero.
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Number of ticks elapsed.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current phase in radians.
    ///
    /// Derived as `ticks * PHASE_STEP` rather than accumulated, so the
    /// value is exactly reproducible from the tick count.
    pub fn phase(&self) -> f64 {
        // Safe: the tick counter stays far below f64's exact-integer
        // range for any realistic process lifetime.
        #[allow(clippy::cast_precision_loss)]
        let ticks = self.ticks as f64;
        ticks * PHASE_STEP
    }

    /// Advance one tick and return the new sample.
    pub fn advance(&mut self) -> AnimationSample {
        self.ticks = self.ticks.saturating_add(1);
        self.sample()
    }

    /// The sample derived from the current phase.
    pub fn sample(&self) -> AnimationSample {
        sample_at(self.phase())
    }
}

/// Compute the full animation sample for a given phase.
pub fn sample_at(phase: f64) -> AnimationSample {
    AnimationSample {
        phase,
        red: channel(phase),
        green: channel(phase + PI),
        blue: channel(phase + 3.0 * FRAC_PI_2),
        x: orbit(phase.cos()),
        y: orbit(phase.sin()),
    }
}

/// Scale a cosine at the given phase offset into `0..=255`.
fn channel(theta: f64) -> u8 {
    let scaled = (theta.cos() * 255.0).round().clamp(0.0, 255.0);
    // Safe: clamped to 0..=255 above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        scaled as u8
    }
}

/// Map a unit circle coordinate onto the orbit.
fn orbit(unit: f64) -> i32 {
    let position = (unit * ORBIT_RADIUS + ORBIT_CENTER).round();
    // Safe: |unit| <= 1, so the position lies in [50, 150].
    #[allow(clippy::cast_possible_truncation)]
    {
        position as i32
    }
}

/// The animation widget driven by a broadcast hub.
#[derive(Debug, Default)]
pub struct Animation {
    clock: AnimationClock,
}

impl Animation {
    /// Create an animation at phase zero.
    pub const fn new() -> Self {
        Self {
            clock: AnimationClock::new(),
        }
    }
}

impl Widget for Animation {
    // No external mutation input exists for this widget.
    type Command = Infallible;
    type Update = AnimationSample;
    type Snapshot = AnimationSample;

    const NAME: &'static str = "anim";

    fn tick_period(&self) -> Option<Duration> {
        Some(TICK_PERIOD)
    }

    fn idle_pauses_timer(&self) -> bool {
        true
    }

    fn apply(&mut self, command: Infallible) -> Result<Option<AnimationSample>, GridError> {
        match command {}
    }

    fn on_tick(&mut self, _watchers: usize) -> Option<AnimationSample> {
        Some(self.clock.advance())
    }

    fn snapshot(&self) -> AnimationSample {
        self.clock.sample()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn phase_is_reproducible_from_the_tick_count() {
        let mut clock = AnimationClock::new();
        for _ in 0..1000 {
            let _ = clock.advance();
        }
        assert_eq!(clock.ticks(), 1000);
        assert_eq!(clock.phase(), 1000.0 * PHASE_STEP);
    }

    #[test]
    fn sample_matches_the_closed_form() {
        let mut clock = AnimationClock::new();
        let mut last = clock.sample();
        for _ in 0..150 {
            last = clock.advance();
        }
        // One full rotation: 150 ticks * (2*pi / 150).
        assert_eq!(last, sample_at(150.0 * PHASE_STEP));
    }

    #[test]
    fn phase_only_increases() {
        let mut clock = AnimationClock::new();
        let mut previous = clock.phase();
        for _ in 0..500 {
            let sample = clock.advance();
            assert!(sample.phase > previous);
            previous = sample.phase;
        }
    }

    #[test]
    fn channels_have_independent_phases() {
        let sample = sample_at(0.0);
        // cos(0) = 1, cos(pi) = -1 (clamped), cos(3*pi/2) = 0.
        assert_eq!(sample.red, 255);
        assert_eq!(sample.green, 0);
        assert_eq!(sample.blue, 0);

        let quarter = sample_at(FRAC_PI_2);
        // cos(pi/2) = 0, cos(3*pi/2) = 0, cos(2*pi) = 1.
        assert_eq!(quarter.red, 0);
        assert_eq!(quarter.green, 0);
        assert_eq!(quarter.blue, 255);
    }

    #[test]
    fn orbit_stays_within_the_circle() {
        let start = sample_at(0.0);
        assert_eq!(start.x, 150);
        assert_eq!(start.y, 100);

        for tick in 0..300_u32 {
            let sample = sample_at(f64::from(tick) * PHASE_STEP);
            assert!((50..=150).contains(&sample.x));
            assert!((50..=150).contains(&sample.y));
        }
    }
}
