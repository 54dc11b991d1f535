//! Three-tier adaptive tick countdown for the Game of Life widget.
//!
//! The simulation runs off a fixed 500 ms base timer, but how many base
//! ticks pass between generations depends on who is watching and what
//! they just did:
//!
//! - [`Tier::Idle`] -- nobody is subscribed; the board is left alone for
//!   a 30-second window so an unwatched simulation costs nothing.
//! - [`Tier::Active`] -- at least one watcher; a generation advances on
//!   every base tick.
//! - [`Tier::PostEdit`] -- a viewer just flipped a tile; the simulation
//!   holds for two seconds so the edit is not immediately overwritten by
//!   the next generation.
//!
//! The countdown is decrement-then-check: [`TickSchedule::fire`]
//! decrements first and reports due when the counter reaches zero, so an
//! Active countdown of 1 fires on every base tick and a fresh subscriber
//! (which re-arms Active) sees the very next tick advance a generation.

use std::time::Duration;

/// Period of the base timer driving all scheduling decisions.
pub const BASE_TICK: Duration = Duration::from_millis(500);

/// Base ticks per second (1000 / 500).
const TICKS_PER_SECOND: u64 = 2;

/// Scheduling tier the countdown is armed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// No subscribers: hold for a long window without computing.
    Idle,
    /// Watched: advance on every base tick.
    Active,
    /// A manual edit just landed: hold briefly before resuming.
    PostEdit,
}

impl Tier {
    /// Number of base ticks this tier waits between generations.
    pub const fn ticks(self) -> u64 {
        match self {
            Self::Idle => 30 * TICKS_PER_SECOND,
            Self::Active => 1,
            Self::PostEdit => 2 * TICKS_PER_SECOND,
        }
    }
}

/// Countdown-to-next-generation state, mutated only by the hub worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    countdown: u64,
}

impl TickSchedule {
    /// Start in the idle tier, matching a freshly created, unwatched board.
    pub const fn new() -> Self {
        Self {
            countdown: Tier::Idle.ticks(),
        }
    }

    /// Re-arm the countdown for the given tier.
    pub const fn arm(&mut self, tier: Tier) {
        self.countdown = tier.ticks();
    }

    /// Consume one base tick. Returns `true` when a generation is due.
    ///
    /// The caller is expected to re-arm immediately after a `true`
    /// result; until it does, every subsequent tick stays due.
    pub const fn fire(&mut self) -> bool {
        self.countdown = self.countdown.saturating_sub(1);
        self.countdown == 0
    }

    /// Remaining base ticks before the next generation is due.
    pub const fn remaining(&self) -> u64 {
        self.countdown
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_the_idle_tier() {
        let schedule = TickSchedule::new();
        assert_eq!(schedule.remaining(), Tier::Idle.ticks());
    }

    #[test]
    fn active_tier_fires_on_every_tick() {
        let mut schedule = TickSchedule::new();
        schedule.arm(Tier::Active);
        assert!(schedule.fire());
        schedule.arm(Tier::Active);
        assert!(schedule.fire());
    }

    #[test]
    fn idle_tier_holds_for_the_full_window() {
        let mut schedule = TickSchedule::new();
        let window = Tier::Idle.ticks();
        for tick in 1..window {
            assert!(!schedule.fire(), "fired early at tick {tick}");
        }
        assert!(schedule.fire());
    }

    #[test]
    fn post_edit_tier_debounces_for_two_seconds() {
        let mut schedule = TickSchedule::new();
        schedule.arm(Tier::PostEdit);
        assert!(!schedule.fire());
        assert!(!schedule.fire());
        assert!(!schedule.fire());
        assert!(schedule.fire());
    }

    #[test]
    fn stays_due_until_rearmed() {
        let mut schedule = TickSchedule::new();
        schedule.arm(Tier::Active);
        assert!(schedule.fire());
        assert!(schedule.fire());
        schedule.arm(Tier::Idle);
        assert!(!schedule.fire());
    }
}
