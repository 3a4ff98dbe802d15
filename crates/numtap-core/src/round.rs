//! Round state machine
//!
//! Owns the single active round and drives its timed choreography:
//!
//! - a tap below the target counts and pops,
//! - the completing tap counts and pops now, flips to `Success` after the reveal
//!   delay (celebration effects and fanfare start there) and starts the next
//!   round after the success dwell,
//! - an over-count flips to `TooMany` at once and starts the next round after
//!   the shorter dwell.
//!
//! Time is a logical clock advanced by the host. Every delayed effect is a timer
//! tagged with the round generation that scheduled it; a timer whose generation
//! is no longer current is dropped without touching state.

use crate::audio::cues::{play_celebration, play_pop};
use crate::audio::ToneScheduler;
use crate::config::RoundTiming;
use crate::effects::Celebration;
use crate::error::ConfigError;
use crate::target::{next_target, TARGET_MAX, TARGET_MIN};
use crate::timer::{Generation, TimerQueue};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Events kept for the host between drains; older ones are dropped first
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Status of the active round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Waiting for taps
    Playing,
    /// Target matched; celebration running
    Success,
    /// Counted past the target
    TooMany,
}

/// Something observable that happened, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A new round began
    RoundStarted {
        /// Round generation
        generation: Generation,
        /// Numeral to match
        target: u32,
    },
    /// A tap was counted
    TapCounted {
        /// Tap count after this tap
        count: u32,
        /// Numeral to match
        target: u32,
    },
    /// A tap arrived outside of `Playing` and was dropped
    TapIgnored {
        /// Status at the time
        status: RoundStatus,
    },
    /// The pop cue was sent to the scheduler
    PopCue,
    /// `Success` was entered; effects generated and fanfare sent
    CelebrationStarted,
    /// `TooMany` was entered
    TooMany {
        /// Tap count that overshot
        count: u32,
        /// Numeral to match
        target: u32,
    },
}

/// Read-only view of the active round for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    /// Round generation
    pub generation: Generation,
    /// Numeral to match
    pub target: u32,
    /// Taps counted this round
    pub tap_count: u32,
    /// Round status
    pub status: RoundStatus,
    /// Number of filled counting dots (`min(tap_count, target)`)
    pub filled_dots: u32,
    /// Celebration effects, present only while in `Success`
    pub celebration: Option<Arc<Celebration>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    RevealSuccess,
    StartNextRound,
}

/// The game controller: one active round plus its pending timers
pub struct RoundMachine<R: Rng> {
    timing: RoundTiming,
    scheduler: Box<dyn ToneScheduler>,
    rng: R,
    clock: Duration,
    generation: Generation,
    target: u32,
    tap_count: u32,
    status: RoundStatus,
    celebration: Option<Arc<Celebration>>,
    timers: TimerQueue<TimerAction>,
    events: VecDeque<GameEvent>,
    running: bool,
}

impl<R: Rng> RoundMachine<R> {
    /// Start the first round with a uniformly drawn target.
    ///
    /// The first draw has no previous numeral to exclude.
    pub fn new(timing: RoundTiming, scheduler: Box<dyn ToneScheduler>, mut rng: R) -> Self {
        let target = next_target(&mut rng, None);
        Self::start(timing, scheduler, rng, target)
    }

    /// Start the first round with a fixed target
    pub fn with_initial_target(
        timing: RoundTiming,
        scheduler: Box<dyn ToneScheduler>,
        rng: R,
        target: u32,
    ) -> Result<Self, ConfigError> {
        if !(TARGET_MIN..=TARGET_MAX).contains(&target) {
            return Err(ConfigError::TargetOutOfRange(target));
        }
        Ok(Self::start(timing, scheduler, rng, target))
    }

    fn start(timing: RoundTiming, scheduler: Box<dyn ToneScheduler>, rng: R, target: u32) -> Self {
        info!("Round 0 started, target {}", target);
        Self {
            timing,
            scheduler,
            rng,
            clock: Duration::ZERO,
            generation: 0,
            target,
            tap_count: 0,
            status: RoundStatus::Playing,
            celebration: None,
            timers: TimerQueue::new(),
            events: VecDeque::from([GameEvent::RoundStarted {
                generation: 0,
                target,
            }]),
            running: true,
        }
    }

    /// Handle one tap at the current clock
    pub fn tap(&mut self) {
        if !self.running {
            return;
        }
        if self.status != RoundStatus::Playing {
            debug!("Tap ignored while {:?}", self.status);
            self.record(GameEvent::TapIgnored {
                status: self.status,
            });
            return;
        }

        self.tap_count += 1;
        let count = self.tap_count;
        let target = self.target;
        self.record(GameEvent::TapCounted { count, target });

        match count.cmp(&target) {
            Ordering::Less => {
                self.pop();
            }
            Ordering::Equal => {
                self.pop();
                let reveal_at = self.clock + self.timing.success_reveal();
                let advance_at = self.clock + self.timing.success_dwell();
                self.timers
                    .schedule(reveal_at, self.generation, TimerAction::RevealSuccess);
                self.timers
                    .schedule(advance_at, self.generation, TimerAction::StartNextRound);
                debug!("Target {} reached, success reveal at {:?}", target, reveal_at);
            }
            Ordering::Greater => {
                self.set_status(RoundStatus::TooMany);
                self.record(GameEvent::TooMany { count, target });
                let advance_at = self.clock + self.timing.too_many_dwell();
                self.timers
                    .schedule(advance_at, self.generation, TimerAction::StartNextRound);
                debug!("Too many taps ({} > {})", count, target);
            }
        }
    }

    /// Move the clock forward by `dt` and run every timer that comes due
    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        self.clock += dt;

        while let Some(timer) = self.timers.pop_due(self.clock) {
            if timer.generation != self.generation {
                trace!(
                    "Dropping stale timer {:?} from generation {}",
                    timer.handle,
                    timer.generation
                );
                continue;
            }
            match timer.payload {
                TimerAction::RevealSuccess => self.enter_success(),
                TimerAction::StartNextRound => self.start_next_round(),
            }
        }
    }

    /// Cancel all pending timers and scheduled audio.
    ///
    /// The machine is inert afterwards. Called automatically on drop.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        let cancelled = self.timers.cancel_all();
        self.scheduler.cancel_all();
        info!("Game shut down, {} pending timers cancelled", cancelled);
    }

    fn pop(&mut self) {
        play_pop(self.scheduler.as_mut());
        self.record(GameEvent::PopCue);
    }

    fn enter_success(&mut self) {
        if self.status != RoundStatus::Playing {
            debug!("Success reveal skipped, round already {:?}", self.status);
            return;
        }
        self.set_status(RoundStatus::Success);
        self.celebration = Some(Arc::new(Celebration::generate(&mut self.rng)));
        play_celebration(self.scheduler.as_mut(), &mut self.rng);
        self.record(GameEvent::CelebrationStarted);
        info!("Round {} matched target {}", self.generation, self.target);
    }

    fn start_next_round(&mut self) {
        let previous = self.target;
        let superseded = self.timers.cancel_generation(self.generation);
        if superseded > 0 {
            trace!("Cancelled {} timers of generation {}", superseded, self.generation);
        }

        self.generation += 1;
        self.target = next_target(&mut self.rng, Some(previous));
        self.tap_count = 0;
        self.status = RoundStatus::Playing;
        self.celebration = None;

        self.record(GameEvent::RoundStarted {
            generation: self.generation,
            target: self.target,
        });
        info!("Round {} started, target {}", self.generation, self.target);
    }

    fn record(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn set_status(&mut self, next: RoundStatus) {
        debug_assert_eq!(
            self.status,
            RoundStatus::Playing,
            "status may only leave Playing"
        );
        self.status = next;
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            generation: self.generation,
            target: self.target,
            tap_count: self.tap_count,
            status: self.status,
            filled_dots: self.tap_count.min(self.target),
            celebration: self.celebration.clone(),
        }
    }

    /// Take every event recorded since the last call
    ///
    /// At most [`EVENT_LOG_CAPACITY`] are retained; a host that never drains
    /// only loses the oldest ones.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Numeral to match
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Taps counted this round
    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Round status
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Round generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Logical clock
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Celebration effects of the current round, if any
    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_deref()
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Clock value of the next pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// False once shut down
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl<R: Rng> Drop for RoundMachine<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullScheduler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn machine(target: u32) -> RoundMachine<StdRng> {
        RoundMachine::with_initial_target(
            RoundTiming::default(),
            Box::new(NullScheduler),
            StdRng::seed_from_u64(9),
            target,
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let game = machine(3);
        assert_eq!(game.status(), RoundStatus::Playing);
        assert_eq!(game.tap_count(), 0);
        assert_eq!(game.generation(), 0);
        assert_eq!(game.pending_timers(), 0);
        assert!(game.celebration().is_none());
    }

    #[test]
    fn test_rejects_out_of_range_target() {
        let result = RoundMachine::with_initial_target(
            RoundTiming::default(),
            Box::new(NullScheduler),
            StdRng::seed_from_u64(9),
            6,
        );
        assert!(matches!(result, Err(ConfigError::TargetOutOfRange(6))));
    }

    #[test]
    fn test_completing_tap_schedules_two_timers() {
        let mut game = machine(1);
        game.tap();
        assert_eq!(game.pending_timers(), 2);
        assert_eq!(game.next_deadline(), Some(Duration::from_millis(400)));
        assert_eq!(game.status(), RoundStatus::Playing);
    }

    #[test]
    fn test_stale_reveal_is_inert() {
        let mut game = machine(1);
        game.tap();
        // Extra tap inside the reveal window overshoots
        game.tap();
        assert_eq!(game.status(), RoundStatus::TooMany);

        game.advance(Duration::from_millis(400));
        assert_eq!(game.status(), RoundStatus::TooMany);
        assert!(game.celebration().is_none());

        game.advance(Duration::from_millis(600));
        assert_eq!(game.status(), RoundStatus::Playing);
        assert_eq!(game.generation(), 1);
        // The success dwell of the old round was cancelled with it
        assert_eq!(game.pending_timers(), 0);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut game = machine(2);
        game.tap();
        game.tap();
        game.shutdown();
        game.shutdown();
        assert!(!game.is_running());
        assert_eq!(game.pending_timers(), 0);

        game.advance(Duration::from_secs(20));
        assert_eq!(game.status(), RoundStatus::Playing);
        assert_eq!(game.tap_count(), 2);
    }
}
