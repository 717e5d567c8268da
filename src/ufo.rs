/// Timer-driven lifecycle of the bonus UFO.
///
/// ```text
/// Pending --countdown expires--> Transiting --exits right / shot down--> Idle --re-arm--> Pending
/// ```
///
/// `Idle` only lasts until the end of the frame in which the UFO left.

use std::ops::Range;

use rand::Rng;

use crate::entities::{Position, Ufo};
use crate::sprites::UFO_WIDTH;

/// Frames between one-cell steps of a transiting UFO.
pub const UFO_STEP_EVERY: u64 = 3;
/// Seconds until the next UFO appears, drawn uniformly from this range.
pub const UFO_DELAY_SECS: Range<u64> = 15..35;
pub const UFO_ROW: i32 = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum UfoState {
    /// Countdown running; frames left until spawn.
    Pending { remaining: u64 },
    Transiting(Ufo),
    /// Absent with no countdown armed.
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UfoEvent {
    Spawned,
    Exited,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UfoSpawner {
    state: UfoState,
    fps: u64,
}

impl UfoSpawner {
    /// A spawner with a freshly armed countdown.
    pub fn new(fps: u32, rng: &mut impl Rng) -> Self {
        let mut spawner = Self::with_state(fps, UfoState::Idle);
        spawner.arm(rng);
        spawner
    }

    pub fn with_state(fps: u32, state: UfoState) -> Self {
        Self {
            state,
            fps: u64::from(fps.max(1)),
        }
    }

    pub fn state(&self) -> &UfoState {
        &self.state
    }

    pub fn ufo(&self) -> Option<&Ufo> {
        match &self.state {
            UfoState::Transiting(ufo) => Some(ufo),
            _ => None,
        }
    }

    pub fn is_transiting(&self) -> bool {
        matches!(self.state, UfoState::Transiting(_))
    }

    /// Move a transiting UFO one cell right on its cadence. Once it has fully
    /// passed the right edge it is removed and a new countdown armed.
    pub fn advance(&mut self, frame: u64, width: u16, rng: &mut impl Rng) -> Option<UfoEvent> {
        let UfoState::Transiting(ufo) = &mut self.state else {
            return None;
        };
        if frame % UFO_STEP_EVERY != 0 {
            return None;
        }

        ufo.entity.pos.x += 1;
        if ufo.entity.pos.x > i32::from(width) {
            tracing::debug!("ufo left the screen");
            self.arm(rng);
            return Some(UfoEvent::Exited);
        }
        None
    }

    /// Remove a transiting UFO that was shot down.
    pub fn destroy(&mut self) -> Option<Ufo> {
        match std::mem::replace(&mut self.state, UfoState::Idle) {
            UfoState::Transiting(ufo) => Some(ufo),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Run the countdown for one frame, spawning at the left edge on expiry.
    /// An idle spawner is re-armed instead.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Option<UfoEvent> {
        match &mut self.state {
            UfoState::Pending { remaining } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.state = UfoState::Transiting(Ufo::new(Position::new(-UFO_WIDTH, UFO_ROW)));
                    tracing::debug!("ufo spawned");
                    return Some(UfoEvent::Spawned);
                }
                None
            }
            UfoState::Idle => {
                self.arm(rng);
                None
            }
            UfoState::Transiting(_) => None,
        }
    }

    fn arm(&mut self, rng: &mut impl Rng) {
        let remaining = rng.gen_range(UFO_DELAY_SECS) * self.fps;
        self.state = UfoState::Pending { remaining };
    }
}
