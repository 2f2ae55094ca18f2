// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Simulation Clock

//! Clock state machine and the fixed-step tick scheduler.
//!
//! The scheduler never runs the pipeline itself. It converts elapsed time
//! from an injectable [`Clock`] into a count of due ticks, so a controller
//! can drive the engine in real time while tests step it by hand.

use std::cell::Cell;
use std::time::Instant;

use crate::types::ClockState;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Ignition on, tick driver still disabled.
    Arm,
    Start,
    Stop,
    EmergencyStop,
    TogglePlayPause,
    Pause,
    Resume,
    Reset,
}

/// Resulting clock state for a transition. Transitions that make no sense
/// from the current state leave it unchanged.
pub fn next_state(current: ClockState, transition: Transition) -> ClockState {
    use ClockState::*;
    match (current, transition) {
        (Stopped, Transition::Arm) => Armed,
        (_, Transition::Arm) => current,
        (_, Transition::Start) => Running,
        (_, Transition::Stop | Transition::EmergencyStop | Transition::Reset) => Stopped,
        (Running, Transition::TogglePlayPause) => Paused,
        (_, Transition::TogglePlayPause) => Running,
        (Running, Transition::Pause) => Paused,
        (_, Transition::Pause) => current,
        (Paused, Transition::Resume) => Running,
        (_, Transition::Resume) => current,
    }
}

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock anchored at construction.
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-advanced clock for deterministic stepping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Absorbs float error when elapsed time is an exact multiple of the step.
const STEP_EPSILON: f64 = 1e-9;

/// Single-timer fixed-step scheduler.
pub struct TickScheduler<C: Clock> {
    clock: C,
    step: f64,
    /// Upper bound on ticks released by one poll, so a stalled host does
    /// not trigger an unbounded catch-up burst.
    max_catch_up: u32,
    last: Option<f64>,
    accumulated: f64,
}

impl<C: Clock> TickScheduler<C> {
    pub fn new(clock: C, step: f64) -> Self {
        Self { clock, step, max_catch_up: 50, last: None, accumulated: 0.0 }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Drop the pending timer. The next running poll starts a fresh period.
    pub fn cancel(&mut self) {
        self.last = None;
        self.accumulated = 0.0;
    }

    /// Number of ticks due since the previous poll.
    ///
    /// Outside `Running` the timer is cancelled and nothing is due; time spent
    /// paused or stopped is never replayed.
    pub fn poll(&mut self, state: ClockState) -> u32 {
        if state != ClockState::Running {
            self.cancel();
            return 0;
        }
        let now = self.clock.now();
        match self.last.replace(now) {
            Some(last) => self.accumulated += (now - last).max(0.0),
            None => return 0,
        }
        let due = ((self.accumulated / self.step) + STEP_EPSILON).floor();
        self.accumulated = (self.accumulated - due * self.step).max(0.0);
        let due = due as u32;
        if due > self.max_catch_up {
            self.accumulated = 0.0;
            return self.max_catch_up;
        }
        due
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
