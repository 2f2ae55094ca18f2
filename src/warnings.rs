// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Warning Evaluator
//
// The warning set is rebuilt from scratch every tick. The only memory is the
// RPM-droop debounce timer.

use serde::{Deserialize, Serialize};

use crate::faults::FaultFlags;
use crate::fuel;
use crate::params::AircraftSpecs;
use crate::types::{SimulationState, Warning, WarningKind};

/// Pressure shortfall below expected that reads as a clogged injector (bar).
pub const CLOG_PRESSURE_MARGIN: f64 = 2.5;
/// Fuel temperature above which overheat is annunciated (°C).
pub const OVERHEAT_THRESHOLD: f64 = 60.0;
/// Engine RPM below which droop is suspected (%).
pub const RPM_DROOP_THRESHOLD: f64 = 97.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningEvaluator {
    /// Consecutive ticks the RPM-low condition has held.
    rpm_low_ticks: u32,
    /// Step length seen on the last evaluation (s).
    step: f64,
    debounce: f64,
}

/// Tolerance on the held-time comparison so 30 summed 0.1 s steps equal 3 s.
const DEBOUNCE_EPSILON: f64 = 1e-9;

impl Default for WarningEvaluator {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl WarningEvaluator {
    pub fn new(debounce: f64) -> Self {
        Self { rpm_low_ticks: 0, step: 0.0, debounce }
    }

    /// Seconds the RPM-low condition has held without interruption.
    pub fn rpm_drop_timer(&self) -> f64 {
        self.rpm_low_ticks as f64 * self.step
    }

    pub fn reset(&mut self) {
        self.rpm_low_ticks = 0;
    }

    /// Derive the active warnings for the tick that just ran.
    ///
    /// Advances the droop timer by `dt` while the RPM-low condition holds and
    /// drops it to zero the moment it clears.
    pub fn evaluate(
        &mut self,
        specs: &AircraftSpecs,
        state: &SimulationState,
        faults: &FaultFlags,
        dt: f64,
        now: f64,
    ) -> Vec<Warning> {
        let mut warnings = Vec::with_capacity(4);

        let expected = fuel::expected_pressure(specs, state.throttle);
        if faults.clogged_injector || state.fuel_pressure < expected - CLOG_PRESSURE_MARGIN {
            warnings.push(Warning::new(WarningKind::CloggedInjector, now));
        }

        if faults.fuel_overheat || state.fuel_temperature > OVERHEAT_THRESHOLD {
            warnings.push(Warning::new(WarningKind::FuelOverheat, now));
        }

        self.step = dt;
        if faults.rpm_drop || state.engine_rpm < RPM_DROOP_THRESHOLD {
            self.rpm_low_ticks = self.rpm_low_ticks.saturating_add(1);
            if self.rpm_drop_timer() > self.debounce + DEBOUNCE_EPSILON {
                warnings.push(Warning::new(WarningKind::RpmDroop, now));
            }
        } else {
            self.rpm_low_ticks = 0;
        }

        if faults.sensor_drift {
            warnings.push(Warning::new(WarningKind::SensorDrift, now));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
