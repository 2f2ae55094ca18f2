// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Engine Model

use serde::{Deserialize, Serialize};

use crate::environment::AmbientConditions;
use crate::params::AircraftSpecs;

/// Collective-to-load gain: full load is reached at ~60 % collective.
const LOAD_PER_PITCH: f64 = 1.667;
/// RPM lost per kPa of pressure deficit.
const RPM_PER_KPA: f64 = 0.02;

/// Nominal engine outputs for one tick, before fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub engine_load: f64,
    /// Equal to `engine_load`: one control variable drives both.
    pub throttle: f64,
    pub engine_rpm: f64,
}

pub fn engine_load(collective_pitch: f64) -> f64 {
    (LOAD_PER_PITCH * collective_pitch).min(100.0)
}

pub fn compute(specs: &AircraftSpecs, collective_pitch: f64, air: &AmbientConditions) -> EngineOutput {
    let load = engine_load(collective_pitch);
    EngineOutput {
        engine_load: load,
        throttle: load,
        engine_rpm: specs.engine_rpm_base - RPM_PER_KPA * air.pressure_differential_kpa(),
    }
}
