// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Fault Injector
//
// Four independent switches. Each one perturbs the engine or fuel outputs on
// every tick it is set; nothing is latched when it is cleared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::EngineOutput;
use crate::error::SimError;
use crate::fuel::FuelOutput;
use crate::params::FaultResponse;

// ─── FaultKind ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FaultKind {
    CloggedInjector = 0,
    FuelOverheat = 1,
    RpmDrop = 2,
    SensorDrift = 3,
}

impl FaultKind {
    pub const ALL: [FaultKind; 4] = [
        Self::CloggedInjector,
        Self::FuelOverheat,
        Self::RpmDrop,
        Self::SensorDrift,
    ];

    /// Field name used in log exports and on the JS surface.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CloggedInjector => "cloggedInjector",
            Self::FuelOverheat => "fuelOverheat",
            Self::RpmDrop => "rpmDrop",
            Self::SensorDrift => "sensorDrift",
        }
    }

    /// Operator-facing phrase, e.g. "Clogged injector fault injected".
    pub fn label(&self) -> &'static str {
        match self {
            Self::CloggedInjector => "Clogged injector",
            Self::FuelOverheat => "Fuel overheat",
            Self::RpmDrop => "RPM drop",
            Self::SensorDrift => "Sensor drift",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FaultKind {
    type Err = SimError;

    /// Accepts the camelCase key or the snake_case warning-style name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cloggedInjector" | "clogged_injector" => Ok(Self::CloggedInjector),
            "fuelOverheat" | "fuel_overheat" => Ok(Self::FuelOverheat),
            "rpmDrop" | "rpm_drop" => Ok(Self::RpmDrop),
            "sensorDrift" | "sensor_drift" => Ok(Self::SensorDrift),
            other => Err(SimError::UnknownFault(other.to_string())),
        }
    }
}

// ─── FaultFlags ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultFlags {
    pub clogged_injector: bool,
    pub fuel_overheat: bool,
    pub rpm_drop: bool,
    pub sensor_drift: bool,
}

impl FaultFlags {
    pub fn get(&self, kind: FaultKind) -> bool {
        match kind {
            FaultKind::CloggedInjector => self.clogged_injector,
            FaultKind::FuelOverheat => self.fuel_overheat,
            FaultKind::RpmDrop => self.rpm_drop,
            FaultKind::SensorDrift => self.sensor_drift,
        }
    }

    /// Set a flag, returning the previous value.
    pub fn set(&mut self, kind: FaultKind, active: bool) -> bool {
        let slot = match kind {
            FaultKind::CloggedInjector => &mut self.clogged_injector,
            FaultKind::FuelOverheat => &mut self.fuel_overheat,
            FaultKind::RpmDrop => &mut self.rpm_drop,
            FaultKind::SensorDrift => &mut self.sensor_drift,
        };
        std::mem::replace(slot, active)
    }

    pub fn active(&self) -> impl Iterator<Item = FaultKind> + '_ {
        FaultKind::ALL.into_iter().filter(move |k| self.get(*k))
    }
}

// ─── Injection ───────────────────────────────────────────────────────────────

/// RPM-drop fault: multiplicative sag applied after the nominal computation.
pub fn apply_to_engine(flags: &FaultFlags, response: &FaultResponse, out: &mut EngineOutput) {
    if flags.rpm_drop {
        out.engine_rpm *= response.rpm_drop_factor;
    }
}

/// Clogged-injector and overheat faults, layered on the nominal fuel outputs.
///
/// The overheat ramp compounds with the thermal lag already applied and is
/// capped at the configured ceiling.
pub fn apply_to_fuel(flags: &FaultFlags, response: &FaultResponse, out: &mut FuelOutput, dt: f64) {
    if flags.clogged_injector {
        out.fuel_pressure *= response.clog_pressure_factor;
        out.fuel_flow_rate *= response.clog_flow_factor;
    }
    if flags.fuel_overheat {
        out.fuel_temperature += response.overheat_rate * dt;
        out.fuel_temperature = out.fuel_temperature.min(response.overheat_ceiling);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
