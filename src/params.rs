// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Configuration

//! Tunable constants for the airframe, the fault responses and the sensor
//! noise model, grouped into a single [`SimConfig`] that can be loaded from
//! JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Sea-level standard pressure (Pa).
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
/// Sea-level standard air density (kg/m³).
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

// ---------------------------------------------------------------------------
// AircraftSpecs
// ---------------------------------------------------------------------------

/// Airframe, engine and fuel-system constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftSpecs {
    /// Gross mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Nominal hover trim of the collective (%).
    pub hover_pitch: f64,
    /// Per-tick velocity retention; stands in for drag.
    pub vertical_damping: f64,
    /// Fuel pressure at zero throttle (bar).
    pub base_fuel_pressure: f64,
    /// Governed RPM at sea level (%).
    pub engine_rpm_base: f64,
    /// Fuel density (kg/m³). Informational only.
    pub fuel_density: f64,
    /// Fuel flow at 100 % throttle, sea level (L/h).
    pub base_fuel_flow_at_max_throttle: f64,
    /// Service ceiling (m).
    pub max_altitude: f64,
    /// Lift per percent of collective at sea-level density (N).
    pub sea_level_lift_coefficient: f64,
    /// Fuel temperature rise above ambient at full throttle (°C).
    pub max_fuel_temp_increase: f64,
    /// First-order lag constant for fuel temperature (1/s).
    pub thermal_damping: f64,
}

impl Default for AircraftSpecs {
    fn default() -> Self {
        Self {
            mass: 5000.0,
            gravity: 9.81,
            hover_pitch: 60.0,
            vertical_damping: 0.95,
            base_fuel_pressure: 30.0,
            engine_rpm_base: 100.0,
            fuel_density: 810.0,
            base_fuel_flow_at_max_throttle: 240.0,
            max_altitude: 6000.0,
            sea_level_lift_coefficient: 911.7,
            max_fuel_temp_increase: 30.0,
            thermal_damping: 0.01,
        }
    }
}

// ---------------------------------------------------------------------------
// FaultResponse
// ---------------------------------------------------------------------------

/// How hard each injected fault pushes on the physical outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultResponse {
    pub clog_pressure_factor: f64,
    pub clog_flow_factor: f64,
    pub rpm_drop_factor: f64,
    /// Overheat ramp (°C per simulated second).
    pub overheat_rate: f64,
    /// Fuel temperature ceiling while the overheat fault is active (°C).
    pub overheat_ceiling: f64,
}

impl Default for FaultResponse {
    fn default() -> Self {
        Self {
            clog_pressure_factor: 0.85,
            clog_flow_factor: 0.80,
            rpm_drop_factor: 0.93,
            overheat_rate: 2.5,
            overheat_ceiling: 130.0,
        }
    }
}

// ---------------------------------------------------------------------------
// NoiseConfig
// ---------------------------------------------------------------------------

/// Gaussian measurement noise and sensor-drift shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Master switch. Disabled noise makes every tick deterministic.
    pub enabled: bool,
    pub altitude_std: f64,
    pub fuel_pressure_std: f64,
    pub engine_rpm_std: f64,
    pub fuel_flow_std: f64,
    pub fuel_temperature_std: f64,
    /// Peak fractional bias applied while the drift fault is active.
    pub drift_amplitude: f64,
    /// Angular rate of the drift oscillation (rad/s).
    pub drift_rate: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            altitude_std: 0.5,
            fuel_pressure_std: 0.1,
            engine_rpm_std: 0.2,
            fuel_flow_std: 0.1,
            fuel_temperature_std: 0.2,
            drift_amplitude: 0.01,
            drift_rate: 0.1,
        }
    }
}

impl NoiseConfig {
    /// Noise switched off, drift shape retained.
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and same inputs give the same run.
    pub seed: u64,
    /// Fixed simulation step (s).
    pub time_step: f64,
    /// Chart history capacity (samples).
    pub max_data_points: usize,
    /// Operator alert log capacity (entries).
    pub alert_log_capacity: usize,
    /// Sustained RPM-low time before `rpm_droop` is raised (s).
    pub rpm_droop_debounce: f64,
    pub specs: AircraftSpecs,
    pub faults: FaultResponse,
    pub noise: NoiseConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_step: 0.1,
            max_data_points: 600,
            alert_log_capacity: 50,
            rpm_droop_debounce: 3.0,
            specs: AircraftSpecs::default(),
            faults: FaultResponse::default(),
            noise: NoiseConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with sensor noise turned off.
    pub fn deterministic() -> Self {
        Self { noise: NoiseConfig::disabled(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<()> {
            Err(SimError::InvalidConfig { field, reason })
        }
        if !(self.time_step > 0.0) {
            return invalid("time_step", "must be positive");
        }
        if self.max_data_points == 0 {
            return invalid("max_data_points", "must be non-zero");
        }
        if !(self.specs.mass > 0.0) {
            return invalid("specs.mass", "must be positive");
        }
        if !(self.specs.max_altitude > 0.0) {
            return invalid("specs.max_altitude", "must be positive");
        }
        // The barometric formula is undefined above 44330 m.
        if self.specs.max_altitude >= 44_330.0 {
            return invalid("specs.max_altitude", "must be below 44330 m");
        }
        if !(0.0..=1.0).contains(&self.specs.vertical_damping) {
            return invalid("specs.vertical_damping", "must lie in [0, 1]");
        }
        if self.rpm_droop_debounce < 0.0 {
            return invalid("rpm_droop_debounce", "must not be negative");
        }
        let noise = &self.noise;
        let sigmas = [
            noise.altitude_std,
            noise.fuel_pressure_std,
            noise.engine_rpm_std,
            noise.fuel_flow_std,
            noise.fuel_temperature_std,
        ];
        if sigmas.iter().any(|s| *s < 0.0 || !s.is_finite()) {
            return invalid("noise", "standard deviations must be finite and non-negative");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
