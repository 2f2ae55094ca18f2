// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Fuel System Model

use serde::{Deserialize, Serialize};

use crate::environment::AmbientConditions;
use crate::params::{AircraftSpecs, SEA_LEVEL_DENSITY};

/// Pump pressure gain per percent throttle (bar).
const PRESSURE_PER_THROTTLE: f64 = 0.1;

/// Nominal fuel-system outputs for one tick, before fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelOutput {
    pub fuel_pressure: f64,
    pub fuel_flow_rate: f64,
    pub fuel_temperature: f64,
    pub injector_duty_cycle: f64,
}

/// Fuel pressure the pump should hold at a given throttle, no faults.
pub fn expected_pressure(specs: &AircraftSpecs, throttle: f64) -> f64 {
    specs.base_fuel_pressure + PRESSURE_PER_THROTTLE * throttle
}

/// Volumetric flow corrected for air density. Zero at or below idle throttle.
pub fn flow_rate(specs: &AircraftSpecs, throttle: f64, air_density: f64) -> f64 {
    if throttle <= 0.0 || air_density <= 0.0 {
        return 0.0;
    }
    let base_flow = specs.base_fuel_flow_at_max_throttle * throttle / 100.0;
    base_flow * (SEA_LEVEL_DENSITY / air_density)
}

/// First-order lag of the fuel temperature toward its throttle-dependent target.
pub fn relax_temperature(
    specs: &AircraftSpecs,
    current: f64,
    ambient_temperature: f64,
    throttle: f64,
    dt: f64,
) -> f64 {
    let target = ambient_temperature + specs.max_fuel_temp_increase * (throttle / 100.0);
    current + (target - current) * specs.thermal_damping * dt
}

/// Injector duty cycle (%) from an engine-cycle-time model.
///
/// The pulse width works out to exactly one cycle, so any running engine with
/// fuel flowing reads 100 %. Kept as the trainer has always displayed it.
pub fn duty_cycle(engine_rpm: f64, fuel_flow_rate: f64) -> f64 {
    if engine_rpm <= 0.0 || fuel_flow_rate <= 0.0 {
        return 0.0;
    }
    let cycle_time = 120.0 / engine_rpm;
    let volume_per_cycle = fuel_flow_rate / (3600.0 / cycle_time);
    let pulse_width = volume_per_cycle / (fuel_flow_rate / 3600.0);
    ((pulse_width / cycle_time) * 100.0).min(100.0)
}

pub fn compute(
    specs: &AircraftSpecs,
    throttle: f64,
    engine_rpm: f64,
    air: &AmbientConditions,
    prev_fuel_temperature: f64,
    dt: f64,
) -> FuelOutput {
    let fuel_flow_rate = flow_rate(specs, throttle, air.density);
    FuelOutput {
        fuel_pressure: expected_pressure(specs, throttle),
        fuel_flow_rate,
        fuel_temperature: relax_temperature(
            specs,
            prev_fuel_temperature,
            air.temperature,
            throttle,
            dt,
        ),
        injector_duty_cycle: duty_cycle(engine_rpm, fuel_flow_rate),
    }
}
