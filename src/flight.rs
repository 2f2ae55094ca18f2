// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Vertical Flight Dynamics
//
// Single-axis model: collective drives lift, lift fights gravity, a damped
// integrator stands in for drag. Not aerodynamically exact.

use crate::params::{AircraftSpecs, SEA_LEVEL_DENSITY};

/// Vertical state carried from tick to tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalState {
    pub altitude: f64,
    pub velocity: f64,
}

/// Rotor lift (N) for a collective setting in air of the given density.
pub fn lift_force(specs: &AircraftSpecs, collective_pitch: f64, air_density: f64) -> f64 {
    specs.sea_level_lift_coefficient * collective_pitch * (air_density / SEA_LEVEL_DENSITY)
}

pub fn vertical_acceleration(specs: &AircraftSpecs, collective_pitch: f64, air_density: f64) -> f64 {
    let gravity_force = specs.mass * specs.gravity;
    (lift_force(specs, collective_pitch, air_density) - gravity_force) / specs.mass
}

/// Advance altitude and vertical speed by one step.
///
/// `air_density` is the density published on the previous tick. Altitude is
/// clamped to `[0, max_altitude]`; touching the ground zeroes velocity.
pub fn integrate(
    specs: &AircraftSpecs,
    prev: VerticalState,
    collective_pitch: f64,
    air_density: f64,
    dt: f64,
) -> VerticalState {
    let accel = vertical_acceleration(specs, collective_pitch, air_density);
    let mut velocity = specs.vertical_damping * prev.velocity + accel * dt;
    let altitude = (prev.altitude + velocity * dt).clamp(0.0, specs.max_altitude);
    if altitude == 0.0 {
        velocity = 0.0;
    }
    VerticalState { altitude, velocity }
}
