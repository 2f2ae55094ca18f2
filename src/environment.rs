// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Atmosphere

use serde::{Deserialize, Serialize};

use crate::params::SEA_LEVEL_PRESSURE;

const BAROMETRIC_SCALE_HEIGHT: f64 = 44_330.0;
const BAROMETRIC_EXPONENT: f64 = 5.255;
const SEA_LEVEL_TEMPERATURE: f64 = 15.0;
const LAPSE_RATE: f64 = 0.0065;
const GAS_CONSTANT_DRY_AIR: f64 = 287.05;
const KELVIN_OFFSET: f64 = 273.15;

/// Ambient air at a given altitude, ISA troposphere approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientConditions {
    /// Static pressure (Pa).
    pub pressure: f64,
    /// Outside air temperature (°C).
    pub temperature: f64,
    /// Air density (kg/m³).
    pub density: f64,
}

impl AmbientConditions {
    pub fn at_altitude(altitude: f64) -> Self {
        let pressure = SEA_LEVEL_PRESSURE
            * (1.0 - altitude / BAROMETRIC_SCALE_HEIGHT).powf(BAROMETRIC_EXPONENT);
        let temperature = SEA_LEVEL_TEMPERATURE - LAPSE_RATE * altitude;
        let density = pressure / (GAS_CONSTANT_DRY_AIR * (temperature + KELVIN_OFFSET));
        Self { pressure, temperature, density }
    }

    /// Pressure deficit relative to sea level (kPa).
    pub fn pressure_differential_kpa(&self) -> f64 {
        (SEA_LEVEL_PRESSURE - self.pressure) / 1000.0
    }
}
