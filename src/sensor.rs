// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Sensor Noise Model
//
// Noise is written straight into the published state; there is no separate
// ground-truth copy. Drift (a fault) is applied before the Gaussian noise.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::faults::FaultFlags;
use crate::params::NoiseConfig;
use crate::types::SimulationState;

pub struct SensorNoise {
    config: NoiseConfig,
    rng: ChaCha8Rng,
}

impl SensorNoise {
    pub fn new(config: NoiseConfig, seed: u64) -> Self {
        Self { config, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Zero-mean normal sample via the Box–Muller transform.
    pub fn gaussian(&mut self, mean: f64, std: f64) -> f64 {
        // 1 - [0, 1) keeps ln() finite
        let u = 1.0 - self.rng.gen::<f64>();
        let v = self.rng.gen::<f64>();
        let z = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
        z * std + mean
    }

    /// Fractional bias the drift fault adds at simulated time `t`.
    pub fn drift_factor(&self, t: f64) -> f64 {
        (t * self.config.drift_rate).sin() * self.config.drift_amplitude
    }

    pub fn apply(&mut self, state: &mut SimulationState, faults: &FaultFlags, current_time: f64) {
        if faults.sensor_drift {
            let drift = self.drift_factor(current_time);
            state.altitude += state.altitude * drift;
            state.fuel_pressure += state.fuel_pressure * drift;
            state.engine_rpm += state.engine_rpm * drift;
        }

        if !self.config.enabled {
            return;
        }
        let c = self.config.clone();
        state.altitude += self.gaussian(0.0, c.altitude_std);
        state.fuel_pressure += self.gaussian(0.0, c.fuel_pressure_std);
        state.engine_rpm += self.gaussian(0.0, c.engine_rpm_std);
        // a closed fuel line reads exactly zero
        if state.throttle > 0.0 {
            state.fuel_flow_rate += self.gaussian(0.0, c.fuel_flow_std);
        }
        state.fuel_temperature += self.gaussian(0.0, c.fuel_temperature_std);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cruise_state() -> SimulationState {
        SimulationState {
            altitude: 1000.0,
            throttle: 100.0,
            fuel_pressure: 40.0,
            engine_rpm: 100.0,
            fuel_flow_rate: 240.0,
            fuel_temperature: 30.0,
            ..SimulationState::default()
        }
    }

    #[test]
    fn gaussian_moments_are_plausible() {
        let mut noise = SensorNoise::new(NoiseConfig::default(), 1);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| noise.gaussian(0.0, 2.0)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!(mean.abs() < 0.1, "mean drifted: {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std off: {}", var.sqrt());
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn same_seed_same_noise() {
        let mut a = SensorNoise::new(NoiseConfig::default(), 9);
        let mut b = SensorNoise::new(NoiseConfig::default(), 9);
        for _ in 0..50 {
            assert_eq!(a.gaussian(0.0, 1.0), b.gaussian(0.0, 1.0));
        }
    }

    #[test]
    fn disabled_noise_without_drift_is_identity() {
        let mut noise = SensorNoise::new(NoiseConfig::disabled(), 3);
        let mut state = cruise_state();
        noise.apply(&mut state, &FaultFlags::default(), 12.3);
        assert_eq!(state, cruise_state());
    }

    #[test]
    fn drift_biases_three_channels() {
        let mut noise = SensorNoise::new(NoiseConfig::disabled(), 3);
        let faults = FaultFlags { sensor_drift: true, ..Default::default() };
        let t = 15.0;
        let factor = (t * 0.1_f64).sin() * 0.01;
        let mut state = cruise_state();
        noise.apply(&mut state, &faults, t);
        assert_relative_eq!(state.altitude, 1000.0 * (1.0 + factor), epsilon = 1e-9);
        assert_relative_eq!(state.fuel_pressure, 40.0 * (1.0 + factor), epsilon = 1e-9);
        assert_relative_eq!(state.engine_rpm, 100.0 * (1.0 + factor), epsilon = 1e-9);
        assert_eq!(state.fuel_flow_rate, 240.0);
        assert_eq!(state.fuel_temperature, 30.0);
    }

    #[test]
    fn no_flow_noise_at_idle() {
        let mut noise = SensorNoise::new(NoiseConfig::default(), 5);
        let mut state = SimulationState { throttle: 0.0, fuel_flow_rate: 0.0, ..cruise_state() };
        for t in 0..100 {
            noise.apply(&mut state, &FaultFlags::default(), t as f64 * 0.1);
            assert_eq!(state.fuel_flow_rate, 0.0);
        }
    }

    #[test]
    fn enabled_noise_touches_five_channels_only() {
        let mut noise = SensorNoise::new(NoiseConfig::default(), 5);
        let mut state = cruise_state();
        noise.apply(&mut state, &FaultFlags::default(), 1.0);
        let base = cruise_state();
        assert_ne!(state.altitude, base.altitude);
        assert_ne!(state.fuel_temperature, base.fuel_temperature);
        assert_eq!(state.throttle, base.throttle);
        assert_eq!(state.air_density, base.air_density);
        assert_eq!(state.injector_duty_cycle, base.injector_duty_cycle);
    }
}
