// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Chart History
//
// Bounded per-channel series for the live charts. Oldest samples are dropped
// once the cap is reached.

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::SimulationState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSample {
    pub time: f64,
    pub altitude: f64,
    pub fuel_pressure: f64,
    pub engine_rpm: f64,
    pub fuel_flow_rate: f64,
    pub fuel_temperature: f64,
}

impl ChartSample {
    pub fn from_state(time: f64, state: &SimulationState) -> Self {
        Self {
            time,
            altitude: state.altitude,
            fuel_pressure: state.fuel_pressure,
            engine_rpm: state.engine_rpm,
            fuel_flow_rate: state.fuel_flow_rate,
            fuel_temperature: state.fuel_temperature,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartHistory {
    samples: VecDeque<ChartSample>,
    capacity: usize,
}

impl ChartHistory {
    pub fn new(capacity: usize) -> Self {
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn record(&mut self, time: f64, state: &SimulationState) {
        self.samples.push_back(ChartSample::from_state(time, state));
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartSample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<ChartSample> {
        self.samples.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_past_capacity() {
        let mut history = ChartHistory::new(3);
        let state = SimulationState::default();
        for i in 0..5 {
            history.record(i as f64, &state);
        }
        assert_eq!(history.len(), 3);
        let times: Vec<f64> = history.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn clear_empties() {
        let mut history = ChartHistory::new(2);
        history.record(0.1, &SimulationState::default());
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 2);
    }
}
