// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Type Definitions

use serde::{Deserialize, Serialize};

use crate::faults::FaultFlags;

// ─── Severity ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Critical = 2,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

// ─── Warning ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    CloggedInjector = 0,
    FuelOverheat = 1,
    RpmDroop = 2,
    SensorDrift = 3,
}

impl WarningKind {
    /// Stable key used by collaborators to look a warning up.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CloggedInjector => "clogged_injector",
            Self::FuelOverheat => "fuel_overheat",
            Self::RpmDroop => "rpm_droop",
            Self::SensorDrift => "sensor_drift",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::CloggedInjector => "Clogged Injector",
            Self::FuelOverheat => "Fuel Overheat",
            Self::RpmDroop => "RPM Droop",
            Self::SensorDrift => "Sensor Drift Detected",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::CloggedInjector | Self::FuelOverheat => Severity::Critical,
            Self::RpmDroop => Severity::Warning,
            Self::SensorDrift => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
    /// Simulated time (seconds) of the tick that asserted the warning.
    pub timestamp: f64,
}

impl Warning {
    pub fn new(kind: WarningKind, timestamp: f64) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: kind.message().to_string(),
            timestamp,
        }
    }
}

// ─── System Status ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Nominal = 0,
    Info = 1,
    Warning = 2,
    Critical = 3,
}

impl Default for SystemStatus {
    fn default() -> Self { SystemStatus::Nominal }
}

impl SystemStatus {
    /// Highest severity present, or `Nominal` for an empty set.
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        match warnings.iter().map(|w| w.severity).max() {
            Some(Severity::Critical) => Self::Critical,
            Some(Severity::Warning) => Self::Warning,
            Some(Severity::Info) => Self::Info,
            None => Self::Nominal,
        }
    }

    /// Operator panel text. Info-only sets still read as normal.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Info | Self::Nominal => "SYSTEM NORMAL",
        }
    }
}

// ─── Clock State ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Stopped = 0,
    Armed = 1,
    Running = 2,
    Paused = 3,
}

impl Default for ClockState {
    fn default() -> Self { ClockState::Stopped }
}

impl ClockState {
    /// Engine ignition is on (Armed, Running or Paused).
    pub fn engine_started(&self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

// ─── SimulationState ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub collective_pitch: f64,
    pub altitude: f64,
    pub vertical_velocity: f64,
    pub ambient_pressure: f64,
    pub ambient_temperature: f64,
    pub air_density: f64,
    pub throttle: f64,
    pub engine_load: f64,
    pub engine_rpm: f64,
    pub fuel_pressure: f64,
    pub fuel_temperature: f64,
    pub fuel_flow_rate: f64,
    pub injector_duty_cycle: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            collective_pitch: 60.0,
            altitude: 0.0,
            vertical_velocity: 0.0,
            ambient_pressure: 101_325.0,
            ambient_temperature: 15.0,
            air_density: 1.225,
            throttle: 0.0,
            engine_load: 0.0,
            engine_rpm: 100.0,
            fuel_pressure: 30.0,
            fuel_temperature: 15.0,
            fuel_flow_rate: 0.0,
            injector_duty_cycle: 0.0,
        }
    }
}

// ─── TickResult ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickResult {
    /// False when the clock was not running and nothing was stepped.
    pub advanced: bool,
    pub current_time: f64,
    pub clock: ClockState,
    pub state: SimulationState,
    pub faults: FaultFlags,
    pub warnings: Vec<Warning>,
    pub status: SystemStatus,
}
