// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Diagnostics
//
// Fault-response guidance for the trainee and per-component health for the
// fuel-system schematic. Both are derived views; neither feeds back into the
// physics.

use serde::Serialize;

use crate::faults::{FaultFlags, FaultKind};
use crate::types::{Severity, Warning, WarningKind};

// ─── Advisories ──────────────────────────────────────────────────────────────

pub const NOMINAL_ADVISORY: &str = "No faults detected. System nominal.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultAdvisory {
    pub fault: FaultKind,
    pub name: &'static str,
    pub affected_systems: &'static str,
    pub immediate_measures: &'static str,
    pub preferable_measures: &'static str,
}

pub fn advisory(kind: FaultKind) -> FaultAdvisory {
    let (name, affected_systems, immediate_measures, preferable_measures) = match kind {
        FaultKind::CloggedInjector => (
            "Clogged Fuel Injector",
            "Fuel Injectors, Fuel Manifold, Engine Performance",
            "Reduce throttle to decrease fuel demand.",
            "Land as soon as practicable. Schedule maintenance to clean or replace injectors.",
        ),
        FaultKind::FuelOverheat => (
            "Fuel Overheat",
            "Fuel Pump, Fuel Lines, Engine Performance",
            "Decrease engine load by reducing collective pitch. \
             Increase airspeed to improve airflow and cooling.",
            "Monitor fuel temperature closely. \
             If temperature continues to rise, consider precautionary landing.",
        ),
        FaultKind::RpmDrop => (
            "Engine RPM Droop",
            "Engine Governor, FADEC, Rotor System",
            "Lower collective pitch to reduce load on the engine. \
             Monitor RPM and engine parameters.",
            "Prepare for potential autorotation if RPM does not recover. \
             Divert to nearest suitable landing area.",
        ),
        FaultKind::SensorDrift => (
            "Sensor Drift Detected",
            "Instrumentation, FADEC Inputs, Autopilot",
            "Cross-reference with backup instruments (e.g., standby altimeter, pressure gauges).",
            "Disengage autopilot if necessary. \
             Rely on primary flight displays and report sensor discrepancy upon landing.",
        ),
    };
    FaultAdvisory {
        fault: kind,
        name,
        affected_systems,
        immediate_measures,
        preferable_measures,
    }
}

/// One advisory per injected fault, in fixed fault order. Empty means nominal.
pub fn advisories(faults: &FaultFlags) -> Vec<FaultAdvisory> {
    faults.active().map(advisory).collect()
}

// ─── Component health ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Component {
    FuelTank,
    FuelFilter,
    FuelPump,
    FuelManifold,
    Injector(u8),
    FadecController,
}

impl Component {
    pub const ALL: [Component; 9] = [
        Self::FuelTank,
        Self::FuelFilter,
        Self::FuelPump,
        Self::FuelManifold,
        Self::Injector(1),
        Self::Injector(2),
        Self::Injector(3),
        Self::Injector(4),
        Self::FadecController,
    ];

    pub fn name(&self) -> String {
        match self {
            Self::FuelTank => "Fuel Tank".to_string(),
            Self::FuelFilter => "Fuel Filter".to_string(),
            Self::FuelPump => "Fuel Pump".to_string(),
            Self::FuelManifold => "Fuel Manifold".to_string(),
            Self::Injector(n) => format!("Injector {n}"),
            Self::FadecController => "FADEC Controller".to_string(),
        }
    }

    /// Which warning, if any, lights this component up and how badly.
    fn annunciated_by(&self, kind: WarningKind) -> Option<Severity> {
        match (self, kind) {
            (Self::FuelFilter | Self::Injector(_), WarningKind::CloggedInjector) => {
                Some(Severity::Critical)
            }
            (Self::FuelPump | Self::FuelManifold, WarningKind::FuelOverheat) => {
                Some(Severity::Critical)
            }
            (Self::FadecController, WarningKind::RpmDroop) => Some(Severity::Warning),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentHealth {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub name: String,
    pub health: ComponentHealth,
    /// Injectors only: firing because the engine runs with a non-zero duty cycle.
    pub active: bool,
}

pub fn component_statuses(
    warnings: &[Warning],
    engine_started: bool,
    injector_duty_cycle: f64,
) -> Vec<ComponentStatus> {
    let firing = engine_started && injector_duty_cycle > 0.0;
    Component::ALL
        .iter()
        .map(|component| {
            let worst = warnings
                .iter()
                .filter_map(|w| component.annunciated_by(w.kind))
                .max();
            let health = match worst {
                Some(Severity::Critical) => ComponentHealth::Critical,
                Some(Severity::Warning) => ComponentHealth::Warning,
                _ => ComponentHealth::Normal,
            };
            ComponentStatus {
                name: component.name(),
                health,
                active: matches!(component, Component::Injector(_)) && firing,
            }
        })
        .collect()
}
