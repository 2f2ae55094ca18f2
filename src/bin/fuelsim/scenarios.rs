// Training scenarios: a pitch profile, a fault script and the warnings the
// trainee should be looking at when the run ends.

use fuelsim_engine::{Command, FaultKind, WarningKind};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub ticks: u64,
    pub pitch: f64,
    /// Overrides `pitch` per tick when present.
    pub pitch_curve: Option<fn(u64) -> f64>,
    /// Commands applied just before the given tick.
    pub events: Vec<(u64, Command)>,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    /// Exact set of warnings active after the last tick.
    pub final_warnings: Vec<WarningKind>,
    pub expect_grounded: bool,
}

impl PassCriteria {
    fn warnings(kinds: &[WarningKind]) -> Self {
        Self { final_warnings: kinds.to_vec(), expect_grounded: false }
    }
}

// ─── Curve Functions ────────────────────────────────────────────────────────

/// Full power for 20 s, then a settled descent.
fn climb_then_descend(tick: u64) -> f64 {
    if tick < 200 { 100.0 } else { 30.0 }
}

/// Slow sweep of the collective between 50 % and 90 %.
fn collective_sweep(tick: u64) -> f64 {
    70.0 + 20.0 * (tick as f64 / 50.0).sin()
}

fn inject(tick: u64, fault: FaultKind) -> (u64, Command) {
    (tick, Command::SetFault { fault, active: true })
}

// ─── Catalogue ──────────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "HOVER",
            label: "Hover trim, no faults",
            ticks: 600,
            pitch: 60.0,
            pitch_curve: None,
            events: vec![],
            criteria: PassCriteria::warnings(&[]),
        },
        Scenario {
            name: "FULL_CLIMB",
            label: "Maximum-power climb",
            ticks: 600,
            pitch: 100.0,
            pitch_curve: None,
            events: vec![],
            criteria: PassCriteria::warnings(&[]),
        },
        Scenario {
            name: "CLIMB_DESCENT",
            label: "Climb then descend",
            ticks: 600,
            pitch: 100.0,
            pitch_curve: Some(climb_then_descend),
            events: vec![],
            criteria: PassCriteria::warnings(&[]),
        },
        Scenario {
            name: "COLLECTIVE_SWEEP",
            label: "Collective sweep",
            ticks: 600,
            pitch: 70.0,
            pitch_curve: Some(collective_sweep),
            events: vec![],
            criteria: PassCriteria::warnings(&[]),
        },
        Scenario {
            name: "CLOGGED_INJECTOR",
            label: "Clogged injector at 1 s",
            ticks: 600,
            pitch: 60.0,
            pitch_curve: None,
            events: vec![inject(10, FaultKind::CloggedInjector)],
            criteria: PassCriteria::warnings(&[WarningKind::CloggedInjector]),
        },
        Scenario {
            name: "FUEL_OVERHEAT",
            label: "Fuel overheat at 1 s",
            ticks: 600,
            pitch: 60.0,
            pitch_curve: None,
            events: vec![inject(10, FaultKind::FuelOverheat)],
            criteria: PassCriteria::warnings(&[WarningKind::FuelOverheat]),
        },
        Scenario {
            name: "RPM_DROOP",
            label: "RPM drop at 1 s",
            ticks: 600,
            pitch: 60.0,
            pitch_curve: None,
            events: vec![inject(10, FaultKind::RpmDrop)],
            criteria: PassCriteria::warnings(&[WarningKind::RpmDroop]),
        },
        Scenario {
            name: "RPM_DROOP_RECOVERY",
            label: "RPM drop cleared after 10 s",
            ticks: 600,
            pitch: 60.0,
            pitch_curve: None,
            events: vec![
                inject(10, FaultKind::RpmDrop),
                (110, Command::SetFault { fault: FaultKind::RpmDrop, active: false }),
            ],
            criteria: PassCriteria::warnings(&[]),
        },
        Scenario {
            name: "SENSOR_DRIFT",
            label: "Sensor drift at 1 s",
            ticks: 600,
            pitch: 60.0,
            pitch_curve: None,
            events: vec![inject(10, FaultKind::SensorDrift)],
            criteria: PassCriteria::warnings(&[WarningKind::SensorDrift]),
        },
        Scenario {
            name: "CASCADE",
            label: "All four faults, staggered",
            ticks: 900,
            pitch: 80.0,
            pitch_curve: None,
            events: vec![
                inject(50, FaultKind::SensorDrift),
                inject(150, FaultKind::RpmDrop),
                inject(300, FaultKind::CloggedInjector),
                inject(450, FaultKind::FuelOverheat),
            ],
            criteria: PassCriteria::warnings(&[
                WarningKind::CloggedInjector,
                WarningKind::FuelOverheat,
                WarningKind::RpmDroop,
                WarningKind::SensorDrift,
            ]),
        },
        Scenario {
            name: "EMERGENCY_STOP",
            label: "Emergency stop in the climb",
            ticks: 400,
            pitch: 100.0,
            pitch_curve: None,
            events: vec![(300, Command::EmergencyStop)],
            criteria: PassCriteria { final_warnings: vec![], expect_grounded: true },
        },
    ]
}
