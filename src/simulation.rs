// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Simulation Core

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::alerts::AlertLog;
use crate::clock::{self, Clock, TickScheduler, Transition};
use crate::commands::Command;
use crate::diagnostics::{self, ComponentStatus, FaultAdvisory};
use crate::engine;
use crate::environment::AmbientConditions;
use crate::error::Result;
use crate::faults::{self, FaultFlags, FaultKind};
use crate::flight::{self, VerticalState};
use crate::fuel;
use crate::history::ChartHistory;
use crate::params::SimConfig;
use crate::recorder::{LogRecord, SessionLog};
use crate::sensor::SensorNoise;
use crate::types::*;
use crate::warnings::WarningEvaluator;

// ─── Physics stage ───────────────────────────────────────────────────────────

/// Flight, ambient, engine and fuel stages for one step, faults included,
/// noise excluded.
///
/// Flight integrates with the air density published on the previous tick;
/// everything downstream sees the ambient conditions at the new altitude.
pub fn advance_physics(
    config: &SimConfig,
    prev: &SimulationState,
    faults: &FaultFlags,
    dt: f64,
) -> SimulationState {
    let specs = &config.specs;
    let vertical = flight::integrate(
        specs,
        VerticalState { altitude: prev.altitude, velocity: prev.vertical_velocity },
        prev.collective_pitch,
        prev.air_density,
        dt,
    );
    let air = AmbientConditions::at_altitude(vertical.altitude);

    let mut eng = engine::compute(specs, prev.collective_pitch, &air);
    faults::apply_to_engine(faults, &config.faults, &mut eng);

    let mut fuel_out = fuel::compute(
        specs,
        eng.throttle,
        eng.engine_rpm,
        &air,
        prev.fuel_temperature,
        dt,
    );
    faults::apply_to_fuel(faults, &config.faults, &mut fuel_out, dt);

    SimulationState {
        collective_pitch: prev.collective_pitch,
        altitude: vertical.altitude,
        vertical_velocity: vertical.velocity,
        ambient_pressure: air.pressure,
        ambient_temperature: air.temperature,
        air_density: air.density,
        throttle: eng.throttle,
        engine_load: eng.engine_load,
        engine_rpm: eng.engine_rpm,
        fuel_pressure: fuel_out.fuel_pressure,
        fuel_temperature: fuel_out.fuel_temperature,
        fuel_flow_rate: fuel_out.fuel_flow_rate,
        injector_duty_cycle: fuel_out.injector_duty_cycle,
    }
}

fn power_on_state(config: &SimConfig) -> SimulationState {
    SimulationState { collective_pitch: config.specs.hover_pitch, ..SimulationState::default() }
}

// ─── FuelSimulation struct ───────────────────────────────────────────────────

#[wasm_bindgen]
pub struct FuelSimulation {
    pub(crate) config: SimConfig,
    pub(crate) clock: ClockState,
    pub(crate) current_time: f64,
    pub(crate) state: SimulationState,
    pub(crate) faults: FaultFlags,

    pub(crate) evaluator: WarningEvaluator,
    pub(crate) warnings: Vec<Warning>,
    pub(crate) status: SystemStatus,
    pub(crate) noise: SensorNoise,

    pub(crate) session_log: SessionLog,
    pub(crate) history: ChartHistory,
    pub(crate) alerts: AlertLog,

    pub(crate) command_queue: VecDeque<Command>,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl FuelSimulation {
    /// Build from an already-validated configuration.
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            clock: ClockState::Stopped,
            current_time: 0.0,
            state: power_on_state(&config),
            faults: FaultFlags::default(),
            evaluator: WarningEvaluator::new(config.rpm_droop_debounce),
            warnings: Vec::new(),
            status: SystemStatus::Nominal,
            noise: SensorNoise::new(config.noise.clone(), config.seed),
            session_log: SessionLog::new(),
            history: ChartHistory::new(config.max_data_points),
            alerts: AlertLog::new(config.alert_log_capacity),
            command_queue: VecDeque::new(),
            config,
        }
    }

    pub fn try_new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn tick_core(&mut self) -> TickResult {
        self.process_commands();
        if self.clock != ClockState::Running {
            return self.tick_result(false);
        }

        let dt = self.config.time_step;
        self.current_time += dt;

        self.state = advance_physics(&self.config, &self.state, &self.faults, dt);
        self.noise.apply(&mut self.state, &self.faults, self.current_time);
        self.clamp_published();

        self.session_log.push(LogRecord {
            timestamp: self.current_time,
            state: self.state,
            faults: self.faults,
        });
        self.history.record(self.current_time, &self.state);

        self.warnings = self.evaluator.evaluate(
            &self.config.specs,
            &self.state,
            &self.faults,
            dt,
            self.current_time,
        );
        let status = SystemStatus::from_warnings(&self.warnings);
        if status != self.status {
            if status > self.status {
                warn!("status {} at t={:.1}s", status.label(), self.current_time);
            } else {
                info!("status {} at t={:.1}s", status.label(), self.current_time);
            }
            self.status = status;
        }

        self.tick_result(true)
    }

    /// Re-apply the physical limits to the noisy readings.
    fn clamp_published(&mut self) {
        let s = &mut self.state;
        s.altitude = s.altitude.clamp(0.0, self.config.specs.max_altitude);
        if s.altitude <= 0.0 {
            s.vertical_velocity = 0.0;
        }
        if self.faults.fuel_overheat {
            s.fuel_temperature = s.fuel_temperature.min(self.config.faults.overheat_ceiling);
        }
    }

    fn tick_result(&self, advanced: bool) -> TickResult {
        TickResult {
            advanced,
            current_time: self.current_time,
            clock: self.clock,
            state: self.state,
            faults: self.faults,
            warnings: self.warnings.clone(),
            status: self.status,
        }
    }

    /// Run `ticks` ticks back to back.
    pub fn run_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick_core();
        }
    }

    /// Run however many ticks the scheduler says are due. Returns the count.
    pub fn run_due<C: Clock>(&mut self, scheduler: &mut TickScheduler<C>) -> u32 {
        self.process_commands();
        let due = scheduler.poll(self.clock);
        for _ in 0..due {
            self.tick_core();
        }
        due
    }

    // ─── Commands ────────────────────────────────────────────────────────────

    /// Defer a command to the start of the next tick.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply_input(command);
        }
    }

    /// Apply a command immediately.
    pub fn apply_input(&mut self, command: Command) {
        match command {
            Command::SetCollectivePitch { value } => {
                if value.is_finite() {
                    self.state.collective_pitch = value.clamp(0.0, 100.0);
                }
            }
            Command::SetFault { fault, active } => self.set_fault(fault, active),
            Command::Arm => {
                if self.transition(Transition::Arm) == ClockState::Stopped
                    && self.clock == ClockState::Armed
                {
                    self.alert("Engine armed", Severity::Info);
                }
            }
            Command::StartEngine => match self.transition(Transition::Start) {
                ClockState::Stopped | ClockState::Armed => {
                    info!("engine started at t={:.1}s", self.current_time);
                    self.alert("Engine started", Severity::Info);
                }
                ClockState::Paused => self.alert("Simulation resumed", Severity::Info),
                ClockState::Running => {}
            },
            Command::StopEngine => {
                let prev = self.transition(Transition::Stop);
                self.ground();
                if prev.engine_started() {
                    info!("engine stopped at t={:.1}s", self.current_time);
                    self.alert("Engine stopped", Severity::Info);
                }
            }
            Command::EmergencyStop => {
                self.transition(Transition::EmergencyStop);
                self.ground();
                warn!("emergency stop at t={:.1}s", self.current_time);
                self.alert("EMERGENCY STOP activated", Severity::Critical);
            }
            Command::TogglePlayPause => match self.clock {
                ClockState::Stopped | ClockState::Armed => self.apply_input(Command::StartEngine),
                ClockState::Running => self.apply_input(Command::Pause),
                ClockState::Paused => self.apply_input(Command::Resume),
            },
            Command::Pause => {
                if self.transition(Transition::Pause) == ClockState::Running {
                    self.alert("Simulation paused", Severity::Info);
                }
            }
            Command::Resume => {
                if self.transition(Transition::Resume) == ClockState::Paused {
                    self.alert("Simulation resumed", Severity::Info);
                }
            }
            Command::Reset => self.reset_session(),
        }
    }

    /// Set one fault flag. Only an actual change is announced.
    pub fn set_fault(&mut self, kind: FaultKind, active: bool) {
        if self.faults.set(kind, active) == active {
            return;
        }
        if active {
            warn!("{} fault injected at t={:.1}s", kind, self.current_time);
            self.alert(format!("{} fault injected", kind.label()), Severity::Warning);
        } else {
            info!("{} fault cleared at t={:.1}s", kind, self.current_time);
            self.alert(format!("{} fault cleared", kind.label()), Severity::Info);
        }
    }

    /// Apply a clock transition and return the state it left.
    fn transition(&mut self, transition: Transition) -> ClockState {
        let prev = self.clock;
        self.clock = clock::next_state(prev, transition);
        if prev != self.clock {
            debug!("clock {:?} -> {:?} on {:?}", prev, self.clock, transition);
        }
        prev
    }

    fn alert(&mut self, message: impl Into<String>, severity: Severity) {
        self.alerts.push(message, severity, self.current_time);
    }

    /// Park the aircraft on the ground with the engine idle. Faults, the
    /// session log, the chart history and the current warnings are kept.
    fn ground(&mut self) {
        let air = AmbientConditions::at_altitude(0.0);
        let s = &mut self.state;
        s.altitude = 0.0;
        s.vertical_velocity = 0.0;
        s.throttle = 0.0;
        s.engine_load = 0.0;
        s.fuel_flow_rate = 0.0;
        s.injector_duty_cycle = 0.0;
        s.ambient_pressure = air.pressure;
        s.ambient_temperature = air.temperature;
        s.air_density = air.density;
    }

    /// Back to power-on defaults. The alert log survives and records the reset.
    fn reset_session(&mut self) {
        self.transition(Transition::Reset);
        self.current_time = 0.0;
        self.state = power_on_state(&self.config);
        self.faults = FaultFlags::default();
        self.evaluator.reset();
        self.warnings.clear();
        self.status = SystemStatus::Nominal;
        self.noise = SensorNoise::new(self.config.noise.clone(), self.config.seed);
        self.session_log.clear();
        self.history.clear();
        info!("simulation reset");
        self.alert("Simulation reset", Severity::Info);
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock
    }

    pub fn snapshot(&self) -> SimulationState {
        self.state
    }

    pub fn log_records(&self) -> &[LogRecord] {
        self.session_log.records()
    }

    pub fn faults(&self) -> FaultFlags {
        self.faults
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn status(&self) -> SystemStatus {
        self.status
    }

    pub fn rpm_drop_timer(&self) -> f64 {
        self.evaluator.rpm_drop_timer()
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.session_log
    }

    pub fn history(&self) -> &ChartHistory {
        &self.history
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn advisories(&self) -> Vec<FaultAdvisory> {
        diagnostics::advisories(&self.faults)
    }

    pub fn component_statuses(&self) -> Vec<ComponentStatus> {
        diagnostics::component_statuses(
            &self.warnings,
            self.clock.engine_started(),
            self.state.injector_duty_cycle,
        )
    }

    pub fn to_csv(&self) -> Result<Option<String>> {
        self.session_log.to_csv()
    }

    pub fn export_to_dir(&self, dir: &Path, at: DateTime<Utc>) -> Result<Option<PathBuf>> {
        self.session_log.export_to_dir(dir, at)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
