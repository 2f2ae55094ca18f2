// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer

pub mod types;
pub mod error;
pub mod params;
pub mod environment;
pub mod flight;
pub mod engine;
pub mod fuel;
pub mod faults;
pub mod sensor;
pub mod warnings;
pub mod diagnostics;
pub mod history;
pub mod recorder;
pub mod alerts;
pub mod clock;
pub mod commands;
pub mod simulation;

pub use types::*;
pub use error::SimError;
pub use params::{AircraftSpecs, FaultResponse, NoiseConfig, SimConfig};
pub use faults::{FaultFlags, FaultKind};
pub use commands::Command;
pub use clock::{Clock, ManualClock, SystemClock, TickScheduler};
pub use simulation::{advance_physics, FuelSimulation};

use log::error;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl FuelSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        FuelSimulation::with_config(SimConfig::default())
    }

    /// Default configuration with an explicit noise seed.
    pub fn with_seed(seed: u32) -> FuelSimulation {
        FuelSimulation::with_config(SimConfig { seed: seed as u64, ..SimConfig::default() })
    }

    /// Configuration from a JSON document; missing fields take defaults.
    pub fn from_config_json(json: &str) -> std::result::Result<FuelSimulation, JsValue> {
        SimConfig::from_json(json)
            .map(FuelSimulation::with_config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn tick(&mut self) -> JsValue {
        let result = self.tick_core();
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Run N ticks without returning results.
    pub fn run_batch(&mut self, ticks: u32) {
        self.run_ticks(ticks);
    }

    /// Queue a `{ type: ... }` command object for the next tick.
    pub fn queue(&mut self, command: JsValue) -> std::result::Result<(), JsValue> {
        let command: Command = serde_wasm_bindgen::from_value(command)?;
        self.queue_command(command);
        Ok(())
    }

    // ─── Controls ────────────────────────────────────────────────────────────

    pub fn set_collective_pitch(&mut self, value: f64) {
        self.apply_input(Command::SetCollectivePitch { value });
    }

    /// Toggle a fault by its key, e.g. `"cloggedInjector"`.
    pub fn inject_fault(&mut self, fault: &str, active: bool) -> std::result::Result<(), JsValue> {
        let kind: FaultKind = fault.parse().map_err(|e: SimError| JsValue::from_str(&e.to_string()))?;
        self.set_fault(kind, active);
        Ok(())
    }

    pub fn arm(&mut self) { self.apply_input(Command::Arm); }
    pub fn start_engine(&mut self) { self.apply_input(Command::StartEngine); }
    pub fn stop_engine(&mut self) { self.apply_input(Command::StopEngine); }
    pub fn emergency_stop(&mut self) { self.apply_input(Command::EmergencyStop); }
    pub fn toggle_play_pause(&mut self) { self.apply_input(Command::TogglePlayPause); }
    pub fn pause(&mut self) { self.apply_input(Command::Pause); }
    pub fn resume(&mut self) { self.apply_input(Command::Resume); }
    pub fn reset(&mut self) { self.apply_input(Command::Reset); }

    // ─── Views ───────────────────────────────────────────────────────────────

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_running(&self) -> bool {
        self.clock == ClockState::Running
    }

    pub fn engine_started(&self) -> bool {
        self.clock.engine_started()
    }

    pub fn status_label(&self) -> String {
        self.status.label().to_string()
    }

    pub fn get_snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state).unwrap_or(JsValue::NULL)
    }

    pub fn get_faults(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.faults).unwrap_or(JsValue::NULL)
    }

    pub fn get_warnings(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.warnings).unwrap_or(JsValue::NULL)
    }

    pub fn get_chart_data(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.history.to_vec()).unwrap_or(JsValue::NULL)
    }

    pub fn get_alert_log(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.alerts.to_vec()).unwrap_or(JsValue::NULL)
    }

    pub fn get_advisories(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.advisories()).unwrap_or(JsValue::NULL)
    }

    pub fn get_components(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.component_statuses()).unwrap_or(JsValue::NULL)
    }

    pub fn log_length(&self) -> usize {
        self.session_log.len()
    }

    /// Whole session as CSV text, or `undefined` when nothing was logged.
    pub fn export_csv(&self) -> Option<String> {
        match self.to_csv() {
            Ok(csv) => csv,
            Err(e) => {
                error!("csv export failed: {}", e);
                None
            }
        }
    }

    /// Suggested download name for an export made now.
    pub fn export_filename(&self) -> String {
        recorder::export_filename(chrono::Utc::now())
    }
}

impl Default for FuelSimulation {
    fn default() -> Self {
        Self::new()
    }
}
