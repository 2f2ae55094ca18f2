// Scenario run reports. One JSON document per suite run, one CSV session log
// per scenario.

use serde::Serialize;

use fuelsim_engine::{ClockState, SimulationState};

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub label: String,
    pub seed: u64,
    pub pass: bool,
    pub ticks: u64,
    pub final_time: f64,
    pub clock: ClockState,
    pub max_altitude: f64,
    pub peak_fuel_temperature: f64,
    pub min_engine_rpm: f64,
    pub final_state: SimulationState,
    pub warnings: Vec<String>,
    pub status: String,
    pub alerts: usize,
    pub log_records: usize,
    pub csv_path: Option<String>,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub seed: u64,
    pub noise: bool,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn summarize(results: &[ScenarioResult]) -> Summary {
        let passed = results.iter().filter(|r| r.pass).count();
        Summary { total: results.len(), passed, failed: results.len() - passed }
    }
}

pub fn print_header() {
    println!("  {:<34} {:>6} {:>9} {:>8} {:>8} {:>14}  {}",
        "Scenario", "Time", "MaxAlt", "PeakT", "MinRPM", "Status", "Result");
    println!("  {}", "-".repeat(92));
}

pub fn print_row(r: &ScenarioResult) {
    println!("  {:<34} {:>5.1}s {:>8.1}m {:>7.1}C {:>7.2}% {:>14}  {}",
        r.label,
        r.final_time,
        r.max_altitude,
        r.peak_fuel_temperature,
        r.min_engine_rpm,
        r.status,
        if r.pass { "PASS" } else { "FAIL" },
    );
}
