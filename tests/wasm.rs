#![cfg(target_arch = "wasm32")]

use fuelsim_engine::FuelSimulation;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn tick_returns_an_object() {
    let mut sim = FuelSimulation::new();
    sim.start_engine();
    let result = sim.tick();
    assert!(result.is_object());
    assert!(sim.get_snapshot().is_object());
    assert!(sim.get_chart_data().is_array());
}

#[wasm_bindgen_test]
fn unknown_fault_is_rejected() {
    let mut sim = FuelSimulation::new();
    assert!(sim.inject_fault("cloggedInjector", true).is_ok());
    assert!(sim.inject_fault("flameout", true).is_err());
}

#[wasm_bindgen_test]
fn malformed_command_is_rejected() {
    let mut sim = FuelSimulation::new();
    assert!(sim.queue(JsValue::from_str("not a command")).is_err());
}

#[wasm_bindgen_test]
fn csv_export_after_run() {
    let mut sim = FuelSimulation::with_seed(1);
    assert!(sim.export_csv().is_none());
    sim.start_engine();
    sim.run_batch(5);
    assert_eq!(sim.export_csv().unwrap().lines().count(), 6);
    assert!(sim.export_filename().starts_with("simulation_log_"));
}
