#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use fuelsim_engine::*;

    fn deterministic() -> FuelSimulation {
        FuelSimulation::with_config(SimConfig::deterministic())
    }

    fn has(sim: &FuelSimulation, kind: WarningKind) -> bool {
        sim.warnings().iter().any(|w| w.kind == kind)
    }

    // ========== Physics Pipeline ==========

    #[test]
    fn test_throttle_follows_collective() {
        for pitch in [0.0, 12.5, 40.0, 59.9, 60.0, 85.0, 100.0] {
            let mut sim = deterministic();
            sim.set_collective_pitch(pitch);
            sim.start_engine();
            let result = sim.tick_core();
            let expected = (1.667 * pitch).min(100.0);
            assert_eq!(result.state.throttle, expected, "pitch {pitch}");
            assert_eq!(result.state.engine_load, expected);
        }
    }

    #[test]
    fn test_trim_pitch_holds_altitude() {
        let config = SimConfig::deterministic();
        let trim = config.specs.mass * config.specs.gravity / config.specs.sea_level_lift_coefficient;
        let mut sim = FuelSimulation::with_config(config);
        sim.set_collective_pitch(trim);
        sim.start_engine();
        sim.run_ticks(50);
        assert!(sim.snapshot().altitude.abs() < 2.0, "altitude {}", sim.snapshot().altitude);
    }

    #[test]
    fn test_hover_pitch_climbs_slowly_without_warnings() {
        let mut sim = deterministic();
        sim.start_engine();
        sim.run_ticks(50);
        let altitude = sim.snapshot().altitude;
        assert!(altitude > 5.0 && altitude < 10.0, "altitude {altitude}");
        assert!(sim.warnings().is_empty());

        // Noise on: the channels stay well inside every threshold.
        let mut noisy = FuelSimulation::with_seed(3);
        noisy.start_engine();
        for _ in 0..50 {
            let result = noisy.tick_core();
            assert!(result.warnings.is_empty(), "{:?}", result.warnings);
            assert_eq!(result.status, SystemStatus::Nominal);
        }
    }

    #[test]
    fn test_full_climb_history_and_log() {
        let mut sim = deterministic();
        sim.set_collective_pitch(100.0);
        sim.start_engine();

        let mut last_altitude = 0.0;
        for _ in 0..650 {
            let result = sim.tick_core();
            assert!(result.state.altitude >= last_altitude);
            last_altitude = result.state.altitude;
        }

        assert!(last_altitude > 500.0 && last_altitude < 6000.0, "altitude {last_altitude}");
        assert_eq!(sim.session_log().len(), 650);
        assert_eq!(sim.history().len(), 600);
        let first = sim.history().iter().next().unwrap();
        assert_relative_eq!(first.time, 5.1, epsilon = 1e-6);
        assert!(sim.warnings().is_empty());
    }

    #[test]
    fn test_altitude_never_leaves_envelope() {
        let mut config = SimConfig::default();
        config.specs.max_altitude = 50.0;
        let mut sim = FuelSimulation::with_config(config);
        sim.set_collective_pitch(100.0);
        sim.start_engine();
        for _ in 0..300 {
            let altitude = sim.tick_core().state.altitude;
            assert!((0.0..=50.0).contains(&altitude), "altitude {altitude}");
        }
        assert!(sim.snapshot().altitude > 45.0);

        let mut grounded = FuelSimulation::with_seed(11);
        grounded.set_collective_pitch(0.0);
        grounded.start_engine();
        for _ in 0..100 {
            let state = grounded.tick_core().state;
            assert!(state.altitude >= 0.0);
        }
    }

    #[test]
    fn test_grounded_readings_have_no_velocity() {
        for seed in 0..20 {
            let mut sim = FuelSimulation::with_seed(seed);
            sim.set_collective_pitch(0.0);
            sim.start_engine();
            for tick in 0..100 {
                let state = sim.tick_core().state;
                if state.altitude == 0.0 {
                    assert_eq!(state.vertical_velocity, 0.0, "seed {seed} tick {tick}");
                }
            }
        }
    }

    #[test]
    fn test_no_flow_at_zero_throttle_for_any_faults() {
        for mask in 0u8..16 {
            let mut sim = FuelSimulation::with_seed(mask as u32);
            for (bit, kind) in FaultKind::ALL.iter().enumerate() {
                sim.set_fault(*kind, mask & (1 << bit) != 0);
            }
            sim.set_collective_pitch(0.0);
            sim.start_engine();
            for _ in 0..30 {
                let state = sim.tick_core().state;
                assert_eq!(state.throttle, 0.0);
                assert_eq!(state.fuel_flow_rate, 0.0, "fault mask {mask:04b}");
                assert_eq!(state.injector_duty_cycle, 0.0);
            }
        }
    }

    #[test]
    fn test_duty_cycle_reads_full_when_fuel_flows() {
        let mut sim = deterministic();
        sim.start_engine();
        let state = sim.tick_core().state;
        assert_eq!(state.fuel_pressure, 40.0);
        assert_relative_eq!(state.injector_duty_cycle, 100.0, epsilon = 1e-9);
    }

    // ========== Fault Injection ==========

    #[test]
    fn test_clogged_injector_scales_pressure_and_flow() {
        let mut clean = deterministic();
        let mut clogged = deterministic();
        clogged.set_fault(FaultKind::CloggedInjector, true);
        for sim in [&mut clean, &mut clogged] {
            sim.start_engine();
            sim.run_ticks(20);
        }

        let (a, b) = (clean.snapshot(), clogged.snapshot());
        assert_eq!(a.altitude, b.altitude);
        assert_relative_eq!(b.fuel_pressure, a.fuel_pressure * 0.85, epsilon = 1e-9);
        assert_relative_eq!(b.fuel_flow_rate, a.fuel_flow_rate * 0.80, epsilon = 1e-9);
        assert!(has(&clogged, WarningKind::CloggedInjector));
        assert_eq!(clogged.status(), SystemStatus::Critical);
    }

    #[test]
    fn test_clog_response_is_configurable() {
        let config = SimConfig {
            faults: FaultResponse { clog_pressure_factor: 0.5, ..FaultResponse::default() },
            ..SimConfig::deterministic()
        };
        let state = advance_physics(
            &config,
            &SimulationState::default(),
            &FaultFlags { clogged_injector: true, ..Default::default() },
            0.1,
        );
        assert_eq!(state.fuel_pressure, 20.0);
    }

    #[test]
    fn test_overheat_converges_to_ceiling() {
        let mut sim = deterministic();
        sim.set_fault(FaultKind::FuelOverheat, true);
        sim.start_engine();
        for _ in 0..800 {
            let state = sim.tick_core().state;
            assert!(state.fuel_temperature <= 130.0, "{}", state.fuel_temperature);
        }
        assert_eq!(sim.snapshot().fuel_temperature, 130.0);
        assert!(has(&sim, WarningKind::FuelOverheat));
    }

    #[test]
    fn test_overheat_ceiling_holds_with_noise() {
        for seed in [0, 7, 42] {
            let mut sim = FuelSimulation::with_seed(seed);
            sim.set_fault(FaultKind::FuelOverheat, true);
            sim.start_engine();
            for _ in 0..600 {
                let t = sim.tick_core().state.fuel_temperature;
                assert!(t <= 130.0, "seed {seed}: fuel temperature {t}");
            }
            assert!(sim.snapshot().fuel_temperature > 129.0);
        }
    }

    #[test]
    fn test_fuel_temperature_lags_without_fault() {
        let mut sim = deterministic();
        sim.set_collective_pitch(100.0);
        sim.start_engine();
        sim.run_ticks(100);
        let t = sim.snapshot().fuel_temperature;
        assert!(t > 15.0 && t < 60.0, "fuel temperature {t}");
        assert!(!has(&sim, WarningKind::FuelOverheat));
    }

    #[test]
    fn test_rpm_droop_debounce_and_instant_clear() {
        let mut sim = deterministic();
        sim.set_fault(FaultKind::RpmDrop, true);
        sim.start_engine();

        for tick in 1..=30 {
            sim.tick_core();
            assert!(!has(&sim, WarningKind::RpmDroop), "raised early at tick {tick}");
            assert!(sim.snapshot().engine_rpm < 97.0);
        }
        sim.tick_core();
        assert!(has(&sim, WarningKind::RpmDroop));
        assert_eq!(sim.status(), SystemStatus::Warning);
        assert_eq!(sim.status().label(), "WARNING");

        sim.set_fault(FaultKind::RpmDrop, false);
        sim.tick_core();
        assert!(!has(&sim, WarningKind::RpmDroop));
        assert_eq!(sim.rpm_drop_timer(), 0.0);
        assert_eq!(sim.status(), SystemStatus::Nominal);
    }

    #[test]
    fn test_sensor_drift_is_informational() {
        let mut sim = deterministic();
        sim.set_fault(FaultKind::SensorDrift, true);
        sim.start_engine();
        sim.run_ticks(10);
        assert!(has(&sim, WarningKind::SensorDrift));
        assert_eq!(sim.status(), SystemStatus::Info);
        assert_eq!(sim.status().label(), "SYSTEM NORMAL");
    }

    #[test]
    fn test_warning_timestamps_use_simulated_time() {
        let mut sim = deterministic();
        sim.set_fault(FaultKind::FuelOverheat, true);
        sim.start_engine();
        sim.run_ticks(25);
        let now = sim.current_time();
        assert_relative_eq!(now, 2.5, epsilon = 1e-9);
        assert!(sim.warnings().iter().all(|w| w.timestamp == now));
    }

    // ========== Controls ==========

    #[test]
    fn test_stop_grounds_but_keeps_faults_and_log() {
        let mut sim = deterministic();
        sim.set_fault(FaultKind::RpmDrop, true);
        sim.set_collective_pitch(90.0);
        sim.start_engine();
        sim.run_ticks(20);

        sim.stop_engine();
        let state = sim.snapshot();
        assert_eq!(sim.clock_state(), ClockState::Stopped);
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.vertical_velocity, 0.0);
        assert_eq!(state.engine_load, 0.0);
        assert_eq!(state.injector_duty_cycle, 0.0);
        assert_eq!(state.air_density, environment::AmbientConditions::at_altitude(0.0).density);
        assert!(sim.faults().rpm_drop);
        assert_eq!(sim.session_log().len(), 20);
        assert_eq!(sim.alerts().latest().unwrap().message, "Engine stopped");

        assert!(!sim.tick_core().advanced);
        assert_eq!(sim.session_log().len(), 20);
    }

    #[test]
    fn test_reset_restores_power_on_state() {
        let mut sim = FuelSimulation::with_seed(5);
        for kind in FaultKind::ALL {
            sim.set_fault(kind, true);
        }
        sim.start_engine();
        sim.run_ticks(120);
        assert!(!sim.warnings().is_empty());

        sim.reset();
        assert_eq!(sim.clock_state(), ClockState::Stopped);
        assert_eq!(sim.current_time(), 0.0);
        assert_eq!(sim.snapshot(), SimulationState::default());
        assert_eq!(sim.faults(), FaultFlags::default());
        assert!(sim.warnings().is_empty());
        assert_eq!(sim.status(), SystemStatus::Nominal);
        assert_eq!(sim.rpm_drop_timer(), 0.0);
        assert!(sim.session_log().is_empty());
        assert!(sim.history().is_empty());
        assert!(sim.advisories().is_empty());
        assert!(sim.to_csv().unwrap().is_none());
    }

    #[test]
    fn test_queued_fault_lands_in_next_record() {
        let mut sim = deterministic();
        sim.start_engine();
        sim.run_ticks(3);
        sim.queue_command(Command::SetFault { fault: FaultKind::SensorDrift, active: true });
        assert!(!sim.faults().sensor_drift);

        sim.tick_core();
        let records = sim.log_records();
        assert!(!records[2].faults.sensor_drift);
        assert!(records[3].faults.sensor_drift);
    }

    #[test]
    fn test_scheduler_drives_ticks() {
        let clock = ManualClock::new();
        let mut scheduler = TickScheduler::new(&clock, 0.1);
        let mut sim = deterministic();

        sim.queue_command(Command::StartEngine);
        assert_eq!(sim.run_due(&mut scheduler), 0);
        clock.advance(1.0);
        assert_eq!(sim.run_due(&mut scheduler), 10);
        assert_eq!(sim.session_log().len(), 10);

        sim.pause();
        clock.advance(5.0);
        assert_eq!(sim.run_due(&mut scheduler), 0);

        sim.resume();
        assert_eq!(sim.run_due(&mut scheduler), 0);
        clock.advance(0.2);
        assert_eq!(sim.run_due(&mut scheduler), 2);
        assert_eq!(sim.session_log().len(), 12);
        assert_relative_eq!(sim.current_time(), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_same_seed_same_session() {
        let run = |seed: u32| {
            let mut sim = FuelSimulation::with_seed(seed);
            sim.set_fault(FaultKind::SensorDrift, true);
            sim.set_collective_pitch(75.0);
            sim.start_engine();
            sim.run_ticks(200);
            sim.session_log().records().to_vec()
        };
        assert_eq!(run(9), run(9));
        assert_ne!(run(9), run(10));
    }

    // ========== Views & Export ==========

    #[test]
    fn test_diagnostics_track_faults() {
        let mut sim = deterministic();
        sim.set_fault(FaultKind::CloggedInjector, true);
        sim.start_engine();
        sim.run_ticks(5);

        let advisories = sim.advisories();
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].fault, FaultKind::CloggedInjector);

        let components = sim.component_statuses();
        let filter = components.iter().find(|c| c.name == "Fuel Filter").unwrap();
        assert_eq!(filter.health, diagnostics::ComponentHealth::Critical);
        assert_eq!(components.iter().filter(|c| c.active).count(), 4);
    }

    #[test]
    fn test_csv_export_round() {
        let mut sim = deterministic();
        assert!(sim.export_csv().is_none());

        sim.start_engine();
        sim.run_ticks(10);
        let csv = sim.export_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[1].starts_with("\"0.10\",\"60.0000\""));
        assert!(lines[10].starts_with("\"1.00\","));

        let dir = tempfile::tempdir().unwrap();
        let path = sim.export_to_dir(dir.path(), chrono::Utc::now()).unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("simulation_log_") && name.ends_with("Z.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), csv);
    }

    #[test]
    fn test_alert_log_is_capped() {
        let mut sim = deterministic();
        for i in 0..40 {
            sim.set_fault(FaultKind::SensorDrift, i % 2 == 0);
        }
        assert_eq!(sim.alerts().len(), 40);
        for _ in 0..10 {
            sim.start_engine();
            sim.stop_engine();
        }
        assert_eq!(sim.alerts().len(), 50);
        assert_eq!(sim.alerts().latest().unwrap().message, "Engine stopped");
    }

    #[test]
    fn test_config_from_json() {
        let sim = FuelSimulation::try_new(
            SimConfig::from_json(r#"{"seed": 3, "noise": {"enabled": false}}"#).unwrap(),
        )
        .unwrap();
        assert_eq!(sim.config().seed, 3);
        assert!(!sim.config().noise.enabled);
        assert_eq!(sim.config().time_step, 0.1);

        let err = SimConfig::from_json(r#"{"time_step": 0}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { field: "time_step", .. }));
    }
}
