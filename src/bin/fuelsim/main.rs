// Fuel-Injection Trainer Scenario Runner
// Runs scripted training scenarios headless, checks the final warning set,
// and writes the session logs plus a JSON suite report.
//
// Usage:
//   cargo run --release --bin fuelsim                      # Run all scenarios
//   cargo run --release --bin fuelsim -- RPM               # Filter by name
//   cargo run --release --bin fuelsim -- --seed 7          # Custom noise seed
//   cargo run --release --bin fuelsim -- --no-noise        # Deterministic sensors
//   cargo run --release --bin fuelsim -- --ticks 300       # Override run length
//   cargo run --release --bin fuelsim -- --out results     # Output directory
//   cargo run --release --bin fuelsim -- --realtime HOVER  # Wall-clock pacing
//
// Set RUST_LOG=info to see engine events.

mod report;
mod scenarios;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use fuelsim_engine::{
    ClockState, Command, FuelSimulation, NoiseConfig, SimConfig, SystemClock, TickScheduler,
    WarningKind,
};

use report::*;
use scenarios::*;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    seed: u64,
    ticks: Option<u64>,
    no_noise: bool,
    realtime: bool,
    out: PathBuf,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        seed: 42,
        ticks: None,
        no_noise: false,
        realtime: false,
        out: PathBuf::from("fuelsim-results"),
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(42);
                }
            }
            "--ticks" => {
                i += 1;
                if i < args.len() {
                    cli.ticks = args[i].parse().ok();
                }
            }
            "--out" => {
                i += 1;
                if i < args.len() {
                    cli.out = PathBuf::from(&args[i]);
                }
            }
            "--no-noise" => cli.no_noise = true,
            "--realtime" => cli.realtime = true,
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Runner ─────────────────────────────────────────────────────────────────

/// Block until the scheduler releases the next tick.
fn wait_for_tick(scheduler: &mut TickScheduler<SystemClock>, clock: ClockState) {
    if clock != ClockState::Running {
        return;
    }
    while scheduler.poll(clock) == 0 {
        thread::sleep(Duration::from_millis(5));
    }
}

fn run_scenario(
    scenario: &Scenario,
    cli: &CliArgs,
) -> Result<ScenarioResult, fuelsim_engine::SimError> {
    let mut config = SimConfig { seed: cli.seed, ..SimConfig::default() };
    if cli.no_noise {
        config.noise = NoiseConfig::disabled();
    }
    let mut sim = FuelSimulation::try_new(config)?;
    let ticks = cli.ticks.unwrap_or(scenario.ticks);

    let mut scheduler = cli.realtime.then(|| {
        TickScheduler::new(SystemClock::default(), sim.config().time_step).with_max_catch_up(1)
    });

    sim.apply_input(Command::SetCollectivePitch { value: scenario.pitch });
    sim.apply_input(Command::StartEngine);

    let start = Instant::now();
    let mut max_altitude: f64 = 0.0;
    let mut peak_fuel_temperature = f64::NEG_INFINITY;
    let mut min_engine_rpm = f64::INFINITY;

    for tick in 0..ticks {
        for (at, command) in &scenario.events {
            if *at == tick {
                sim.apply_input(*command);
            }
        }
        if let Some(curve) = scenario.pitch_curve {
            sim.apply_input(Command::SetCollectivePitch { value: curve(tick) });
        }
        if let Some(s) = scheduler.as_mut() {
            wait_for_tick(s, sim.clock_state());
        }

        let result = sim.tick_core();
        if result.advanced {
            max_altitude = max_altitude.max(result.state.altitude);
            peak_fuel_temperature = peak_fuel_temperature.max(result.state.fuel_temperature);
            min_engine_rpm = min_engine_rpm.min(result.state.engine_rpm);
        }
    }
    let elapsed_ms = start.elapsed().as_millis();

    let final_state = sim.snapshot();
    let kinds: Vec<WarningKind> = sim.warnings().iter().map(|w| w.kind).collect();
    let mut pass = kinds == scenario.criteria.final_warnings;
    if scenario.criteria.expect_grounded {
        pass &= sim.clock_state() == ClockState::Stopped && final_state.altitude == 0.0;
    }

    let dir = cli.out.join(scenario.name.to_lowercase());
    let csv_path = sim.export_to_dir(&dir, Utc::now())?;

    Ok(ScenarioResult {
        scenario: scenario.name.to_string(),
        label: scenario.label.to_string(),
        seed: cli.seed,
        pass,
        ticks,
        final_time: sim.current_time(),
        clock: sim.clock_state(),
        max_altitude,
        peak_fuel_temperature,
        min_engine_rpm,
        final_state,
        warnings: kinds.iter().map(|k| k.key().to_string()).collect(),
        status: sim.status().label().to_string(),
        alerts: sim.alerts().len(),
        log_records: sim.session_log().len(),
        csv_path: csv_path.map(|p| p.display().to_string()),
        elapsed_ms,
    })
}

fn write_report(dir: &Path, report: &SuiteReport) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("fuelsim-{}.json", report.timestamp));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Fuel-Injection Trainer Scenario Runner");
    println!("  PRNG: ChaCha8Rng | Seed: {} | Noise: {} | Pacing: {}",
        cli.seed,
        if cli.no_noise { "off" } else { "on" },
        if cli.realtime { "real time" } else { "batch" });
    println!("  Running {} scenario(s)...\n", to_run.len());
    print_header();

    let suite_start = Instant::now();
    let mut results = Vec::with_capacity(to_run.len());
    for scenario in &to_run {
        let result = run_scenario(scenario, &cli)?;
        print_row(&result);
        results.push(result);
    }

    let summary = SuiteReport::summarize(&results);
    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        summary.total, summary.passed, summary.failed,
        suite_start.elapsed().as_secs_f64());

    let failed = summary.failed;
    let report = SuiteReport {
        timestamp: Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        seed: cli.seed,
        noise: !cli.no_noise,
        summary,
        scenarios: results,
    };
    let path = write_report(&cli.out, &report)?;
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
