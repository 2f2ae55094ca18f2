// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Session Log & CSV Export
//
// One record per tick, appended for the whole session and cleared on reset.
// Unlike the chart history this log is unbounded so it can be exported.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, WriterBuilder};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::faults::FaultFlags;
use crate::types::SimulationState;

/// Column order of the exported log.
pub const CSV_HEADER: [&str; 18] = [
    "timestamp",
    "collectivePitch",
    "altitude",
    "verticalVelocity",
    "ambientPressure",
    "ambientTemperature",
    "airDensity",
    "throttle",
    "engineLoad",
    "engineRpm",
    "fuelPressure",
    "fuelTemperature",
    "fuelFlowRate",
    "injectorDutyCycle",
    "cloggedInjector",
    "fuelOverheat",
    "rpmDrop",
    "sensorDrift",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: f64,
    #[serde(flatten)]
    pub state: SimulationState,
    #[serde(flatten)]
    pub faults: FaultFlags,
}

impl LogRecord {
    /// Cells in [`CSV_HEADER`] order: time to 2 places, numbers to 4.
    pub fn to_row(&self) -> Vec<String> {
        let s = &self.state;
        let numbers = [
            s.collective_pitch,
            s.altitude,
            s.vertical_velocity,
            s.ambient_pressure,
            s.ambient_temperature,
            s.air_density,
            s.throttle,
            s.engine_load,
            s.engine_rpm,
            s.fuel_pressure,
            s.fuel_temperature,
            s.fuel_flow_rate,
            s.injector_duty_cycle,
        ];
        let flags = [
            self.faults.clogged_injector,
            self.faults.fuel_overheat,
            self.faults.rpm_drop,
            self.faults.sensor_drift,
        ];

        let mut row = Vec::with_capacity(CSV_HEADER.len());
        row.push(format!("{:.2}", self.timestamp));
        row.extend(numbers.iter().map(|v| format!("{:.4}", v)));
        row.extend(flags.iter().map(|f| f.to_string()));
        row
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    records: Vec<LogRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Write the log as CSV. The header is bare, every data field is quoted
    /// with backslash-escaped embedded quotes, and lines are joined by `\n`
    /// with no trailing newline.
    pub fn write_csv<W: Write>(&self, mut out: W) -> Result<()> {
        let mut buf = CSV_HEADER.join(",").into_bytes();
        buf.push(b'\n');

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .double_quote(false)
            .escape(b'\\')
            .from_writer(buf);
        for record in &self.records {
            writer.write_record(record.to_row())?;
        }
        let mut buf = writer.into_inner().map_err(|e| e.into_error())?;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    }

    /// CSV text of the whole session, or `None` when nothing has been logged.
    pub fn to_csv(&self) -> Result<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        let text = String::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Some(text))
    }

    /// Export to `dir` under a timestamped name. An empty log is a no-op.
    pub fn export_to_dir(&self, dir: &Path, at: DateTime<Utc>) -> Result<Option<PathBuf>> {
        if self.is_empty() {
            warn!("no data to export; run the simulation first");
            return Ok(None);
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join(export_filename(at));
        let file = std::fs::File::create(&path)?;
        self.write_csv(std::io::BufWriter::new(file))?;
        info!("exported {} log records to {}", self.len(), path.display());
        Ok(Some(path))
    }
}

/// `simulation_log_<ISO-8601>.csv` with `:` and `.` replaced by `-`.
pub fn export_filename(at: DateTime<Utc>) -> String {
    let iso = at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
    format!("simulation_log_{}.csv", iso.replace([':', '.'], "-"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
