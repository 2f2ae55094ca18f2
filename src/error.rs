// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Errors
//
// The tick pipeline itself is infallible. Only configuration loading and
// session-log export can fail.

/// Errors surfaced at the edges of the engine.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("unknown fault kind: {0}")]
    UnknownFault(String),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o failure during export: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
