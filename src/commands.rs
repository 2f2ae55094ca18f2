// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Operator Commands
//
// Inputs from the operator panel. Queued commands are applied at the start of
// the next tick so a control change never lands halfway through a pipeline.

use serde::{Deserialize, Serialize};

use crate::faults::FaultKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Collective lever position (%), clamped to [0, 100].
    SetCollectivePitch { value: f64 },
    SetFault { fault: FaultKind, active: bool },
    Arm,
    StartEngine,
    StopEngine,
    EmergencyStop,
    TogglePlayPause,
    Pause,
    Resume,
    Reset,
}
