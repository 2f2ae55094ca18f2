// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Rotorcraft Fuel-Injection Trainer - Operator Alert Log

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::Severity;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub message: String,
    pub severity: Severity,
    /// Simulated time (s) when the event happened.
    pub timestamp: f64,
}

/// Newest-first record of operator actions and fault toggles.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<AlertEntry>,
    capacity: usize,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, timestamp: f64) {
        self.entries.push_front(AlertEntry { message: message.into(), severity, timestamp });
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&AlertEntry> {
        self.entries.front()
    }

    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<AlertEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first() {
        let mut log = AlertLog::new(50);
        log.push("Engine started", Severity::Info, 0.0);
        log.push("EMERGENCY STOP activated", Severity::Critical, 4.2);
        assert_eq!(log.latest().unwrap().message, "EMERGENCY STOP activated");
        assert_eq!(log.entries().last().unwrap().message, "Engine started");
    }

    #[test]
    fn capped_at_capacity() {
        let mut log = AlertLog::new(50);
        for i in 0..60 {
            log.push(format!("event {i}"), Severity::Info, i as f64);
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.latest().unwrap().message, "event 59");
        assert_eq!(log.entries().last().unwrap().message, "event 10");
    }
}
