//! Health-Report Schema — the shape the second turn is constrained to.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::Result;

/// JSON Schema sent as `format` on the formatted turn.
pub fn health_report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overall_health": {"type": "string", "enum": ["excellent", "good", "warn", "fatal"]},
            "storage_health": {"type": "string", "enum": ["excellent", "good", "warn", "fatal"]},
            "memory_health": {"type": "string", "enum": ["excellent", "good", "warn", "fatal"]},
            "memory_free_percent": {"type": "number"},
            "storage_used_percent": {"type": "number"}
        },
        "required": [
            "overall_health",
            "storage_health",
            "memory_health",
            "memory_free_percent",
            "storage_used_percent"
        ]
    })
}

/// Health tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Excellent,
    Good,
    Warn,
    Fatal,
}

/// Typed view of a formatted reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub overall_health: HealthTier,
    pub storage_health: HealthTier,
    pub memory_health: HealthTier,
    pub memory_free_percent: f64,
    pub storage_used_percent: f64,
}

impl HealthReport {
    /// Parse model output; fails on a missing field or unknown tier.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
