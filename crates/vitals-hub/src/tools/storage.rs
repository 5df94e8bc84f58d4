//! Storage probe — disk usage of the working directory's filesystem.

use async_trait::async_trait;
use serde_json::{Value, json};

use vitals_core::error::Result;
use vitals_core::tool::Tool;

use super::CommandProbe;

pub const STORAGE_TOOL: &str = "get_storage_info";

/// Runs `df -h .` and returns its output untouched.
pub struct StorageInfoTool {
    probe: CommandProbe,
}

impl StorageInfoTool {
    pub fn new() -> Self {
        Self {
            probe: CommandProbe::new(STORAGE_TOOL, "df", &["-h", "."]),
        }
    }

    /// Replace the default command (program followed by arguments).
    pub fn with_command(argv: &[String]) -> Result<Self> {
        Ok(Self {
            probe: CommandProbe::from_argv(STORAGE_TOOL, argv)?,
        })
    }

    pub fn probe(&self) -> &CommandProbe {
        &self.probe
    }
}

impl Default for StorageInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for StorageInfoTool {
    fn name(&self) -> &str {
        STORAGE_TOOL
    }

    fn description(&self) -> &str {
        "Get storage info"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        self.probe.run().await
    }
}
