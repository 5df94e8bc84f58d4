//! Memory probe — current memory pressure as the host reports it.
//!
//! macOS ships `memory_pressure`; elsewhere `free -h` stands in. Either way
//! the model gets raw text and does the parsing.

use async_trait::async_trait;
use serde_json::{Value, json};

use vitals_core::error::Result;
use vitals_core::tool::Tool;

use super::CommandProbe;

pub const MEMORY_TOOL: &str = "get_memory_info";

/// Runs the host memory report command and returns its output untouched.
pub struct MemoryInfoTool {
    probe: CommandProbe,
}

impl MemoryInfoTool {
    pub fn new() -> Self {
        Self {
            probe: default_probe(),
        }
    }

    /// Replace the default command (program followed by arguments).
    pub fn with_command(argv: &[String]) -> Result<Self> {
        Ok(Self {
            probe: CommandProbe::from_argv(MEMORY_TOOL, argv)?,
        })
    }

    pub fn probe(&self) -> &CommandProbe {
        &self.probe
    }
}

impl Default for MemoryInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "macos")]
fn default_probe() -> CommandProbe {
    CommandProbe::new(MEMORY_TOOL, "memory_pressure", &[])
}

#[cfg(not(target_os = "macos"))]
fn default_probe() -> CommandProbe {
    CommandProbe::new(MEMORY_TOOL, "free", &["-h"])
}

#[async_trait]
impl Tool for MemoryInfoTool {
    fn name(&self) -> &str {
        MEMORY_TOOL
    }

    fn description(&self) -> &str {
        "Get memory info"
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
