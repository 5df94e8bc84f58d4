pub mod command;
pub mod memory;
pub mod storage;

pub use command::CommandProbe;
pub use memory::{MEMORY_TOOL, MemoryInfoTool};
pub use storage::{STORAGE_TOOL, StorageInfoTool};

use vitals_core::config::ProbeSection;
use vitals_core::error::Result;
use vitals_core::tool::ToolRegistry;

/// Registry holding both host probes, storage first.
pub fn probe_registry(probes: &ProbeSection) -> Result<ToolRegistry> {
    let storage = match &probes.storage {
        Some(argv) => StorageInfoTool::with_command(argv)?,
        None => StorageInfoTool::new(),
    };
    let memory = match &probes.memory {
        Some(argv) => MemoryInfoTool::with_command(argv)?,
        None => MemoryInfoTool::new(),
    };

    let mut registry = ToolRegistry::new();
    registry.register(storage);
    registry.register(memory);
    Ok(registry)
}
