//! Refresh-token session registry.

pub mod memory;
pub mod registry;

pub use memory::MemorySessionRegistry;
pub use registry::SessionRegistry;
