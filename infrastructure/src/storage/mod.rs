//! Workspace storage adapters.

mod memory;

pub use memory::InMemoryWorkspace;
