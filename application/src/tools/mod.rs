//! Executor registry and input validation.

pub mod path_guard;
pub mod registry;
pub mod validation;

pub use path_guard::PathGuard;
pub use registry::{ExecutorRegistry, RegisteredTool};
pub use validation::SchemaValidator;
