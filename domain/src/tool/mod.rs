//! Tool domain module
//!
//! This module defines the core abstractions for executing a **batch of tool
//! calls** produced by one model turn against a shared workspace.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDefinition`] (name, description,
//! [`InputSchema`]), invoked via a [`ToolCall`], answered by its executor with
//! an [`ExecutorResult`] and finally returned to the conversation as a
//! [`ToolOutcome`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌────────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ExecutorResult │───▶│ ToolOutcome  │
//! │ (registry)   │    │ (id, input)  │    │ (cached)       │    │ (wire reply) │
//! └──────────────┘    └──────────────┘    └────────────────┘    └──────────────┘
//! ```
//!
//! # Read / Write Classification
//!
//! A closed set of [`MutatingTools`] decides which calls are writes. Writes
//! are grouped by their target path into [`WriteGroup`]s that run strictly in
//! submission order; reads and different-path groups may run concurrently.
//!
//! | Class | Examples | Ordering |
//! |-------|----------|----------|
//! | **Read** | `read_file`, `search_files` | none guaranteed |
//! | **Write** | `write_file`, `patch_lines` | submission order per path |
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application**: executor/validator/rate-limiter ports and the scheduler
//! - **Infrastructure**: concrete executors over the real or virtual filesystem

pub mod cache_key;
pub mod classification;
pub mod entities;
pub mod error;
pub mod schema;
pub mod traits;
pub mod value_objects;

pub use cache_key::CacheKey;
pub use classification::{
    BatchPlan, Indexed, MutatingTools, SHARED_WRITE_KEY, ToolClass, WriteGroup, normalize_path,
};
pub use entities::{ToolCall, ToolDefinition, ToolOutcome, ToolSpec};
pub use error::ToolFailure;
pub use schema::{InputSchema, PropertySchema, PropertyType};
pub use traits::{DefaultToolValidator, ToolValidator, ValidationReport};
pub use value_objects::{ExecutorMetadata, ExecutorResult};
