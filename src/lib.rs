//! typechain - print the superclass chain of a fully-qualified type
//!
//! Types are resolved through an explicit registry instead of runtime
//! reflection: a built-in snapshot of the Java platform hierarchy, extended
//! by TOML or JSON registry files.

pub mod core;
pub mod analysis;
pub mod errors;
pub mod frontend;
pub mod infrastructure;

// Re-export commonly used items
pub use crate::core::{TypeDescriptor, TypeHandle, TypeKind, TypeRegistry, TypeResolver, ROOT_TYPE};
pub use crate::analysis::{Chain, ChainLink, HierarchyPrinter};
pub use crate::errors::{ChainError, ErrorKind};
pub use crate::frontend::{cli_main, Config};
pub use crate::infrastructure::{init_logging, LogConfig, LogFormat, LogOutput};
