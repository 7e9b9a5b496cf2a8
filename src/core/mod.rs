//! Type registry components
//!
//! This module contains the type descriptors, the resolver seam the
//! hierarchy walk is generic over, the built-in platform hierarchy and the
//! registry file loader.

pub mod registry;
pub mod builtins;
pub mod loader;

pub use registry::{TypeDescriptor, TypeHandle, TypeKind, TypeRegistry, TypeResolver};
pub use builtins::ROOT_TYPE;
pub use loader::{build_registry, load_file, RegistryFormat};
