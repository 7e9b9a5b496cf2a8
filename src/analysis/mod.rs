//! Hierarchy analysis
//!
//! This module walks superclass chains over any `TypeResolver`.

pub mod hierarchy;

pub use hierarchy::{Ancestry, Chain, ChainLink, HierarchyPrinter};
