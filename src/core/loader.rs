//! Registry files: TOML or JSON lists of type descriptors
//!
//! Files are merged in order on top of an optional built-in base, later
//! definitions overriding earlier ones, and the result is validated once.

use super::registry::{TypeDescriptor, TypeRegistry};
use crate::errors::{ChainError, ErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Toml,
    Json,
}

impl RegistryFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

/// Parse registry content; `origin` only labels errors.
pub fn parse_registry(
    content: &str,
    format: RegistryFormat,
    origin: &str,
) -> Result<Vec<TypeDescriptor>, ChainError> {
    let file: RegistryFile = match format {
        RegistryFormat::Toml => toml::from_str(content)
            .map_err(|e| ChainError::invalid_registry(origin, e.to_string()))?,
        RegistryFormat::Json => serde_json::from_str(content)
            .map_err(|e| ChainError::invalid_registry(origin, e.to_string()))?,
    };

    let mut seen = HashSet::new();
    for descriptor in &file.types {
        if descriptor.name.trim().is_empty() {
            return Err(ChainError::invalid_registry(origin, "type with empty name"));
        }
        if !seen.insert(descriptor.name.as_str()) {
            return Err(ChainError::invalid_registry(
                origin,
                ErrorKind::DuplicateType { name: descriptor.name.clone() }.to_string(),
            ));
        }
    }

    Ok(file.types)
}

/// Read one registry file into `registry`. Returns how many types it defined.
pub fn load_file(registry: &TypeRegistry, path: &Path) -> Result<usize, ChainError> {
    let origin = path.display().to_string();
    let format = RegistryFormat::from_path(path).ok_or_else(|| {
        ChainError::invalid_registry(&origin, "expected a .toml or .json extension")
    })?;

    let content = fs::read_to_string(path)
        .map_err(|e| ChainError::invalid_registry(&origin, e.to_string()))?;

    let descriptors = parse_registry(&content, format, &origin)?;
    let count = descriptors.len();

    for descriptor in descriptors {
        let name = descriptor.name.clone();
        if registry.register_or_replace(descriptor).is_some() {
            debug!(file = %origin, type_name = %name, "Type definition overridden");
        }
    }

    info!(file = %origin, types = count, "Registry file loaded");
    Ok(count)
}

/// Expand registry path patterns. Relative patterns resolve against `base_dir`.
pub fn expand_patterns(patterns: &[String], base_dir: Option<&Path>) -> Result<Vec<PathBuf>, ChainError> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let anchored = match base_dir {
            Some(base) if Path::new(pattern).is_relative() => base.join(pattern),
            _ => PathBuf::from(pattern),
        };

        if !is_glob(pattern) {
            paths.push(anchored);
            continue;
        }

        let anchored = anchored.to_string_lossy().to_string();
        let mut matched: Vec<PathBuf> = glob::glob(&anchored)
            .map_err(|e| ChainError::config(format!("Glob pattern error in '{}': {}", pattern, e)))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();

        if matched.is_empty() {
            return Err(ChainError::config(format!("No registry files match '{}'", pattern)));
        }

        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Build and validate a registry from the built-in base and registry files.
pub fn build_registry(builtins: bool, paths: &[PathBuf]) -> Result<TypeRegistry, ChainError> {
    let registry = if builtins {
        TypeRegistry::with_builtins()
    } else {
        TypeRegistry::new()
    };

    for path in paths {
        load_file(&registry, path)?;
    }

    registry.validate()?;
    debug!(types = registry.len(), builtins, "Registry ready");
    Ok(registry)
}
