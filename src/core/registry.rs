use crate::errors::{ChainError, ErrorKind};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Whether a type participates in the linear superclass chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    /// Interfaces have no superclass; their supertypes are not a chain.
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

/// Registry entry: compact representation of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>, superclass: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            superclass: Some(superclass.into()),
        }
    }

    /// A class with no superclass: the root of its hierarchy.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            superclass: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Interface,
            superclass: None,
        }
    }
}

/// A resolved type. Owned, so it outlives registry guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle {
    descriptor: TypeDescriptor,
}

impl TypeHandle {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn kind(&self) -> TypeKind {
        self.descriptor.kind
    }

    /// Direct superclass, or `None` for a root class or an interface
    pub fn superclass(&self) -> Option<&str> {
        match self.descriptor.kind {
            TypeKind::Class => self.descriptor.superclass.as_deref(),
            TypeKind::Interface => None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.superclass().is_none()
    }
}

/// Lookup of types by fully-qualified name
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Option<TypeHandle>;

    /// Every name this resolver knows, used for diagnostics.
    fn known_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn resolve(&self, name: &str) -> Option<TypeHandle> {
        (**self).resolve(name)
    }

    fn known_names(&self) -> Vec<String> {
        (**self).known_names()
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for std::sync::Arc<R> {
    fn resolve(&self, name: &str) -> Option<TypeHandle> {
        (**self).resolve(name)
    }

    fn known_names(&self) -> Vec<String> {
        (**self).known_names()
    }
}

#[derive(Debug)]
pub struct TypeRegistry {
    types: DashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// Registry seeded with the built-in platform hierarchy
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for descriptor in super::builtins::descriptors() {
            registry.types.insert(descriptor.name.clone(), descriptor.clone());
        }
        registry
    }

    pub fn register(&self, descriptor: TypeDescriptor) -> Result<(), ChainError> {
        if self.types.contains_key(&descriptor.name) {
            return Err(ChainError::new(ErrorKind::DuplicateType {
                name: descriptor.name,
            }));
        }
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Insert, overriding any earlier definition. Returns the replaced entry.
    pub fn register_or_replace(&self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.name.clone(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).map(|r| r.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Check that the registry forms a forest of finite superclass chains.
    ///
    /// Every class superclass must be registered, interfaces must not declare
    /// one, and no chain may revisit a type.
    pub fn validate(&self) -> Result<(), ChainError> {
        for name in self.names() {
            let Some(descriptor) = self.get(&name) else { continue };
            let Some(superclass) = descriptor.superclass else { continue };

            if descriptor.kind == TypeKind::Interface {
                return Err(ChainError::new(ErrorKind::InterfaceSuperclass {
                    name,
                    superclass,
                }));
            }
            if !self.contains(&superclass) {
                return Err(ChainError::new(ErrorKind::UnknownSuperclass {
                    name,
                    superclass,
                }));
            }
        }

        // Superclasses all exist now, so each walk ends at a root or a repeat.
        let mut settled: HashSet<String> = HashSet::new();
        for name in self.names() {
            let mut path: Vec<String> = Vec::new();
            let mut on_path: HashSet<String> = HashSet::new();
            let mut current = Some(name);

            while let Some(type_name) = current {
                if settled.contains(&type_name) {
                    break;
                }
                if !on_path.insert(type_name.clone()) {
                    let start = path.iter().position(|n| *n == type_name).unwrap_or(0);
                    let mut chain = path[start..].to_vec();
                    chain.push(type_name);
                    return Err(ChainError::new(ErrorKind::CircularInheritance { chain }));
                }
                path.push(type_name.clone());
                current = self.get(&type_name).and_then(|d| d.superclass);
            }

            settled.extend(path);
        }

        Ok(())
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<TypeHandle> {
        self.get(name).map(TypeHandle::new)
    }

    fn known_names(&self) -> Vec<String> {
        self.names()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
