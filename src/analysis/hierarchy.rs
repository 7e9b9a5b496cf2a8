//! Superclass chain traversal
//!
//! Resolves a type by name, then follows direct superclasses until a type
//! with none is reached, emitting one `(child, parent)` link per step.

use crate::core::registry::{TypeHandle, TypeResolver};
use crate::errors::{ChainError, ErrorKind};
use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use tracing::{debug, instrument, trace};

/// One edge of an ancestor chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainLink {
    pub child: String,
    pub parent: String,
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.child, self.parent)
    }
}

/// Ancestor links ordered from the most specific type to the root
pub type Chain = Vec<ChainLink>;

/// Lazy walk up a superclass chain.
///
/// Yields links until the root, then `None`. A superclass that does not
/// resolve, or a type seen twice, yields one error and ends the walk.
pub struct Ancestry<'r, R: TypeResolver + ?Sized> {
    resolver: &'r R,
    previous: String,
    next: Option<String>,
    path: Vec<String>,
    visited: HashSet<String>,
    done: bool,
}

impl<'r, R: TypeResolver + ?Sized> Ancestry<'r, R> {
    /// `name` is what the caller asked for; it labels the first link even
    /// when the resolver hands back a differently named type.
    fn new(resolver: &'r R, name: &str, start: &TypeHandle) -> Self {
        let mut visited = HashSet::new();
        visited.insert(name.to_string());
        visited.insert(start.name().to_string());

        Self {
            resolver,
            previous: name.to_string(),
            next: start.superclass().map(str::to_string),
            path: vec![name.to_string()],
            visited,
            done: false,
        }
    }

    fn fail(&mut self, error: ChainError) -> Option<Result<ChainLink, ChainError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl<'r, R: TypeResolver + ?Sized> Iterator for Ancestry<'r, R> {
    type Item = Result<ChainLink, ChainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(current) = self.next.take() else {
            self.done = true;
            return None;
        };

        if !self.visited.insert(current.clone()) {
            let start = self.path.iter().position(|n| *n == current).unwrap_or(0);
            let mut chain = self.path[start..].to_vec();
            chain.push(current);
            return self.fail(ChainError::new(ErrorKind::CircularInheritance { chain }));
        }
        self.path.push(current.clone());

        let Some(handle) = self.resolver.resolve(&current) else {
            let known = self.resolver.known_names();
            return self.fail(ChainError::unresolved(&current, &known));
        };

        trace!(child = %self.previous, parent = %current, "Ancestor resolved");
        self.next = handle.superclass().map(str::to_string);
        let child = std::mem::replace(&mut self.previous, current.clone());

        Some(Ok(ChainLink { child, parent: current }))
    }
}

/// Prints the ancestor chain of a type resolved through `R`
pub struct HierarchyPrinter<R> {
    resolver: R,
}

impl<R: TypeResolver> HierarchyPrinter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolve(&self, name: &str) -> Result<TypeHandle, ChainError> {
        self.resolver.resolve(name).ok_or_else(|| {
            debug!(type_name = %name, "Type resolution failed");
            ChainError::unresolved(name, &self.resolver.known_names())
        })
    }

    /// Walk lazily. The starting type is resolved up front so an unknown
    /// name fails before any link exists.
    pub fn ancestry(&self, name: &str) -> Result<Ancestry<'_, R>, ChainError> {
        let start = self.resolve(name)?;
        debug!(type_name = %start.name(), kind = %start.kind(), "Type resolved");
        Ok(Ancestry::new(&self.resolver, name, &start))
    }

    pub fn chain(&self, name: &str) -> Result<Chain, ChainError> {
        self.ancestry(name)?.collect()
    }

    /// Number of links between `name` and its root
    pub fn depth(&self, name: &str) -> Result<usize, ChainError> {
        self.ancestry(name)?.try_fold(0, |depth, link| link.map(|_| depth + 1))
    }

    /// Stream `child<TAB>parent` lines to `out` as they are resolved.
    /// Returns the number of lines written.
    #[instrument(level = "debug", skip(self, out))]
    pub fn print<W: Write>(&self, name: &str, out: &mut W) -> Result<usize, ChainError> {
        let mut written = 0;

        for link in self.ancestry(name)? {
            let link = link?;
            writeln!(out, "{}", link).map_err(|e| ChainError::io("Failed to write chain", &e))?;
            written += 1;
        }

        out.flush().map_err(|e| ChainError::io("Failed to flush output", &e))?;
        debug!(type_name = %name, lines = written, "Chain printed");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{TypeDescriptor, TypeRegistry};
    use crate::core::builtins::ROOT_TYPE;
    use std::collections::HashMap;

    fn link(child: &str, parent: &str) -> ChainLink {
        ChainLink {
            child: child.to_string(),
            parent: parent.to_string(),
        }
    }

    /// Resolver with no validation, so broken graphs can be expressed
    struct RawResolver(HashMap<String, TypeDescriptor>);

    impl RawResolver {
        fn new(types: &[(&str, Option<&str>)]) -> Self {
            Self(
                types
                    .iter()
                    .map(|(name, parent)| {
                        let d = match parent {
                            Some(p) => TypeDescriptor::class(*name, *p),
                            None => TypeDescriptor::root(*name),
                        };
                        (name.to_string(), d)
                    })
                    .collect(),
            )
        }
    }

    impl TypeResolver for RawResolver {
        fn resolve(&self, name: &str) -> Option<TypeHandle> {
            self.0.get(name).cloned().map(TypeHandle::new)
        }
    }

    #[test]
    fn test_file_not_found_chain() {
        let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
        let chain = printer.chain("java.io.FileNotFoundException").unwrap();

        assert_eq!(
            chain,
            vec![
                link("java.io.FileNotFoundException", "java.io.IOException"),
                link("java.io.IOException", "java.lang.Exception"),
                link("java.lang.Exception", "java.lang.Throwable"),
                link("java.lang.Throwable", ROOT_TYPE),
            ]
        );
    }

    #[test]
    fn test_print_format() {
        let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
        let mut out: Vec<u8> = Vec::new();
        let lines = printer.print("java.lang.Integer", &mut out).unwrap();

        assert_eq!(lines, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "java.lang.Integer\tjava.lang.Number\njava.lang.Number\tjava.lang.Object\n"
        );
    }

    #[test]
    fn test_root_prints_nothing() {
        let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(printer.print(ROOT_TYPE, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_interface_prints_nothing() {
        let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
        assert!(printer.chain("java.lang.Runnable").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_type_writes_nothing() {
        let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
        let mut out: Vec<u8> = Vec::new();
        let err = printer.print("NoSuchTypeXYZ", &mut out).unwrap_err();

        assert_eq!(err.kind, ErrorKind::TypeResolution { name: "NoSuchTypeXYZ".to_string() });
        assert!(out.is_empty());
    }

    #[test]
    fn test_dangling_superclass_mid_chain() {
        let resolver = RawResolver::new(&[("Leaf", Some("Middle")), ("Middle", Some("Gone"))]);
        let printer = HierarchyPrinter::new(resolver);
        let mut out: Vec<u8> = Vec::new();
        let err = printer.print("Leaf", &mut out).unwrap_err();

        assert_eq!(err.kind, ErrorKind::TypeResolution { name: "Gone".to_string() });
        assert_eq!(String::from_utf8(out).unwrap(), "Leaf\tMiddle\n");
    }

    #[test]
    fn test_cycle_is_reported_not_looped() {
        let resolver = RawResolver::new(&[("A", Some("B")), ("B", Some("A"))]);
        let printer = HierarchyPrinter::new(resolver);
        let results: Vec<_> = printer.ancestry("A").unwrap().collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Ok(link("A", "B")));
        assert_eq!(
            results[1].as_ref().unwrap_err().kind,
            ErrorKind::CircularInheritance {
                chain: vec!["A".to_string(), "B".to_string(), "A".to_string()]
            }
        );
    }

    /// Resolves short names to their qualified built-in descriptors
    struct AliasResolver(TypeRegistry);

    impl TypeResolver for AliasResolver {
        fn resolve(&self, name: &str) -> Option<TypeHandle> {
            self.0.resolve(name).or_else(|| {
                let qualified = self
                    .0
                    .names()
                    .into_iter()
                    .find(|n| n.rsplit('.').next() == Some(name))?;
                self.0.resolve(&qualified)
            })
        }
    }

    #[test]
    fn test_first_link_keeps_requested_name() {
        let printer = HierarchyPrinter::new(AliasResolver(TypeRegistry::with_builtins()));
        let chain = printer.chain("IOException").unwrap();

        assert_eq!(chain[0], link("IOException", "java.lang.Exception"));
        assert_eq!(chain.last().unwrap().parent, ROOT_TYPE);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_depth() {
        let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
        assert_eq!(printer.depth("java.lang.ArrayIndexOutOfBoundsException").unwrap(), 5);
        assert_eq!(printer.depth(ROOT_TYPE).unwrap(), 0);
    }

    #[test]
    fn test_works_through_reference() {
        let registry = TypeRegistry::new();
        registry.register(TypeDescriptor::root("Base")).unwrap();
        registry.register(TypeDescriptor::class("Derived", "Base")).unwrap();

        let printer = HierarchyPrinter::new(&registry);
        assert_eq!(printer.chain("Derived").unwrap(), vec![link("Derived", "Base")]);
    }
}
