use proptest::prelude::*;
use proptest::sample::Index;
use typechain::core::registry::{TypeDescriptor, TypeRegistry};
use typechain::{ErrorKind, HierarchyPrinter, ROOT_TYPE};

fn print_to_string(printer: &HierarchyPrinter<TypeRegistry>, name: &str) -> String {
    let mut out: Vec<u8> = Vec::new();
    printer.print(name, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_checked_io_exception_chain() {
    let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());

    assert_eq!(
        print_to_string(&printer, "java.io.FileNotFoundException"),
        "java.io.FileNotFoundException\tjava.io.IOException\n\
         java.io.IOException\tjava.lang.Exception\n\
         java.lang.Exception\tjava.lang.Throwable\n\
         java.lang.Throwable\tjava.lang.Object\n"
    );
}

#[test]
fn test_security_exception_chains() {
    let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());

    let chain = printer.chain("javax.crypto.NoSuchPaddingException").unwrap();
    assert_eq!(chain[0].parent, "java.security.GeneralSecurityException");
    assert_eq!(chain.len(), 4);

    let chain = printer.chain("java.security.InvalidKeyException").unwrap();
    let parents: Vec<&str> = chain.iter().map(|l| l.parent.as_str()).collect();
    assert_eq!(
        parents,
        vec![
            "java.security.KeyException",
            "java.security.GeneralSecurityException",
            "java.lang.Exception",
            "java.lang.Throwable",
            ROOT_TYPE,
        ]
    );
}

#[test]
fn test_root_type_has_no_lines() {
    let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
    assert_eq!(print_to_string(&printer, ROOT_TYPE), "");
}

#[test]
fn test_unresolvable_name() {
    let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
    let mut out: Vec<u8> = Vec::new();
    let err = printer.print("NoSuchTypeXYZ", &mut out).unwrap_err();

    assert!(out.is_empty());
    assert_eq!(err.kind, ErrorKind::TypeResolution { name: "NoSuchTypeXYZ".to_string() });
    assert!(err.to_string().contains("NoSuchTypeXYZ"));
}

#[test]
fn test_simple_name_gets_hint() {
    let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
    let err = printer.resolve("FileNotFoundException").unwrap_err();

    assert!(err
        .suggestions
        .iter()
        .any(|s| s.contains("java.io.FileNotFoundException")));
}

#[test]
fn test_output_is_idempotent() {
    let printer = HierarchyPrinter::new(TypeRegistry::with_builtins());
    let first = print_to_string(&printer, "java.lang.NumberFormatException");
    let second = print_to_string(&printer, "java.lang.NumberFormatException");

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_user_types_on_top_of_builtins() {
    let registry = TypeRegistry::with_builtins();
    registry
        .register(TypeDescriptor::class("com.acme.RetryableException", "java.io.IOException"))
        .unwrap();
    registry
        .register(TypeDescriptor::class("com.acme.GatewayTimeout", "com.acme.RetryableException"))
        .unwrap();
    registry.validate().unwrap();

    let printer = HierarchyPrinter::new(registry);
    let chain = printer.chain("com.acme.GatewayTimeout").unwrap();
    assert_eq!(chain.len(), 5);
    assert_eq!(chain[1].child, "com.acme.RetryableException");
    assert_eq!(chain[1].parent, "java.io.IOException");
}

/// Registry of `T0..Tn` where `T0` is the root and each `Ti` extends some
/// earlier `Tj`. Returns the registry with every type's parent index.
fn random_forest(picks: &[Index]) -> (TypeRegistry, Vec<Option<usize>>) {
    let registry = TypeRegistry::new();
    let mut parents = vec![None];
    registry.register(TypeDescriptor::root("T0")).unwrap();

    for (offset, pick) in picks.iter().enumerate() {
        let i = offset + 1;
        let parent = pick.index(i);
        registry
            .register(TypeDescriptor::class(format!("T{}", i), format!("T{}", parent)))
            .unwrap();
        parents.push(Some(parent));
    }

    (registry, parents)
}

fn expected_depth(parents: &[Option<usize>], mut i: usize) -> usize {
    let mut depth = 0;
    while let Some(p) = parents[i] {
        depth += 1;
        i = p;
    }
    depth
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Line count equals depth, first child is the input, links are
    /// continuous, and the last parent is the root.
    #[test]
    fn prop_chain_shape(picks in prop::collection::vec(any::<Index>(), 0..40), target in any::<Index>()) {
        let (registry, parents) = random_forest(&picks);
        prop_assert!(registry.validate().is_ok());

        let t = target.index(parents.len());
        let name = format!("T{}", t);
        let printer = HierarchyPrinter::new(registry);
        let chain = printer.chain(&name).unwrap();

        prop_assert_eq!(chain.len(), expected_depth(&parents, t));
        if let Some(first) = chain.first() {
            prop_assert_eq!(&first.child, &name);
        }
        for pair in chain.windows(2) {
            prop_assert_eq!(&pair[0].parent, &pair[1].child);
        }
        if let Some(last) = chain.last() {
            prop_assert_eq!(last.parent.as_str(), "T0");
        }
    }

    /// Printed text matches the collected chain line for line
    #[test]
    fn prop_print_matches_chain(picks in prop::collection::vec(any::<Index>(), 1..30), target in any::<Index>()) {
        let (registry, parents) = random_forest(&picks);
        let name = format!("T{}", target.index(parents.len()));
        let printer = HierarchyPrinter::new(registry);

        let text = print_to_string(&printer, &name);
        let chain = printer.chain(&name).unwrap();
        let lines: Vec<String> = chain.iter().map(|l| format!("{}\t{}", l.child, l.parent)).collect();

        prop_assert_eq!(text.lines().collect::<Vec<_>>(), lines.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
