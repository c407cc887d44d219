//! Property-based tests for schema parsing.
//!
//! These tests use proptest to verify universal properties across many
//! generated inputs.

use proptest::prelude::*;
use serde_json::{json, Value};

use airfoil::schema::*;

// ============================================================================
// Generators
// ============================================================================

/// Generate arbitrary primitive type names.
fn arb_primitive_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PRIMITIVE_TYPE_NAMES.to_vec())
}

/// Generate valid type names that are not primitives and carry no dot.
fn arb_user_type_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}"
        .prop_filter("must not collide with a primitive", |name| {
            PrimitiveType::from_name(name).is_none()
        })
}

/// Generate a namespace of one or two dotted segments.
fn arb_namespace() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_user_type_name(),
        (arb_user_type_name(), arb_user_type_name()).prop_map(|(a, b)| format!("{}.{}", a, b)),
    ]
}

// ============================================================================
// Parser Properties
// ============================================================================

proptest! {
    #[test]
    fn primitive_names_always_parse_to_matching_primitive(name in arb_primitive_name()) {
        let schema = SchemaParser::new().parse(&json!(name)).unwrap();
        match schema {
            Schema::Primitive(p) => prop_assert_eq!(p.name(), name),
            other => prop_assert!(false, "expected primitive, got {:?}", other),
        }
    }

    #[test]
    fn unregistered_bare_names_always_fail(name in arb_user_type_name()) {
        let err = SchemaParser::new().parse(&json!(name)).unwrap_err();
        prop_assert!(err.message().contains("unknown type name"));
    }

    #[test]
    fn array_nesting_depth_is_preserved(depth in 1usize..24) {
        let mut doc: Value = json!("int");
        for _ in 0..depth {
            doc = json!({"type": "array", "items": doc});
        }

        let mut schema = SchemaParser::new().parse(&doc).unwrap();
        let mut seen = 0usize;
        while let Schema::Array(items) = schema {
            schema = *items;
            seen += 1;
        }

        prop_assert_eq!(seen, depth);
        prop_assert_eq!(schema, Schema::Primitive(PrimitiveType::Int));
    }

    #[test]
    fn union_branch_order_is_preserved(names in prop::collection::vec(arb_primitive_name(), 1..8)) {
        let doc = Value::Array(names.iter().map(|n| json!(n)).collect());
        let schema = SchemaParser::new().parse(&doc).unwrap();

        prop_assert!(matches!(schema, Schema::Union(_)), "expected union, got {:?}", schema);
        let Schema::Union(branches) = schema else {
            unreachable!()
        };
        prop_assert_eq!(branches.len(), names.len());
        for (branch, name) in branches.iter().zip(&names) {
            match branch {
                Schema::Primitive(p) => prop_assert_eq!(&p.name(), name),
                other => prop_assert!(false, "expected primitive branch, got {:?}", other),
            }
        }
    }

    #[test]
    fn fixed_round_trips_name_and_size(name in arb_user_type_name(), size in 1u64..4096) {
        let doc = json!({"type": "fixed", "name": name.clone(), "size": size});
        let schema = SchemaParser::new().parse(&doc).unwrap();
        prop_assert_eq!(schema, Schema::Fixed(FixedSchema::new(name, size as usize)));
    }

    #[test]
    fn unique_enum_symbols_parse_in_order(
        symbols in prop::collection::hash_set(arb_user_type_name(), 1..6)
    ) {
        let symbols: Vec<String> = symbols.into_iter().collect();
        let doc = json!({"type": "enum", "symbols": symbols.clone()});
        let schema = SchemaParser::new().parse(&doc).unwrap();

        prop_assert!(matches!(schema, Schema::Enum(_)), "expected enum, got {:?}", schema);
        let Schema::Enum(e) = schema else {
            unreachable!()
        };
        prop_assert_eq!(e.symbols(), symbols.as_slice());
    }
}

// ============================================================================
// Name Resolution Properties
// ============================================================================

proptest! {
    #[test]
    fn bare_names_gain_the_namespace(name in arb_user_type_name(), ns in arb_namespace()) {
        let resolved = full_type_name(&json!(name.clone()), Some(&ns)).unwrap();
        prop_assert_eq!(resolved, format!("{}.{}", ns, name));
    }

    #[test]
    fn qualified_names_are_unchanged(name in arb_user_type_name(), ns in arb_namespace()) {
        let qualified = format!("{}.{}", ns, name);
        let resolved = full_type_name(&json!(qualified.clone()), Some("other")).unwrap();
        prop_assert_eq!(resolved, qualified);
    }

    #[test]
    fn primitive_names_are_never_namespaced(
        name in arb_primitive_name(),
        ns in arb_namespace()
    ) {
        let resolved = full_type_name(&json!(name), Some(&ns)).unwrap();
        prop_assert_eq!(resolved, name);
    }
}
