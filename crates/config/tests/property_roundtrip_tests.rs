//! Property-based tests for dotted-path document access.
//!
//! These tests verify the write-then-read contract of the document layer
//! with randomly generated paths and scalar values.
//!
//! Test coverage:
//! - set followed by get returns the same value for any dotted path
//! - the last of two writes through the same path wins
//! - writes through disjoint top-level paths never disturb each other

use proptest::prelude::*;
use std::path::Path;

use nimbus_config::{Document, Value};

/// Strategy for generating one lowercase path segment.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

/// Strategy for generating dotted paths between one and four segments deep.
fn dotted_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=4).prop_map(|segments| segments.join("."))
}

/// Strategy for generating scalar values of the types the store persists.
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 _./-]{0,24}".prop_map(Value::from),
    ]
}

fn empty_document() -> Document {
    Document::parse("nimbus:\n  version: 1\n", Path::new("prop.yaml")).expect("valid seed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// set followed by get at the same dotted path returns the value.
    #[test]
    fn test_set_get_round_trip(path in dotted_path_strategy(), value in scalar_strategy()) {
        let mut document = empty_document();
        document.set(&path, value.clone());
        prop_assert_eq!(document.get(&path), Some(&value));
    }

    /// A later set through the same path replaces the earlier value.
    #[test]
    fn test_last_set_wins(
        path in dotted_path_strategy(),
        first in scalar_strategy(),
        second in scalar_strategy(),
    ) {
        let mut document = empty_document();
        document.set(&path, first);
        document.set(&path, second.clone());
        prop_assert_eq!(document.get(&path), Some(&second));
    }

    /// Writes through disjoint top-level paths never disturb each other.
    #[test]
    fn test_disjoint_paths_independent(
        value_a in scalar_strategy(),
        value_b in scalar_strategy(),
    ) {
        let mut document = empty_document();
        document.set("alpha.inner", value_a.clone());
        document.set("beta.inner", value_b.clone());
        prop_assert_eq!(document.get("alpha.inner"), Some(&value_a));
        prop_assert_eq!(document.get("beta.inner"), Some(&value_b));
    }
}
