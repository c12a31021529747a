//! Order-normalized structuring of hashable values.
//!
//! Every language client of the ledger must hash atoms to bit-identical
//! digests, but JSON encoders do not agree on object key order. The
//! canonical form closes that gap: keyed containers are re-expressed as
//! an ordered **array of single-key wrapper objects**, sorted by key, so
//! the resulting structure serializes identically regardless of the
//! insertion order or the encoder's key-ordering behavior.
//!
//! Rules applied by [`structure`]:
//!
//! - Primitives (string, number, bool, null) pass through unchanged.
//! - Arrays are processed element-by-element, recursing into container
//!   elements only.
//! - Objects have their keys sorted byte-wise (not locale-aware), then
//!   become an array of `{key: structured(value)}` wrappers, one per key.
//! - An **empty** object stays an empty object, so it cannot be confused
//!   with an empty array.
//!
//! Any value the canonicalizer does not recognize passes through
//! unchanged. The network's deployed clients all run this permissive
//! form, so tightening it to an error would fork hash compatibility.

use serde_json::{Map, Value};

/// Recursively canonicalize a hashable value.
///
/// Pure and deterministic: equal inputs always produce identical output,
/// at any nesting depth.
pub fn structure(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(structure).collect()),
        Value::Object(map) if map.is_empty() => Value::Object(Map::new()),
        Value::Object(map) => {
            // serde_json's BTreeMap-backed Map already iterates in
            // byte-wise key order; collect explicitly so the sort is
            // independent of the map implementation.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();

            let wrapped = keys
                .into_iter()
                .map(|key| {
                    let mut wrapper = Map::with_capacity(1);
                    wrapper.insert(key.clone(), structure(&map[key]));
                    Value::Object(wrapper)
                })
                .collect();
            Value::Array(wrapped)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn primitives_pass_through() {
        assert_eq!(structure(&json!("a")), json!("a"));
        assert_eq!(structure(&json!(42)), json!(42));
        assert_eq!(structure(&json!(1.5)), json!(1.5));
        assert_eq!(structure(&json!(true)), json!(true));
        assert_eq!(structure(&Value::Null), Value::Null);
    }

    #[test]
    fn object_becomes_sorted_wrapper_array() {
        let input = json!({"b": 2, "a": 1, "c": 3});
        let expected = json!([{"a": 1}, {"b": 2}, {"c": 3}]);
        assert_eq!(structure(&input), expected);
    }

    #[test]
    fn key_order_is_bytewise() {
        // Uppercase letters sort before lowercase in byte order.
        let input = json!({"a": 1, "B": 2});
        let expected = json!([{"B": 2}, {"a": 1}]);
        assert_eq!(structure(&input), expected);
    }

    #[test]
    fn empty_object_stays_object() {
        let out = structure(&json!({}));
        assert_eq!(out, json!({}));
        assert!(out.is_object());
    }

    #[test]
    fn empty_array_stays_array() {
        assert_eq!(structure(&json!([])), json!([]));
    }

    #[test]
    fn arrays_recurse_per_element() {
        let input = json!([1, {"b": 2, "a": 1}, [true, {"z": 0}]]);
        let expected = json!([1, [{"a": 1}, {"b": 2}], [true, [{"z": 0}]]]);
        assert_eq!(structure(&input), expected);
    }

    #[test]
    fn nested_depth_three() {
        let input = json!({
            "outer": {
                "mid": {"y": 2, "x": 1},
                "list": [{"b": 2, "a": 1}]
            }
        });
        let expected = json!([
            {"outer": [
                {"list": [[{"a": 1}, {"b": 2}]]},
                {"mid": [{"x": 1}, {"y": 2}]}
            ]}
        ]);
        assert_eq!(structure(&input), expected);
    }

    #[test]
    fn insertion_order_irrelevant() {
        let mut a = Map::new();
        a.insert("first".into(), json!(1));
        a.insert("second".into(), json!(2));

        let mut b = Map::new();
        b.insert("second".into(), json!(2));
        b.insert("first".into(), json!(1));

        assert_eq!(structure(&Value::Object(a)), structure(&Value::Object(b)));
    }

    fn arb_value(depth: u32) -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(depth, 64, 8, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                proptest::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn deterministic(v in arb_value(4)) {
            prop_assert_eq!(structure(&v), structure(&v));
        }

        #[test]
        fn output_objects_are_empty_or_single_key(v in arb_value(3)) {
            fn check(v: &Value) -> bool {
                match v {
                    Value::Object(m) => m.len() <= 1 && m.values().all(check),
                    Value::Array(items) => items.iter().all(check),
                    _ => true,
                }
            }
            prop_assert!(check(&structure(&v)));
        }
    }
}
