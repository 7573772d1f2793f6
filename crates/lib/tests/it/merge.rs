//! Merge engine integration tests
//!
//! Covers the shallow assign family, deep merge with its array/object rules,
//! customizers, and the fill-only defaults family.

use object_collection::{Array, Object, Segment, Value, merge, traverse};
use serde_json::json;

use crate::helpers::*;

// ===== ASSIGN =====

#[test]
fn test_assign_later_sources_win() {
    let target = value(json!({"a": 0}));
    let result = merge::assign(
        &target,
        &[value(json!({"a": 1, "b": 1})), value(json!({"b": 2}))],
    );
    assert!(result.strict_eq(&target));
    assert_eq!(target, value(json!({"a": 1, "b": 2})));
}

#[test]
fn test_assign_replaces_nested_containers_wholesale() {
    let target = value(json!({"config": {"a": 1, "b": 2}}));
    let source = value(json!({"config": {"b": 3}}));
    merge::assign(&target, std::slice::from_ref(&source));
    assert_eq!(target, value(json!({"config": {"b": 3}})));

    let stored = traverse::get(&target, "config").unwrap().unwrap();
    let original = traverse::get(&source, "config").unwrap().unwrap();
    assert!(stored.strict_eq(&original));
}

#[test]
fn test_assign_in_includes_inherited() {
    let source = Value::from(object_with_prototype());
    let own = merge::assign(&Value::object(), std::slice::from_ref(&source));
    let all = merge::assign_in(&Value::object(), std::slice::from_ref(&source));
    assert_eq!(own, value(json!({"own": "mine"})));
    assert_eq!(all, value(json!({"own": "mine", "inherited": "from base"})));
}

#[test]
fn test_assign_with_customizer_sees_both_sides() {
    let target = value(json!({"total": 5, "name": "old"}));
    merge::assign_with(&target, &[value(json!({"total": 3, "name": "new"}))], |step| {
        match (step.target_value, step.source_value) {
            (Some(Value::Int(left)), Value::Int(right)) => Some(Value::Int(left + right)),
            _ => None,
        }
    });
    assert_eq!(target, value(json!({"total": 8, "name": "new"})));
}

#[test]
fn test_assign_in_with_customizer() {
    let source = Value::from(object_with_prototype());
    let target = Value::object();
    merge::assign_in_with(&target, &[source], |step| {
        step.source_value
            .as_text()
            .map(|text| Value::from(text.to_uppercase()))
    });
    assert_eq!(target, value(json!({"own": "MINE", "inherited": "FROM BASE"})));
}

#[test]
fn test_assign_array_source_into_array_target() {
    let target = value(json!([1, 2, 3]));
    merge::assign(&target, &[value(json!(["a"]))]);
    assert_eq!(target, value(json!(["a", 2, 3])));
}

// ===== MERGE =====

#[test]
fn test_merge_scalar_precedence() {
    let target = value(json!({"a": 1, "b": 2}));
    merge::merge(&target, &[value(json!({"b": 3, "c": 4}))]);
    assert_eq!(target, value(json!({"a": 1, "b": 3, "c": 4})));
}

#[test]
fn test_merge_arrays_index_by_index() {
    let target = value(json!({"a": [1]}));
    merge::merge(&target, &[value(json!({"a": [2, 3]}))]);
    assert_eq!(target, value(json!({"a": [2, 3]})));

    let target = value(json!({"a": [{"x": 1}, {"y": 1}]}));
    merge::merge(&target, &[value(json!({"a": [{"z": 2}]}))]);
    assert_eq!(target, value(json!({"a": [{"x": 1, "z": 2}, {"y": 1}]})));
}

#[test]
fn test_merge_many_sources_deeply() {
    let target = value(json!({"server": {"host": "localhost", "port": 80}}));
    merge::merge(
        &target,
        &[
            value(json!({"server": {"port": 8080}})),
            value(json!({"server": {"tls": {"enabled": true}}})),
            value(json!({"server": {"tls": {"cert": "c.pem"}}})),
        ],
    );
    assert_eq!(
        target,
        value(json!({
            "server": {
                "host": "localhost",
                "port": 8080,
                "tls": {"enabled": true, "cert": "c.pem"}
            }
        }))
    );
}

#[test]
fn test_merge_does_not_alias_sources() {
    let source = value(json!({"nested": {"list": [1, 2]}}));
    let target = Value::object();
    merge::merge(&target, std::slice::from_ref(&source));
    assert_eq!(target, source);

    let nested_target = traverse::get(&target, "nested.list").unwrap().unwrap();
    let nested_source = traverse::get(&source, "nested.list").unwrap().unwrap();
    assert!(!nested_target.strict_eq(&nested_source));
}

#[test]
fn test_merge_reuses_target_containers() {
    let target = value(json!({"a": {"x": 1}}));
    let inner = traverse::get(&target, "a").unwrap().unwrap();
    merge::merge(&target, &[value(json!({"a": {"y": 2}}))]);
    assert!(traverse::get(&target, "a").unwrap().unwrap().strict_eq(&inner));
    assert_path_eq(&inner, "y", 2);
}

#[test]
fn test_merge_source_with_repeated_container() {
    let shared = Object::from_iter([("v", 1)]);
    let source = Value::from(Object::from_iter([
        ("left", shared.clone()),
        ("right", shared),
    ]));
    let target = Value::object();
    merge::merge(&target, &[source]);
    assert_eq!(target, value(json!({"left": {"v": 1}, "right": {"v": 1}})));
}

#[test]
fn test_merge_self_referential_source() {
    let target = value(json!({"n": 0}));
    merge::merge(&target, &[self_referential()]);
    assert_path_eq(&target, "n", 1);
    assert_path_eq(&target, "self.n", 1);

    let nested = traverse::get(&target, "self").unwrap().unwrap();
    let again = traverse::get(&nested, "self").unwrap().unwrap();
    assert!(again.strict_eq(&nested));
}

#[test]
fn test_merge_with_concatenating_arrays() {
    let target = value(json!({"a": [1], "b": {"c": [1]}}));
    merge::merge_with(
        &target,
        &[value(json!({"a": [2, 3], "b": {"c": [2]}}))],
        |step| match (step.target_value?, step.source_value) {
            (Value::Array(left), Value::Array(right)) => {
                let joined: Array = left.to_vec().into_iter().chain(right.to_vec()).collect();
                Some(Value::from(joined))
            }
            _ => None,
        },
    );
    assert_eq!(target, value(json!({"a": [1, 2, 3], "b": {"c": [1, 2]}})));
}

#[test]
fn test_merge_with_customizer_arguments() {
    let target = value(json!({"t": 1}));
    let source = value(json!({"t": 2, "s": 3}));
    let mut seen = Vec::new();
    merge::merge_with(&target, std::slice::from_ref(&source), |step| {
        assert!(step.source.strict_eq(&source));
        seen.push((
            step.key.clone(),
            step.target_value.cloned(),
            step.source_value.clone(),
            step.target.strict_eq(&target),
        ));
        None
    });
    assert_eq!(
        seen,
        vec![
            (Segment::from("t"), Some(Value::Int(1)), Value::Int(2), true),
            (Segment::from("s"), None, Value::Int(3), true),
        ]
    );
}

// ===== DEFAULTS =====

#[test]
fn test_defaults_only_fills_missing_keys() {
    let target = value(json!({"a": 1}));
    merge::defaults(&target, &[value(json!({"a": 2, "b": 3}))]);
    assert_eq!(target, value(json!({"a": 1, "b": 3})));

    let merged = value(json!({"a": 1}));
    merge::merge(&merged, &[value(json!({"a": 2, "b": 3}))]);
    assert_eq!(merged, value(json!({"a": 2, "b": 3})));
}

#[test]
fn test_defaults_respects_null_and_earlier_sources() {
    let target = value(json!({"a": null}));
    merge::defaults(
        &target,
        &[value(json!({"a": 1, "b": "first"})), value(json!({"b": "second"}))],
    );
    assert_eq!(target, value(json!({"a": null, "b": "first"})));
}

#[test]
fn test_defaults_is_shallow() {
    let target = value(json!({"cfg": {"a": 1}}));
    merge::defaults(&target, &[value(json!({"cfg": {"b": 2}}))]);
    assert_eq!(target, value(json!({"cfg": {"a": 1}})));
}

#[test]
fn test_defaults_deep_fills_nested_gaps() {
    let target = value(json!({"cfg": {"a": 1, "list": ["x"]}}));
    merge::defaults_deep(
        &target,
        &[value(json!({"cfg": {"a": 9, "b": 2, "list": ["y", "z"]}, "extra": true}))],
    );
    assert_eq!(
        target,
        value(json!({"cfg": {"a": 1, "b": 2, "list": ["x", "z"]}, "extra": true}))
    );
}
