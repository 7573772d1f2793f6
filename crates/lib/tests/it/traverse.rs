//! Read-side integration tests
//!
//! Reads never mutate, never create containers and never fail for missing
//! data. Only malformed paths are errors.

use object_collection::{Object, Value, path, traverse};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_get_nested_values() {
    let doc = sample_document();
    assert_path_eq(&doc, "user.name", "Alice");
    assert_path_eq(&doc, "user.emails[1]", "a@example.org");
    assert_path_eq(&doc, "posts[0].tags[0]", "rust");
    assert_path_eq(&doc, "posts.1.id", 2);
    assert_path_eq(&doc, "codes.404", "not found");
    assert_path_eq(&doc, "codes[404]", "not found");
}

#[test]
fn test_get_found_falsy_values() {
    let doc = sample_document();
    assert_path_eq(&doc, "user.active", false);
    assert_path_eq(&doc, "user.nickname", Value::Null);
    assert_path_eq(&doc, "posts[1].tags", value(json!([])));
}

#[test]
fn test_get_missing_paths() {
    let doc = sample_document();
    assert_path_missing(&doc, "user.age");
    assert_path_missing(&doc, "user.name.first");
    assert_path_missing(&doc, "posts[2].id");
    assert_path_missing(&doc, "posts.first");
    assert_path_missing(&doc, "user.emails[-1]");
}

#[test]
fn test_get_or_default_is_not_stored() {
    let doc = sample_document();
    let fallback = traverse::get_or(&doc, "user.age", 42).unwrap();
    assert_eq!(fallback, Value::Int(42));
    assert!(!traverse::has(&doc, "user.age").unwrap());

    let stored = traverse::get_or(&doc, "user.nickname", "none").unwrap();
    assert_eq!(stored, Value::Null);
}

#[test]
fn test_get_with_pre_split_path() {
    let doc = sample_document();
    let result = traverse::get(&doc, path!["posts", 0, "id"]).unwrap();
    assert_eq!(result, Some(Value::Int(1)));

    let dotted_key = value(json!({"a.b": {"c": 1}}));
    assert_eq!(traverse::get(&dotted_key, ["a.b", "c"]).unwrap(), Some(Value::Int(1)));
    assert_eq!(traverse::get(&dotted_key, "a.b.c").unwrap(), None);
    assert_eq!(
        traverse::get(&dotted_key, "['a.b'].c").unwrap(),
        Some(Value::Int(1))
    );
}

#[test]
fn test_has_vs_has_in() {
    let root = Value::from(Object::from_iter([("obj", object_with_prototype())]));
    assert!(traverse::has(&root, "obj.own").unwrap());
    assert!(!traverse::has(&root, "obj.inherited").unwrap());
    assert!(traverse::has_in(&root, "obj.inherited").unwrap());
    assert!(!traverse::has_in(&root, "obj.inherited.deeper").unwrap());
}

#[test]
fn test_has_scenarios() {
    let present = value(json!({"a": {"d": 2}}));
    assert!(traverse::has(&present, "a.d").unwrap());

    let absent = value(json!({"a": {}}));
    assert!(!traverse::has(&absent, "a.d").unwrap());

    let null_leaf = value(json!({"a": null}));
    assert!(traverse::has(&null_leaf, "a").unwrap());
    assert!(!traverse::has(&null_leaf, "a.b").unwrap());
}

#[test]
fn test_exists_and_at() {
    let doc = sample_document();
    assert!(traverse::exists(&doc, ["user.name", "posts[1].tags"]).unwrap());
    assert!(!traverse::exists(&doc, ["user.name", "user.age"]).unwrap());
    assert!(traverse::exists(&doc, Vec::<&str>::new()).unwrap());

    let values = traverse::at(&doc, ["user.name", "nope", "posts[0].id"]).unwrap();
    assert_eq!(
        values,
        vec![Some(Value::from("Alice")), None, Some(Value::Int(1))]
    );
}

#[test]
fn test_reads_do_not_mutate() {
    let doc = sample_document();
    assert_unchanged(&doc, |doc| {
        traverse::get(doc, "a.b.c[3].d").unwrap();
        traverse::get(doc, "posts[9]").unwrap();
        traverse::has(doc, "x.y").unwrap();
        traverse::has_in(doc, "user.emails[7]").unwrap();
        traverse::at(doc, ["q", "r.s"]).unwrap();
    });
}

#[test]
fn test_malformed_path_errors() {
    let doc = sample_document();
    let err = traverse::get(&doc, "user[").unwrap_err();
    assert!(err.is_path_error());
    assert_eq!(err.module(), "path");
    assert!(traverse::has(&doc, "").is_err());
}
