//! Collection wrapper integration tests

use object_collection::{
    Collection, Error, Function, Object, Value, collection::CollectionError,
};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_default_root_is_an_empty_object() {
    let collection = Collection::new();
    assert_eq!(collection.data(), Value::object());
    assert!(collection.is_empty());
    assert_eq!(collection.to_string(), "{}");
}

#[test]
fn test_scalar_root_is_rejected() -> object_collection::Result<()> {
    let err = Collection::from_value("text").unwrap_err();
    assert!(matches!(
        err,
        Error::Collection(CollectionError::NotAContainer { ref type_name }) if type_name == "text"
    ));
    Collection::from_value(Value::array())?;
    Ok(())
}

#[test]
fn test_from_value_aliases_and_cloned_from_copies() -> object_collection::Result<()> {
    let root = value(json!({"a": 1}));
    let aliased = Collection::from_value(root.clone())?;
    let copied = Collection::cloned_from(&root)?;

    aliased.set("b", 2)?;
    assert_path_eq(&root, "b", 2);
    assert_eq!(copied.data(), value(json!({"a": 1})));
    Ok(())
}

#[test]
fn test_view_and_copy_modes() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"message": {"text": "Hello"}}))?;

    let view = collection.new_instance_from("message", None)?;
    let copy = collection.clone_instance_from("message", None)?;
    view.set("text", "From View")?;
    copy.set("text", "From Clone")?;

    assert_eq!(collection.get("message.text")?, Some(Value::from("From View")));
    assert_eq!(copy.get("text")?, Some(Value::from("From Clone")));
    Ok(())
}

#[test]
fn test_view_of_missing_path_attaches_default() -> object_collection::Result<()> {
    let collection = Collection::new();
    let list = collection.path("items", Some(Value::array()))?;
    list.set(0usize, "first")?;
    assert_eq!(collection.data(), value(json!({"items": ["first"]})));

    let copy = collection.clone_path("absent", Some(value(json!({"d": 1}))))?;
    assert_eq!(copy.data(), value(json!({"d": 1})));
    assert!(!collection.has("absent")?);
    Ok(())
}

#[test]
fn test_array_helper() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"one": 1, "list": [1]}))?;

    let list = collection.array("list", false)?;
    list.push(2);
    assert_eq!(collection.get("list")?, Some(value(json!([1, 2]))));

    let created = collection.array("nested.new", false)?;
    assert!(created.is_empty());
    assert_eq!(collection.get("nested")?, Some(value(json!({"new": []}))));

    let err = collection.array("one", false).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.to_string(), "Path \"one\" exists but it's not an array");

    let wrapped = collection.array("one", true)?;
    assert_eq!(wrapped.to_vec(), vec![Value::Int(1)]);
    assert_eq!(collection.get("one")?, Some(value(json!([1]))));
    Ok(())
}

#[test]
fn test_call_helper() -> object_collection::Result<()> {
    let collection = Collection::new();
    collection.set(
        "greet",
        Function::new(|args| {
            let name = args.first().and_then(Value::as_text).unwrap_or("world");
            Ok(Value::from(format!("hello {name}")))
        }),
    )?;
    collection.set(
        "fail",
        Function::new(|_| {
            Err(object_collection::value::ValueError::CallFailed {
                reason: "boom".into(),
            }
            .into())
        }),
    )?;

    assert_eq!(collection.call("greet", &[Value::from("ada")])?, Value::from("hello ada"));
    assert_eq!(collection.call("greet", &[])?, Value::from("hello world"));
    assert!(collection.call("fail", &[]).unwrap_err().is_call_error());

    let err = collection.call("missing", &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::Collection(CollectionError::NotAFunction { ref path }) if path == "missing"
    ));
    Ok(())
}

#[test]
fn test_setters() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"a": 1, "b": 2, "c": 3}))?;
    collection.set_many(&Object::from_iter([("b", 4), ("c", 5)]))?;
    assert_eq!(collection.data(), value(json!({"a": 1, "b": 4, "c": 5})));

    collection
        .set_defined("skip", Value::Null)?
        .set_paths_to_same_value(["x", "y.z"], 0)?
        .update("a", |current| {
            Value::from(current.and_then(|v| v.as_int()).unwrap_or(0) + 1)
        })?;
    assert_eq!(
        collection.data(),
        value(json!({"a": 2, "b": 4, "c": 5, "x": 0, "y": {"z": 0}}))
    );

    assert_eq!(collection.set_and_get("w", "v")?, Value::from("v"));
    assert!(collection.unset("w")?);
    assert!(!collection.unset("w")?);
    Ok(())
}

#[test]
fn test_reads() -> object_collection::Result<()> {
    let collection = Collection::from_value(sample_document())?;
    assert!(collection.exists(["user.name", "posts[0]"])?);
    assert!(!collection.exists(["user.name", "user.age"])?);
    assert_eq!(
        collection.at(["user.name", "posts[5]"])?,
        vec![Some(Value::from("Alice")), None]
    );
    assert_eq!(collection.get_or("user.age", 0)?, Value::Int(0));
    assert_eq!(collection.keys(), vec!["user", "posts", "codes"]);
    assert_eq!(collection.values().len(), 3);
    Ok(())
}

#[test]
fn test_pick_omit_defined() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"a": 1, "b": null, "c": {"d": 2, "e": 3}}))?;

    assert_eq!(collection.pick(["a", "c.e"])?, value(json!({"a": 1, "c": {"e": 3}})));
    assert_eq!(collection.omit(["b", "c.d"])?, value(json!({"a": 1, "c": {"e": 3}})));
    assert_eq!(collection.defined(), value(json!({"a": 1, "c": {"d": 2, "e": 3}})));

    let rest = collection.forget(["c"])?;
    assert_eq!(rest.keys(), vec!["a", "b"]);
    let picked = collection.collect(["c.d"])?;
    assert_eq!(picked.get("c.d")?, Some(Value::Int(2)));

    collection.remove_null_or_undefined();
    assert!(!collection.has("b")?);
    Ok(())
}

#[test]
fn test_merge_family_chains() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"a": {"x": 1}}))?;
    collection
        .merge(&[value(json!({"a": {"y": 2}}))])
        .defaults(&[value(json!({"b": 1, "a": "ignored"}))])
        .defaults_deep(&[value(json!({"a": {"z": 3}}))])
        .assign(&[value(json!({"c": [1]}))]);
    assert_eq!(
        collection.data(),
        value(json!({"a": {"x": 1, "y": 2, "z": 3}, "b": 1, "c": [1]}))
    );
    Ok(())
}

#[test]
fn test_clone_methods() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"a": {"b": 1}}))?;
    let shallow = collection.clone_data();
    let deep = collection.clone_deep();
    collection.set("a.b", 2)?;

    assert_path_eq(&shallow, "a.b", 2);
    assert_path_eq(&deep, "a.b", 1);

    let this = collection.clone_this();
    this.set("a.b", 3)?;
    assert_eq!(collection.get("a.b")?, Some(Value::Int(2)));
    Ok(())
}

#[test]
fn test_to_json() -> object_collection::Result<()> {
    let collection = Collection::from_json(json!({"a": 1, "f": null}))?;
    collection.set("fun", Function::new(|_| Ok(Value::Null)))?;
    assert_eq!(collection.to_json()?, "{\n  \"a\": 1,\n  \"f\": null\n}");

    let cyclic = Collection::from_value(self_referential())?;
    assert!(cyclic.to_json().unwrap_err().is_serialize_error());
    Ok(())
}
