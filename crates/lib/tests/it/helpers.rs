use object_collection::{Object, Value, cloning, traverse};

// ==========================
// FIXTURES
// ==========================

/// Converts a `json!` literal into a [`Value`].
pub fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// A small but representative document: nested objects, an array of
/// objects, falsy leaves and a numeric-looking object key.
pub fn sample_document() -> Value {
    value(serde_json::json!({
        "user": {
            "name": "Alice",
            "emails": ["alice@example.com", "a@example.org"],
            "active": false,
            "nickname": null
        },
        "posts": [
            {"id": 1, "tags": ["rust"]},
            {"id": 2, "tags": []}
        ],
        "codes": {"404": "not found"}
    }))
}

/// An object whose own key `own` sits on top of a prototype providing
/// `inherited`.
pub fn object_with_prototype() -> Object {
    let base = Object::from_iter([("inherited", "from base")]);
    let derived = Object::with_prototype(base);
    derived.insert("own", "mine");
    derived
}

/// An object referring to itself under `self` and holding `n: 1`.
pub fn self_referential() -> Value {
    let object = Object::new();
    object.insert("self", object.clone());
    object.insert("n", 1);
    Value::from(object)
}

// ==========================
// ASSERTION HELPERS
// ==========================

/// Asserts that reading `path` in `root` yields `expected`.
pub fn assert_path_eq(root: &Value, path: &str, expected: impl Into<Value>) {
    let expected = expected.into();
    match traverse::get(root, path) {
        Ok(Some(actual)) => assert_eq!(actual, expected, "Value mismatch at path '{path}'"),
        Ok(None) => panic!("Path '{path}' not found in {root}"),
        Err(err) => panic!("Path '{path}' failed to resolve: {err}"),
    }
}

/// Asserts that reading `path` in `root` finds nothing.
pub fn assert_path_missing(root: &Value, path: &str) {
    if let Some(found) = traverse::get(root, path).expect("path should be well formed") {
        panic!("Expected '{path}' to be missing, found {found}");
    }
}

/// Runs `operation` and asserts that `root` is structurally unchanged by it.
pub fn assert_unchanged<T>(root: &Value, operation: impl FnOnce(&Value) -> T) -> T {
    let before = cloning::clone_deep(root);
    let result = operation(root);
    assert_eq!(root, &before, "operation mutated its input");
    result
}
