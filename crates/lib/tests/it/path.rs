//! Path parsing and normalization tests
//!
//! Covers the string grammar (dots, brackets, quotes, escapes), the accepted
//! input shapes, idempotence, and the errors raised for malformed paths.

use object_collection::{
    Array, Path, Segment, Value, path,
    path::{PathError, normalize},
};

fn keys(segments: &[&str]) -> Vec<Segment> {
    segments.iter().map(|s| Segment::from(*s)).collect()
}

// ===== STRING GRAMMAR =====

#[test]
fn test_dotted_and_bracketed_paths() {
    assert_eq!(normalize("a.b.c").unwrap().segments(), keys(&["a", "b", "c"]));
    assert_eq!(normalize("a.b[0].c").unwrap(), path!["a", "b", 0, "c"]);
    assert_eq!(normalize("a[0][1]").unwrap(), path!["a", 0, 1]);
    assert_eq!(normalize("[3]").unwrap(), path![3]);
    assert_eq!(normalize("a[0]b").unwrap(), path!["a", 0, "b"]);
}

#[test]
fn test_quoted_brackets_are_names() {
    assert_eq!(normalize("a['b.c']").unwrap(), path!["a", "b.c"]);
    assert_eq!(normalize(r#"a["0"]"#).unwrap(), path!["a", "0"]);
    assert_eq!(normalize(r#"a["say \"hi\""]"#).unwrap(), path!["a", "say \"hi\""]);
    assert_eq!(normalize(r"a['it\'s']").unwrap(), path!["a", "it's"]);
}

#[test]
fn test_unquoted_bracket_content() {
    // Digits become indices only in canonical form
    assert_eq!(normalize("a[12]").unwrap().last(), &Segment::Index(12));
    assert_eq!(normalize("a[012]").unwrap().last(), &Segment::from("012"));
    assert_eq!(normalize("a[-1]").unwrap().last(), &Segment::from("-1"));
    assert_eq!(normalize("a[key]").unwrap().last(), &Segment::from("key"));
}

#[test]
fn test_empty_names() {
    assert_eq!(normalize("a..b").unwrap(), path!["a", "", "b"]);
    assert_eq!(normalize(".a").unwrap(), path!["", "a"]);
    assert_eq!(normalize("a.").unwrap(), path!["a", ""]);
    assert_eq!(normalize("a[0].").unwrap(), path!["a", 0, ""]);
}

#[test]
fn test_malformed_strings() {
    assert_eq!(normalize(""), Err(PathError::Empty));

    let err = normalize("a[0").unwrap_err();
    assert!(err.is_syntax_error());
    assert!(matches!(err, PathError::UnterminatedBracket { position: 1, .. }));

    assert!(matches!(
        normalize("a['b").unwrap_err(),
        PathError::UnterminatedQuote { .. }
    ));
    assert!(matches!(
        normalize("a]").unwrap_err(),
        PathError::UnexpectedCharacter { found: ']', position: 1, .. }
    ));
    assert!(matches!(
        normalize("a[b[0]]").unwrap_err(),
        PathError::UnexpectedCharacter { found: '[', .. }
    ));
    assert_eq!(normalize("a]").unwrap_err().path(), Some("a]"));
}

// ===== INPUT SHAPES =====

#[test]
fn test_pre_split_sequences_are_taken_verbatim() {
    let segments = normalize(["a.b", "[0]"]).unwrap();
    assert_eq!(segments.segments(), keys(&["a.b", "[0]"]));

    let owned = vec!["x".to_string(), "y".to_string()];
    assert_eq!(normalize(owned.as_slice()).unwrap(), path!["x", "y"]);
    assert_eq!(normalize(owned).unwrap(), path!["x", "y"]);

    let mixed = vec![Segment::from("a"), Segment::Index(2)];
    assert_eq!(normalize(mixed).unwrap(), path!["a", 2]);
}

#[test]
fn test_numbers() {
    assert_eq!(normalize(0usize).unwrap(), path![0]);
    assert_eq!(normalize(7u32).unwrap().first(), &Segment::Index(7));
    assert_eq!(normalize(-2i32).unwrap().first(), &Segment::from("-2"));
}

#[test]
fn test_paths_stored_as_values() {
    let stored = Value::from(vec![Value::from("a"), Value::from(1), Value::from(2.0)]);
    assert_eq!(normalize(&stored).unwrap(), path!["a", 1, 2]);

    let fractional = Value::from(vec![Value::from(1.5)]);
    assert_eq!(normalize(&fractional).unwrap(), path!["1.5"]);

    assert!(normalize(&Value::object()).unwrap_err().is_shape_error());
    assert!(matches!(
        normalize(&Value::Array(Array::new())),
        Err(PathError::Empty)
    ));
}

#[test]
fn test_normalize_is_idempotent() {
    let inputs = ["a", "a.b[0]", "a['x.y'].z", "[0][1]", "a..b", "x[01]"];
    for input in inputs {
        let once = normalize(input).unwrap();
        assert_eq!(normalize(once.clone()).unwrap(), once);
        // Re-rendering and re-parsing is stable too
        assert_eq!(normalize(once.to_string()).unwrap(), once, "for '{input}'");
    }
}

// ===== PATH API =====

#[test]
fn test_path_from_str_and_display() {
    let path: Path = "users[0]['first.name']".parse().unwrap();
    assert_eq!(path.to_string(), r#"users[0]["first.name"]"#);
    assert_eq!(path.len(), 3);
    assert_eq!(path.parent().unwrap().to_string(), "users[0]");
}

#[test]
fn test_path_new_rejects_empty() {
    assert_eq!(Path::new(Vec::<Segment>::new()), Err(PathError::Empty));
    assert_eq!(Path::new(["a"]).unwrap(), path!["a"]);
}
