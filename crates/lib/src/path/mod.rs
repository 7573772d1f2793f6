//! Path types for addressing values inside nested objects and arrays.
//!
//! Every operation of the engine accepts its path through [`IntoPath`] and
//! normalizes it exactly once into a [`Path`]: a non-empty sequence of
//! [`Segment`]s consumed uniformly by traversal and mutation.
//!
//! # Accepted shapes
//!
//! - a path string: `"a.b[0].c"`, `"a['b.c']"`
//! - a single index: `3usize`, `3i64` (negative numbers are keys)
//! - a pre-split sequence: `["a", "b"]`, `vec![Segment::Index(0)]`, taken verbatim
//! - an existing [`Path`] (normalizing it again is a no-op)
//! - a [`Value`] holding any of the above, for paths stored as data
//!
//! # Usage
//!
//! ```rust
//! use object_collection::path::{Segment, normalize};
//! use object_collection::path;
//!
//! let parsed = normalize("a.b[0].c")?;
//! let built = path!["a", "b", 0, "c"];
//! assert_eq!(parsed, built);
//! assert_eq!(parsed.segments()[2], Segment::Index(0));
//!
//! // Idempotent
//! assert_eq!(normalize(&parsed)?, parsed);
//! # Ok::<(), object_collection::path::PathError>(())
//! ```

use std::{fmt, str::FromStr};

use crate::constants::{BRACKET_CLOSE, BRACKET_OPEN, ESCAPE, PATH_SEPARATOR};
use crate::value::Value;

pub mod errors;
mod parse;

pub use errors::PathError;

/// One atomic step of a normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// A property name
    Key(String),
    /// A position in an array
    Index(usize),
}

impl Segment {
    /// Classifies the content of an unquoted bracket group.
    pub(crate) fn from_bracket(content: String) -> Self {
        match canonical_index(&content) {
            Some(index) => Segment::Index(index),
            None => Segment::Key(content),
        }
    }

    /// Returns the array position this segment addresses, if any.
    ///
    /// Keys that spell a canonical unsigned integer (`"0"`, `"12"`, not `"01"`)
    /// address array positions too.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Key(key) => canonical_index(key),
        }
    }

    /// Returns the object key this segment addresses.
    pub fn to_key(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(index) => index.to_string(),
        }
    }

    /// Returns true if a missing container at this segment's parent should
    /// be created as an array.
    pub fn is_index_like(&self) -> bool {
        self.as_index()
            .is_some_and(|index| index <= crate::constants::MAX_ARRAY_INDEX)
    }
}

fn canonical_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Key(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Key(value)
    }
}

impl From<&String> for Segment {
    fn from(value: &String) -> Self {
        Segment::Key(value.clone())
    }
}

impl From<&Segment> for Segment {
    fn from(value: &Segment) -> Self {
        value.clone()
    }
}

macro_rules! segment_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Segment {
            fn from(value: $t) -> Self {
                match usize::try_from(value) {
                    Ok(index) => Segment::Index(index),
                    Err(_) => Segment::Key(value.to_string()),
                }
            }
        }
    )*};
}

macro_rules! segment_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Segment {
            fn from(value: $t) -> Self {
                match usize::try_from(value) {
                    Ok(index) => Segment::Index(index),
                    // Negative numbers never address array positions
                    Err(_) => Segment::Key(value.to_string()),
                }
            }
        }
    )*};
}

segment_from_unsigned!(u8, u16, u32, u64, usize);
segment_from_signed!(i8, i16, i32, i64, isize);

/// A normalized, non-empty sequence of segments.
///
/// `Path` is the single canonical representation consumed by traversal and
/// mutation. Build one with [`Path::parse`], [`Path::new`], the [`path!`](crate::path!)
/// macro, or any [`IntoPath`] input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a path from pre-split segments, taken verbatim.
    ///
    /// # Errors
    /// Returns [`PathError::Empty`] if no segment is supplied.
    pub fn new<S>(segments: impl IntoIterator<Item = S>) -> Result<Self, PathError>
    where
        S: Into<Segment>,
    {
        let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    /// Parses a dotted/bracket path string.
    ///
    /// ```rust
    /// # use object_collection::path::{Path, Segment};
    /// let path = Path::parse("users[1]['first.name']")?;
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         Segment::Key("users".into()),
    ///         Segment::Index(1),
    ///         Segment::Key("first.name".into()),
    ///     ]
    /// );
    /// # Ok::<(), object_collection::path::PathError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathError> {
        Ok(Self {
            segments: parse::parse(input)?,
        })
    }

    /// Creates a path from a first segment and any number of further ones.
    ///
    /// Used by the [`path!`](crate::path!) macro; taking the first segment
    /// separately keeps the result non-empty.
    #[doc(hidden)]
    pub fn from_first_and_rest(first: Segment, rest: Vec<Segment>) -> Self {
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(first);
        segments.extend(rest);
        Self { segments }
    }

    /// Returns the segments in resolution order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the first segment.
    pub fn first(&self) -> &Segment {
        &self.segments[0]
    }

    /// Returns the final segment, the one a write or delete targets.
    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Returns the path without its final segment, or `None` for a
    /// single-segment path.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Path {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Appends a segment.
    pub fn push(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Appends every segment of another path.
    pub fn join(mut self, other: &Path) -> Self {
        self.segments.extend(other.segments.iter().cloned());
        self
    }

    /// Splits off the final segment.
    pub(crate) fn split_last(&self) -> (&[Segment], &Segment) {
        let end = self.segments.len() - 1;
        (&self.segments[..end], &self.segments[end])
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(index) => write!(f, "{BRACKET_OPEN}{index}{BRACKET_CLOSE}")?,
                Segment::Key(key) if needs_quoting(key) => {
                    write!(f, "{BRACKET_OPEN}\"")?;
                    for ch in key.chars() {
                        if ch == '"' || ch == ESCAPE {
                            write!(f, "{ESCAPE}")?;
                        }
                        write!(f, "{ch}")?;
                    }
                    write!(f, "\"{BRACKET_CLOSE}")?;
                }
                Segment::Key(key) => {
                    if i > 0 {
                        write!(f, "{PATH_SEPARATOR}")?;
                    }
                    write!(f, "{key}")?;
                }
            }
        }
        Ok(())
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || canonical_index(key).is_some()
        || key.contains([PATH_SEPARATOR, BRACKET_OPEN, BRACKET_CLOSE])
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl From<Segment> for Path {
    fn from(segment: Segment) -> Self {
        Path {
            segments: vec![segment],
        }
    }
}

impl AsRef<[Segment]> for Path {
    fn as_ref(&self) -> &[Segment] {
        &self.segments
    }
}

/// Conversion of every accepted path shape into a normalized [`Path`].
pub trait IntoPath {
    /// Normalizes `self` into a path.
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for Segment {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from(self))
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

macro_rules! into_path_from_number {
    ($($t:ty),*) => {$(
        impl IntoPath for $t {
            fn into_path(self) -> Result<Path, PathError> {
                Ok(Path::from(Segment::from(self)))
            }
        }
    )*};
}

into_path_from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<S: Into<Segment>> IntoPath for Vec<S> {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self)
    }
}

impl<S: Into<Segment> + Clone> IntoPath for &[S] {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self.iter().cloned())
    }
}

impl<S: Into<Segment>, const N: usize> IntoPath for [S; N] {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self)
    }
}

/// Paths stored as data: text is parsed, integers are single segments and
/// arrays of text/integers are pre-split sequences.
impl IntoPath for &Value {
    fn into_path(self) -> Result<Path, PathError> {
        match self {
            Value::Text(text) => Path::parse(text),
            Value::Array(items) => {
                let segments = items
                    .to_vec()
                    .iter()
                    .map(segment_from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Path::new(segments)
            }
            other => Ok(Path::from(segment_from_value(other)?)),
        }
    }
}

fn segment_from_value(value: &Value) -> Result<Segment, PathError> {
    match value {
        Value::Text(text) => Ok(Segment::Key(text.clone())),
        Value::Int(n) => Ok(Segment::from(*n)),
        Value::Float(n) if n.is_finite() && n.fract() == 0.0 && *n >= 0.0 => {
            Ok(Segment::Index(*n as usize))
        }
        Value::Float(n) => Ok(Segment::Key(n.to_string())),
        other => Err(PathError::UnsupportedShape {
            type_name: other.type_name().to_string(),
        }),
    }
}

/// Normalizes any accepted path shape into its canonical segment sequence.
///
/// Normalizing an existing [`Path`] returns it unchanged.
pub fn normalize(path: impl IntoPath) -> Result<Path, PathError> {
    path.into_path()
}

/// Builds a [`Path`] from one or more heterogeneous segments.
///
/// Strings become keys verbatim (they are not split on dots) and
/// non-negative integers become indices.
///
/// ```rust
/// # use object_collection::path;
/// # use object_collection::path::Segment;
/// let p = path!["a", "b.c", 0];
/// assert_eq!(p.segments()[1], Segment::Key("b.c".into()));
/// assert_eq!(p.last(), &Segment::Index(0));
/// ```
#[macro_export]
macro_rules! path {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::path::Path::from_first_and_rest(
            $crate::path::Segment::from($first),
            vec![$($crate::path::Segment::from($rest)),*],
        )
    };
}
