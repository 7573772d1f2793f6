//! Constants used throughout the object-collection library.
//!
//! This module provides central definitions for the path grammar characters and
//! the limits the mutation engine applies when it materializes array slots.

/// Separates names in a dotted path string (`"a.b.c"`).
pub const PATH_SEPARATOR: char = '.';

/// Opens a bracket segment (`"a[0]"`, `"a['key']"`).
pub const BRACKET_OPEN: char = '[';

/// Closes a bracket segment.
pub const BRACKET_CLOSE: char = ']';

/// Escape character inside quoted bracket segments.
pub const ESCAPE: char = '\\';

/// Largest array index the mutation engine will materialize.
///
/// Writing at index `n` grows the array to `n + 1` slots, so an unbounded
/// index would allocate without limit. Index-like segments above this value
/// are treated as plain keys when inferring the type of a new intermediate
/// container, and writes at such an index into an existing array are dropped.
pub const MAX_ARRAY_INDEX: usize = 1 << 24;
