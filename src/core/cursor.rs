// src/core/cursor.rs
// Bounded read head over the flattened payload array.
// Every rule in specs/ reads through `peek`, so nothing ever indexes past the end.

use serde_json::Value;

use crate::config::consts::MARKER_PREFIX;

/// What a single array slot looks like, decided once per value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Object with at least one `_`-prefixed key: a referenceable node.
    Marker,
    /// null / bool / number / string
    Scalar,
    /// Arrays and plain (non-marker) objects.
    Unknown,
}

pub fn classify(v: &Value) -> Shape {
    match v {
        Value::Object(map) if map.keys().any(|k| k.starts_with(MARKER_PREFIX)) => Shape::Marker,
        Value::Object(_) | Value::Array(_) => Shape::Unknown,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
    }
}

pub fn is_marker(v: &Value) -> bool {
    classify(v) == Shape::Marker
}

#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    root: &'a [Value],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(root: &'a [Value]) -> Self {
        Self { root, pos: 0 }
    }

    /// Cursor parked at `pos`. Positions past the end are allowed; every peek is then `None`.
    pub fn at(root: &'a [Value], pos: usize) -> Self {
        Self { root, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self, offset: usize) -> Option<&'a Value> {
        self.root.get(self.pos.checked_add(offset)?)
    }

    pub fn peek_str(&self, offset: usize) -> Option<&'a str> {
        self.peek(offset)?.as_str()
    }

    pub fn peek_u64(&self, offset: usize) -> Option<u64> {
        self.peek(offset)?.as_u64()
    }

    /// True if the slot holds exactly the string `lit`.
    pub fn peek_is(&self, offset: usize, lit: &str) -> bool {
        self.peek_str(offset) == Some(lit)
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    /// Cursor at the first string element equal to `key`, scanning from the current position.
    pub fn find_anchor(&self, key: &str) -> Option<Cursor<'a>> {
        let start = self.pos.min(self.root.len());
        self.root[start..]
            .iter()
            .position(|v| v.as_str() == Some(key))
            .map(|off| Cursor::at(self.root, start + off))
    }
}
