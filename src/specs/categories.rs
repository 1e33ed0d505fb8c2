// src/specs/categories.rs
//! Category block of the landing page payload.
//!
//! Layout after the anchor:
//!
//! ```text
//! "categories", [ref, ref, ...], {_marker}, "name", N, "slug", S, {_marker}, N, S, ...
//! ```
//!
//! Each record starts at a marker object and is read in one of the slot forms
//! from [`SLOT_FORMS`]. The cursor moves by exactly the width of the matched
//! form; the first slot that fits no form ends the block.

use serde_json::Value;

use crate::core::cursor::{classify, Cursor, Shape};
use super::Category;

const ANCHOR: &str = "categories";

/// One record as it sits in the payload, borrowed from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryRecord<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

#[derive(Clone, Copy, Debug)]
struct SlotMatch<'a> {
    record: CategoryRecord<'a>,
    width: usize,
}

type SlotForm = for<'a> fn(&Cursor<'a>) -> Option<SlotMatch<'a>>;

/// Tie-break table, tried top to bottom; first match wins.
///
/// | form  | slots after marker                   | width |
/// |-------|--------------------------------------|-------|
/// | five  | `"name"`, name, `"slug"`, slug       | 5     |
/// | three | name, slug (keys omitted)            | 3     |
///
/// `five` must stay first: a five-slot record also looks like a three-slot one
/// (`name="name"`, `slug=<the name>`).
const SLOT_FORMS: &[(&str, SlotForm)] = &[("five", five_slot), ("three", three_slot)];

fn five_slot<'a>(c: &Cursor<'a>) -> Option<SlotMatch<'a>> {
    if !c.peek_is(1, "name") || !c.peek_is(3, "slug") {
        return None;
    }
    let record = CategoryRecord { name: c.peek_str(2)?, slug: c.peek_str(4)? };
    Some(SlotMatch { record, width: 5 })
}

fn three_slot<'a>(c: &Cursor<'a>) -> Option<SlotMatch<'a>> {
    let record = CategoryRecord { name: c.peek_str(1)?, slug: c.peek_str(2)? };
    Some(SlotMatch { record, width: 3 })
}

/// Lazy walk over the category block. Cloning restarts from the same spot.
#[derive(Clone, Debug)]
pub struct CategoryRecords<'a> {
    cur: Cursor<'a>,
    done: bool,
}

impl<'a> CategoryRecords<'a> {
    fn empty(root: &'a [Value]) -> Self {
        Self { cur: Cursor::at(root, root.len()), done: true }
    }
}

impl<'a> Iterator for CategoryRecords<'a> {
    type Item = CategoryRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let hit = match self.cur.peek(0).map(classify) {
            Some(Shape::Marker) => SLOT_FORMS.iter().find_map(|(label, form)| {
                let m = form(&self.cur)?;
                logd!("category @{} matched {label}-slot form", self.cur.position());
                Some(m)
            }),
            _ => None,
        };

        match hit {
            Some(m) if !m.record.name.is_empty() && !m.record.slug.is_empty() => {
                self.cur.advance(m.width);
                Some(m.record)
            }
            _ => {
                logd!("category block ends @{}", self.cur.position());
                self.done = true;
                None
            }
        }
    }
}

/// Records following the first `"categories"` anchor.
/// Empty if the anchor is missing or not followed by an array of integer refs.
pub fn records(root: &[Value]) -> CategoryRecords<'_> {
    let Some(anchor) = Cursor::new(root).find_anchor(ANCHOR) else {
        logd!("no \"{ANCHOR}\" anchor in payload");
        return CategoryRecords::empty(root);
    };

    let refs_ok = match anchor.peek(1) {
        Some(Value::Array(refs)) => refs.iter().all(|r| r.is_i64() || r.is_u64()),
        _ => false,
    };
    if !refs_ok {
        logd!("\"{ANCHOR}\" @{} not followed by a ref list", anchor.position());
        return CategoryRecords::empty(root);
    }

    let mut cur = anchor;
    cur.advance(2);
    CategoryRecords { cur, done: false }
}

pub fn decode(root: &[Value], base_url: &str) -> Vec<Category> {
    records(root)
        .map(|r| Category::new(r.name, r.slug, base_url))
        .collect()
}
