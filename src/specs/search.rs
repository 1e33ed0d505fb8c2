// src/specs/search.rs
//! One page of search results.
//!
//! ```text
//! "searchResults", {obj}, "total", T, "results", [r0, r1, ...]
//! "paging",        {obj}, "page",  P, "pageSize", S
//! ```
//!
//! Each `rN` is an index back into the payload, pointing at a marker object.
//! The first result is laid out differently from the rest: its `"id"` sits a
//! few slots after the marker, while later results carry the id string right
//! after their marker. This mirrors how the site's serializer shares the
//! prefix of the first record; if the format changes, this is the place that
//! breaks first.

use std::iter::Enumerate;
use std::slice;

use serde_json::Value;

use crate::config::consts::{DEFAULT_PAGE_SIZE, FIRST_ID_WINDOW};
use crate::core::cursor::{is_marker, Cursor};
use super::SearchPage;

const RESULTS_ANCHOR: &str = "searchResults";
const PAGING_ANCHOR: &str = "paging";

/// `(total_items, results_refs)` from the searchResults header, if the layout holds.
fn results_header(root: &[Value]) -> Option<(u64, &[Value])> {
    let c = Cursor::new(root).find_anchor(RESULTS_ANCHOR)?;
    match (c.peek(1), c.peek_str(2), c.peek_u64(3), c.peek_str(4), c.peek(5)) {
        (Some(Value::Object(_)), Some("total"), Some(total), Some("results"), Some(Value::Array(refs)))
            if refs.iter().all(|r| r.is_i64() || r.is_u64()) =>
        {
            Some((total, refs.as_slice()))
        }
        _ => {
            logd!("\"{RESULTS_ANCHOR}\" @{} has unexpected layout", c.position());
            None
        }
    }
}

/// `(current_page, page_size)`.
fn paging(root: &[Value]) -> Option<(u64, u64)> {
    let c = Cursor::new(root).find_anchor(PAGING_ANCHOR)?;
    match (c.peek(1), c.peek_str(2), c.peek_u64(3), c.peek_str(4), c.peek_u64(5)) {
        (Some(Value::Object(_)), Some("page"), Some(page), Some("pageSize"), Some(size)) => Some((page, size)),
        _ => None,
    }
}

/// Ids are short tokens like `nginx` or `bitnami/redis`; prose has spaces.
pub fn looks_like_id(s: &str) -> bool {
    !s.is_empty() && (s.contains('/') || !s.chars().any(char::is_whitespace))
}

fn marker_at<'a>(root: &'a [Value], reference: &Value) -> Option<Cursor<'a>> {
    let pos = usize::try_from(reference.as_u64()?).ok()?;
    let c = Cursor::at(root, pos);
    is_marker(c.peek(0)?).then_some(c)
}

/// First result: `"id"`, value somewhere in the ten slots after the marker.
fn first_item_id<'a>(marker: &Cursor<'a>) -> Option<&'a str> {
    (1..FIRST_ID_WINDOW)
        .find_map(|k| if marker.peek_is(k, "id") { marker.peek_str(k + 1) } else { None })
        .filter(|id| !id.is_empty())
}

/// Later results: the string right after the marker.
fn later_item_id<'a>(marker: &Cursor<'a>) -> Option<&'a str> {
    marker.peek_str(1).filter(|s| looks_like_id(s))
}

/// Lazy walk over `results_refs`, yielding resolved ids in order.
///
/// An unresolved later item is skipped. An unresolved first item ends the walk.
#[derive(Clone, Debug)]
pub struct ItemIds<'a> {
    root: &'a [Value],
    refs: Enumerate<slice::Iter<'a, Value>>,
    halted: bool,
}

impl<'a> ItemIds<'a> {
    fn new(root: &'a [Value], refs: &'a [Value]) -> Self {
        Self { root, refs: refs.iter().enumerate(), halted: false }
    }
}

impl<'a> Iterator for ItemIds<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.halted {
            return None;
        }
        for (i, reference) in self.refs.by_ref() {
            let marker = marker_at(self.root, reference);
            let id = if i == 0 {
                marker.as_ref().and_then(first_item_id)
            } else {
                marker.as_ref().and_then(later_item_id)
            };

            match id {
                Some(id) => return Some(id),
                None if i == 0 => {
                    logd!("first result (ref {reference}) unresolved; dropping page items");
                    self.halted = true;
                    return None;
                }
                None => logd!("result #{i} (ref {reference}) unresolved; skipped"),
            }
        }
        None
    }
}

pub fn decode(root: &[Value]) -> SearchPage {
    let Some((total_items, refs)) = results_header(root) else {
        return SearchPage::default();
    };

    let item_ids = ItemIds::new(root, refs).map(|s| s!(s)).collect();
    let (current_page, page_size) = paging(root).unwrap_or((1, DEFAULT_PAGE_SIZE));

    SearchPage::new(item_ids, total_items, page_size, current_page)
}
