// tests/common/mod.rs
//
// Builders for synthetic hub pages in the flattened-array layout.
//
#![allow(dead_code)]

use serde_json::{json, Value};

/// Wrap a payload array the way the site streams it into the page.
pub fn page_markup(payload: &Value) -> String {
    let raw = serde_json::to_string(payload).unwrap();
    let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "<!DOCTYPE html><html><body><div id=\"root\"></div>\
         <script>window.__reactRouterContext.streamController.enqueue(\"{escaped}\");</script>\
         </body></html>"
    )
}

/// Landing payload with five-slot and three-slot records alternating.
pub fn landing_payload(cats: &[(&str, &str)]) -> Value {
    let mut v = vec![json!({"_1": 2}), json!("root"), json!("categories")];
    let refs_pos = v.len();
    v.push(json!([]));

    let mut refs = Vec::new();
    for (i, (name, slug)) in cats.iter().enumerate() {
        refs.push(json!(v.len()));
        v.push(json!({"_4": 5, "_6": 7}));
        if i % 2 == 0 {
            v.extend([json!("name"), json!(name), json!("slug"), json!(slug)]);
        } else {
            v.extend([json!(name), json!(slug)]);
        }
    }
    v[refs_pos] = Value::Array(refs);
    v.push(json!("footer"));
    Value::Array(v)
}

/// Search payload: first record carries `"id"` a few slots in, later ones right after the marker.
pub fn search_payload(total: u64, page: u64, page_size: u64, ids: &[&str]) -> Value {
    let mut v = vec![
        json!("searchResults"),
        json!({"_8": 9}),
        json!("total"),
        json!(total),
        json!("results"),
        json!([]),
    ];
    let mut refs = Vec::new();
    for (i, id) in ids.iter().enumerate() {
        refs.push(json!(v.len()));
        v.push(json!({"_10": 11, "_12": 13}));
        if i == 0 {
            v.extend([json!("name"), json!(id), json!("publisher"), json!({"_1": 2}), json!("id"), json!(id)]);
        } else {
            v.extend([json!(id), json!("Some description text")]);
        }
    }
    v[5] = Value::Array(refs);
    v.extend([
        json!("paging"),
        json!({"_14": 15}),
        json!("page"),
        json!(page),
        json!("pageSize"),
        json!(page_size),
    ]);
    Value::Array(v)
}

pub fn as_array(v: &Value) -> &[Value] {
    v.as_array().map(|a| a.as_slice()).unwrap()
}
