// src/specs/mod.rs
//! # Payload decoders
//!
//! The hub pages ship their data as one flat JSON array (see `core::payload`).
//! Objects are flattened into `marker, key, value, key, value, ...` runs and
//! later structures point back at earlier positions instead of repeating data.
//! There is no schema; a few string anchors (`"categories"`, `"searchResults"`,
//! `"paging"`) are the only landmarks.
//!
//! ## What lives here
//! - `categories`: the landing page's category list.
//! - `search`: item ids + pagination of one search-results page.
//! - [`GraphDecoder`]: the pair of passes behind one value, plus the typed
//!   results [`Category`] and [`SearchPage`].
//!
//! ## Conventions & invariants
//! - **Total functions.** A missing anchor or an unexpected layout yields an
//!   empty / zero-valued result, never an error or a panic.
//! - **Reads go through `core::cursor::Cursor`**; no raw indexing into the payload.
//! - **Independent passes.** A broken search block does not affect categories
//!   and vice versa.
//! - **No state.** Decoding the same array twice gives the same output.
//!
//! ```text
//! scrape::crawl → core::net → core::payload::extract → GraphDecoder::decode_*
//! ```

pub mod categories;
pub mod search;

use serde_json::Value;

use crate::config::consts::BASE_URL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub slug: String,
    /// Not in the payload; always `<base_url>/search?categories=<slug>`.
    pub url: String,
}

impl Category {
    pub fn new(name: &str, slug: &str, base_url: &str) -> Self {
        Self {
            name: s!(name),
            slug: s!(slug),
            url: join!(base_url, "/search?categories=", slug),
        }
    }
}

/// One decoded search-results page. `Default` is the zero-valued page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub item_ids: Vec<String>,
    pub total_items: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

impl SearchPage {
    /// `total_pages` is derived: `ceil(total_items / page_size)`, 0 when `page_size` is 0.
    pub fn new(item_ids: Vec<String>, total_items: u64, page_size: u64, current_page: u64) -> Self {
        let total_pages = if page_size > 0 { total_items.div_ceil(page_size) } else { 0 };
        Self { item_ids, total_items, page_size, current_page, total_pages }
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }
}

/// Both decode passes. Holds only the base URL used to build category links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphDecoder {
    base_url: String,
}

impl Default for GraphDecoder {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl GraphDecoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn decode_categories(&self, root: &[Value]) -> Vec<Category> {
        categories::decode(root, &self.base_url)
    }

    pub fn decode_search_page(&self, root: &[Value]) -> SearchPage {
        search::decode(root)
    }
}
