// src/scrape/crawl.rs
use std::{thread, time::Duration};

use serde_json::Value;
use thiserror::Error;

use crate::{
    config::CrawlOptions,
    core::{net::{Fetch, FetchError}, payload},
    progress::Progress,
    specs::{Category, GraphDecoder},
};

use super::collect::ImageSet;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("landing page: {0}")]
    Landing(#[from] FetchError),
    #[error("landing page: embedded payload not found ({0})")]
    NoPayload(payload::NotFound),
    #[error("landing page: no categories decoded")]
    NoCategories,
}

/// Why a category's page loop ended. Every variant is a normal end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    LastPage,
    MaxPages,
    EmptyPage,
    NoPayload,
    FetchFailed,
}

#[derive(Clone, Debug)]
pub struct CategoryReport {
    pub category: Category,
    pub pages: u64,
    /// Ids decoded for this category, duplicates included.
    pub found: usize,
    /// Ids not seen in any earlier category.
    pub new: usize,
    pub stop: StopReason,
}

#[derive(Clone, Debug, Default)]
pub struct CrawlReport {
    pub categories: Vec<CategoryReport>,
    /// Unique across the run, in first-seen order.
    pub image_ids: Vec<String>,
}

/// `<category url>&page=N`, or `?page=N` when the URL has no query yet.
pub fn page_url(category_url: &str, page: u64) -> String {
    let sep = if category_url.contains('?') { "&" } else { "?" };
    join!(category_url, sep, "page=", &page.to_string())
}

/// Where the crawl's politeness pauses go. Tests swap in a recorder.
pub trait Sleeper {
    fn pause(&self, d: Duration);
}

/// Real pacing: blocks the current thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn pause(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

fn fetch_payload(
    fetcher: &dyn Fetch,
    url: &str,
    timeout: Duration,
) -> Result<Result<Vec<Value>, payload::NotFound>, FetchError> {
    let markup = fetcher.fetch_page(url, timeout)?;
    Ok(payload::extract(&markup))
}

/// Fetch + decode the landing page only.
pub fn list_categories(opts: &CrawlOptions, fetcher: &dyn Fetch) -> Result<Vec<Category>, CrawlError> {
    logf!("GET {}", opts.base_url);
    let root = fetch_payload(fetcher, &opts.base_url, opts.landing_timeout)?
        .map_err(CrawlError::NoPayload)?;

    let cats = GraphDecoder::new(opts.base_url.as_str()).decode_categories(&root);
    logf!("{} categories on landing page", cats.len());
    if cats.is_empty() {
        return Err(CrawlError::NoCategories);
    }
    Ok(cats)
}

/// Walk every selected category page by page, collecting image ids.
///
/// Only the landing page can fail the run. Anything that goes wrong on a
/// search page ends that category's loop and the crawl moves on.
pub fn crawl(
    opts: &CrawlOptions,
    fetcher: &dyn Fetch,
    sleeper: &dyn Sleeper,
    mut progress: Option<&mut dyn Progress>,
) -> Result<CrawlReport, CrawlError> {
    let all = list_categories(opts, fetcher)?;
    let cats: Vec<Category> = all.into_iter().filter(|c| opts.categories.matches(&c.slug)).collect();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(cats.len());
    }

    let decoder = GraphDecoder::new(opts.base_url.as_str());
    let mut images = ImageSet::new();
    let mut reports = Vec::with_capacity(cats.len());

    for (i, cat) in cats.iter().enumerate() {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Category '{}' ({})", cat.name, cat.url));
        }

        let (ids, pages, stop) = crawl_category(opts, fetcher, sleeper, &decoder, cat, &mut progress);
        let new = images.extend_from(&ids);
        logf!("category {}: {} pages, {} ids ({} new), stop={:?}", cat.slug, pages, ids.len(), new, stop);

        if let Some(p) = progress.as_deref_mut() {
            p.category_done(&cat.name, ids.len(), new);
        }
        reports.push(CategoryReport { category: cat.clone(), pages, found: ids.len(), new, stop });

        if i + 1 < cats.len() {
            sleeper.pause(opts.category_pause);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(CrawlReport { categories: reports, image_ids: images.into_vec() })
}

fn crawl_category(
    opts: &CrawlOptions,
    fetcher: &dyn Fetch,
    sleeper: &dyn Sleeper,
    decoder: &GraphDecoder,
    cat: &Category,
    progress: &mut Option<&mut dyn Progress>,
) -> (Vec<String>, u64, StopReason) {
    let mut ids: Vec<String> = Vec::new();
    let mut page: u64 = 1;
    let mut pages: u64 = 0;
    let mut ceiling: Option<u64> = None;

    let stop = loop {
        let url = page_url(&cat.url, page);
        logf!("GET {url}");

        let root = match fetch_payload(fetcher, &url, opts.page_timeout) {
            Ok(Ok(root)) => root,
            Ok(Err(e)) => {
                loge!("{url}: payload not found: {e}");
                break StopReason::NoPayload;
            }
            Err(e) => {
                loge!("{e}");
                break StopReason::FetchFailed;
            }
        };

        let sp = decoder.decode_search_page(&root);
        pages += 1;
        // First decoded page fixes the ceiling; later pages can't move it.
        let ceiling = *ceiling.get_or_insert(sp.total_pages);

        if let Some(p) = progress.as_deref_mut() {
            p.page_done(&cat.name, page, ceiling, &sp.item_ids);
        }

        if sp.is_empty() {
            break StopReason::EmptyPage;
        }
        ids.extend(sp.item_ids);

        if opts.max_pages > 0 && page >= u64::from(opts.max_pages) {
            break StopReason::MaxPages;
        }
        if page >= ceiling {
            break StopReason::LastPage;
        }

        page += 1;
        sleeper.pause(opts.page_pause);
    };

    (ids, pages, stop)
}
