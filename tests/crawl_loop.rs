// tests/crawl_loop.rs
//
// Drives scrape::crawl against canned pages; no network, pauses are recorded not slept.
//
mod common;

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use hub_scrape::config::options::{CategorySelector, CrawlOptions};
use hub_scrape::core::net::{Fetch, FetchError};
use hub_scrape::core::payload::NotFound;
use hub_scrape::progress::Progress;
use hub_scrape::scrape::{crawl, list_categories, CrawlError, Sleeper, StopReason};

use common::*;

const BASE: &str = "http://hub.test";

#[derive(Default)]
struct FakeSite {
    pages: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl FakeSite {
    fn with_landing(cats: &[(&str, &str)]) -> Self {
        let mut site = FakeSite::default();
        site.pages.insert(s(BASE), page_markup(&landing_payload(cats)));
        site
    }

    fn search(&mut self, slug: &str, page: u64, total: u64, page_size: u64, ids: &[&str]) {
        let url = format!("{BASE}/search?categories={slug}&page={page}");
        self.pages.insert(url, page_markup(&search_payload(total, page, page_size, ids)));
    }

    fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Fetch for FakeSite {
    fn fetch_page(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.requested.borrow_mut().push(s(url));
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status { status: 404, url: s(url) })
    }
}

#[derive(Default)]
struct Pauses(RefCell<Vec<Duration>>);

impl Sleeper for Pauses {
    fn pause(&self, d: Duration) {
        self.0.borrow_mut().push(d);
    }
}

fn s(v: &str) -> String {
    v.to_string()
}

fn opts() -> CrawlOptions {
    let mut o = CrawlOptions::default();
    o.set_base_url(BASE);
    o.set_pause(Duration::ZERO);
    o
}

fn two_category_site() -> FakeSite {
    let mut site = FakeSite::with_landing(&[("Alpha", "alpha"), ("Beta", "beta")]);
    site.search("alpha", 1, 3, 2, &["a1", "a2"]);
    site.search("alpha", 2, 3, 2, &["a3"]);
    site.search("beta", 1, 2, 25, &["a1", "b1"]);
    site
}

#[test]
fn follows_pagination_and_dedups_across_categories() {
    let site = two_category_site();
    let report = crawl(&opts(), &site, &Pauses::default(), None).unwrap();

    assert_eq!(report.image_ids, vec!["a1", "a2", "a3", "b1"]);
    assert_eq!(report.categories.len(), 2);

    let alpha = &report.categories[0];
    assert_eq!(alpha.pages, 2);
    assert_eq!((alpha.found, alpha.new), (3, 3));
    assert_eq!(alpha.stop, StopReason::LastPage);

    let beta = &report.categories[1];
    assert_eq!((beta.found, beta.new), (2, 1));

    assert_eq!(
        site.requested(),
        vec![
            s(BASE),
            format!("{BASE}/search?categories=alpha&page=1"),
            format!("{BASE}/search?categories=alpha&page=2"),
            format!("{BASE}/search?categories=beta&page=1"),
        ]
    );
}

#[test]
fn pauses_between_pages_and_between_categories_only() {
    let site = two_category_site();
    let mut o = opts();
    o.page_pause = Duration::from_millis(7);
    o.category_pause = Duration::from_millis(11);
    let pauses = Pauses::default();
    crawl(&o, &site, &pauses, None).unwrap();

    // alpha p1 -> p2, alpha -> beta; nothing after the last page or category
    assert_eq!(*pauses.0.borrow(), vec![Duration::from_millis(7), Duration::from_millis(11)]);
}

#[test]
fn max_pages_caps_each_category() {
    let site = two_category_site();
    let mut o = opts();
    o.max_pages = 1;
    let report = crawl(&o, &site, &Pauses::default(), None).unwrap();

    assert_eq!(report.image_ids, vec!["a1", "a2", "b1"]);
    assert_eq!(report.categories[0].stop, StopReason::MaxPages);
    assert_eq!(report.categories[0].pages, 1);
}

#[test]
fn failed_page_ends_category_but_keeps_earlier_ids() {
    let mut site = FakeSite::with_landing(&[("Alpha", "alpha"), ("Beta", "beta")]);
    site.search("alpha", 1, 10, 2, &["a1", "a2"]);
    // alpha page 2 missing → 404
    site.search("beta", 1, 1, 25, &["b1"]);

    let report = crawl(&opts(), &site, &Pauses::default(), None).unwrap();
    assert_eq!(report.categories[0].stop, StopReason::FetchFailed);
    assert_eq!(report.image_ids, vec!["a1", "a2", "b1"]);
}

#[test]
fn page_without_payload_or_ids_stops_loop() {
    let mut site = FakeSite::with_landing(&[("Alpha", "alpha"), ("Beta", "beta")]);
    site.pages.insert(format!("{BASE}/search?categories=alpha&page=1"), s("<html>maintenance</html>"));
    site.search("beta", 1, 50, 25, &[]);

    let report = crawl(&opts(), &site, &Pauses::default(), None).unwrap();
    assert_eq!(report.categories[0].stop, StopReason::NoPayload);
    assert_eq!(report.categories[1].stop, StopReason::EmptyPage);
    assert_eq!(report.categories[1].pages, 1);
    assert!(report.image_ids.is_empty());
}

#[test]
fn slug_filter_skips_other_categories() {
    let site = two_category_site();
    let mut o = opts();
    o.categories = CategorySelector::Slugs(vec![s("beta")]);
    let report = crawl(&o, &site, &Pauses::default(), None).unwrap();

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category.slug, "beta");
    assert_eq!(report.image_ids, vec!["a1", "b1"]);
}

#[test]
fn landing_failures_are_errors() {
    let empty = FakeSite::default();
    assert!(matches!(crawl(&opts(), &empty, &Pauses::default(), None), Err(CrawlError::Landing(_))));

    let mut no_payload = FakeSite::default();
    no_payload.pages.insert(s(BASE), s("<html></html>"));
    assert!(matches!(list_categories(&opts(), &no_payload), Err(CrawlError::NoPayload(_))));

    let no_cats = FakeSite::with_landing(&[]);
    assert!(matches!(list_categories(&opts(), &no_cats), Err(CrawlError::NoCategories)));
}

#[test]
fn landing_without_payload_keeps_extractor_reason() {
    let mut site = FakeSite::default();
    site.pages.insert(s(BASE), s("<html><body>no script here</body></html>"));

    let err = crawl(&opts(), &site, &Pauses::default(), None).unwrap_err();
    assert!(matches!(err, CrawlError::NoPayload(NotFound::NoMatch)));
    assert_eq!(site.requested(), vec![s(BASE)]);
}

#[derive(Default)]
struct Recorder {
    begun: usize,
    pages: Vec<(String, u64, u64, usize)>,
    done: Vec<(String, usize, usize)>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.begun = total;
    }
    fn page_done(&mut self, category: &str, page: u64, total_pages: u64, ids: &[String]) {
        self.pages.push((s(category), page, total_pages, ids.len()));
    }
    fn category_done(&mut self, category: &str, found: usize, new: usize) {
        self.done.push((s(category), found, new));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn progress_sees_every_page() {
    let site = two_category_site();
    let mut rec = Recorder::default();
    crawl(&opts(), &site, &Pauses::default(), Some(&mut rec)).unwrap();

    assert_eq!(rec.begun, 2);
    assert_eq!(
        rec.pages,
        vec![(s("Alpha"), 1, 2, 2), (s("Alpha"), 2, 2, 1), (s("Beta"), 1, 1, 2)]
    );
    assert_eq!(rec.done, vec![(s("Alpha"), 3, 3), (s("Beta"), 2, 1)]);
    assert!(rec.finished);
}
