// src/scrape/mod.rs
mod collect;
mod crawl;

pub use collect::ImageSet;
pub use crawl::{crawl, list_categories, page_url};
pub use crawl::{CategoryReport, CrawlError, CrawlReport, Sleeper, StopReason, ThreadSleeper};
