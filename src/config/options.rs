// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use time::OffsetDateTime;
use time::macros::format_description;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Slugs(Vec<String>),
}

impl CategorySelector {
    pub fn matches(&self, slug: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Slugs(v) => v.iter().any(|s| s == slug),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    pub base_url: String,
    /// Pages per category; 0 means "whatever the first page says total_pages is".
    pub max_pages: u32,
    pub categories: CategorySelector,
    pub page_pause: Duration,
    pub category_pause: Duration,
    pub landing_timeout: Duration,
    pub page_timeout: Duration,
    out_path: Option<PathBuf>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            max_pages: 0,
            categories: CategorySelector::All,
            page_pause: Duration::from_millis(PAGE_PAUSE_MS),
            category_pause: Duration::from_millis(CATEGORY_PAUSE_MS),
            landing_timeout: Duration::from_secs(LANDING_TIMEOUT_SECS),
            page_timeout: Duration::from_secs(PAGE_TIMEOUT_SECS),
            out_path: None,
        }
    }
}

impl CrawlOptions {
    /// Trailing slashes would double up in `<base>/search?...`.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = s!(url.trim().trim_end_matches('/'));
    }

    pub fn set_out_path(&mut self, path: impl Into<PathBuf>) {
        self.out_path = Some(path.into());
    }

    /// Same pause between pages and between categories. Tests pass zero.
    pub fn set_pause(&mut self, pause: Duration) {
        self.page_pause = pause;
        self.category_pause = pause;
    }

    /// User path if given, else `out/docker_images_<UTC timestamp>.txt`.
    pub fn out_path(&self) -> PathBuf {
        match &self.out_path {
            Some(p) => p.clone(),
            None => default_out_path(OffsetDateTime::now_utc()),
        }
    }
}

/// `docker_images_<YYYYMMDD_HHMMSS>.txt`
pub fn default_file_name(at: OffsetDateTime) -> String {
    let fmt = format_description!("[year][month][day]_[hour][minute][second]");
    let stamp = at.format(fmt).unwrap_or_else(|_| at.unix_timestamp().to_string());
    join!(DEFAULT_FILE_STEM, "_", &stamp, ".txt")
}

pub fn default_out_path(at: OffsetDateTime) -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR).join(default_file_name(at))
}

/// Value of `MAX_PAGES_PER_CATEGORY`. Unset, blank or garbage all mean 0;
/// garbage is logged and warned about but never aborts the run.
pub fn parse_max_pages(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return 0;
    };
    match raw.parse::<u32>() {
        Ok(n) => n,
        Err(e) => {
            loge!("{MAX_PAGES_ENV}={raw:?} is not a page count ({e}); using 0");
            eprintln!("warning: ignoring {MAX_PAGES_ENV}={raw:?}, not a page count");
            0
        }
    }
}
