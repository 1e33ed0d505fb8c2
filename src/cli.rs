// src/cli.rs
use std::{env, fs, path::{Path, PathBuf}, time::Duration};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use time::OffsetDateTime;

use crate::{
    config::{
        consts::{BASE_URL, DEFAULT_LOG_FILE, MAX_PAGES_ENV},
        options::{default_file_name, parse_max_pages, CategorySelector, CrawlOptions},
    },
    core::{net::HttpFetcher, payload},
    file,
    progress::Progress,
    scrape::{crawl, list_categories, ThreadSleeper},
    specs::GraphDecoder,
};

/// Crawl Docker Hub categories and write the collected image ids as `<id>:latest` lines.
#[derive(Parser, Debug)]
#[command(name = "hub_scrape", version, about)]
pub struct Args {
    /// Pages per category; 0 = as many as the first page reports.
    /// Falls back to `MAX_PAGES_PER_CATEGORY`, then 0.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Output file, or a directory to put the default file name in
    #[arg(short, long)]
    pub out: Option<String>,

    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    /// Only crawl these category slugs (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Pause between page fetches and between categories
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// Print `slug,name,url` for every category and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Decode a saved page offline and print what was found
    #[arg(long, value_name = "FILE")]
    pub inspect: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Args {
    pub fn to_options(&self) -> CrawlOptions {
        let mut opts = CrawlOptions::default();
        opts.set_base_url(&self.base_url);
        opts.max_pages = match self.max_pages {
            Some(n) => n,
            None => parse_max_pages(env::var(MAX_PAGES_ENV).ok().as_deref()),
        };
        if !self.only.is_empty() {
            opts.categories = CategorySelector::Slugs(self.only.clone());
        }
        if let Some(ms) = self.pause_ms {
            opts.set_pause(Duration::from_millis(ms));
        }
        if let Some(o) = &self.out {
            let name = default_file_name(OffsetDateTime::now_utc());
            opts.set_out_path(file::resolve_out_path(o, &name));
        }
        opts
    }
}

pub fn run(args: Args) -> Result<()> {
    crate::log::init(&args.log_file)
        .wrap_err_with(|| format!("opening log file {}", args.log_file.display()))?;

    if let Some(path) = &args.inspect {
        return inspect(path, &args.base_url);
    }

    let opts = args.to_options();
    let fetcher = HttpFetcher::new();

    if args.list_categories {
        for c in list_categories(&opts, &fetcher)? {
            println!("{},{},{}", c.slug, c.name, c.url);
        }
        return Ok(());
    }

    if opts.max_pages > 0 {
        println!("Max pages per category: {}", opts.max_pages);
    }

    let mut progress = ConsoleProgress::default();
    let report = crawl(&opts, &fetcher, &ThreadSleeper, Some(&mut progress))?;

    if report.image_ids.is_empty() {
        println!("No images found.");
        return Ok(());
    }

    let path = file::write_image_list(&opts.out_path(), &report.image_ids, &mut rand::thread_rng())
        .wrap_err("writing image list")?;
    println!("Wrote {} images to {}", report.image_ids.len(), path.display());
    Ok(())
}

fn inspect(path: &Path, base_url: &str) -> Result<()> {
    let markup = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let root = payload::extract(&markup).wrap_err("no embedded payload")?;
    let decoder = GraphDecoder::new(base_url.trim_end_matches('/'));

    println!("payload: {} elements", root.len());

    let cats = decoder.decode_categories(&root);
    println!("categories: {}", cats.len());
    for c in &cats {
        println!("  {} ({}) {}", c.name, c.slug, c.url);
    }

    let page = decoder.decode_search_page(&root);
    println!(
        "search page: {}/{} (page size {}, {} items total), {} ids",
        page.current_page, page.total_pages, page.page_size, page.total_items, page.item_ids.len()
    );
    for id in &page.item_ids {
        println!("  - {id}");
    }
    Ok(())
}

#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("{total} categories to crawl");
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn page_done(&mut self, category: &str, page: u64, total_pages: u64, ids: &[String]) {
        println!("  '{category}' page {page}/{total_pages}: {} images", ids.len());
        for id in ids {
            println!("    - {id}");
        }
    }
    fn category_done(&mut self, category: &str, found: usize, new: usize) {
        self.done += 1;
        println!("Done '{category}' ({}/{}): {found} images, {new} new", self.done, self.total);
    }
    fn finish(&mut self) {
        println!("Crawl complete ({}/{})", self.done, self.total);
    }
}
