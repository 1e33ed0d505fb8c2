// src/progress.rs
/// Lightweight progress reporting for the crawl.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the category list is known.
    fn begin(&mut self, _total_categories: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One search page decoded.
    fn page_done(&mut self, _category: &str, _page: u64, _total_pages: u64, _ids: &[String]) {}

    /// A category finished (possibly early, on a failed page).
    fn category_done(&mut self, _category: &str, _found: usize, _new: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
