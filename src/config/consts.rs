// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://hub.docker.com";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const LANDING_TIMEOUT_SECS: u64 = 10;
pub const PAGE_TIMEOUT_SECS: u64 = 15;

// Pacing (be polite)
pub const PAGE_PAUSE_MS: u64 = 3_000;
pub const CATEGORY_PAUSE_MS: u64 = 3_000;

// Decode
pub const MARKER_PREFIX: char = '_';
pub const DEFAULT_PAGE_SIZE: u64 = 25;
pub const FIRST_ID_WINDOW: usize = 10;

// Env
pub const MAX_PAGES_ENV: &str = "MAX_PAGES_PER_CATEGORY";

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_STEM: &str = "docker_images";
pub const IMAGE_TAG: &str = "latest";
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";
