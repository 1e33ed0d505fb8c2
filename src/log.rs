// src/log.rs
//! File-backed debug log.
//!
//! The `logf!` / `logd!` / `loge!` macros forward to `tracing`. Nothing is
//! recorded until [`init`] installs the subscriber, so library callers (tests,
//! benches) get silent no-ops for free.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::Uptime;

#[doc(hidden)]
pub use tracing as __tracing;

/// Open (append) `path` and route all log macros into it.
/// Level comes from `RUST_LOG`, default `info`. Calling twice keeps the first subscriber.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_timer(Uptime::default())
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
