// src/core/mod.rs

pub mod cursor;
pub mod net;
pub mod payload;

pub use cursor::{classify, Cursor, Shape};
pub use net::{Fetch, FetchError, HttpFetcher};
pub use payload::{extract, NotFound};
