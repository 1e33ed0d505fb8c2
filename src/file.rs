// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::consts::IMAGE_TAG;

/// Write one `<id>:latest` line per image, in shuffled order.
/// Creates parent directories. Returns the path written to.
pub fn write_image_list<R: Rng + ?Sized>(
    path: &Path,
    ids: &[String],
    rng: &mut R,
) -> io::Result<PathBuf> {
    // Fails with a file sitting where a parent directory should be.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut lines: Vec<String> = ids.iter().map(|id| join!(id.as_str(), ":", IMAGE_TAG)).collect();
    lines.shuffle(rng);

    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(path.to_path_buf())
}

/// `-o` may name a file or a directory (existing, or hinted by a trailing slash).
/// Directories get `default_filename` appended.
pub fn resolve_out_path(user_o: &str, default_filename: &str) -> PathBuf {
    let p = PathBuf::from(user_o);
    if user_o.ends_with(['/', '\\']) || p.is_dir() {
        p.join(default_filename)
    } else {
        p
    }
}
