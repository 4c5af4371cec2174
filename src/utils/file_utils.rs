use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Count regular files in `dir` whose name satisfies `matches`.
pub fn count_files(dir: &Path, matches: impl Fn(&str) -> bool) -> Result<usize> {
    let count = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map_or(false, |t| t.is_file()))
        .filter(|entry| entry.file_name().to_str().map_or(false, &matches))
        .count();

    Ok(count)
}

/// True when both paths resolve to the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))
}
