//! File loading for tag-code and definition sources

use crate::error::{MtagsError, Result};
use crate::domain::codec::CODE_LEN;
use std::fs;
use std::path::Path;

/// Read a tag-code source file and keep only the lines that look like
/// encoded tags: exactly 8 characters after trimming, not starting with `#`.
/// Everything else is ignored silently.
pub fn read_tag_codes(path: &Path) -> Result<Vec<String>> {
    let contents = read_source(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| line.len() == CODE_LEN && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Read a definition source file as raw lines; the table parser handles
/// comments, blanks and malformed entries.
pub fn read_definition_lines(path: &Path) -> Result<Vec<String>> {
    let contents = read_source(path)?;
    Ok(contents.lines().map(str::to_string).collect())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| MtagsError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
