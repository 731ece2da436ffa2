//! Item source — newline-delimited problem labels.

use crate::{
    error::{CaseError, CaseResult},
    types::Item,
};
use std::path::{Path, PathBuf};

/// Bundled list used when no item file is available.
pub const DEFAULT_ITEMS: &[&str] = &[
    "212. Word Search II",
    "121. Best Time to Buy and Sell Stock",
    "70. Climbing Stairs",
    "1. Two Sum",
    "322. Coin Change",
    "55. Jump Game",
    "200. Number of Islands",
    "3. Longest Substring Without Repeating Characters",
    "347. Top K Frequent Elements",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// The hard-coded default list.
    Bundled,
    /// A file the user supplied. Read errors are reported.
    File(PathBuf),
    /// A conventional file (e.g. `learned.txt`) that may not exist.
    /// Falls back to the bundled list when unreadable or empty.
    FileOrBundled(PathBuf),
}

impl ItemSource {
    pub fn load(&self) -> CaseResult<Vec<Item>> {
        match self {
            Self::Bundled => Ok(bundled_items()),
            Self::File(path) => read_items(path),
            Self::FileOrBundled(path) => match read_items(path) {
                Ok(items) if !items.is_empty() => Ok(items),
                Ok(_) => {
                    log::warn!("{} has no items; using the bundled list", path.display());
                    Ok(bundled_items())
                }
                Err(e) => {
                    log::warn!("{e}; using the bundled list");
                    Ok(bundled_items())
                }
            },
        }
    }
}

pub fn bundled_items() -> Vec<Item> {
    DEFAULT_ITEMS.iter().map(|s| s.to_string()).collect()
}

/// Split text into labels: one per line, trimmed, blank lines dropped.
pub fn parse_items(text: &str) -> Vec<Item> {
    normalize(text.lines())
}

/// Apply the same trimming and blank filtering to labels that did not
/// come from a file (commands, callers building pools by hand).
pub fn clean_items(items: Vec<Item>) -> Vec<Item> {
    normalize(items.iter().map(String::as_str))
}

fn normalize<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<Item> {
    labels
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_items(path: &Path) -> CaseResult<Vec<Item>> {
    let text = std::fs::read_to_string(path).map_err(|source| CaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_items(&text);
    log::debug!("loaded {} items from {}", items.len(), path.display());
    Ok(items)
}
