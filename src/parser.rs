//! Column parsing for the container CLI's padded, human-oriented tables.
//!
//! Columns are separated by runs of at least two whitespace characters. Values
//! containing single spaces (`2 weeks ago`, `/bin/sh -c ...`) therefore stay in
//! one column, but a value that itself contains a double space will be split.

use std::sync::LazyLock;

use regex::Regex;

/// Layer IDs the runtime cannot resolve locally are printed as this sentinel.
pub const MISSING_LAYER: &str = "<missing>";

static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("column separator pattern is valid"));

/// Splits one table row into its columns.
pub fn split_columns(line: &str) -> Vec<&str> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    COLUMN_SEPARATOR.split(line).collect()
}

/// Data rows of a table: header dropped, blank lines skipped, each row trimmed.
pub fn table_rows(output: &str) -> impl Iterator<Item = &str> {
    output.lines().skip(1).map(str::trim).filter(|line| !line.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow<'a> {
    pub repository: &'a str,
    pub tag: &'a str,
    pub id: &'a str,
    pub size: &'a str,
}

/// `REPOSITORY  TAG  IMAGE ID  ...  SIZE`; the size is always the last column.
pub fn parse_image_row(line: &str) -> Option<ImageRow<'_>> {
    let columns = split_columns(line);
    if columns.len() < 4 {
        return None;
    }
    Some(ImageRow {
        repository: columns[0],
        tag: columns[1],
        id: columns[2],
        size: columns[columns.len() - 1],
    })
}

/// The image reference of a `ps -a` row lives in its second column.
pub fn parse_container_image(line: &str) -> Option<&str> {
    split_columns(line).get(1).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLayer<'a> {
    Image(&'a str),
    Missing,
}

pub fn parse_history_row(line: &str) -> Option<HistoryLayer<'_>> {
    match split_columns(line).first().copied() {
        None => None,
        Some(MISSING_LAYER) => Some(HistoryLayer::Missing),
        Some(id) => Some(HistoryLayer::Image(id)),
    }
}
