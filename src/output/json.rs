// JSON export of a trend result.
//
// One pretty-printed file per analysis, named after the topic and the time of
// export so repeated runs never overwrite each other.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::models::TrendResult;

/// Write `result` into `dir` (created if missing) and return the file path.
pub fn export(result: &TrendResult, dir: &Path) -> Result<PathBuf> {
    export_at(result, dir, Local::now())
}

/// Same as `export`, with the timestamp used in the file name supplied.
pub fn export_at<Tz: TimeZone>(
    result: &TrendResult,
    dir: &Path,
    at: DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(file_name(&result.topic, &at));
    let json = serde_json::to_string_pretty(result).context("Failed to serialize trend result")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Exported trend result");
    Ok(path)
}

/// `trend_<topic>_<YYYYmmdd_HHMMSS>.json`, with whitespace and path
/// separators in the topic replaced by underscores.
pub fn file_name<Tz: TimeZone>(topic: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let safe_topic: String = topic
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("trend_{}_{}.json", safe_topic, at.format("%Y%m%d_%H%M%S"))
}
