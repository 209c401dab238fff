//! Scan, create, and append operations over the article directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use feedpulse_core::{article_id_for_url, EngagementSnapshot};

use crate::error::StoreError;
use crate::records::{HistoryFile, NewArticle, RawSnapshot, StoredArticle, StoredMeta};

const METADATA_FILE: &str = "metadata.json";
const HISTORY_FILE: &str = "stats_history.json";
const SLUG_MAX_LEN: usize = 40;

/// Result of a snapshot append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// A snapshot for the same calendar day already exists; nothing was
    /// written (idempotent ingestion).
    DuplicateDay,
}

/// Load every readable article under `data_dir`.
///
/// Folders that don't follow the naming convention, lack metadata, or
/// hold unparsable files are skipped with a warning; a partially
/// corrupt store degrades to a smaller scan, it doesn't fail one. A
/// missing `data_dir` is an empty store, not an error.
///
/// # Errors
///
/// Returns [`StoreError::Io`] only if the directory itself cannot be
/// listed.
pub fn scan_articles(data_dir: &Path) -> Result<Vec<StoredArticle>, StoreError> {
    scan_inner(data_dir, None)
}

/// Like [`scan_articles`], restricted to articles whose folder date
/// (publish date) falls within the last `lookback_days` before `today`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] only if the directory itself cannot be
/// listed.
pub fn scan_recent(
    data_dir: &Path,
    lookback_days: u32,
    today: NaiveDate,
) -> Result<Vec<StoredArticle>, StoreError> {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN);
    scan_inner(data_dir, Some(cutoff))
}

fn scan_inner(data_dir: &Path, cutoff: Option<NaiveDate>) -> Result<Vec<StoredArticle>, StoreError> {
    if !data_dir.exists() {
        tracing::warn!(dir = %data_dir.display(), "article directory does not exist; empty store");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(data_dir).map_err(|e| StoreError::Io {
        path: data_dir.display().to_string(),
        source: e,
    })?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    // Folder names start with the publish timestamp, so sorting by name
    // keeps scans deterministic and oldest-first.
    dirs.sort();

    let mut articles = Vec::new();
    for dir in dirs {
        let Some(folder_date) = folder_publish_date(&dir) else {
            tracing::debug!(dir = %dir.display(), "skipping folder without a date prefix");
            continue;
        };

        if let Some(cutoff) = cutoff {
            if folder_date < cutoff {
                continue;
            }
        }

        match load_article(&dir) {
            Some(article) => articles.push(article),
            None => {
                tracing::warn!(dir = %dir.display(), "skipping unreadable article folder");
            }
        }
    }

    Ok(articles)
}

/// Parse the `YYYYMMDD` prefix of an article folder name.
fn folder_publish_date(dir: &Path) -> Option<NaiveDate> {
    let name = dir.file_name()?.to_str()?;
    let prefix = name.split('_').next()?;
    NaiveDate::parse_from_str(prefix, "%Y%m%d").ok()
}

fn load_article(dir: &Path) -> Option<StoredArticle> {
    let meta_path = dir.join(METADATA_FILE);
    let raw_meta = fs::read_to_string(&meta_path).ok()?;
    let meta: StoredMeta = match serde_json::from_str(&raw_meta) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::warn!(path = %meta_path.display(), error = %e, "malformed metadata");
            return None;
        }
    };

    let history = load_history(dir);

    Some(StoredArticle {
        dir: dir.to_path_buf(),
        article: meta.into_record(),
        history,
    })
}

/// Load the snapshot series for one article directory. A missing file
/// is an empty history; entries with invalid dates are dropped here so
/// downstream recency filtering can assume valid dates.
fn load_history(dir: &Path) -> Vec<EngagementSnapshot> {
    let history_path = dir.join(HISTORY_FILE);
    let Ok(raw) = fs::read_to_string(&history_path) else {
        return Vec::new();
    };

    let file: HistoryFile = match serde_json::from_str(&raw) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %history_path.display(), error = %e, "malformed snapshot history");
            return Vec::new();
        }
    };

    file.history
        .iter()
        .filter_map(|raw| {
            let normalized = raw.normalize();
            if normalized.is_none() {
                tracing::warn!(
                    path = %history_path.display(),
                    fetched_date = %raw.fetched_date,
                    "dropping snapshot with invalid date"
                );
            }
            normalized
        })
        .collect()
}

/// Create the folder and metadata for a newly collected article.
///
/// Articles are immutable once collected: if the folder already exists
/// this fails rather than overwriting.
///
/// # Errors
///
/// Returns [`StoreError::ArticleExists`] if the article folder is
/// already present, or [`StoreError::Io`] on filesystem failure.
pub fn write_article(data_dir: &Path, article: &NewArticle) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(data_dir).map_err(|e| StoreError::Io {
        path: data_dir.display().to_string(),
        source: e,
    })?;

    let dir = data_dir.join(article_folder_name(article));
    if dir.exists() {
        return Err(StoreError::ArticleExists {
            path: dir.display().to_string(),
        });
    }

    fs::create_dir(&dir).map_err(|e| StoreError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let meta = StoredMeta::from(article);
    let payload = serde_json::to_string_pretty(&meta)?;
    let meta_path = dir.join(METADATA_FILE);
    fs::write(&meta_path, payload).map_err(|e| StoreError::Io {
        path: meta_path.display().to_string(),
        source: e,
    })?;

    Ok(dir)
}

/// Append one snapshot to an article's history file.
///
/// At most one snapshot exists per calendar day: appending a second
/// snapshot for a date already present is a no-op reported as
/// [`AppendOutcome::DuplicateDay`]. Creates the history file if absent.
///
/// # Errors
///
/// Returns [`StoreError::HistoryParse`] if the existing history file is
/// malformed (it will not be overwritten), or [`StoreError::Io`] on
/// filesystem failure.
pub fn append_snapshot(
    article_dir: &Path,
    snapshot: &EngagementSnapshot,
) -> Result<AppendOutcome, StoreError> {
    let history_path = article_dir.join(HISTORY_FILE);

    let mut file = if history_path.exists() {
        let raw = fs::read_to_string(&history_path).map_err(|e| StoreError::Io {
            path: history_path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str::<HistoryFile>(&raw).map_err(|e| StoreError::HistoryParse {
            path: history_path.display().to_string(),
            source: e,
        })?
    } else {
        HistoryFile::default()
    };

    let day = snapshot.fetched_date.format("%Y-%m-%d").to_string();
    if file.history.iter().any(|raw| raw.fetched_date == day) {
        return Ok(AppendOutcome::DuplicateDay);
    }

    file.history.push(RawSnapshot::from(snapshot));

    let payload = serde_json::to_string_pretty(&file)?;
    fs::write(&history_path, payload).map_err(|e| StoreError::Io {
        path: history_path.display().to_string(),
        source: e,
    })?;

    Ok(AppendOutcome::Appended)
}

/// `YYYYMMDD_HHMMSS_<id>_<slug>`: publish timestamp first so the
/// lexicographic order of folders is chronological.
fn article_folder_name(article: &NewArticle) -> String {
    let stamp = article.publish_time.format("%Y%m%d_%H%M%S");
    let id = article_id_for_url(&article.url).simple().to_string();
    let short_id = &id[..8];
    format!("{stamp}_{short_id}_{}", title_slug(&article.title))
}

/// Filesystem-safe slug from an article title: lowercase ASCII
/// alphanumerics joined by single dashes, truncated.
fn title_slug(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.chars().take(SLUG_MAX_LEN).collect()
    }
}
