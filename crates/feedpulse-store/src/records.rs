//! Persisted record shapes and their normalized in-memory forms.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use feedpulse_core::{article_id_for_url, ArticleRecord, EngagementSnapshot};
use serde::{Deserialize, Serialize};

/// Metadata for an article about to be collected.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub account_id: String,
    pub category: String,
    pub url: String,
    pub publish_time: DateTime<Utc>,
}

/// An article loaded from disk with its full snapshot history.
#[derive(Debug, Clone)]
pub struct StoredArticle {
    /// Directory the article lives in; snapshot appends target this.
    pub dir: PathBuf,
    pub article: ArticleRecord,
    /// Date-ascending snapshot series. Entries with invalid dates were
    /// dropped at load.
    pub history: Vec<EngagementSnapshot>,
}

impl StoredArticle {
    /// The article's current engagement state: the last (newest)
    /// snapshot, if any was ever recorded.
    #[must_use]
    pub fn latest(&self) -> Option<&EngagementSnapshot> {
        self.history.last()
    }
}

/// `metadata.json` on disk.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredMeta {
    pub title: String,
    pub account_id: String,
    pub category: String,
    pub url: String,
    pub publish_time: DateTime<Utc>,
}

impl StoredMeta {
    pub(crate) fn into_record(self) -> ArticleRecord {
        ArticleRecord {
            id: article_id_for_url(&self.url),
            title: self.title,
            account_id: self.account_id,
            category: self.category,
            url: self.url,
            publish_time: self.publish_time,
        }
    }
}

impl From<&NewArticle> for StoredMeta {
    fn from(new: &NewArticle) -> Self {
        Self {
            title: new.title.clone(),
            account_id: new.account_id.clone(),
            category: new.category.clone(),
            url: new.url.clone(),
            publish_time: new.publish_time,
        }
    }
}

/// `stats_history.json` on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct HistoryFile {
    #[serde(default)]
    pub history: Vec<RawSnapshot>,
}

/// One history entry as persisted. The date stays a string here so a
/// single malformed entry degrades to a skipped record instead of
/// failing the whole file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RawSnapshot {
    #[serde(default)]
    pub read: u64,
    #[serde(default)]
    pub like: u64,
    #[serde(default)]
    pub looking: u64,
    #[serde(default)]
    pub comment: u64,
    #[serde(default)]
    pub share: u64,
    #[serde(default)]
    pub collect: u64,
    pub fetched_date: String,
}

impl RawSnapshot {
    /// Normalize into the typed snapshot; `None` if the date is not a
    /// valid ISO calendar date.
    pub(crate) fn normalize(&self) -> Option<EngagementSnapshot> {
        let fetched_date = NaiveDate::parse_from_str(&self.fetched_date, "%Y-%m-%d").ok()?;
        Some(EngagementSnapshot {
            read: self.read,
            like: self.like,
            looking: self.looking,
            comment: self.comment,
            share: self.share,
            collect: self.collect,
            fetched_date,
        })
    }
}

impl From<&EngagementSnapshot> for RawSnapshot {
    fn from(snapshot: &EngagementSnapshot) -> Self {
        Self {
            read: snapshot.read,
            like: snapshot.like,
            looking: snapshot.looking,
            comment: snapshot.comment,
            share: snapshot.share,
            collect: snapshot.collect,
            fetched_date: snapshot.fetched_date.format("%Y-%m-%d").to_string(),
        }
    }
}
