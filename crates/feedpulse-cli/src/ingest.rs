use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use feedpulse_core::{AppConfig, EngagementSnapshot};
use feedpulse_store::{append_snapshot, scan_articles, write_article, AppendOutcome, NewArticle};
use serde::Deserialize;

/// One fetched-metrics record, as produced by the metrics fetcher.
#[derive(Debug, Deserialize)]
struct BatchEntry {
    url: String,
    title: String,
    account_id: String,
    #[serde(default)]
    category: String,
    publish_time: DateTime<Utc>,
    stats: BatchStats,
}

/// Counters default to 0; the date stays raw so one malformed entry is
/// rejected on its own instead of failing the batch.
#[derive(Debug, Deserialize)]
struct BatchStats {
    #[serde(default)]
    read: u64,
    #[serde(default)]
    like: u64,
    #[serde(default)]
    looking: u64,
    #[serde(default)]
    comment: u64,
    #[serde(default)]
    share: u64,
    #[serde(default)]
    collect: u64,
    fetched_date: String,
}

impl BatchStats {
    fn normalize(&self) -> Option<EngagementSnapshot> {
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

/// Ingest a JSON batch of fetched engagement metrics.
///
/// Unseen articles are collected first (immutable metadata), then the
/// day's snapshot is appended. Appends are idempotent per calendar day,
/// so re-running a batch is safe. Entries with an invalid fetch date
/// are rejected here; nothing downstream ever sees them.
///
/// # Errors
///
/// Returns an error if the batch file cannot be read or parsed, or on
/// store write failure.
pub(crate) fn run_ingest(config: &AppConfig, batch_path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(batch_path)?;
    let entries: Vec<BatchEntry> = serde_json::from_str(&raw)?;
    tracing::info!(entries = entries.len(), batch = %batch_path.display(), "ingesting batch");

    // Existing articles, keyed by canonical URL.
    let mut dirs_by_url: HashMap<String, PathBuf> = scan_articles(&config.data_dir)?
        .into_iter()
        .map(|stored| (stored.article.url.clone(), stored.dir))
        .collect();

    let mut created = 0usize;
    let mut appended = 0usize;
    let mut duplicates = 0usize;
    let mut rejected = 0usize;

    for entry in entries {
        let Some(snapshot) = entry.stats.normalize() else {
            tracing::warn!(
                url = %entry.url,
                fetched_date = %entry.stats.fetched_date,
                "rejecting entry with invalid fetch date"
            );
            rejected += 1;
            continue;
        };

        let dir = match dirs_by_url.get(&entry.url) {
            Some(dir) => dir.clone(),
            None => {
                let article = NewArticle {
                    title: entry.title.clone(),
                    account_id: entry.account_id.clone(),
                    category: entry.category.clone(),
                    url: entry.url.clone(),
                    publish_time: entry.publish_time,
                };
                let dir = write_article(&config.data_dir, &article)?;
                dirs_by_url.insert(entry.url.clone(), dir.clone());
                created += 1;
                dir
            }
        };

        match append_snapshot(&dir, &snapshot)? {
            AppendOutcome::Appended => appended += 1,
            AppendOutcome::DuplicateDay => duplicates += 1,
        }
    }

    tracing::info!(created, appended, duplicates, rejected, "batch ingest complete");
    println!(
        "ingested: {created} new article(s), {appended} snapshot(s) appended, \
         {duplicates} same-day duplicate(s) skipped, {rejected} rejected"
    );

    Ok(())
}
