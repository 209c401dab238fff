use std::collections::HashMap;

use feedpulse_core::{ArticleRecord, EngagementSnapshot};
use serde::Serialize;

/// An article paired with its latest engagement snapshot.
///
/// The input shape for every analysis pass. Callers materialize these
/// from the store before the batch runs; the core never reads anything
/// else.
#[derive(Debug, Clone)]
pub struct ObservedArticle {
    pub article: ArticleRecord,
    pub latest: EngagementSnapshot,
}

/// Rolling statistical baseline for one account, recomputed per run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AccountBaseline {
    pub avg_read: f64,
    pub avg_looking_rate: f64,
    pub avg_share_rate: f64,
    /// Articles that contributed to the averages. A baseline built from
    /// a single article is mathematically valid but low-confidence;
    /// consumers may want to surface that.
    pub sample_count: usize,
}

/// account id -> baseline. Accounts with no qualifying articles are absent.
pub type BaselineMap = HashMap<String, AccountBaseline>;

/// Thresholds and windows for viral detection.
///
/// The defaults (3x reads, 2x looking-rate, 2x share-rate, 3-day
/// recency, 30-day lookback) are empirically chosen operating points,
/// not derived constants.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    pub read_multiplier_threshold: f64,
    pub looking_rate_multiplier_threshold: f64,
    pub share_rate_multiplier_threshold: f64,
    /// Calendar days, inclusive of today, a snapshot counts as recent.
    pub recency_days: u32,
    /// Publish-date window articles are drawn from for baselines.
    pub lookback_days: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            read_multiplier_threshold: 3.0,
            looking_rate_multiplier_threshold: 2.0,
            share_rate_multiplier_threshold: 2.0,
            recency_days: 3,
            lookback_days: 30,
        }
    }
}

/// One flagged article, with everything a renderer needs for a
/// "you vs. your average" comparison. Ephemeral: recomputed every run,
/// never persisted, so an article that regresses below threshold simply
/// stops appearing.
#[derive(Debug, Clone, Serialize)]
pub struct ViralFlag {
    pub article: ArticleRecord,
    pub snapshot: EngagementSnapshot,
    pub baseline: AccountBaseline,
    /// Human-readable tags, one per triggered threshold.
    pub triggered_tags: Vec<String>,
    pub read_multiplier: f64,
    pub looking_rate_multiplier: f64,
    pub share_rate_multiplier: f64,
}

/// Aggregate engagement statistics for one title label.
#[derive(Debug, Clone, Serialize)]
pub struct LabelStats {
    pub label: String,
    pub occurrence_count: usize,
    pub mean_engagement_rate: f64,
    pub mean_like_rate: f64,
    pub mean_comment_rate: f64,
}
