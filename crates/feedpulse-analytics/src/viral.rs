//! Viral detection: compare recent snapshots against account baselines.

use chrono::{Days, NaiveDate};

use crate::types::{BaselineMap, DetectorConfig, ObservedArticle, ViralFlag};

/// Detect articles whose latest snapshot deviates far enough from the
/// account baseline.
///
/// Three independent signals are OR-combined, each inclusive at its
/// threshold: read volume over the account's average read count, and
/// looking/share rates over the account's average rates. Any one firing
/// flags the article; each contributes a human-readable tag naming the
/// multiple.
///
/// Candidates are restricted to snapshots fetched within the last
/// `config.recency_days` calendar days (inclusive of `today`). Articles
/// with no account baseline or zero reads are skipped, not errors.
///
/// The result is sorted descending by read multiplier alone; volume
/// orders the list even for flags that qualified on a rate signal. The
/// sort is stable, so ties keep input order.
#[must_use]
pub fn detect_viral(
    articles: &[ObservedArticle],
    baselines: &BaselineMap,
    config: &DetectorConfig,
    today: NaiveDate,
) -> Vec<ViralFlag> {
    let mut flags: Vec<ViralFlag> = articles
        .iter()
        .filter(|observed| is_recent(observed.latest.fetched_date, today, config.recency_days))
        .filter_map(|observed| evaluate(observed, baselines, config))
        .collect();

    flags.sort_by(|a, b| b.read_multiplier.total_cmp(&a.read_multiplier));
    flags
}

/// `fetched_date` within `{today - (recency_days - 1), ..., today}`.
/// Future-dated snapshots are not recent.
fn is_recent(fetched_date: NaiveDate, today: NaiveDate, recency_days: u32) -> bool {
    if fetched_date > today {
        return false;
    }
    let window_start = today
        .checked_sub_days(Days::new(u64::from(recency_days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    fetched_date >= window_start
}

fn evaluate(
    observed: &ObservedArticle,
    baselines: &BaselineMap,
    config: &DetectorConfig,
) -> Option<ViralFlag> {
    let baseline = baselines.get(&observed.article.account_id)?;

    let snapshot = &observed.latest;
    if snapshot.read == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let read_multiplier = guarded_ratio(snapshot.read as f64, baseline.avg_read);
    let looking_rate_multiplier = guarded_ratio(snapshot.looking_rate(), baseline.avg_looking_rate);
    let share_rate_multiplier = guarded_ratio(snapshot.share_rate(), baseline.avg_share_rate);

    let mut triggered_tags = Vec::new();

    if read_multiplier >= config.read_multiplier_threshold {
        triggered_tags.push(format!("read {read_multiplier:.1}x baseline"));
    }
    if looking_rate_multiplier >= config.looking_rate_multiplier_threshold {
        triggered_tags.push(format!("looking-rate {looking_rate_multiplier:.1}x baseline"));
    }
    if share_rate_multiplier >= config.share_rate_multiplier_threshold {
        triggered_tags.push(format!("share-rate {share_rate_multiplier:.1}x baseline"));
    }

    if triggered_tags.is_empty() {
        return None;
    }

    Some(ViralFlag {
        article: observed.article.clone(),
        snapshot: *snapshot,
        baseline: *baseline,
        triggered_tags,
        read_multiplier,
        looking_rate_multiplier,
        share_rate_multiplier,
    })
}

/// value / baseline, treating a zero (or degenerate) baseline as "no
/// signal" rather than infinity.
fn guarded_ratio(value: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        value / baseline
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::compute_baselines;
    use chrono::{TimeZone, Utc};
    use feedpulse_core::{article_id_for_url, ArticleRecord, EngagementSnapshot};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn observed_on(
        account: &str,
        url_tail: &str,
        read: u64,
        looking: u64,
        share: u64,
        fetched_date: NaiveDate,
    ) -> ObservedArticle {
        let url = format!("https://example.com/{account}/{url_tail}");
        ObservedArticle {
            article: ArticleRecord {
                id: article_id_for_url(&url),
                title: format!("{account}/{url_tail}"),
                account_id: account.to_string(),
                category: "tech".to_string(),
                url,
                publish_time: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap(),
            },
            latest: EngagementSnapshot {
                read,
                like: 0,
                looking,
                comment: 0,
                share,
                collect: 0,
                fetched_date,
            },
        }
    }

    fn observed(
        account: &str,
        url_tail: &str,
        read: u64,
        looking: u64,
        share: u64,
    ) -> ObservedArticle {
        observed_on(account, url_tail, read, looking, share, today())
    }

    /// Baseline history fetched outside the recency window, so only the
    /// candidates added by a test can be flagged.
    fn history(account: &str, reads: &[u64], looking: u64, share: u64) -> Vec<ObservedArticle> {
        let stale = today().checked_sub_days(Days::new(10)).unwrap();
        reads
            .iter()
            .enumerate()
            .map(|(i, &read)| observed_on(account, &format!("old-{i}"), read, looking, share, stale))
            .collect()
    }

    #[test]
    fn end_to_end_read_signal_only() {
        // 3 historical articles: reads 1000, looking 10, share 5 each
        // -> avg_read=1000, avg_looking_rate=0.01, avg_share_rate=0.005.
        // Candidate: read=3500, looking=10, share=5 fetched today.
        let mut articles = history("a", &[1000, 1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "candidate", 3500, 10, 5));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());

        assert_eq!(flags.len(), 1, "expected exactly one flag, got {flags:?}");
        let flag = &flags[0];
        assert!((flag.read_multiplier - 3.5).abs() < 1e-9);
        assert!(flag.looking_rate_multiplier < 2.0);
        assert!(flag.share_rate_multiplier < 2.0);
        assert_eq!(flag.triggered_tags.len(), 1);
        assert_eq!(flag.triggered_tags[0], "read 3.5x baseline");
    }

    #[test]
    fn read_threshold_is_inclusive() {
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "exactly-3x", 3000, 10, 5));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert_eq!(flags.len(), 1, "read multiplier of exactly 3.0 must flag");
    }

    #[test]
    fn just_below_read_threshold_is_not_flagged() {
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "under", 2999, 10, 5));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert!(flags.is_empty(), "2.999x must not flag, got {flags:?}");
    }

    #[test]
    fn share_rate_alone_flags_with_one_tag() {
        // Candidate reads stay at 1x but share rate runs at 4x baseline.
        let mut articles = history("a", &[1000, 1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "share-spike", 1000, 10, 20));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());

        assert_eq!(flags.len(), 1);
        let flag = &flags[0];
        assert!(flag.read_multiplier < 3.0);
        assert_eq!(
            flag.triggered_tags.len(),
            1,
            "only the share-rate tag should fire: {:?}",
            flag.triggered_tags
        );
        assert!(flag.triggered_tags[0].starts_with("share-rate "));
    }

    #[test]
    fn multiple_signals_collect_multiple_tags() {
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "everything", 4000, 120, 60));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].triggered_tags.len(), 3, "{:?}", flags[0].triggered_tags);
    }

    #[test]
    fn zero_read_candidate_is_skipped() {
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "unread", 0, 500, 500));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert!(flags.is_empty());
    }

    #[test]
    fn account_without_baseline_is_skipped() {
        let articles = vec![observed("unknown", "first", 100_000, 1000, 1000)];
        let baselines = BaselineMap::new();

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert!(flags.is_empty(), "no baseline means cannot classify");
    }

    #[test]
    fn stale_snapshot_is_not_a_candidate() {
        let four_days_ago = today().checked_sub_days(Days::new(4)).unwrap();
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed_on("a", "stale", 9000, 10, 5, four_days_ago));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert!(flags.is_empty(), "4-day-old data is outside the 3-day window");
    }

    #[test]
    fn window_boundary_day_is_included() {
        let two_days_ago = today().checked_sub_days(Days::new(2)).unwrap();
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed_on("a", "edge", 9000, 10, 5, two_days_ago));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert_eq!(flags.len(), 1, "today-2 is the last day inside a 3-day window");
    }

    #[test]
    fn future_dated_snapshot_is_not_a_candidate() {
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed_on("a", "future", 9000, 10, 5, tomorrow));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert!(flags.is_empty());
    }

    #[test]
    fn flags_sort_descending_by_read_multiplier() {
        // Three accounts with 1000-read baselines; candidates at 5x, 2x
        // (share-qualified) and 8x.
        let mut articles = Vec::new();
        for account in ["a", "b", "c"] {
            articles.extend(history(account, &[1000, 1000], 10, 5));
        }
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "mid", 5000, 10, 5));
        articles.push(observed("b", "rate-only", 2000, 10, 40));
        articles.push(observed("c", "top", 8000, 10, 5));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());

        let multipliers: Vec<f64> = flags.iter().map(|f| f.read_multiplier).collect();
        assert_eq!(flags.len(), 3, "{multipliers:?}");
        assert!((multipliers[0] - 8.0).abs() < 1e-9);
        assert!((multipliers[1] - 5.0).abs() < 1e-9);
        assert!((multipliers[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn single_sample_baseline_still_detects() {
        // A brand-new account with one 500-read article; a second
        // article reaching 1600 reads is a 3.2x flag.
        let mut articles = history("new", &[500], 5, 2);
        articles.push(observed("new", "second", 1600, 5, 2));
        let baselines = compute_baselines(&articles);
        assert_eq!(baselines["new"].sample_count, 2);

        // Baseline from the stale article alone, as a detection run
        // before the second article existed would have computed it.
        let prior_baselines = compute_baselines(&articles[..1]);
        assert_eq!(prior_baselines["new"].sample_count, 1);

        let flags = detect_viral(&articles, &prior_baselines, &DetectorConfig::default(), today());
        assert_eq!(flags.len(), 1);
        assert!((flags[0].read_multiplier - 3.2).abs() < 1e-9);
    }

    #[test]
    fn zero_baseline_rate_mutes_that_signal() {
        // History has zero looking and share counts, so both rate
        // baselines are 0.0; the candidate's huge rates must not divide
        // by zero or flag on those signals.
        let mut articles = history("a", &[1000, 1000], 0, 0);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "rates", 1000, 300, 300));

        let flags = detect_viral(&articles, &baselines, &DetectorConfig::default(), today());
        assert!(flags.is_empty(), "muted rate signals must not flag: {flags:?}");
    }

    #[test]
    fn empty_input_is_a_valid_steady_state() {
        let flags = detect_viral(&[], &BaselineMap::new(), &DetectorConfig::default(), today());
        assert!(flags.is_empty());
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let mut articles = history("a", &[1000, 1000], 10, 5);
        let baselines = compute_baselines(&articles);
        articles.push(observed("a", "mild", 1500, 10, 5));

        let config = DetectorConfig {
            read_multiplier_threshold: 1.5,
            ..DetectorConfig::default()
        };
        let flags = detect_viral(&articles, &baselines, &config, today());
        assert_eq!(flags.len(), 1, "1.5x threshold should catch a 1.5x article");
    }
}
