use std::path::Path;

use chrono::{Local, Utc};
use feedpulse_analytics::{compute_baselines, detect_viral, DetectorConfig, ObservedArticle};
use feedpulse_core::AppConfig;
use feedpulse_report::{render_viral_html, render_viral_summary};
use feedpulse_store::{scan_recent, StoredArticle};

/// Run a full detection pass: scan the store, compute baselines, flag
/// viral articles, write the HTML report, print the terminal summary.
///
/// # Errors
///
/// Returns an error if the store scan fails or the report cannot be
/// written. Data sparsity never errors; an empty store renders the
/// explicit "no data" report.
pub(crate) fn run_detect(config: &AppConfig, html_out: Option<&Path>) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    let stored = scan_recent(&config.data_dir, config.lookback_days, today)?;
    tracing::info!(articles = stored.len(), "scanned article store");

    let observed = to_observed(&stored);
    let baselines = compute_baselines(&observed);
    tracing::info!(
        accounts = baselines.len(),
        excluded = account_count(&observed).saturating_sub(baselines.len()),
        "computed account baselines"
    );

    let detector = DetectorConfig {
        read_multiplier_threshold: config.read_multiplier_threshold,
        looking_rate_multiplier_threshold: config.looking_rate_multiplier_threshold,
        share_rate_multiplier_threshold: config.share_rate_multiplier_threshold,
        recency_days: config.recency_days,
        lookback_days: config.lookback_days,
    };
    let flags = detect_viral(&observed, &baselines, &detector, today);
    tracing::info!(flags = flags.len(), "viral detection complete");

    let html = render_viral_html(&flags, Utc::now());
    let out_path = match html_out {
        Some(path) => path.to_path_buf(),
        None => config.reports_dir.join("viral_alert.html"),
    };
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, html)?;
    println!("report written to {}", out_path.display());
    println!();
    print!("{}", render_viral_summary(&flags));

    Ok(())
}

/// Pair each article with its latest snapshot; articles never measured
/// have no current state and drop out here.
pub(crate) fn to_observed(stored: &[StoredArticle]) -> Vec<ObservedArticle> {
    stored
        .iter()
        .filter_map(|entry| {
            entry.latest().map(|latest| ObservedArticle {
                article: entry.article.clone(),
                latest: *latest,
            })
        })
        .collect()
}

fn account_count(observed: &[ObservedArticle]) -> usize {
    let accounts: std::collections::HashSet<&str> = observed
        .iter()
        .map(|o| o.article.account_id.as_str())
        .collect();
    accounts.len()
}
