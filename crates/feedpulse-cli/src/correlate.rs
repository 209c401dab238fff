use chrono::Local;
use feedpulse_analytics::{correlate_labels, Classifier};
use feedpulse_core::{load_labels, AppConfig};
use feedpulse_report::render_correlation_table;
use feedpulse_store::scan_recent;

use crate::detect::to_observed;

/// Correlate configured title labels with engagement rate and print the
/// ranked table.
///
/// # Errors
///
/// Returns an error if the label rules cannot be loaded or the store
/// scan fails.
pub(crate) fn run_correlate(config: &AppConfig) -> anyhow::Result<()> {
    let rules = load_labels(&config.labels_path)?;
    let classifier = Classifier::from_rules(&rules);

    let today = Local::now().date_naive();
    let stored = scan_recent(&config.data_dir, config.lookback_days, today)?;
    let observed = to_observed(&stored);
    tracing::info!(
        articles = observed.len(),
        keyword_rules = rules.keyword.len(),
        style_rules = rules.style.len(),
        "correlating labels"
    );

    let stats = correlate_labels(
        &observed,
        |title| classifier.labels(title),
        config.min_label_support,
    );

    print!("{}", render_correlation_table(&stats));

    Ok(())
}
