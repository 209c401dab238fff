use std::path::PathBuf;

/// Application configuration, resolved once at startup and passed into
/// each component explicitly. No process-wide implicit state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory of the article store (one folder per article).
    pub data_dir: PathBuf,
    /// Directory generated reports are written to.
    pub reports_dir: PathBuf,
    /// Path to the label-rules YAML used by the correlator.
    pub labels_path: PathBuf,
    pub log_level: String,
    /// Read-count multiplier an article must reach over its account
    /// baseline to be flagged on volume.
    pub read_multiplier_threshold: f64,
    /// Looking-rate multiplier threshold over the account baseline.
    pub looking_rate_multiplier_threshold: f64,
    /// Share-rate multiplier threshold over the account baseline.
    pub share_rate_multiplier_threshold: f64,
    /// Calendar days (inclusive of today) a snapshot counts as recent.
    pub recency_days: u32,
    /// Publish-date lookback window for baselines, in days.
    pub lookback_days: u32,
    /// Minimum occurrences a label needs to appear in correlation output.
    pub min_label_support: usize,
}
