//! Batch engagement analytics for feedpulse.
//!
//! Computes per-account baselines from latest engagement snapshots,
//! flags articles whose current numbers deviate far enough from their
//! account's baseline ("viral" detection), and correlates title labels
//! with engagement rate.
//!
//! Everything here is a pure, synchronous computation over
//! fully-materialized inputs: no I/O, no shared state between runs,
//! identical inputs always produce identical outputs. Data sparsity
//! (no baseline, zero reads, empty input) shrinks the output, it never
//! errors.

pub mod baseline;
pub mod classify;
pub mod correlate;
pub mod types;
pub mod viral;

pub use baseline::compute_baselines;
pub use classify::Classifier;
pub use correlate::correlate_labels;
pub use types::{
    AccountBaseline, BaselineMap, DetectorConfig, LabelStats, ObservedArticle, ViralFlag,
};
pub use viral::detect_viral;
