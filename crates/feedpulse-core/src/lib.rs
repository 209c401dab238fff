//! Shared domain types and configuration for feedpulse.
//!
//! Holds the article/snapshot records every other crate works with, the
//! application configuration loaded from environment variables, and the
//! label-rule tables the correlator classifies titles against.

pub mod app_config;
pub mod config;
pub mod error;
pub mod labels;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use labels::{load_labels, LabelRule, LabelRules};
pub use types::{article_id_for_url, ArticleRecord, EngagementSnapshot};
