//! File-backed article and snapshot store.
//!
//! One directory per collected article (`YYYYMMDD_HHMMSS_<id>_<slug>`)
//! holding `metadata.json` (immutable article metadata) and
//! `stats_history.json` (the append-only, date-ordered engagement
//! snapshot series). The analysis crates only ever see the normalized
//! records this crate loads; unreadable or partially-written folders
//! are skipped with a warning, never fatal to a scan.

pub mod error;
pub mod records;
pub mod store;

pub use error::StoreError;
pub use records::{NewArticle, StoredArticle};
pub use store::{append_snapshot, scan_articles, scan_recent, write_article, AppendOutcome};
