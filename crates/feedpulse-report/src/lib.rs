//! Report rendering for feedpulse analysis output.
//!
//! Pure string builders: the HTML viral-alert page, the terminal
//! summary printed after a detection run, and the label correlation
//! table. Writing the result anywhere is the caller's job.

pub mod html;
pub mod text;

pub use html::render_viral_html;
pub use text::{render_correlation_table, render_viral_summary};
