//! Terminal-facing summaries.

use std::fmt::Write as _;

use feedpulse_analytics::{LabelStats, ViralFlag};

const SUMMARY_LIMIT: usize = 10;
const TITLE_DISPLAY_LEN: usize = 50;

/// Short post-run summary of flagged articles, top 10 only. The HTML
/// report carries the rest.
#[must_use]
pub fn render_viral_summary(flags: &[ViralFlag]) -> String {
    let mut out = String::new();

    if flags.is_empty() {
        out.push_str("no viral articles detected in the recent window\n");
        return out;
    }

    let _ = writeln!(out, "{} viral article(s) detected:", flags.len());
    out.push('\n');

    for (idx, flag) in flags.iter().take(SUMMARY_LIMIT).enumerate() {
        let tags = flag.triggered_tags.join(" | ");
        let _ = writeln!(
            out,
            "{}. [{}] {}",
            idx + 1,
            flag.article.account_id,
            truncate(&flag.article.title)
        );
        let _ = writeln!(out, "   -> {} reads | {tags}", flag.snapshot.read);
    }

    if flags.len() > SUMMARY_LIMIT {
        out.push('\n');
        let _ = writeln!(
            out,
            "... and {} more, see the HTML report",
            flags.len() - SUMMARY_LIMIT
        );
    }

    out
}

/// Ranked label correlation table.
#[must_use]
pub fn render_correlation_table(stats: &[LabelStats]) -> String {
    let mut out = String::new();

    if stats.is_empty() {
        out.push_str("no labels with enough occurrences to correlate\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<30}{:>7}{:>14}{:>12}{:>14}",
        "LABEL", "COUNT", "ENGAGEMENT%", "LIKE%", "COMMENT%"
    );
    for entry in stats {
        let _ = writeln!(
            out,
            "{:<30}{:>7}{:>14.2}{:>12.2}{:>14.2}",
            truncate_to(&entry.label, 28),
            entry.occurrence_count,
            entry.mean_engagement_rate,
            entry.mean_like_rate,
            entry.mean_comment_rate
        );
    }

    out
}

fn truncate(title: &str) -> String {
    truncate_to(title, TITLE_DISPLAY_LEN)
}

fn truncate_to(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
