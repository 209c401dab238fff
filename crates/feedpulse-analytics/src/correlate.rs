//! Label/engagement correlation: which title features perform.

use std::collections::HashMap;

use crate::types::{LabelStats, ObservedArticle};

/// Bucket articles by title label and compute mean engagement per bucket.
///
/// `classify` maps a title to zero or more labels; each label is an
/// independent membership test, so one article can contribute to many
/// buckets. Zero-read articles carry undefined rates and are excluded
/// entirely. Labels observed fewer than `min_support` times are dropped
/// from the output; a mean over one data point says nothing.
///
/// The result is sorted descending by mean engagement rate, ties broken
/// by occurrence count descending.
#[must_use]
pub fn correlate_labels<F>(
    articles: &[ObservedArticle],
    classify: F,
    min_support: usize,
) -> Vec<LabelStats>
where
    F: Fn(&str) -> Vec<String>,
{
    struct Accumulator {
        count: usize,
        engagement_rates: f64,
        like_rates: f64,
        comment_rates: f64,
    }

    let mut per_label: HashMap<String, Accumulator> = HashMap::new();

    for observed in articles {
        let snapshot = &observed.latest;
        if snapshot.read == 0 {
            continue;
        }

        for label in classify(&observed.article.title) {
            let entry = per_label.entry(label).or_insert(Accumulator {
                count: 0,
                engagement_rates: 0.0,
                like_rates: 0.0,
                comment_rates: 0.0,
            });
            entry.count += 1;
            entry.engagement_rates += snapshot.engagement_rate();
            entry.like_rates += snapshot.like_rate();
            entry.comment_rates += snapshot.comment_rate();
        }
    }

    let mut stats: Vec<LabelStats> = per_label
        .into_iter()
        .filter(|(_, acc)| acc.count >= min_support)
        .map(|(label, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let denom = acc.count as f64;
            LabelStats {
                label,
                occurrence_count: acc.count,
                mean_engagement_rate: acc.engagement_rates / denom,
                mean_like_rate: acc.like_rates / denom,
                mean_comment_rate: acc.comment_rates / denom,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.mean_engagement_rate
            .total_cmp(&a.mean_engagement_rate)
            .then(b.occurrence_count.cmp(&a.occurrence_count))
    });
    stats
}
