//! Per-account baseline computation.

use crate::types::{AccountBaseline, BaselineMap, ObservedArticle};

/// Compute per-account baselines from latest engagement snapshots.
///
/// An article qualifies only if its latest snapshot has `read > 0`:
/// not-yet-measured articles would drag every mean to zero and make the
/// downstream ratios undefined. Accounts where no article qualifies are
/// absent from the returned map; consumers treat absence as "cannot
/// classify, skip".
///
/// Pure function of its input: identical snapshot sets yield identical
/// maps.
#[must_use]
pub fn compute_baselines(articles: &[ObservedArticle]) -> BaselineMap {
    struct Accumulator {
        reads: f64,
        looking_rates: f64,
        share_rates: f64,
        count: usize,
    }

    let mut per_account: std::collections::HashMap<String, Accumulator> =
        std::collections::HashMap::new();

    for observed in articles {
        let snapshot = &observed.latest;
        if snapshot.read == 0 {
            continue;
        }

        let entry = per_account
            .entry(observed.article.account_id.clone())
            .or_insert(Accumulator {
                reads: 0.0,
                looking_rates: 0.0,
                share_rates: 0.0,
                count: 0,
            });

        #[allow(clippy::cast_precision_loss)]
        {
            entry.reads += snapshot.read as f64;
        }
        entry.looking_rates += snapshot.looking_rate();
        entry.share_rates += snapshot.share_rate();
        entry.count += 1;
    }

    per_account
        .into_iter()
        .map(|(account_id, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let denom = acc.count as f64;
            (
                account_id,
                AccountBaseline {
                    avg_read: acc.reads / denom,
                    avg_looking_rate: acc.looking_rates / denom,
                    avg_share_rate: acc.share_rates / denom,
                    sample_count: acc.count,
                },
            )
        })
        .collect()
}
