//! Self-contained HTML viral-alert report.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use feedpulse_analytics::ViralFlag;

/// Render the viral-alert page.
///
/// One card per flag, ranked as given (callers pass the detector's
/// already-sorted output), each with the triggered-signal badges and a
/// you-vs-your-average comparison. Zero flags renders an explicit
/// empty state; "no viral articles today" is the expected steady
/// state, not an error.
#[must_use]
pub fn render_viral_html(flags: &[ViralFlag], generated_at: DateTime<Utc>) -> String {
    let mut cards = String::new();
    for (idx, flag) in flags.iter().enumerate() {
        write_card(&mut cards, idx + 1, flag);
    }

    let empty_state = if flags.is_empty() {
        "<div class=\"empty\">\n\
         <h2>No viral articles</h2>\n\
         <p>Nothing in the recent window crossed its account baseline.</p>\n\
         </div>\n"
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Viral alert - feedpulse</title>\n\
         <style>\n{css}</style>\n\
         </head>\n\
         <body>\n\
         <header>\n\
         <h1>Viral alert</h1>\n\
         <p>Detected at {generated}</p>\n\
         <p class=\"count\">{count} flagged article(s)</p>\n\
         </header>\n\
         <section class=\"criteria\">\n\
         <h2>Criteria</h2>\n\
         <ul>\n\
         <li>reads at 3x the account average, or</li>\n\
         <li>looking-rate at 2x the account average, or</li>\n\
         <li>share-rate at 2x the account average</li>\n\
         </ul>\n\
         <p>Candidates: articles with fresh data from the last few days.</p>\n\
         </section>\n\
         {cards}{empty_state}</body>\n\
         </html>\n",
        css = CSS,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        count = flags.len(),
    )
}

const CSS: &str = "body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; color: #1e293b; }\n\
header { border-bottom: 2px solid #667eea; padding-bottom: 1rem; }\n\
.count { font-weight: 700; color: #4338ca; }\n\
.criteria { background: #eef2ff; border-radius: 8px; padding: 1rem; margin: 1rem 0; }\n\
.card { border-left: 4px solid #667eea; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.12); padding: 1rem; margin: 1rem 0; }\n\
.badge { display: inline-block; background: #667eea; color: #fff; border-radius: 999px; padding: .2rem .7rem; margin-right: .3rem; font-size: .85rem; }\n\
.meta { color: #64748b; font-size: .9rem; }\n\
.grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: .5rem; margin-top: .8rem; }\n\
.grid p { margin: .1rem 0; }\n\
.vs { color: #94a3b8; font-size: .8rem; }\n\
.empty { text-align: center; padding: 3rem; color: #475569; }\n";

fn write_card(out: &mut String, rank: usize, flag: &ViralFlag) {
    let snapshot = &flag.snapshot;
    let baseline = &flag.baseline;

    let badges: String = flag
        .triggered_tags
        .iter()
        .map(|tag| format!("<span class=\"badge\">{}</span>", escape(tag)))
        .collect();

    let looking_rate = snapshot.looking_rate() * 100.0;
    let share_rate = snapshot.share_rate() * 100.0;

    // write! to a String cannot fail.
    let _ = write!(
        out,
        "<article class=\"card\">\n\
         <p class=\"meta\">#{rank} · {account} · {category}</p>\n\
         <h3><a href=\"{url}\">{title}</a></h3>\n\
         <p>{badges}</p>\n\
         <div class=\"grid\">\n\
         <div><p>Reads</p><p><strong>{read}</strong></p><p class=\"vs\">avg {avg_read:.0}</p></div>\n\
         <div><p>Looking rate</p><p><strong>{looking_rate:.2}%</strong></p><p class=\"vs\">avg {avg_looking:.2}%</p></div>\n\
         <div><p>Share rate</p><p><strong>{share_rate:.2}%</strong></p><p class=\"vs\">avg {avg_share:.2}%</p></div>\n\
         <div><p>Data date</p><p><strong>{date}</strong></p><p class=\"vs\">likes {likes} · comments {comments}</p></div>\n\
         </div>\n\
         </article>\n",
        account = escape(&flag.article.account_id),
        category = escape(&flag.article.category),
        url = escape(&flag.article.url),
        title = escape(&flag.article.title),
        read = snapshot.read,
        avg_read = baseline.avg_read,
        avg_looking = baseline.avg_looking_rate * 100.0,
        avg_share = baseline.avg_share_rate * 100.0,
        date = snapshot.fetched_date,
        likes = snapshot.like,
        comments = snapshot.comment,
    );
}

/// Minimal HTML text escaping for interpolated article fields.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
