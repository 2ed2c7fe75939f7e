//! Formatted terminal output.
//!
//! Output is a pure function of the ranked rows so identical inputs produce
//! byte-identical text.

use crate::domain::{ArticleStat, RankedResults};

const ID_WIDTH: usize = 24;
const TITLE_WIDTH: usize = 60;

/// Candidate and cleaned-entry counts printed above the table.
pub fn format_summary(results: &RankedResults) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} candidates from {}, {} will be cut.\n",
        results.candidate_count, results.source, results.cut_count
    ));
    out.push_str(&format!(
        "Cleaned data has {} entries (as of {}).\n",
        results.rows.len(),
        results.reference_date.format("%Y-%m-%d")
    ));
    out
}

/// Message for a run with no surviving candidates.
///
/// An empty listing is reported as such rather than as a fully cut one.
pub fn format_nothing_to_show(source: &str, candidate_count: usize, cut_count: usize) -> String {
    if candidate_count == 0 {
        return format!("No candidates returned by {source}.\n");
    }
    format!(
        "{candidate_count} candidates from {source}, {cut_count} will be cut.\n\
         Nothing to show: all {candidate_count} candidates are within the exclusion window.\n"
    )
}

/// Render rows as a plain-text table with a header row.
pub fn format_table(rows: &[ArticleStat]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<id$} {:<title$} {:>8} {:>9} {:>9} {:<10} {:>6} {:>10} {}",
            "id",
            "title",
            "views",
            "downloads",
            "citations",
            "published",
            "days",
            "dl/day",
            "url",
            id = ID_WIDTH,
            title = TITLE_WIDTH,
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<id$} {:-<title$} {:-<8} {:-<9} {:-<9} {:-<10} {:-<6} {:-<10} {:-<3}",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            id = ID_WIDTH,
            title = TITLE_WIDTH,
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        let citations = r.citations.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{:<id$} {:<title$} {:>8} {:>9} {:>9} {:<10} {:>6} {:>10.3} {}",
                truncate(&r.id, ID_WIDTH),
                truncate(&r.title, TITLE_WIDTH),
                r.views,
                r.downloads,
                citations,
                r.published_date.format("%Y-%m-%d"),
                r.days_online,
                r.downloads_per_day,
                r.url.as_deref().unwrap_or(""),
                id = ID_WIDTH,
                title = TITLE_WIDTH,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
