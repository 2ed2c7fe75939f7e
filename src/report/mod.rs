//! Reporting utilities: per-day rates, ranking, and formatted terminal output.

use chrono::NaiveDate;

use crate::domain::ArticleStat;

pub mod format;

pub use format::{format_nothing_to_show, format_summary, format_table};

/// Whole days between `published` and `reference`. Negative when the article
/// is dated after the reference date.
pub fn days_online(published: NaiveDate, reference: NaiveDate) -> i64 {
    (reference - published).num_days()
}

/// Downloads per day online; `0.0` when the article has not been online for a
/// full day.
pub fn downloads_per_day(downloads: u64, days_online: i64) -> f64 {
    if days_online <= 0 {
        return 0.0;
    }
    downloads as f64 / days_online as f64
}

/// Fill in `days_online` and `downloads_per_day` for every row.
pub fn compute_rates(rows: &mut [ArticleStat], reference: NaiveDate) {
    for row in rows {
        row.days_online = days_online(row.published_date, reference);
        row.downloads_per_day = downloads_per_day(row.downloads, row.days_online);
    }
}

/// Sort ascending by `downloads_per_day`, so the standouts print last.
///
/// The sort is stable: rows with equal rates keep their listing order.
pub fn rank_by_rate(rows: &mut [ArticleStat]) {
    rows.sort_by(|a, b| a.downloads_per_day.total_cmp(&b.downloads_per_day));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(id: &str, downloads: u64, published: NaiveDate) -> ArticleStat {
        ArticleStat {
            id: id.to_string(),
            title: format!("Article {id}"),
            views: 0,
            downloads,
            citations: None,
            published_date: published,
            days_online: 0,
            downloads_per_day: 0.0,
            url: None,
        }
    }

    #[test]
    fn days_online_counts_whole_days() {
        assert_eq!(days_online(day(2024, 1, 1), day(2024, 1, 11)), 10);
        assert_eq!(days_online(day(2023, 12, 31), day(2024, 3, 1)), 61);
        assert_eq!(days_online(day(2024, 1, 2), day(2024, 1, 1)), -1);
    }

    #[test]
    fn non_positive_days_give_zero_rate() {
        assert_eq!(downloads_per_day(100, 0), 0.0);
        assert_eq!(downloads_per_day(100, -3), 0.0);
        assert_eq!(downloads_per_day(0, 7), 0.0);
        assert!((downloads_per_day(10, 4) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn published_today_has_zero_rate() {
        let today = day(2024, 6, 1);
        let mut rows = vec![row("1", 40, today)];
        compute_rates(&mut rows, today);
        assert_eq!(rows[0].days_online, 0);
        assert_eq!(rows[0].downloads_per_day, 0.0);
    }

    #[test]
    fn equal_rates_keep_input_order() {
        let reference = day(2024, 1, 11);
        let mut rows = vec![
            row("a", 10, day(2024, 1, 6)),
            row("b", 20, day(2024, 1, 1)),
            row("c", 5, day(2024, 1, 10)),
        ];
        compute_rates(&mut rows, reference);
        let rates: Vec<f64> = rows.iter().map(|r| r.downloads_per_day).collect();
        assert_eq!(rates, vec![2.0, 2.0, 5.0]);

        rows.reverse();
        rank_by_rate(&mut rows);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn ranking_is_non_decreasing() {
        let reference = day(2024, 6, 1);
        let mut rows: Vec<ArticleStat> = (0..20u64)
            .map(|i| row(&i.to_string(), (i * 37) % 11, day(2024, 1, 1 + (i as u32 % 28))))
            .collect();
        compute_rates(&mut rows, reference);
        rank_by_rate(&mut rows);
        assert!(rows.windows(2).all(|w| w[0].downloads_per_day <= w[1].downloads_per_day));
        assert!(rows.iter().all(|r| r.downloads_per_day >= 0.0));
    }
}
