//! Shared domain types.
//!
//! Everything here lives for one run only; nothing is persisted.

use chrono::{Days, NaiveDate};
use clap::ValueEnum;

use crate::error::AppError;

/// Which generation of the preprint statistics API to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiVersion {
    /// Figshare listing plus one views and one downloads call per article.
    Legacy,
    /// Cambridge Open Engage listing with metrics embedded in each item.
    Engage,
}

impl ApiVersion {
    pub fn limits(self) -> EntryLimits {
        match self {
            ApiVersion::Legacy => EntryLimits { max: 1000, default: 200 },
            ApiVersion::Engage => EntryLimits { max: 50, default: 25 },
        }
    }
}

/// Page-size bounds for a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLimits {
    pub max: usize,
    pub default: usize,
}

impl EntryLimits {
    /// Resolve a requested entry count.
    ///
    /// Anything outside `1..=max` falls back to `default` rather than being
    /// truncated to `max`.
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(n) if self.accepts(n) => n,
            _ => self.default,
        }
    }

    pub fn accepts(&self, requested: usize) -> bool {
        (1..=self.max).contains(&requested)
    }
}

/// Plain run configuration, built from CLI flags before the pipeline starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api: ApiVersion,
    /// Listing page size, already resolved against the API's limits.
    pub entries: usize,
    /// Trailing exclusion window in days. `0` disables exclusion.
    pub days: u32,
    /// Reference end-date. `None` means "today" as supplied to the pipeline.
    pub finish: Option<NaiveDate>,
    /// Whether exclusion filtering is enabled at all.
    pub cut: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn reference_date(&self, today: NaiveDate) -> NaiveDate {
        self.finish.unwrap_or(today)
    }

    /// First day of the exclusion window, or `None` when nothing is excluded.
    ///
    /// Fails when the window reaches before the earliest representable date.
    pub fn exclusion_start(&self, today: NaiveDate) -> Result<Option<NaiveDate>, AppError> {
        if !self.cut || self.days == 0 {
            return Ok(None);
        }
        let reference = self.reference_date(today);
        reference
            .checked_sub_days(Days::new(u64::from(self.days)))
            .map(Some)
            .ok_or_else(|| {
                AppError::invalid_date(format!(
                    "--days {} reaches before the earliest representable date (reference {reference}).",
                    self.days
                ))
            })
    }
}

/// View/download/citation counts at fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArticleMetrics {
    pub views: u64,
    pub downloads: u64,
    /// Only the engage API reports citations.
    pub citations: Option<u64>,
}

/// An article returned by a listing query, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub published_date: NaiveDate,
    pub url: Option<String>,
    /// Present when the listing payload already carries the counts.
    pub metrics: Option<ArticleMetrics>,
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleStat {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub downloads: u64,
    pub citations: Option<u64>,
    pub published_date: NaiveDate,
    pub days_online: i64,
    pub downloads_per_day: f64,
    pub url: Option<String>,
}

impl ArticleStat {
    /// Combine a candidate with its counts. Derived fields start at zero and
    /// are filled in by `report::compute_rates`.
    pub fn from_parts(candidate: Candidate, metrics: ArticleMetrics) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title,
            views: metrics.views,
            downloads: metrics.downloads,
            citations: metrics.citations,
            published_date: candidate.published_date,
            days_online: 0,
            downloads_per_day: 0.0,
            url: candidate.url,
        }
    }
}

/// Output of a run that produced at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResults {
    pub source: &'static str,
    pub candidate_count: usize,
    pub cut_count: usize,
    pub reference_date: NaiveDate,
    /// Sorted ascending by `downloads_per_day`.
    pub rows: Vec<ArticleStat>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Ranked(RankedResults),
    /// Every candidate fell inside the exclusion window.
    NothingToShow {
        source: &'static str,
        candidate_count: usize,
        cut_count: usize,
    },
}
