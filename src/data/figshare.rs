//! Legacy source: figshare listing plus separate stats endpoints.
//!
//! ChemRxiv preprints live in figshare group 13668. The listing carries no
//! counts, so every article costs two more requests (views, downloads).
//! There is no "published before" filter, so exclusion needs a second listing
//! restricted with `published_since` whose ids are subtracted client-side.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::{get_json, parse_published_date, ArticleSource, HttpFetch};
use crate::domain::{ArticleMetrics, Candidate};
use crate::error::AppError;

pub const ARTICLES_URL: &str = "https://api.figshare.com/v2/articles";
pub const VIEWS_URL: &str = "https://stats.figshare.com/total/views/article";
pub const DOWNLOADS_URL: &str = "https://stats.figshare.com/total/downloads/article";
const CHEMRXIV_GROUP: &str = "13668";

pub struct FigshareSource<'a> {
    http: &'a dyn HttpFetch,
}

impl<'a> FigshareSource<'a> {
    pub fn new(http: &'a dyn HttpFetch) -> Self {
        Self { http }
    }

    fn list(&self, entries: usize, published_since: Option<NaiveDate>) -> Result<Vec<ArticleEntry>, AppError> {
        let mut query = vec![
            ("group", CHEMRXIV_GROUP.to_string()),
            ("page_size", entries.to_string()),
            ("order", "published_date".to_string()),
            ("order_direction", "desc".to_string()),
        ];
        if let Some(since) = published_since {
            query.push(("published_since", since.format("%Y-%m-%d").to_string()));
        }
        get_json(self.http, ARTICLES_URL, &query)
    }

    fn total(&self, base: &str, id: &str) -> Result<u64, AppError> {
        let url = format!("{base}/{id}");
        let body: TotalsResponse = get_json(self.http, &url, &[])?;
        body.totals
            .ok_or_else(|| AppError::missing_field(format!("Missing 'totals' in response from {url}.")))
    }
}

impl ArticleSource for FigshareSource<'_> {
    fn name(&self) -> &'static str {
        "figshare"
    }

    fn fetch_candidates(
        &self,
        entries: usize,
        _exclude_from: Option<NaiveDate>,
    ) -> Result<Vec<Candidate>, AppError> {
        let listing = self.list(entries, None)?;
        debug!(action = "list", component = "figshare", count = listing.len(), "Fetched candidates");
        listing.into_iter().map(ArticleEntry::into_candidate).collect()
    }

    fn fetch_excluded_ids(
        &self,
        entries: usize,
        exclude_from: Option<NaiveDate>,
    ) -> Result<HashSet<String>, AppError> {
        let Some(since) = exclude_from else {
            return Ok(HashSet::new());
        };
        let listing = self.list(entries, Some(since))?;
        debug!(
            action = "list",
            component = "figshare",
            published_since = %since,
            count = listing.len(),
            "Fetched exclusion window"
        );
        listing
            .into_iter()
            .map(|entry| entry.id.map(|id| id.to_string()).ok_or_else(missing_id))
            .collect()
    }

    fn fetch_stats(&self, candidate: &Candidate) -> Result<ArticleMetrics, AppError> {
        Ok(ArticleMetrics {
            views: self.total(VIEWS_URL, &candidate.id)?,
            downloads: self.total(DOWNLOADS_URL, &candidate.id)?,
            citations: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ArticleEntry {
    id: Option<u64>,
    title: Option<String>,
    published_date: Option<String>,
    url_public_html: Option<String>,
}

impl ArticleEntry {
    fn into_candidate(self) -> Result<Candidate, AppError> {
        let id = self.id.ok_or_else(missing_id)?;
        let title = self
            .title
            .ok_or_else(|| AppError::missing_field(format!("Missing 'title' for figshare article {id}.")))?;
        let raw_date = self.published_date.ok_or_else(|| {
            AppError::missing_field(format!("Missing 'published_date' for figshare article {id}."))
        })?;
        Ok(Candidate {
            id: id.to_string(),
            title,
            published_date: parse_published_date(&raw_date)?,
            url: self.url_public_html,
            metrics: None,
        })
    }
}

fn missing_id() -> AppError {
    AppError::missing_field("Missing 'id' in figshare listing entry.")
}

#[derive(Debug, Deserialize)]
struct TotalsResponse {
    totals: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::FakeHttp;
    use crate::error::ErrorKind;

    const LISTING: &str = r#"[
        {"id": 11, "title": "Older", "published_date": "2019-01-10T09:00:00Z",
         "url_public_html": "https://chemrxiv.org/articles/11"},
        {"id": 12, "title": "Oldest", "published_date": "2018-12-01T00:00:00Z"}
    ]"#;

    #[test]
    fn listing_becomes_candidates_in_source_order() {
        let http = FakeHttp::default().with(ARTICLES_URL, LISTING);
        let source = FigshareSource::new(&http);

        let candidates = source.fetch_candidates(2, None).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "11");
        assert_eq!(candidates[0].published_date, NaiveDate::from_ymd_opt(2019, 1, 10).unwrap());
        assert_eq!(candidates[0].url.as_deref(), Some("https://chemrxiv.org/articles/11"));
        assert_eq!(candidates[1].url, None);
        assert!(candidates.iter().all(|c| c.metrics.is_none()));

        let query = http.query_of(0);
        assert!(query.contains(&("group".to_string(), "13668".to_string())));
        assert!(query.contains(&("page_size".to_string(), "2".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "published_since"));
    }

    #[test]
    fn exclusion_query_carries_published_since() {
        let http = FakeHttp::default()
            .with(ARTICLES_URL, LISTING)
            .with_since(ARTICLES_URL, "2019-01-01", r#"[{"id": 11}]"#);
        let source = FigshareSource::new(&http);
        let since = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();

        let ids = source.fetch_excluded_ids(50, Some(since)).unwrap();
        assert_eq!(ids, HashSet::from(["11".to_string()]));
        assert!(http
            .query_of(0)
            .contains(&("published_since".to_string(), "2019-01-01".to_string())));
    }

    #[test]
    fn no_window_means_no_exclusion_request() {
        let http = FakeHttp::default();
        let source = FigshareSource::new(&http);
        assert!(source.fetch_excluded_ids(50, None).unwrap().is_empty());
        assert!(http.calls.borrow().is_empty());
    }

    #[test]
    fn stats_come_from_two_endpoints() {
        let http = FakeHttp::default()
            .with(&format!("{VIEWS_URL}/11"), r#"{"totals": 120}"#)
            .with(&format!("{DOWNLOADS_URL}/11"), r#"{"totals": 30}"#);
        let source = FigshareSource::new(&http);
        let candidate = Candidate {
            id: "11".to_string(),
            title: "Older".to_string(),
            published_date: NaiveDate::from_ymd_opt(2019, 1, 10).unwrap(),
            url: None,
            metrics: None,
        };

        let metrics = source.fetch_stats(&candidate).unwrap();
        assert_eq!(metrics, ArticleMetrics { views: 120, downloads: 30, citations: None });
        assert_eq!(http.calls.borrow().len(), 2);
    }

    #[test]
    fn missing_totals_is_reported() {
        let http = FakeHttp::default()
            .with(&format!("{VIEWS_URL}/11"), r#"{"views": 1}"#);
        let source = FigshareSource::new(&http);
        let err = source.total(VIEWS_URL, "11").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn missing_title_is_reported() {
        let http = FakeHttp::default()
            .with(ARTICLES_URL, r#"[{"id": 3, "published_date": "2019-01-01"}]"#);
        let err = FigshareSource::new(&http).fetch_candidates(1, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }
}
