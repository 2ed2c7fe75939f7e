//! Preprint statistics sources.
//!
//! Two API generations are supported behind one capability interface,
//! `ArticleSource`. Which one is used is decided once at startup from
//! `RunConfig::api`; nothing downstream inspects payload shapes.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::{ApiVersion, ArticleMetrics, Candidate};
use crate::error::AppError;

pub mod engage;
pub mod figshare;
pub mod http;

pub use engage::EngageSource;
pub use figshare::FigshareSource;
pub use http::{HttpFetch, ReqwestFetch};

/// What the pipeline needs from a statistics API.
pub trait ArticleSource {
    fn name(&self) -> &'static str;

    /// Most-recent-first listing of up to `entries` candidates.
    ///
    /// Sources with a native date filter drop everything published on or after
    /// `exclude_from` here.
    fn fetch_candidates(
        &self,
        entries: usize,
        exclude_from: Option<NaiveDate>,
    ) -> Result<Vec<Candidate>, AppError>;

    /// Ids of articles published on or after `exclude_from`.
    ///
    /// Returns an empty set when exclusion is disabled or already applied by
    /// `fetch_candidates`.
    fn fetch_excluded_ids(
        &self,
        entries: usize,
        exclude_from: Option<NaiveDate>,
    ) -> Result<HashSet<String>, AppError>;

    /// Views, downloads and (when available) citations for one candidate.
    fn fetch_stats(&self, candidate: &Candidate) -> Result<ArticleMetrics, AppError>;
}

/// Build the source implementation for an API generation.
pub fn source_for<'a>(api: ApiVersion, http: &'a dyn HttpFetch) -> Box<dyn ArticleSource + 'a> {
    match api {
        ApiVersion::Legacy => Box::new(FigshareSource::new(http)),
        ApiVersion::Engage => Box::new(EngageSource::new(http)),
    }
}

/// GET `url` and decode the body as `T`.
pub(crate) fn get_json<T: DeserializeOwned>(
    http: &dyn HttpFetch,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, AppError> {
    let body = http.get_text(url, query)?;
    serde_json::from_str(&body)
        .map_err(|e| AppError::malformed_json(format!("Failed to parse response from {url}: {e}")))
}

/// Parse the date part of a source timestamp such as `2019-11-29T08:37:03Z`.
pub(crate) fn parse_published_date(raw: &str) -> Result<NaiveDate, AppError> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| AppError::invalid_date(format!("Invalid published date '{raw}': {e}")))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned HTTP responses keyed by URL and, when present, the
    //! `published_since` parameter.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::HttpFetch;
    use crate::error::AppError;

    #[derive(Default)]
    pub struct FakeHttp {
        bodies: HashMap<String, String>,
        pub calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeHttp {
        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }

        /// Response for `url` queried with `published_since=<since>`.
        pub fn with_since(self, url: &str, since: &str, body: &str) -> Self {
            self.with(&format!("{url}?published_since={since}"), body)
        }

        pub fn query_of(&self, call: usize) -> Vec<(String, String)> {
            self.calls.borrow()[call].1.clone()
        }
    }

    impl HttpFetch for FakeHttp {
        fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, AppError> {
            self.calls.borrow_mut().push((
                url.to_string(),
                query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            ));
            let key = match query.iter().find(|(k, _)| *k == "published_since") {
                Some((_, since)) => format!("{url}?published_since={since}"),
                None => url.to_string(),
            };
            self.bodies
                .get(&key)
                .cloned()
                .ok_or_else(|| AppError::network(format!("no fixture for {key}")))
        }
    }
}
