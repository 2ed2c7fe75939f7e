//! Newest source: ChemRxiv on Cambridge Open Engage.
//!
//! Listing items embed a `metrics` array, so enrichment needs no further
//! requests, and `searchDateTo` lets the server drop young articles.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::{get_json, parse_published_date, ArticleSource, HttpFetch};
use crate::domain::{ArticleMetrics, Candidate};
use crate::error::AppError;

pub const ITEMS_URL: &str = "https://chemrxiv.org/engage/chemrxiv/public-api/v1/items";
const ARTICLE_URL: &str = "https://chemrxiv.org/engage/chemrxiv/article-details";

const METRIC_VIEWS: &str = "Abstract Views";
const METRIC_DOWNLOADS: &str = "Content Downloads";
const METRIC_CITATIONS: &str = "Citations";

pub struct EngageSource<'a> {
    http: &'a dyn HttpFetch,
}

impl<'a> EngageSource<'a> {
    pub fn new(http: &'a dyn HttpFetch) -> Self {
        Self { http }
    }
}

impl ArticleSource for EngageSource<'_> {
    fn name(&self) -> &'static str {
        "engage"
    }

    fn fetch_candidates(
        &self,
        entries: usize,
        exclude_from: Option<NaiveDate>,
    ) -> Result<Vec<Candidate>, AppError> {
        let mut query = vec![
            ("limit", entries.to_string()),
            ("sort", "PUBLISHED_DATE_DESC".to_string()),
        ];
        if let Some(before) = exclude_from {
            query.push(("searchDateTo", format!("{}T00:00:00.000Z", before.format("%Y-%m-%d"))));
        }

        let body: ItemsResponse = get_json(self.http, ITEMS_URL, &query)?;
        let hits = body
            .item_hits
            .ok_or_else(|| AppError::missing_field("Missing 'itemHits' in engage response."))?;
        debug!(
            action = "list",
            component = "engage",
            count = hits.len(),
            total = body.total_count.unwrap_or_default(),
            "Fetched candidates"
        );

        hits.into_iter().map(|hit| hit.item.into_candidate()).collect()
    }

    fn fetch_excluded_ids(
        &self,
        _entries: usize,
        _exclude_from: Option<NaiveDate>,
    ) -> Result<HashSet<String>, AppError> {
        // `fetch_candidates` already filtered server-side.
        Ok(HashSet::new())
    }

    fn fetch_stats(&self, candidate: &Candidate) -> Result<ArticleMetrics, AppError> {
        candidate.metrics.ok_or_else(|| {
            AppError::missing_field(format!("Missing 'metrics' for engage item {}.", candidate.id))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemsResponse {
    total_count: Option<u64>,
    item_hits: Option<Vec<ItemHit>>,
}

#[derive(Debug, Deserialize)]
struct ItemHit {
    item: Item,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    id: Option<String>,
    title: Option<String>,
    published_date: Option<String>,
    metrics: Option<Vec<Metric>>,
}

#[derive(Debug, Deserialize)]
struct Metric {
    description: String,
    value: u64,
}

impl Item {
    fn into_candidate(self) -> Result<Candidate, AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::missing_field("Missing 'id' in engage item."))?;
        let title = self
            .title
            .ok_or_else(|| AppError::missing_field(format!("Missing 'title' for engage item {id}.")))?;
        let raw_date = self.published_date.ok_or_else(|| {
            AppError::missing_field(format!("Missing 'publishedDate' for engage item {id}."))
        })?;
        let metrics = self.metrics.as_deref().map(metrics_from).transpose()?;

        Ok(Candidate {
            url: Some(format!("{ARTICLE_URL}/{id}")),
            published_date: parse_published_date(&raw_date)?,
            id,
            title,
            metrics,
        })
    }
}

fn metrics_from(metrics: &[Metric]) -> Result<ArticleMetrics, AppError> {
    let find = |name: &str| metrics.iter().find(|m| m.description == name).map(|m| m.value);
    Ok(ArticleMetrics {
        views: find(METRIC_VIEWS)
            .ok_or_else(|| AppError::missing_field(format!("Missing '{METRIC_VIEWS}' metric.")))?,
        downloads: find(METRIC_DOWNLOADS)
            .ok_or_else(|| AppError::missing_field(format!("Missing '{METRIC_DOWNLOADS}' metric.")))?,
        citations: Some(find(METRIC_CITATIONS).unwrap_or(0)),
    })
}
