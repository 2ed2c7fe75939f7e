//! The fetch -> exclude -> enrich -> rate -> rank pipeline.
//!
//! Everything the pipeline depends on is passed in: the source (and through it
//! the HTTP layer), the reference "today", and the progress callback. There is
//! no process-wide state, so tests drive it with canned responses.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::data::ArticleSource;
use crate::domain::{ArticleStat, Candidate, RankedResults, RunConfig, RunOutcome};
use crate::error::AppError;
use crate::report::{compute_rates, rank_by_rate};

/// Execute one run and return the ranked rows, or `NothingToShow` when every
/// candidate falls inside the exclusion window.
///
/// `progress` is called with `(done, total)` after each enrichment.
pub fn run(
    config: &RunConfig,
    source: &dyn ArticleSource,
    today: NaiveDate,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<RunOutcome, AppError> {
    let reference = config.reference_date(today);
    let exclude_from = config.exclusion_start(today)?;
    info!(
        action = "start",
        component = "pipeline",
        source = source.name(),
        entries = config.entries,
        reference = %reference,
        exclude_from = ?exclude_from,
        "Starting run"
    );

    // 1) Candidates and the ids to exclude.
    let candidates = source.fetch_candidates(config.entries, exclude_from)?;
    let excluded = source.fetch_excluded_ids(config.entries, exclude_from)?;
    let candidate_count = candidates.len();
    let (survivors, cut_count) = split_excluded(candidates, &excluded);
    info!(
        action = "filter",
        component = "pipeline",
        candidates = candidate_count,
        cut = cut_count,
        remaining = survivors.len(),
        "Applied exclusion window"
    );

    if survivors.is_empty() {
        return Ok(RunOutcome::NothingToShow {
            source: source.name(),
            candidate_count,
            cut_count,
        });
    }

    // 2) Enrich one article at a time.
    let total = survivors.len();
    let mut rows = Vec::with_capacity(total);
    for (i, candidate) in survivors.into_iter().enumerate() {
        let metrics = source.fetch_stats(&candidate)?;
        debug!(
            action = "enrich",
            component = "pipeline",
            id = %candidate.id,
            views = metrics.views,
            downloads = metrics.downloads,
            "Fetched stats"
        );
        rows.push(ArticleStat::from_parts(candidate, metrics));
        progress(i + 1, total);
    }

    // 3) Rates once every published date is known, then rank.
    compute_rates(&mut rows, reference);
    rank_by_rate(&mut rows);

    Ok(RunOutcome::Ranked(RankedResults {
        source: source.name(),
        candidate_count,
        cut_count,
        reference_date: reference,
        rows,
    }))
}

/// Drop candidates whose id is in `excluded`, keeping listing order.
///
/// Returns the survivors and how many candidates were dropped. Ids in
/// `excluded` that are not candidates do not count.
pub fn split_excluded(candidates: Vec<Candidate>, excluded: &HashSet<String>) -> (Vec<Candidate>, usize) {
    let before = candidates.len();
    let survivors: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| !excluded.contains(&c.id))
        .collect();
    let cut = before - survivors.len();
    (survivors, cut)
}
