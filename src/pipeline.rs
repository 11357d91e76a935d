//! One pass of fetch → normalize → score → rank.
//!
//! Nothing here recovers from errors; the first failure is returned to
//! `main`, which reports it.

use crate::error::Result;
use crate::models::ArticleRecord;
use crate::normalize::normalize;
use crate::query::QueryFilter;
use crate::rank::rank;
use crate::score::{score_articles, Keyword};
use crate::sources::ArticleSource;
use crate::utils::score_sample;
use tracing::{debug, info, instrument};

const SCORE_SAMPLE_SIZE: usize = 5;

/// Run the whole pipeline against `source`.
///
/// An empty search result short-circuits to an empty vector.
///
/// # Arguments
///
/// * `source` - Where articles come from; one call per run
/// * `filter` - The validated query; its keyword also drives scoring
///
/// # Returns
///
/// Ranked records, or the first error from the source.
#[instrument(level = "info", skip_all, fields(keyword = %filter.keyword))]
pub async fn run<S: ArticleSource>(source: &S, filter: &QueryFilter) -> Result<Vec<ArticleRecord>> {
    let table = source.fetch_articles(filter).await?;
    info!(columns = ?table.column_names(), rows = table.len(), "Fetched article table");

    if table.is_empty() {
        info!("No articles returned; nothing to rank");
        return Ok(Vec::new());
    }

    let table = normalize(table);
    let mut records = table.into_records();

    let keyword = Keyword::new(&filter.keyword);
    debug!(terms = ?keyword.terms(), "Scoring against keyword");
    score_articles(&mut records, &keyword);
    info!(
        sample = %score_sample(records.iter().map(|r| r.relevance_score), SCORE_SAMPLE_SIZE),
        "Relevance score sample"
    );

    rank(&mut records);
    info!(count = records.len(), "Ranked articles");
    Ok(records)
}
