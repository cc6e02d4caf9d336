//! Sum ranked search scores over all bootstrap queries.
//!
//! Queries may be in flight concurrently, but results are folded in
//! bootstrap-enumeration order, so the first-insertion order of labels (and
//! with it the tie-break in label selection) is the same as a sequential run.

use futures::StreamExt;
use wiki_search::Encyclopedia;

use crate::bootstrap::bootstraps;
use crate::error::Result;
use crate::ranking::RankedSearch;
use crate::score::ScoreMap;

/// Aggregate rank scores for every `n`-term bootstrap of `topic`.
///
/// At most `concurrency` searches run at once (values below 1 are treated
/// as 1).
///
/// # Errors
///
/// Returns the first failing search in enumeration order; the remaining
/// results are discarded.
pub async fn aggregate<E, T, A>(
    search: &RankedSearch<'_, E>,
    topic: &[T],
    anchors: &[A],
    n: usize,
    concurrency: usize,
) -> Result<ScoreMap>
where
    E: Encyclopedia,
    T: AsRef<str>,
    A: AsRef<str>,
{
    let queries = bootstraps(topic, anchors, n);
    tracing::debug!(queries = queries.len(), n, "aggregating bootstraps");

    let mut results = std::pin::pin!(
        futures::stream::iter(queries)
            .map(|query| async move { search.rank(&query).await })
            .buffered(concurrency.max(1))
    );

    let mut counts = ScoreMap::new();
    while let Some(scores) = results.next().await {
        counts += &scores?;
    }

    tracing::debug!(labels = counts.len(), "bootstrap aggregation complete");
    Ok(counts)
}
