//! Category-based score boosting.
//!
//! Labels that are themselves categories of other strong labels get their
//! score amplified in proportion to the combined score of those labels. The
//! pass costs one category lookup per strong label, so it only runs when the
//! caller asks for it.

use futures::StreamExt;
use wiki_search::Encyclopedia;

use crate::categories::CategoryLookup;
use crate::error::Result;
use crate::score::ScoreMap;

/// Default minimum score for a label to be used as a lookup source.
pub const DEFAULT_MIN_SCORE: f64 = 0.1;

/// Default multiplier applied to accumulated category support.
pub const DEFAULT_CATEGORY_BOOST: f64 = 2.0;

/// Boost labels of `counts` that are categories of other strong labels.
///
/// Only labels scoring at least `min_score` are looked up. For each such
/// label `L` with score `S`, every category `C` of `L` that is not `L`
/// itself and is already a key of `counts` accumulates `S`. Each
/// accumulated category then gains `category_boost` times its total.
///
/// No label is ever added; only existing scores change. At most
/// `concurrency` lookups run at once, and accumulation happens in label
/// order regardless.
///
/// # Errors
///
/// Propagates category lookups that fail for reasons other than an
/// unresolvable page.
pub async fn boost_with_categories<E: Encyclopedia>(
    counts: &mut ScoreMap,
    lookup: &CategoryLookup<'_, E>,
    min_score: f64,
    category_boost: f64,
    concurrency: usize,
) -> Result<()> {
    let sources: Vec<(String, f64)> = counts
        .iter()
        .filter(|&(_, score)| score >= min_score)
        .map(|(label, score)| (label.to_owned(), score))
        .collect();
    tracing::debug!(sources = sources.len(), min_score, "boosting with categories");

    let mut lookups = std::pin::pin!(
        futures::stream::iter(sources)
            .map(|(label, score)| async move {
                let categories = lookup.categories(&label).await?;
                Ok::<_, crate::error::LabelError>((label, score, categories))
            })
            .buffered(concurrency.max(1))
    );

    let mut support = ScoreMap::new();
    while let Some(outcome) = lookups.next().await {
        let (label, score, categories) = outcome?;
        for category in categories {
            if category == label || !counts.contains(&category) {
                continue;
            }
            support.add(&category, score);
        }
    }

    for (category, total) in support.most_common(None) {
        counts.add(&category, category_boost * total);
    }

    tracing::debug!(boosted = support.len(), "category boost applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use wiki_search::{PageDetail, SearchError};

    use super::*;
    use crate::cache::LabelCache;
    use crate::error::LabelError;

    /// Category graph keyed by page title; records every lookup.
    ///
    /// A title with a lag yields that many times before answering.
    struct CategoryGraph {
        pages: HashMap<String, Vec<String>>,
        lags: HashMap<String, usize>,
        looked_up: Mutex<Vec<String>>,
        finished: Mutex<Vec<String>>,
    }

    impl CategoryGraph {
        fn new(pages: &[(&str, &[&str])]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(title, cats)| {
                        ((*title).to_owned(), cats.iter().map(|c| (*c).to_owned()).collect())
                    })
                    .collect(),
                lags: HashMap::new(),
                looked_up: Mutex::new(Vec::new()),
                finished: Mutex::new(Vec::new()),
            }
        }

        fn with_lag(mut self, title: &str, yields: usize) -> Self {
            self.lags.insert(title.to_owned(), yields);
            self
        }

        fn finished(&self) -> Vec<String> {
            self.finished.lock().map(|f| f.clone()).unwrap_or_default()
        }

        fn looked_up(&self) -> Vec<String> {
            self.looked_up.lock().map(|l| l.clone()).unwrap_or_default()
        }
    }

    impl Encyclopedia for CategoryGraph {
        async fn search(&self, _query: &str) -> std::result::Result<Vec<String>, SearchError> {
            Ok(Vec::new())
        }

        async fn page_detail(&self, title: &str) -> std::result::Result<PageDetail, SearchError> {
            if let Ok(mut looked_up) = self.looked_up.lock() {
                looked_up.push(title.to_owned());
            }
            for _ in 0..self.lags.get(title).copied().unwrap_or(0) {
                tokio::task::yield_now().await;
            }
            if let Ok(mut finished) = self.finished.lock() {
                finished.push(title.to_owned());
            }
            if title == "Unreachable" {
                return Err(SearchError::Http("connection reset".into()));
            }
            self.pages
                .get(title)
                .map(|cats| PageDetail::new(title, cats.clone()))
                .ok_or_else(|| SearchError::PageNotFound(title.to_owned()))
        }
    }

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-12)
    }

    async fn run(counts: &mut ScoreMap, graph: &CategoryGraph) -> Result<()> {
        let cache = LabelCache::new();
        let lookup = CategoryLookup::new(graph, &cache);
        boost_with_categories(
            counts,
            &lookup,
            DEFAULT_MIN_SCORE,
            DEFAULT_CATEGORY_BOOST,
            4,
        )
        .await
    }

    #[tokio::test]
    async fn category_that_is_a_label_is_boosted() {
        let graph = CategoryGraph::new(&[
            ("Hercules beetle", &["Beetle", "Insects of Mexico"]),
            ("Stag beetle", &["Beetle"]),
            ("Beetle", &["Insects"]),
        ]);
        let mut counts: ScoreMap = [("Hercules beetle", 1.0), ("Stag beetle", 0.5), ("Beetle", 0.25)]
            .into_iter()
            .collect();

        run(&mut counts, &graph).await.expect("boost");

        // Beetle gains 2 * (1.0 + 0.5).
        assert!(approx(counts.get("Beetle"), 3.25));
        assert!(approx(counts.get("Hercules beetle"), 1.0));
        assert!(approx(counts.get("Stag beetle"), 0.5));
    }

    #[tokio::test]
    async fn never_introduces_new_labels() {
        let graph = CategoryGraph::new(&[("X", &["Brand new", "Also new"])]);
        let mut counts: ScoreMap = [("X", 1.0)].into_iter().collect();

        run(&mut counts, &graph).await.expect("boost");

        assert_eq!(counts.labels().collect::<Vec<_>>(), vec!["X"]);
        assert!(approx(counts.get("X"), 1.0));
    }

    #[tokio::test]
    async fn self_categories_are_ignored() {
        let graph = CategoryGraph::new(&[("Beetle", &["Beetle"])]);
        let mut counts: ScoreMap = [("Beetle", 1.0)].into_iter().collect();

        run(&mut counts, &graph).await.expect("boost");

        assert!(approx(counts.get("Beetle"), 1.0));
    }

    #[tokio::test]
    async fn labels_below_threshold_are_never_looked_up() {
        let graph = CategoryGraph::new(&[("X", &["Y"]), ("Y", &["X"])]);
        let mut counts: ScoreMap = [("X", 1.0), ("Y", 0.05)].into_iter().collect();

        run(&mut counts, &graph).await.expect("boost");

        assert_eq!(graph.looked_up(), vec!["X"]);
        assert!(approx(counts.get("Y"), 0.05 + 2.0));
        assert!(approx(counts.get("X"), 1.0));
    }

    #[tokio::test]
    async fn no_op_when_everything_is_below_threshold() {
        let graph = CategoryGraph::new(&[("A", &["B"]), ("B", &["A"])]);
        let mut counts: ScoreMap = [("A", 0.05), ("B", 0.0625)].into_iter().collect();
        let before = counts.clone();

        run(&mut counts, &graph).await.expect("boost");

        assert_eq!(counts, before);
        assert!(graph.looked_up().is_empty());
    }

    #[tokio::test]
    async fn threshold_is_inclusive() {
        let graph = CategoryGraph::new(&[("A", &["B"])]);
        let mut counts: ScoreMap = [("A", 0.1), ("B", 1.0)].into_iter().collect();

        run(&mut counts, &graph).await.expect("boost");

        assert!(approx(counts.get("B"), 1.0 + 2.0 * 0.1));
    }

    #[tokio::test]
    async fn unresolvable_pages_contribute_nothing() {
        let graph = CategoryGraph::new(&[("A", &["B"])]);
        let mut counts: ScoreMap = [("Missing", 1.0), ("A", 0.5), ("B", 0.5)].into_iter().collect();

        run(&mut counts, &graph).await.expect("boost");

        assert!(approx(counts.get("B"), 0.5 + 2.0 * 0.5));
        assert!(approx(counts.get("Missing"), 1.0));
    }

    #[tokio::test]
    async fn transport_failure_aborts_boosting() {
        let graph = CategoryGraph::new(&[]);
        let mut counts: ScoreMap = [("Unreachable", 1.0)].into_iter().collect();

        let err = run(&mut counts, &graph).await.unwrap_err();
        assert!(matches!(err, LabelError::CategoryLookup { .. }));
    }

    #[tokio::test]
    async fn custom_boost_factor_is_applied() {
        let graph = CategoryGraph::new(&[("A", &["B"])]);
        let mut counts: ScoreMap = [("A", 1.0), ("B", 0.25)].into_iter().collect();
        let cache = LabelCache::new();
        let lookup = CategoryLookup::new(&graph, &cache);

        boost_with_categories(&mut counts, &lookup, 0.5, 0.5, 1)
            .await
            .expect("boost");

        // B (0.25) is below 0.5 so is not a source; it gains 0.5 * 1.0.
        assert!(approx(counts.get("B"), 0.75));
        assert_eq!(graph.looked_up(), vec!["A"]);
    }

    #[tokio::test]
    async fn support_accumulates_in_label_order_when_lookups_finish_out_of_order() {
        // 1e16 + 1 rounds back to 1e16, so the summation order of the
        // support for "Parent" is visible in the result.
        let graph = CategoryGraph::new(&[
            ("Big", &["Parent"]),
            ("Small", &["Parent"]),
            ("Smaller", &["Parent"]),
        ])
        .with_lag("Big", 3)
        .with_lag("Small", 2)
        .with_lag("Smaller", 1);
        let initial: ScoreMap = [
            ("Big", 1e16),
            ("Small", 1.0),
            ("Smaller", 1.0),
            ("Parent", 0.0),
        ]
        .into_iter()
        .collect();

        let mut sequential = initial.clone();
        let sequential_cache = LabelCache::new();
        let lookup = CategoryLookup::new(&graph, &sequential_cache);
        boost_with_categories(
            &mut sequential,
            &lookup,
            DEFAULT_MIN_SCORE,
            DEFAULT_CATEGORY_BOOST,
            1,
        )
        .await
        .expect("sequential");

        let mut concurrent = initial.clone();
        let concurrent_cache = LabelCache::new();
        let lookup = CategoryLookup::new(&graph, &concurrent_cache);
        boost_with_categories(
            &mut concurrent,
            &lookup,
            DEFAULT_MIN_SCORE,
            DEFAULT_CATEGORY_BOOST,
            3,
        )
        .await
        .expect("concurrent");

        // The first source completed last in the concurrent run.
        assert_eq!(graph.finished().last().map(String::as_str), Some("Big"));

        assert_eq!(concurrent.get("Parent"), Some(2e16));
        assert_eq!(concurrent, sequential);
        assert_eq!(
            concurrent.labels().collect::<Vec<_>>(),
            vec!["Big", "Small", "Smaller", "Parent"]
        );
    }
}
