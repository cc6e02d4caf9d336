//! Final label selection.

use crate::score::ScoreMap;

/// The `topn` best labels of `counts` (all of them for `None`), best first.
///
/// Equal scores keep the order in which the labels were first scored.
pub fn select_labels(counts: &ScoreMap, topn: Option<usize>) -> Vec<String> {
    counts
        .most_common(topn)
        .into_iter()
        .map(|(label, _)| label)
        .collect()
}
