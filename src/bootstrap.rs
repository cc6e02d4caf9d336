//! Bootstrap query generation.
//!
//! Every `n`-term combination of the topic becomes one query, with the
//! contextual anchors appended. Bootstrapping over combinations dampens the
//! effect of a spurious label produced by any single combination.

/// Lazy sequence of bootstrap queries.
///
/// Combinations are enumerated in lexicographic order of term positions,
/// and terms keep their original relative order within each query.
#[derive(Debug, Clone)]
pub struct Bootstraps {
    terms: Vec<String>,
    anchors: Vec<String>,
    indices: Vec<usize>,
    remaining: usize,
}

/// Build the bootstrap queries for `topic`.
///
/// `n` is clamped to `topic.len()`. With `n == 0` (which includes an empty
/// topic) the single empty combination yields a query made of the anchors
/// alone; if there are no anchors either, no query is produced.
///
/// Terms and anchors are used exactly as given. An empty-string term is
/// still a term, so `bootstraps(&[""], &[], 1)` yields one empty query;
/// filter blank terms beforehand if the encyclopedia rejects empty searches.
///
/// # Examples
///
/// ```
/// let queries: Vec<String> =
///     topic_labels::bootstrap::bootstraps(&["a", "b", "c"], &["x"], 2).collect();
/// assert_eq!(queries, vec!["a b x", "a c x", "b c x"]);
/// ```
pub fn bootstraps<T, A>(topic: &[T], anchors: &[A], n: usize) -> Bootstraps
where
    T: AsRef<str>,
    A: AsRef<str>,
{
    let terms: Vec<String> = topic.iter().map(|t| t.as_ref().to_owned()).collect();
    let anchors: Vec<String> = anchors.iter().map(|a| a.as_ref().to_owned()).collect();
    let n = n.min(terms.len());

    let remaining = if n == 0 && anchors.is_empty() {
        0
    } else {
        binomial(terms.len(), n)
    };

    Bootstraps {
        terms,
        anchors,
        indices: (0..n).collect(),
        remaining,
    }
}

impl Bootstraps {
    fn current_query(&self) -> String {
        let parts = self
            .indices
            .iter()
            .map(|&i| self.terms[i].as_str())
            .chain(self.anchors.iter().map(String::as_str));

        let mut query = String::new();
        for (i, part) in parts.enumerate() {
            if i > 0 {
                query.push(' ');
            }
            query.push_str(part);
        }
        query
    }

    /// Move `indices` to the next combination in lexicographic order.
    fn advance(&mut self) {
        let k = self.indices.len();
        let len = self.terms.len();
        let Some(pivot) = (0..k).rev().find(|&i| self.indices[i] != i + len - k) else {
            return;
        };
        self.indices[pivot] += 1;
        for j in pivot + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl Iterator for Bootstraps {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        let query = self.current_query();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(query)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Bootstraps {}

/// `C(n, k)`, saturating at `usize::MAX`.
fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
        if result > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    result as usize
}
