//! Additive label scores with stable first-insertion order.
//!
//! [`ScoreMap`] behaves like a counter keyed by label: merging two maps sums
//! scores per label and never drops a contribution. Keys remember the order
//! in which they were first inserted, which is the tie-break used by
//! [`ScoreMap::most_common`].

use std::collections::HashMap;
use std::ops::AddAssign;

/// Mapping from label to accumulated, non-negative score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl ScoreMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score of `label`, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.index.get(label).map(|&i| self.entries[i].1)
    }

    /// Whether `label` has been scored.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Set the score of `label`, overwriting any previous value.
    ///
    /// A new label is appended to the order; an existing one keeps its
    /// original position.
    pub fn set(&mut self, label: &str, score: f64) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 = score,
            None => self.push(label, score),
        }
    }

    /// Add `score` to `label`, inserting it with that score if absent.
    pub fn add(&mut self, label: &str, score: f64) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 += score,
            None => self.push(label, score),
        }
    }

    /// Sum every score of `other` into this map.
    ///
    /// Labels new to this map are appended in `other`'s order.
    pub fn merge(&mut self, other: &ScoreMap) {
        for (label, score) in other.iter() {
            self.add(label, score);
        }
    }

    /// Iterate `(label, score)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(label, score)| (label.as_str(), *score))
    }

    /// Labels in first-insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// The `n` highest-scored entries (all of them for `None`), descending.
    ///
    /// Equal scores keep their first-insertion order.
    pub fn most_common(&self, n: Option<usize>) -> Vec<(String, f64)> {
        let mut sorted = self.entries.clone();
        // `sort_by` is stable, so ties stay in insertion order.
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        if let Some(n) = n {
            sorted.truncate(n);
        }
        sorted
    }

    fn push(&mut self, label: &str, score: f64) {
        self.index.insert(label.to_owned(), self.entries.len());
        self.entries.push((label.to_owned(), score));
    }
}

impl AddAssign<&ScoreMap> for ScoreMap {
    fn add_assign(&mut self, rhs: &ScoreMap) {
        self.merge(rhs);
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoreMap {
    /// Collect pairs, summing the scores of repeated labels.
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, score) in iter {
            let label: String = label.into();
            map.add(&label, score);
        }
        map
    }
}
