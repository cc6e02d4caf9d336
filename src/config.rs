//! Labelling options.
//!
//! [`LabelOptions`] carries the per-call knobs of
//! [`TopicLabeller::suggest_labels`](crate::TopicLabeller::suggest_labels).
//! Every field has a default, so options can be built with struct-update
//! syntax or loaded from a partial TOML document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// Options for a single labelling call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    /// Extra terms appended to every bootstrap query to steer
    /// disambiguation (e.g. `["insects"]`). Never scored on their own.
    pub contextual_anchors: Vec<String>,
    /// Number of labels to return. `None` returns every scored label.
    pub topn: Option<usize>,
    /// Number of topic terms per bootstrap combination. Clamped to the
    /// topic length.
    pub bootstrap_size: usize,
    /// Run the category boosting pass. One extra lookup per strong label,
    /// so this is noticeably slower.
    pub boost_with_categories: bool,
    /// Minimum score for a label to have its categories looked up.
    pub min_score: f64,
    /// Multiplier applied to accumulated category support.
    pub category_boost: f64,
    /// Maximum number of encyclopedia requests in flight. `1` is strictly
    /// sequential; results are identical either way.
    pub concurrency: usize,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            contextual_anchors: Vec::new(),
            topn: Some(3),
            bootstrap_size: 3,
            boost_with_categories: false,
            min_score: 0.1,
            category_boost: 2.0,
            concurrency: 4,
        }
    }
}

impl LabelOptions {
    /// Replace the contextual anchors.
    pub fn with_anchors<I, S>(mut self, anchors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contextual_anchors = anchors.into_iter().map(Into::into).collect();
        self
    }

    /// Parse options from TOML, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Config`] if the document cannot be parsed or the
    /// resulting options are invalid.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let options: Self = toml::from_str(raw).map_err(|e| LabelError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validates these options, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `min_score` must be finite and non-negative
    /// - `category_boost` must be finite and non-negative
    /// - `concurrency` must be greater than 0
    pub fn validate(&self) -> Result<()> {
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(LabelError::Config(
                "min_score must be a finite, non-negative number".into(),
            ));
        }
        if !self.category_boost.is_finite() || self.category_boost < 0.0 {
            return Err(LabelError::Config(
                "category_boost must be a finite, non-negative number".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(LabelError::Config(
                "concurrency must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
