//! Centrality results keyed by the caller's vertex labels.

use crate::graph::LabelMap;
use crate::topk::{normalize_max, top_k};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Dense centrality vector plus the label map needed to report it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedScores")
)]
pub struct CentralityScores {
    values: Vec<f64>,
    labels: LabelMap,
}

/// Deserialized form, validated by [`CentralityScores::try_new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedScores {
    values: Vec<f64>,
    labels: LabelMap,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedScores> for CentralityScores {
    type Error = Error;

    fn try_from(raw: UncheckedScores) -> Result<Self> {
        Self::try_new(raw.values, raw.labels)
    }
}

impl CentralityScores {
    /// Panics if `values.len() != labels.len()`.
    pub fn new(values: Vec<f64>, labels: LabelMap) -> Self {
        assert_eq!(values.len(), labels.len(), "one value per label");
        Self { values, labels }
    }

    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `values.len() != labels.len()`.
    pub fn try_new(values: Vec<f64>, labels: LabelMap) -> Result<Self> {
        if values.len() != labels.len() {
            return Err(Error::InvalidParameter(format!(
                "{} values for {} labels",
                values.len(),
                labels.len()
            )));
        }
        Ok(Self { values, labels })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Centrality of the vertex with caller label `label`.
    pub fn get(&self, label: i64) -> Option<f64> {
        self.labels.index_of(label).map(|i| self.values[i])
    }

    /// Values indexed by dense vertex index.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// `(label, value)` in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (self.labels.label_of(i), v))
    }

    pub fn to_map(&self) -> BTreeMap<i64, f64> {
        self.iter().collect()
    }

    /// Every value divided by the maximum. If the maximum is not positive (no vertex lies
    /// strictly between any pair), the values are all zero and are returned unchanged.
    pub fn normalized(&self) -> Self {
        let mut values = self.values.clone();
        normalize_max(&mut values);
        Self { values, labels: self.labels.clone() }
    }

    /// The `k` highest-scoring vertices as `(label, value)`, best first. Zero scores are
    /// never ranked.
    pub fn top_k(&self, k: usize) -> Vec<(i64, f64)> {
        top_k(&self.values, k)
            .into_iter()
            .map(|(i, v)| (self.labels.label_of(i), v))
            .collect()
    }
}
