//! Weighted selection
//!
//! Two kinds of draws drive every tick:
//! - [`WeightTable`]: cumulative thresholds over a phase's event categories,
//!   evaluated against one uniform draw in `[0, 1)`.
//! - [`StatusTable`]: relative weights over HTTP status codes for the
//!   request-completed category.

use crate::error::SynthError;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::weighted::WeightedIndex;

/// Cumulative threshold table with a fallback category
#[derive(Debug, Clone)]
pub struct WeightTable<C> {
    thresholds: Vec<(f64, C)>,
    fallback: C,
}

impl<C: Copy> WeightTable<C> {
    /// Build a table from `(cumulative threshold, category)` pairs.
    ///
    /// Thresholds must be strictly increasing and lie in `(0, 1]`.
    pub fn new(thresholds: Vec<(f64, C)>, fallback: C) -> Result<Self, SynthError> {
        let mut prev = 0.0;
        for (i, (threshold, _)) in thresholds.iter().enumerate() {
            if !(*threshold > prev && *threshold <= 1.0) {
                return Err(SynthError::InvalidThresholds(format!(
                    "entry {} has threshold {} after {}",
                    i, threshold, prev
                )));
            }
            prev = *threshold;
        }
        Ok(Self {
            thresholds,
            fallback,
        })
    }

    /// First category whose threshold exceeds `draw`, else the fallback.
    ///
    /// A draw sitting exactly on a threshold belongs to the next category.
    pub fn select(&self, draw: f64) -> C {
        self.thresholds
            .iter()
            .find(|(threshold, _)| draw < *threshold)
            .map(|(_, category)| *category)
            .unwrap_or(self.fallback)
    }

    pub fn thresholds(&self) -> impl Iterator<Item = (f64, C)> + '_ {
        self.thresholds.iter().copied()
    }

    pub fn fallback(&self) -> C {
        self.fallback
    }
}

/// Weighted distribution over HTTP status codes
#[derive(Debug, Clone)]
pub struct StatusTable {
    codes: Vec<u16>,
    index: WeightedIndex<u32>,
}

impl StatusTable {
    pub fn new(weights: &[(u16, u32)]) -> Result<Self, SynthError> {
        let index = WeightedIndex::new(weights.iter().map(|(_, w)| *w))
            .map_err(|e| SynthError::InvalidWeights(e.to_string()))?;
        Ok(Self {
            codes: weights.iter().map(|(code, _)| *code).collect(),
            index,
        })
    }

    pub fn draw<R: Rng>(&self, rng: &mut R) -> u16 {
        self.codes[self.index.sample(rng)]
    }

    pub fn codes(&self) -> &[u16] {
        &self.codes
    }
}
