//! Configuration for the ranker.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

/// Tuning parameters for [`Ranker`](crate::Ranker).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankConfig {
    /// Maximum number of ranked diseases returned to the caller.
    pub top_k: usize,
    /// Number of top-ranked diseases consulted for next-symptom selection.
    pub shortlist: usize,
    /// Scale factor for the penalty applied when a disease expects a symptom
    /// the caller explicitly denied. 0.0 disables the penalty.
    pub absent_penalty: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self { top_k: 5, shortlist: 5, absent_penalty: 0.5 }
    }
}

impl RankConfig {
    /// Create a new builder for constructing a [`RankConfig`].
    pub fn builder() -> RankConfigBuilder {
        RankConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RankConfig`].
#[derive(Debug, Clone, Default)]
pub struct RankConfigBuilder {
    config: RankConfig,
}

impl RankConfigBuilder {
    /// Set the maximum number of ranked diseases returned.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the number of top candidates consulted for next-symptom selection.
    pub fn shortlist(mut self, n: usize) -> Self {
        self.config.shortlist = n;
        self
    }

    /// Set the absent-symptom penalty factor.
    pub fn absent_penalty(mut self, factor: f64) -> Self {
        self.config.absent_penalty = factor;
        self
    }

    /// Build the [`RankConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Config`] if:
    /// - `top_k == 0` or `shortlist == 0`
    /// - `absent_penalty` is negative or not finite
    pub fn build(self) -> Result<RankConfig> {
        if self.config.top_k == 0 {
            return Err(TriageError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.shortlist == 0 {
            return Err(TriageError::Config("shortlist must be greater than zero".to_string()));
        }
        if !self.config.absent_penalty.is_finite() || self.config.absent_penalty < 0.0 {
            return Err(TriageError::Config(format!(
                "absent_penalty ({}) must be a non-negative finite number",
                self.config.absent_penalty
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accepts_valid_parameters() {
        let config =
            RankConfig::builder().top_k(3).shortlist(2).absent_penalty(0.0).build().unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.shortlist, 2);
        assert_eq!(config.absent_penalty, 0.0);
    }

    #[test]
    fn builder_rejects_degenerate_parameters() {
        assert!(RankConfig::builder().top_k(0).build().is_err());
        assert!(RankConfig::builder().shortlist(0).build().is_err());
        assert!(RankConfig::builder().absent_penalty(-0.1).build().is_err());
        assert!(RankConfig::builder().absent_penalty(f64::NAN).build().is_err());
    }
}
