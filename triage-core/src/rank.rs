//! Disease ranking against a set of observed symptoms.
//!
//! [`Ranker::diagnose`] is a pure function of (corpus, observations,
//! config): it never mutates the corpus, keeps no state between calls, and
//! produces bit-identical output for identical input.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::RankConfig;
use crate::corpus::{Corpus, Disease, ObservationSet, RankedDisease, Ranking};
use crate::error::{Result, TriageError};

/// Scores diseases against an [`ObservationSet`] and proposes the next
/// symptom worth asking about.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankConfig,
}

impl Ranker {
    /// Create a ranker with the given configuration.
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    /// Return a reference to the ranker configuration.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank every corpus disease against the observations.
    ///
    /// Scoring is cosine similarity between the disease's weight vector and
    /// a unit-weight query over the symptoms reported present. Diseases
    /// sharing no present symptom are excluded. A symptom the caller
    /// explicitly denied reduces the score of diseases that expect it,
    /// bounded at zero.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidObservation`] if any observed symptom is
    /// not part of the corpus universe. The corpus is left untouched.
    pub fn diagnose(&self, corpus: &Corpus, observations: &ObservationSet) -> Result<Ranking> {
        // 1. Reject unknown symptoms outright; caller error, not retried.
        for (symptom, _) in observations.iter() {
            if !corpus.contains_symptom(symptom) {
                return Err(TriageError::InvalidObservation(symptom.to_string()));
            }
        }

        // 2. Build the query. Present symptoms contribute unit weight, so
        // the query norm is sqrt of the present count. Absent symptoms stay
        // out of the dot product but feed the penalty below.
        let present: Vec<&str> = observations.present().collect();
        let absent: Vec<&str> = observations.absent().collect();
        if present.is_empty() {
            debug!("no symptoms reported present; returning empty ranking");
            return Ok(Ranking::default());
        }
        let query_norm = (present.len() as f64).sqrt();

        // 3. Score every disease. Observation iteration order is fixed
        // (lexicographic), so float summation order is too.
        let mut scored: Vec<(&Disease, f64)> = Vec::new();
        for disease in corpus.diseases() {
            let dot: f64 = present.iter().map(|s| disease.weight(s)).sum();
            if dot == 0.0 {
                continue;
            }
            let denom = disease.norm() * query_norm;
            let raw = dot / denom;

            let denied: f64 = absent.iter().map(|s| disease.weight(s)).sum();
            let penalty = self.config.absent_penalty * denied / denom;
            let score = (raw - penalty).max(0.0);

            scored.push((disease, score));
        }

        // 4. Descending score; ties broken by specificity (fewer weighted
        // symptoms first), then identifier, for full determinism.
        scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => {
                a.0.specificity().cmp(&b.0.specificity()).then_with(|| a.0.name().cmp(b.0.name()))
            }
            unequal => unequal,
        });

        // 5. Pick the next symptom from the full ordering, then truncate to
        // what the caller sees.
        let next_symptom = self.next_symptom(corpus, observations, &scored);

        let candidates: Vec<RankedDisease> = scored
            .into_iter()
            .take(self.config.top_k)
            .map(|(disease, score)| RankedDisease { disease: disease.name().to_string(), score })
            .collect();

        debug!(
            candidates = candidates.len(),
            next_symptom = next_symptom.as_deref(),
            "diagnosis ranked"
        );
        Ok(Ranking { candidates, next_symptom })
    }

    /// Select the unobserved symptom with the highest total weight across
    /// the top-`shortlist` candidates: the symptom whose answer is expected
    /// to refine the ranking most. Ties go to the lexicographically smallest
    /// symptom; `None` when nothing qualifies.
    fn next_symptom(
        &self,
        corpus: &Corpus,
        observations: &ObservationSet,
        scored: &[(&Disease, f64)],
    ) -> Option<String> {
        if scored.is_empty() {
            return None;
        }
        let shortlist: Vec<&Disease> =
            scored.iter().take(self.config.shortlist).map(|(disease, _)| *disease).collect();

        let mut best: Option<(&str, f64)> = None;
        for symptom in corpus.symptoms() {
            if observations.contains(symptom) {
                continue;
            }
            let total: f64 = shortlist.iter().map(|d| d.weight(symptom)).sum();
            if total <= 0.0 {
                continue;
            }
            // Strict comparison keeps the first (smallest) symptom on ties.
            if best.map_or(true, |(_, best_total)| total > best_total) {
                best = Some((symptom, total));
            }
        }
        best.map(|(symptom, _)| symptom.to_string())
    }
}
