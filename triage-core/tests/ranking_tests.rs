//! Property tests for corpus construction and ranking determinism.

use proptest::prelude::*;
use triage_core::{Corpus, ObservationSet, ObservedState, RankConfig, Ranker, Ranking};

const SYMPTOM_POOL: &[&str] = &[
    "ache", "chill", "cough", "dizziness", "fatigue", "fever", "nausea", "rash", "sweats",
    "wheeze",
];

/// A disease profile: (symptom index, raw strength) rows, at least one.
fn arb_disease() -> impl Strategy<Value = Vec<(usize, u32)>> {
    proptest::collection::vec((0..SYMPTOM_POOL.len(), 1u32..20), 1..5)
}

fn arb_table() -> impl Strategy<Value = Vec<Vec<(usize, u32)>>> {
    proptest::collection::vec(arb_disease(), 1..6)
}

/// Raw observation picks; deduplicated per symptom before use so that
/// permutation comparisons are well-defined.
fn arb_observations() -> impl Strategy<Value = Vec<(usize, bool)>> {
    proptest::collection::vec((0..SYMPTOM_POOL.len(), any::<bool>()), 0..6)
}

fn build_corpus(table: &[Vec<(usize, u32)>]) -> Corpus {
    let mut tsv = String::from("symptom_name\tdisease_name\tcooccurs\n");
    for (i, rows) in table.iter().enumerate() {
        for (symptom, strength) in rows {
            tsv.push_str(&format!("{}\tdisease_{i}\t{strength}\n", SYMPTOM_POOL[*symptom]));
        }
    }
    Corpus::from_reader(tsv.as_bytes()).expect("generated table is well-formed")
}

/// Deduplicate picks (first mention of a symptom wins) and drop symptoms the
/// corpus does not know.
fn to_entries(corpus: &Corpus, picks: &[(usize, bool)]) -> Vec<(String, ObservedState)> {
    let mut entries: Vec<(String, ObservedState)> = Vec::new();
    for (idx, present) in picks {
        let symptom = SYMPTOM_POOL[*idx];
        if !corpus.contains_symptom(symptom) {
            continue;
        }
        if entries.iter().any(|(s, _)| s == symptom) {
            continue;
        }
        let state = if *present { ObservedState::Present } else { ObservedState::Absent };
        entries.push((symptom.to_string(), state));
    }
    entries
}

fn observation_set(entries: &[(String, ObservedState)]) -> ObservationSet {
    entries.iter().cloned().collect()
}

fn score_of(ranking: &Ranking, disease: &str) -> Option<f64> {
    ranking.candidates.iter().find(|c| c.disease == disease).map(|c| c.score)
}

fn position_of(ranking: &Ranking, disease: &str) -> Option<usize> {
    ranking.candidates.iter().position(|c| c.disease == disease)
}

/// A ranker whose top_k is far above any generated corpus size, so every
/// matching disease stays visible to the assertions.
fn wide_ranker() -> Ranker {
    Ranker::new(RankConfig::builder().top_k(100).shortlist(5).build().unwrap())
}

mod prop_corpus_invariants {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(150))]

        /// Every stored norm equals the L2 norm recomputed from the stored
        /// weight mapping.
        #[test]
        fn norms_always_match_weight_mappings(table in arb_table()) {
            let corpus = build_corpus(&table);
            for disease in corpus.diseases() {
                let recomputed = disease.weights().map(|(_, w)| w * w).sum::<f64>().sqrt();
                prop_assert_eq!(disease.norm(), recomputed);
            }
        }

        /// The symptom universe is sorted and duplicate-free.
        #[test]
        fn universe_is_sorted_and_unique(table in arb_table()) {
            let corpus = build_corpus(&table);
            let symptoms: Vec<&str> = corpus.symptoms().collect();
            for window in symptoms.windows(2) {
                prop_assert!(window[0] < window[1]);
            }
        }
    }
}

mod prop_ranking_determinism {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(150))]

        /// Candidates come back in descending score order, at most top_k of
        /// them, and two identical calls agree bit for bit.
        #[test]
        fn sorted_bounded_and_idempotent(
            table in arb_table(),
            picks in arb_observations(),
        ) {
            let corpus = build_corpus(&table);
            let entries = to_entries(&corpus, &picks);
            let observations = observation_set(&entries);

            let ranker = Ranker::default();
            let first = ranker.diagnose(&corpus, &observations).unwrap();

            prop_assert!(first.candidates.len() <= ranker.config().top_k);
            for window in first.candidates.windows(2) {
                prop_assert!(window[0].score >= window[1].score);
            }

            let second = ranker.diagnose(&corpus, &observations).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Observation insertion order never changes the outcome.
        #[test]
        fn observation_order_is_irrelevant(
            table in arb_table(),
            picks in arb_observations(),
        ) {
            let corpus = build_corpus(&table);
            let entries = to_entries(&corpus, &picks);

            let forward = observation_set(&entries);
            let reversed: ObservationSet =
                entries.iter().rev().cloned().collect();

            let ranker = Ranker::default();
            let a = ranker.diagnose(&corpus, &forward).unwrap();
            let b = ranker.diagnose(&corpus, &reversed).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}

mod prop_score_monotonicity {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(150))]

        /// Reporting one more present symptom never raises the score of a
        /// disease that carries no weight for it, and never drops a
        /// positively-weighted disease below an unweighted one it already
        /// outranked.
        #[test]
        fn extra_symptom_moves_scores_the_right_way(
            table in arb_table(),
            picks in arb_observations(),
            extra in 0..SYMPTOM_POOL.len(),
        ) {
            let corpus = build_corpus(&table);
            let extra_symptom = SYMPTOM_POOL[extra];
            prop_assume!(corpus.contains_symptom(extra_symptom));

            let mut entries = to_entries(&corpus, &picks);
            entries.retain(|(s, _)| s != extra_symptom);
            prop_assume!(entries.iter().any(|(_, st)| *st == ObservedState::Present));

            let before_set = observation_set(&entries);
            entries.push((extra_symptom.to_string(), ObservedState::Present));
            let after_set = observation_set(&entries);

            let ranker = wide_ranker();
            let before = ranker.diagnose(&corpus, &before_set).unwrap();
            let after = ranker.diagnose(&corpus, &after_set).unwrap();

            for disease in corpus.diseases() {
                if disease.weight(extra_symptom) > 0.0 {
                    continue;
                }
                // No weight on the new symptom: the query only got longer,
                // so the cosine can only shrink.
                if let (Some(b), Some(a)) =
                    (score_of(&before, disease.name()), score_of(&after, disease.name()))
                {
                    prop_assert!(a <= b + 1e-12);
                }
            }

            // Pairwise order: a disease weighted on the new symptom never
            // falls behind an unweighted disease it already outranked.
            for weighted in corpus.diseases() {
                if weighted.weight(extra_symptom) == 0.0 {
                    continue;
                }
                for unweighted in corpus.diseases() {
                    if unweighted.weight(extra_symptom) > 0.0 {
                        continue;
                    }
                    let positions_before = (
                        position_of(&before, weighted.name()),
                        position_of(&before, unweighted.name()),
                    );
                    let positions_after = (
                        position_of(&after, weighted.name()),
                        position_of(&after, unweighted.name()),
                    );
                    if let ((Some(wb), Some(ub)), (Some(wa), Some(ua))) =
                        (positions_before, positions_after)
                    {
                        if wb < ub {
                            prop_assert!(wa < ua);
                        }
                    }
                }
            }
        }
    }
}
