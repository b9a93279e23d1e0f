//! Symptom-to-disease ranking engine.
//!
//! This crate provides:
//! - TSV association-table loading into an idf-weighted, norm-precomputed
//!   corpus index
//! - Cosine-similarity ranking of diseases against observed symptoms, with
//!   a penalty for explicitly denied symptoms
//! - Next-symptom suggestion for the most informative follow-up question
//! - A shared handle for atomic corpus reload under concurrent readers
//!
//! # Example
//!
//! ```rust,ignore
//! use triage_core::{Corpus, ObservationSet, ObservedState, Ranker};
//!
//! let corpus = Corpus::load("data/symptoms.tsv")?;
//! let mut observations = ObservationSet::new();
//! observations.insert("fever", ObservedState::Present);
//! let ranking = Ranker::default().diagnose(&corpus, &observations)?;
//! ```

mod config;
mod corpus;
mod error;
mod loader;
mod rank;
mod shared;

pub use config::{RankConfig, RankConfigBuilder};
pub use corpus::{Corpus, Disease, ObservationSet, ObservedState, RankedDisease, Ranking};
pub use error::{Result, TriageError};
pub use rank::Ranker;
pub use shared::SharedCorpus;
