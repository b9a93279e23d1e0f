//! Corpus loading: TSV association table → weighted, normalized index.
//!
//! The source is a tab-separated table with a header row and one row per
//! (symptom, disease) pair carrying a raw association strength. Loading is
//! fail-fast: any malformed row rejects the whole table, so the process
//! never serves traffic from a partially built corpus.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::corpus::{Corpus, Disease, normalize_term};
use crate::error::{Result, TriageError};

/// Required source columns, located by header name. Extra columns are
/// ignored.
const SYMPTOM_COLUMN: &str = "symptom_name";
const DISEASE_COLUMN: &str = "disease_name";
const STRENGTH_COLUMN: &str = "cooccurs";

impl Corpus {
    /// Load a corpus from a TSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Io`] if the file cannot be opened and
    /// [`TriageError::DataFormat`] for any structural problem in the table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = Self::from_reader(file)?;
        info!(path = %path.display(), "corpus loaded from file");
        Ok(corpus)
    }

    /// Load a corpus from any reader producing the TSV table.
    ///
    /// Builds the full weight model: raw strengths are aggregated per
    /// (disease, symptom) pair, discounted by an inverse-document-frequency
    /// factor, and each disease's L2 norm is precomputed alongside its
    /// weight mapping.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::DataFormat`] if a required column is missing,
    /// an identifier is empty, a strength is non-numeric or negative, or a
    /// disease ends up with zero total weight.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().delimiter(b'\t').from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| TriageError::DataFormat(format!("unreadable header row: {e}")))?
            .clone();
        let idx_symptom = column_index(&headers, SYMPTOM_COLUMN)?;
        let idx_disease = column_index(&headers, DISEASE_COLUMN)?;
        let idx_strength = column_index(&headers, STRENGTH_COLUMN)?;

        // Aggregate raw strengths per (disease, symptom). BTreeMaps keep
        // every later iteration (idf, norms, summation order) deterministic.
        let mut table: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (row, record) in rdr.records().enumerate() {
            // Header is line 1; data rows start at line 2.
            let line = row + 2;
            let record = record
                .map_err(|e| TriageError::DataFormat(format!("line {line}: unreadable row: {e}")))?;

            let symptom = normalize_term(record.get(idx_symptom).unwrap_or(""));
            let disease = normalize_term(record.get(idx_disease).unwrap_or(""));
            if symptom.is_empty() || disease.is_empty() {
                return Err(TriageError::DataFormat(format!(
                    "line {line}: empty symptom or disease identifier"
                )));
            }

            let raw = record.get(idx_strength).unwrap_or("").trim();
            let strength: f64 = raw.parse().map_err(|_| {
                TriageError::DataFormat(format!(
                    "line {line}: malformed association strength '{raw}'"
                ))
            })?;
            if !strength.is_finite() || strength < 0.0 {
                return Err(TriageError::DataFormat(format!(
                    "line {line}: association strength '{raw}' must be a non-negative number"
                )));
            }

            *table.entry(disease).or_default().entry(symptom).or_insert(0.0) += strength;
        }

        if table.is_empty() {
            warn!("corpus source contains no data rows");
        }

        // Document frequency per symptom: the number of diseases with a
        // source row for it, zero-strength rows included. The universe is
        // the union of all symptoms seen anywhere.
        let total_diseases = table.len();
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for symptoms in table.values() {
            for symptom in symptoms.keys() {
                *doc_freq.entry(symptom).or_insert(0) += 1;
            }
        }
        let universe: BTreeSet<String> = doc_freq.keys().map(|s| s.to_string()).collect();

        // Smoothed idf: ln(N / df) + 1. Strictly positive for any symptom
        // appearing in at least one disease, monotonically decreasing in df,
        // so corpus-wide symptoms still contribute instead of zeroing out.
        let idf: BTreeMap<&str, f64> = doc_freq
            .iter()
            .map(|(s, df)| (*s, (total_diseases as f64 / *df as f64).ln() + 1.0))
            .collect();

        let mut diseases = Vec::with_capacity(table.len());
        for (name, strengths) in &table {
            let weights: HashMap<String, f64> = strengths
                .iter()
                .filter(|(_, strength)| **strength > 0.0)
                .map(|(symptom, strength)| {
                    (symptom.clone(), strength * idf[symptom.as_str()])
                })
                .collect();
            if weights.is_empty() {
                return Err(TriageError::DataFormat(format!(
                    "disease '{name}' has zero total association weight and cannot be scored"
                )));
            }
            diseases.push(Disease::new(name.clone(), weights));
        }

        info!(
            diseases = diseases.len(),
            symptoms = universe.len(),
            "corpus index built"
        );
        Ok(Corpus::new(diseases, universe))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| TriageError::DataFormat(format!("missing required column '{name}'")))
}
