//! Data types for the symptom/disease corpus, observations, and rankings.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Normalize a symptom or disease identifier: trim whitespace, lowercase.
///
/// Applied to every identifier entering the system (source rows and caller
/// observations alike) so lookups never depend on the caller's casing.
pub(crate) fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A disease with its weighted symptom associations.
///
/// The weight mapping holds strictly positive term weights; the L2 norm is
/// computed from the mapping at construction time and the two are never
/// updated independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Disease {
    name: String,
    weights: HashMap<String, f64>,
    norm: f64,
}

impl Disease {
    /// Build a disease from its weight mapping, computing the norm.
    ///
    /// Only the loader constructs diseases; an empty mapping is rejected
    /// there, before this is called.
    pub(crate) fn new(name: String, weights: HashMap<String, f64>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { name, weights, norm }
    }

    /// The normalized disease identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The term weight for `symptom`, or 0.0 if the disease has no
    /// association with it.
    pub fn weight(&self, symptom: &str) -> f64 {
        self.weights.get(symptom).copied().unwrap_or(0.0)
    }

    /// The precomputed L2 norm of the weight mapping.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Number of symptoms with positive weight for this disease.
    ///
    /// Fewer weighted symptoms means a more specific disease; used as the
    /// first ranking tie-breaker.
    pub fn specificity(&self) -> usize {
        self.weights.len()
    }

    /// Iterate over the weight mapping.
    pub fn weights(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }
}

/// The immutable, loaded symptom/disease dataset and derived weight model.
///
/// Built once by [`Corpus::load`](crate::Corpus::load) or
/// [`Corpus::from_reader`](crate::Corpus::from_reader) and never mutated:
/// any number of readers may score against it concurrently without
/// coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    diseases: Vec<Disease>,
    symptoms: BTreeSet<String>,
}

impl Corpus {
    pub(crate) fn new(diseases: Vec<Disease>, symptoms: BTreeSet<String>) -> Self {
        Self { diseases, symptoms }
    }

    /// All diseases, ordered by identifier.
    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    /// The symptom universe in lexicographic order.
    ///
    /// This is the `list_all_symptoms` operation: pure, deterministic, no
    /// side effects.
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(|s| s.as_str())
    }

    /// Whether `symptom` (already normalized) is part of the universe.
    pub fn contains_symptom(&self, symptom: &str) -> bool {
        self.symptoms.contains(symptom)
    }

    /// Number of diseases in the corpus.
    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    /// Number of symptoms in the universe.
    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }
}

/// The caller's report of a single symptom: observed present or explicitly
/// denied. Symptoms the caller does not mention are unknown.
///
/// Serializes as `"present"` / `"absent"`. Deserialization also accepts the
/// numeric `1` / `0` (and boolean) forms some callers send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservedState {
    Present,
    Absent,
}

impl<'de> Deserialize<'de> for ObservedState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StateVisitor;

        impl Visitor<'_> for StateVisitor {
            type Value = ObservedState;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(r#""present", "absent", 1, or 0"#)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                match v {
                    "present" => Ok(ObservedState::Present),
                    "absent" => Ok(ObservedState::Absent),
                    other => Err(E::unknown_variant(other, &["present", "absent"])),
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                match v {
                    1 => Ok(ObservedState::Present),
                    0 => Ok(ObservedState::Absent),
                    other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                match u64::try_from(v) {
                    Ok(unsigned) => self.visit_u64(unsigned),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(if v { ObservedState::Present } else { ObservedState::Absent })
            }
        }

        deserializer.deserialize_any(StateVisitor)
    }
}

/// A caller-supplied mapping from symptom to [`ObservedState`].
///
/// Keys are normalized on insertion, and entries are kept in a `BTreeMap`
/// so that iteration order, and every downstream floating-point summation,
/// is independent of the order the caller supplied them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObservationSet {
    entries: BTreeMap<String, ObservedState>,
}

impl ObservationSet {
    /// Create an empty observation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a symptom observation. The identifier is normalized; a repeated
    /// symptom keeps the latest state.
    pub fn insert(&mut self, symptom: &str, state: ObservedState) {
        self.entries.insert(normalize_term(symptom), state);
    }

    /// Whether `symptom` (already normalized) has been observed, in either
    /// state.
    pub fn contains(&self, symptom: &str) -> bool {
        self.entries.contains_key(symptom)
    }

    /// Iterate over all observations in lexicographic symptom order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ObservedState)> {
        self.entries.iter().map(|(s, st)| (s.as_str(), *st))
    }

    /// Symptoms reported present, in lexicographic order.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, st)| **st == ObservedState::Present)
            .map(|(s, _)| s.as_str())
    }

    /// Symptoms explicitly denied, in lexicographic order.
    pub fn absent(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, st)| **st == ObservedState::Absent)
            .map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ObservedState)> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = (String, ObservedState)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (symptom, state) in iter {
            set.insert(&symptom, state);
        }
        set
    }
}

impl<'de> Deserialize<'de> for ObservationSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = ObservationSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from symptom name to observed state")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut set = ObservationSet::new();
                while let Some((symptom, state)) = map.next_entry::<String, ObservedState>()? {
                    set.insert(&symptom, state);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

/// A candidate disease with its relevance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedDisease {
    /// The disease identifier.
    pub disease: String,
    /// Cosine-similarity-derived score; higher is more relevant.
    pub score: f64,
}

/// The result of a diagnose call: ranked candidates plus the next symptom
/// worth asking about, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    /// Candidate diseases in descending score order.
    pub candidates: Vec<RankedDisease>,
    /// The unobserved symptom expected to refine the ranking most, or `None`
    /// when the universe is exhausted or nothing matched.
    pub next_symptom: Option<String>,
}

impl Ranking {
    /// True when no disease matched the observations.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
