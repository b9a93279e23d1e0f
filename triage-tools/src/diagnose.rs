//! Tool ranking diseases against reported symptoms.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use triage_core::{ObservationSet, RankedDisease, Ranker, SharedCorpus};

use crate::error::{Result, ToolError};
use crate::tool::Tool;

/// Ranks candidate diseases for a set of present/absent symptom reports and
/// proposes the next symptom to ask about.
pub struct DiagnoseTool {
    corpus: Arc<SharedCorpus>,
    ranker: Ranker,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiagnoseArgs {
    /// `symptom_dict` is the legacy caller spelling for the same mapping.
    #[serde(alias = "symptom_dict")]
    observations: ObservationSet,
}

#[derive(Debug, Serialize)]
struct DiagnoseResponse {
    possible_diseases: Vec<RankedDisease>,
    next_symptom_suggestions: Vec<String>,
}

impl DiagnoseTool {
    /// Create the tool backed by the given corpus handle and ranker.
    pub fn new(corpus: Arc<SharedCorpus>, ranker: Ranker) -> Self {
        Self { corpus, ranker }
    }
}

#[async_trait]
impl Tool for DiagnoseTool {
    fn name(&self) -> &'static str {
        "diagnose_symptoms"
    }

    fn description(&self) -> &'static str {
        "Given user symptom presence, returns likely diseases plus next symptom suggestions."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "observations": {
                    "type": "object",
                    "description": "Mapping from symptom name to \"present\" or \"absent\".",
                    "additionalProperties": { "enum": ["present", "absent", 1, 0] }
                }
            },
            "required": ["observations"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: DiagnoseArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let corpus = self.corpus.get().await;
        let ranking = self.ranker.diagnose(&corpus, &args.observations)?;
        info!(
            observed = args.observations.len(),
            candidates = ranking.candidates.len(),
            "diagnosis served"
        );

        let response = DiagnoseResponse {
            possible_diseases: ranking.candidates,
            next_symptom_suggestions: ranking.next_symptom.into_iter().collect(),
        };
        Ok(serde_json::to_value(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::Corpus;

    const TABLE: &str = "symptom_name\tdisease_name\tcooccurs\n\
                         fever\tflu\t8\n\
                         cough\tflu\t6\n\
                         fever\tmeasles\t3\n\
                         rash\tmeasles\t9\n";

    fn tool() -> DiagnoseTool {
        let corpus = Corpus::from_reader(TABLE.as_bytes()).unwrap();
        DiagnoseTool::new(Arc::new(SharedCorpus::new(corpus)), Ranker::default())
    }

    #[tokio::test]
    async fn ranks_diseases_for_present_symptoms() {
        let value = tool()
            .execute(json!({"observations": {"fever": "present"}}))
            .await
            .unwrap();

        let diseases: Vec<&str> = value["possible_diseases"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["disease"].as_str().unwrap())
            .collect();
        assert_eq!(diseases, vec!["flu", "measles"]);
        assert_eq!(value["next_symptom_suggestions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn accepts_legacy_symptom_dict_key() {
        let value = tool()
            .execute(json!({"symptom_dict": {"rash": 1}}))
            .await
            .unwrap();
        let diseases = value["possible_diseases"].as_array().unwrap();
        assert_eq!(diseases[0]["disease"], "measles");
    }

    #[tokio::test]
    async fn unknown_symptom_is_a_caller_error() {
        let err = tool()
            .execute(json!({"observations": {"spontaneous combustion": "present"}}))
            .await
            .unwrap_err();
        assert!(err.is_caller_error());
    }

    #[tokio::test]
    async fn malformed_arguments_are_rejected() {
        let err = tool().execute(json!({"observations": "fever"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = tool().execute(json!({"wrong_key": {}})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn empty_observations_yield_empty_response() {
        let value = tool().execute(json!({"observations": {}})).await.unwrap();
        assert_eq!(value["possible_diseases"].as_array().unwrap().len(), 0);
        assert_eq!(value["next_symptom_suggestions"].as_array().unwrap().len(), 0);
    }
}
