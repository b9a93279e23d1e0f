//! Tool returning the full symptom universe.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use triage_core::SharedCorpus;

use crate::error::Result;
use crate::tool::Tool;

/// Lists every symptom known to the corpus, sorted lexicographically.
pub struct ListSymptomsTool {
    corpus: Arc<SharedCorpus>,
}

#[derive(Debug, Serialize)]
struct ListSymptomsResponse {
    all_symptoms: Vec<String>,
}

impl ListSymptomsTool {
    /// Create the tool backed by the given corpus handle.
    pub fn new(corpus: Arc<SharedCorpus>) -> Self {
        Self { corpus }
    }
}

#[async_trait]
impl Tool for ListSymptomsTool {
    fn name(&self) -> &'static str {
        "list_all_symptoms"
    }

    fn description(&self) -> &'static str {
        "Returns a list of all known symptoms in the database."
    }

    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        let corpus = self.corpus.get().await;
        let all_symptoms: Vec<String> = corpus.symptoms().map(str::to_string).collect();
        info!(count = all_symptoms.len(), "listed symptoms");
        Ok(serde_json::to_value(ListSymptomsResponse { all_symptoms })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::Corpus;

    const TABLE: &str = "symptom_name\tdisease_name\tcooccurs\n\
                         fever\tflu\t8\n\
                         cough\tflu\t6\n\
                         rash\tmeasles\t9\n";

    #[tokio::test]
    async fn lists_symptoms_sorted() {
        let corpus = Corpus::from_reader(TABLE.as_bytes()).unwrap();
        let tool = ListSymptomsTool::new(Arc::new(SharedCorpus::new(corpus)));

        let value = tool.execute(Value::Null).await.unwrap();
        assert_eq!(
            value["all_symptoms"],
            serde_json::json!(["cough", "fever", "rash"])
        );
    }
}
