//! Conversation-summary persistence tool.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Result, ToolError};
use crate::tool::Tool;

/// Saves a caller-supplied summary object to a timestamped JSON file.
///
/// The write goes through a temp file in the target directory followed by a
/// rename, so a crash mid-write never leaves a truncated summary behind.
pub struct SaveSummaryTool {
    output_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveSummaryArgs {
    summary: Value,
}

impl SaveSummaryTool {
    /// Create the tool writing into `output_dir` (created on demand).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    fn write_summary(&self, summary: &Value, stamp: &str) -> Result<String> {
        std::fs::create_dir_all(&self.output_dir)?;
        let filename = format!("summary_{stamp}.json");

        let temp = NamedTempFile::new_in(&self.output_dir)?;
        serde_json::to_writer_pretty(&temp, summary)?;
        temp.persist(self.output_dir.join(&filename)).map_err(|e| ToolError::Io(e.error))?;

        Ok(filename)
    }
}

#[async_trait]
impl Tool for SaveSummaryTool {
    fn name(&self) -> &'static str {
        "save_summary"
    }

    fn description(&self) -> &'static str {
        "Saves a conversation summary (or transcript) to a local JSON file with a timestamp."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "summary": {
                    "description": "Any JSON-serializable summary or transcript object."
                }
            },
            "required": ["summary"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: SaveSummaryArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let stamp = Local::now().format("%Y%m%dT%H%M%S").to_string();
        let filename = self.write_summary(&args.summary, &stamp)?;
        info!(filename = %filename, "summary saved");

        Ok(json!({ "message": "Summary saved successfully", "filename": filename }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_summary_to_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveSummaryTool::new(dir.path());

        let value = tool
            .execute(json!({"summary": {"patient": "anonymous", "notes": ["fever"]}}))
            .await
            .unwrap();

        let filename = value["filename"].as_str().unwrap();
        assert!(filename.starts_with("summary_"));
        assert!(filename.ends_with(".json"));

        let written = std::fs::read_to_string(dir.path().join(filename)).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, json!({"patient": "anonymous", "notes": ["fever"]}));
    }

    #[tokio::test]
    async fn missing_summary_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveSummaryTool::new(dir.path());

        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
