//! Closed dispatch table over the fixed tool set.
//!
//! Tool names form a closed enum: dispatch is a match over typed handlers,
//! each validating its own argument schema, never a string-keyed lookup into
//! duck-typed callables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use triage_core::{Ranker, SharedCorpus};

use crate::appointments::AppointmentsTool;
use crate::diagnose::DiagnoseTool;
use crate::error::{Result, ToolError};
use crate::summary::SaveSummaryTool;
use crate::symptoms::ListSymptomsTool;
use crate::tool::{Tool, ToolDescriptor};

/// The fixed set of dispatchable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListAllSymptoms,
    DiagnoseSymptoms,
    AvailableAppointments,
    SaveSummary,
}

impl ToolName {
    /// Every dispatchable tool, in discovery order.
    pub const ALL: [ToolName; 4] = [
        ToolName::ListAllSymptoms,
        ToolName::DiagnoseSymptoms,
        ToolName::AvailableAppointments,
        ToolName::SaveSummary,
    ];

    /// The wire name callers use.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ListAllSymptoms => "list_all_symptoms",
            ToolName::DiagnoseSymptoms => "diagnose_symptoms",
            ToolName::AvailableAppointments => "available_appointments",
            ToolName::SaveSummary => "save_summary",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list_all_symptoms" => Ok(ToolName::ListAllSymptoms),
            "diagnose_symptoms" => Ok(ToolName::DiagnoseSymptoms),
            "available_appointments" => Ok(ToolName::AvailableAppointments),
            "save_summary" => Ok(ToolName::SaveSummary),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

/// Owns one instance of every tool and routes requests to them.
pub struct ToolRegistry {
    symptoms: ListSymptomsTool,
    diagnose: DiagnoseTool,
    appointments: AppointmentsTool,
    summary: SaveSummaryTool,
}

impl ToolRegistry {
    /// Build the registry around a shared corpus, a ranker, and the summary
    /// output directory.
    pub fn new(
        corpus: Arc<SharedCorpus>,
        ranker: Ranker,
        summary_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            symptoms: ListSymptomsTool::new(corpus.clone()),
            diagnose: DiagnoseTool::new(corpus, ranker),
            appointments: AppointmentsTool,
            summary: SaveSummaryTool::new(summary_dir),
        }
    }

    /// Route a request to the named tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for names outside the closed set;
    /// otherwise whatever the tool itself produces.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<Value> {
        let tool_name: ToolName = name.parse()?;
        debug!(tool = %tool_name, "dispatching tool call");
        match tool_name {
            ToolName::ListAllSymptoms => self.symptoms.execute(args).await,
            ToolName::DiagnoseSymptoms => self.diagnose.execute(args).await,
            ToolName::AvailableAppointments => self.appointments.execute(args).await,
            ToolName::SaveSummary => self.summary.execute(args).await,
        }
    }

    /// Advertised contracts for all tools, in [`ToolName::ALL`] order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::of(&self.symptoms),
            ToolDescriptor::of(&self.diagnose),
            ToolDescriptor::of(&self.appointments),
            ToolDescriptor::of(&self.summary),
        ]
    }
}
