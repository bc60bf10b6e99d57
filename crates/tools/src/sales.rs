//! Sales qualification tools
//!
//! The three operations exposed to the conversational layer: FAQ lookup,
//! lead capture, and call summarization.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use sdr_agent_core::LeadRecord;
use sdr_agent_persistence::{FaqStore, LeadStore, SummaryManager};

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

/// Status string returned after a successful lead append
pub const LEAD_SAVED_MESSAGE: &str = "Lead record saved successfully.";

/// Status string returned when the lead store rejects the append
pub const LEAD_FAILED_MESSAGE: &str = "Failed to save lead record.";

/// FAQ information retriever.
///
/// Read-only and infallible: every query resolves to an informative string.
pub struct FaqLookupTool {
    store: Arc<FaqStore>,
}

impl FaqLookupTool {
    pub fn new(store: Arc<FaqStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for FaqLookupTool {
    fn name(&self) -> &str {
        "get_faq_info"
    }

    fn description(&self) -> &str {
        "Retrieve company information, product details, pricing, and frequently asked questions from the preloaded FAQ data"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "query",
                PropertySchema::string(
                    "Section to retrieve: 'all', 'company', 'products', 'pricing', 'faq', or any field name",
                )
                .with_default(Value::String("all".to_string())),
                false,
            ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let query = input
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or("all");

        Ok(ToolOutput::text(self.store.lookup(query)))
    }
}

/// Lead recorder.
///
/// The input schema is the closed lead schema itself: all 18 fields
/// required, unknown fields rejected by name. Storage failures degrade to
/// an error-text output; they never propagate.
pub struct RecordLeadTool {
    store: Arc<dyn LeadStore>,
}

impl RecordLeadTool {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for RecordLeadTool {
    fn name(&self) -> &str {
        "record_lead"
    }

    fn description(&self) -> &str {
        "Persist a structured lead record after qualification; use empty strings for unknown values"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property("lead_name", PropertySchema::string("Full name of the lead"), true)
                .property("company", PropertySchema::string("Organization name"), true)
                .property("title", PropertySchema::string("Role or job title"), true)
                .property("email", PropertySchema::string("Contact email"), true)
                .property("phone", PropertySchema::string("Contact phone number"), true)
                .property("location", PropertySchema::string("Location or time zone"), true)
                .property(
                    "primary_pain_points",
                    PropertySchema::string_array("List of identified pain points"),
                    true,
                )
                .property(
                    "current_solution",
                    PropertySchema::string("Current solution in use, if any"),
                    true,
                )
                .property(
                    "budget_estimate",
                    PropertySchema::string("Free-text or range of budget estimate"),
                    true,
                )
                .property(
                    "decision_timeline",
                    PropertySchema::string("Expected decision timeline"),
                    true,
                )
                .property(
                    "decision_maker_confirmed",
                    PropertySchema::string("'yes' or 'no'"),
                    true,
                )
                .property(
                    "interest_level",
                    PropertySchema::string("'low', 'medium', or 'high'"),
                    true,
                )
                .property("meeting_scheduled", PropertySchema::string("'yes' or 'no'"), true)
                .property(
                    "meeting_time",
                    PropertySchema::string("ISO 8601 or human-readable meeting time, if scheduled"),
                    true,
                )
                .property(
                    "source",
                    PropertySchema::string("Source of the lead, e.g. 'voice_call'"),
                    true,
                )
                .property(
                    "notes",
                    PropertySchema::string("Free-text highlights from the conversation"),
                    true,
                )
                .property(
                    "recommended_next_step",
                    PropertySchema::string("Suggested next step"),
                    true,
                )
                .property("timestamp", PropertySchema::string("Call end ISO 8601 time"), true)
                .closed(),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let lead = LeadRecord::from_value(input)
            .map_err(|e| ToolError::invalid_params(format!("Invalid lead record: {}", e)))?;

        match self.store.append(&lead).await {
            Ok(count) => {
                tracing::debug!(count, "Lead collection updated");
                Ok(ToolOutput::text(LEAD_SAVED_MESSAGE))
            }
            Err(e) => {
                tracing::error!(error = %e, "Lead append failed");
                Ok(ToolOutput::error(LEAD_FAILED_MESSAGE))
            }
        }
    }
}

/// Call summary creator.
///
/// Takes no input; the manager owns every failure path, so this tool always
/// returns a text output.
pub struct SummarizeCallTool {
    manager: Arc<SummaryManager>,
}

impl SummarizeCallTool {
    pub fn new(manager: Arc<SummaryManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Tool for SummarizeCallTool {
    fn name(&self) -> &str {
        "get_summary"
    }

    fn description(&self) -> &str {
        "Create a one-sentence summary of the latest call and persist the broad summary"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object(),
        }
    }

    async fn execute(&self, _input: Value) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::text(self.manager.summarize().await))
    }
}
