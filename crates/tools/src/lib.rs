//! Tools for the SDR voice agent
//!
//! Implements an MCP (Model Context Protocol) compatible tool interface
//! with the sales-qualification tools exposed to the conversational layer.

pub mod mcp;
pub mod registry;
pub mod sales;

use std::sync::Arc;

pub use mcp::{
    ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
};
pub use registry::ToolRegistry;
pub use sales::{
    FaqLookupTool, RecordLeadTool, SummarizeCallTool, LEAD_FAILED_MESSAGE, LEAD_SAVED_MESSAGE,
};

use sdr_agent_persistence::PersistenceLayer;

impl From<ToolError> for sdr_agent_core::Error {
    fn from(err: ToolError) -> Self {
        sdr_agent_core::Error::Tool(err.to_string())
    }
}

/// Build the registry of sales tools over an initialized persistence layer
pub fn create_registry(persistence: &PersistenceLayer) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(FaqLookupTool::new(persistence.faq.clone())));
    registry.register(Arc::new(RecordLeadTool::new(persistence.leads.clone())));
    registry.register(Arc::new(SummarizeCallTool::new(
        persistence.summaries.clone(),
    )));
    registry
}
