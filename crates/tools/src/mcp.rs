//! MCP (Model Context Protocol) Tool Interface
//!
//! Provides a standardized tool interface compatible with MCP specification.
//! Tools declare a JSON Schema for their input; schemas may be closed
//! (`additionalProperties: false`), in which case unknown fields are
//! rejected at validation time with a named error.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool error with MCP error codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (MCP compatible)
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional error data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidParams,
            message: message.into(),
            data: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::MethodNotFound,
            message: message.into(),
            data: None,
        }
    }

    pub fn timeout(tool_name: &str, timeout_secs: u64) -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: format!("Tool '{}' timed out after {}s", tool_name, timeout_secs),
            data: None,
        }
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// MCP Error codes (JSON-RPC 2.0 compatible)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Custom error range
    Custom(i32),
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::Custom(c) => c,
        }
    }
}

impl TryFrom<i32> for ErrorCode {
    type Error = &'static str;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            -32700 => ErrorCode::ParseError,
            -32600 => ErrorCode::InvalidRequest,
            -32601 => ErrorCode::MethodNotFound,
            -32602 => ErrorCode::InvalidParams,
            -32603 => ErrorCode::InternalError,
            c => ErrorCode::Custom(c),
        })
    }
}

/// Tool output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Output content
    pub content: Vec<ContentBlock>,
    /// Is this an error response?
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// All text content joined into one string
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Content block types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

/// Tool schema (JSON Schema format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input schema (JSON Schema)
    pub input_schema: InputSchema,
}

/// Input schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
    /// When `Some(false)`, unknown fields are rejected at validation
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl InputSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
            required: Vec::new(),
            additional_properties: None,
        }
    }

    pub fn property(mut self, name: &str, schema: PropertySchema, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Close the schema: unknown fields become validation errors
    pub fn closed(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }
}

/// Property schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Element schema for array properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            prop_type: "string".to_string(),
            description: Some(description.into()),
            default: None,
            items: None,
        }
    }

    /// An array of strings
    pub fn string_array(description: impl Into<String>) -> Self {
        Self {
            prop_type: "array".to_string(),
            description: Some(description.into()),
            default: None,
            items: Some(Box::new(PropertySchema {
                prop_type: "string".to_string(),
                description: None,
                default: None,
                items: None,
            })),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Tool trait
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool name
    fn name(&self) -> &str;

    /// Get tool description
    fn description(&self) -> &str;

    /// Get input schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;

    /// Validate input against the schema.
    ///
    /// Checks required fields and property types, and rejects unknown
    /// fields when the schema is closed.
    fn validate(&self, input: &Value) -> Result<(), ToolError> {
        let schema = self.schema();

        if let Value::Object(obj) = input {
            for required in &schema.input_schema.required {
                if !obj.contains_key(required) {
                    return Err(ToolError::invalid_params(format!(
                        "Missing required field: {}",
                        required
                    )));
                }
            }

            let closed = schema.input_schema.additional_properties == Some(false);
            for (name, value) in obj {
                match schema.input_schema.properties.get(name) {
                    Some(prop_schema) => validate_property(name, value, prop_schema)?,
                    None if closed => {
                        return Err(ToolError::invalid_params(format!(
                            "Unknown field: {}",
                            name
                        )));
                    }
                    None => {}
                }
            }

            Ok(())
        } else if schema.input_schema.properties.is_empty() {
            Ok(())
        } else {
            Err(ToolError::invalid_params("Input must be an object"))
        }
    }

    /// Per-tool timeout in seconds
    fn timeout_secs(&self) -> u64 {
        30
    }
}

/// Validate a property value against its schema
fn validate_property(name: &str, value: &Value, schema: &PropertySchema) -> Result<(), ToolError> {
    let type_valid = match schema.prop_type.as_str() {
        "string" => value.is_string(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "boolean" => value.is_boolean(),
        "number" => value.is_number(),
        "null" => value.is_null(),
        _ => true,
    };

    if !type_valid {
        return Err(ToolError::invalid_params(format!(
            "Field '{}' must be of type '{}', got '{}'",
            name,
            schema.prop_type,
            json_type_name(value)
        )));
    }

    if let (Some(items), Some(elements)) = (&schema.items, value.as_array()) {
        for (index, element) in elements.iter().enumerate() {
            validate_property(&format!("{}[{}]", name, index), element, items)?;
        }
    }

    Ok(())
}

/// Get a human-readable type name for a JSON value
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
