//! FAQ document store
//!
//! Loads the company knowledge document once at startup and serves
//! read-only lookups. Lookup never fails: every failure path degrades to an
//! informative string, because the conversational layer consuming it has no
//! structured error channel.

use std::path::Path;

use serde_json::{Map, Value};

/// Returned when the store was constructed from a missing or unreadable document
pub const NO_DATA_MESSAGE: &str = "No FAQ data available. Please ensure the FAQ file is loaded.";

/// The fields projected by the `company` query, in output order
const COMPANY_FIELDS: [&str; 6] = [
    "company",
    "industry",
    "headquarters",
    "founders",
    "founded",
    "description",
];

/// Reserved section names listed in the not-found message
const SECTION_NAMES: &str = "company, products, pricing, faq";

/// Immutable FAQ document, a JSON object held in file order.
///
/// Key order matters: substring lookups return the first match, and "first"
/// is defined by the order keys appear in the source document.
#[derive(Debug, Clone, Default)]
pub struct FaqDocument {
    root: Map<String, Value>,
}

impl FaqDocument {
    /// Load the document from a JSON file.
    ///
    /// A missing file, unreadable file, parse failure, or non-object root
    /// all degrade to an empty document with a logged warning. Never errors.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "FAQ document not loaded");
                return Self::default();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(root)) => {
                tracing::info!(path = %path.display(), entries = root.len(), "Loaded FAQ document");
                Self { root }
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "FAQ document root is not an object");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse FAQ document");
                Self::default()
            }
        }
    }

    /// Build a document from an already-parsed JSON object
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The whole document as a JSON value
    pub fn all(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// The company projection: exactly the six company fields, with `null`
    /// standing in for fields absent from the source document.
    pub fn company_info(&self) -> Value {
        let mut info = Map::new();
        for field in COMPANY_FIELDS {
            info.insert(
                field.to_string(),
                self.root.get(field).cloned().unwrap_or(Value::Null),
            );
        }
        Value::Object(info)
    }

    /// The products sequence, or an empty sequence
    pub fn products(&self) -> Value {
        self.root
            .get("products")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// The pricing mapping, or an empty mapping
    pub fn pricing(&self) -> Value {
        self.root
            .get("pricing")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// The question/answer mapping, or an empty mapping
    pub fn faq(&self) -> Value {
        self.root
            .get("faq")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Case-insensitive exact match on a top-level key
    pub fn get_exact(&self, key_lower: &str) -> Option<&Value> {
        self.root
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v)
    }

    /// First top-level key containing the query as a case-insensitive
    /// substring, in document order
    pub fn find_substring(&self, key_lower: &str) -> Option<(&String, &Value)> {
        self.root
            .iter()
            .find(|(k, _)| k.to_lowercase().contains(key_lower))
    }
}

/// A parsed FAQ query.
///
/// Reserved section names resolve to fixed projections; everything else is
/// a free-text field lookup. Parsing is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqQuery {
    All,
    Company,
    Products,
    Pricing,
    Faq,
    Field(String),
}

impl FaqQuery {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "all" => FaqQuery::All,
            "company" => FaqQuery::Company,
            "products" => FaqQuery::Products,
            "pricing" => FaqQuery::Pricing,
            "faq" => FaqQuery::Faq,
            other => FaqQuery::Field(other.to_string()),
        }
    }
}

/// Read-only lookup front end over a loaded [`FaqDocument`].
///
/// Constructed with its document and passed explicitly to whatever performs
/// lookups; there is no ambient global copy.
#[derive(Debug, Clone, Default)]
pub struct FaqStore {
    doc: FaqDocument,
}

impl FaqStore {
    pub fn new(doc: FaqDocument) -> Self {
        Self { doc }
    }

    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::new(FaqDocument::load(path))
    }

    pub fn document(&self) -> &FaqDocument {
        &self.doc
    }

    /// Resolve a free-text query to a response string.
    ///
    /// Resolution order: empty store, reserved sections, exact key match,
    /// substring key match, not-found message. All matches are rendered as
    /// pretty-printed JSON.
    pub fn lookup(&self, raw: &str) -> String {
        if self.doc.is_empty() {
            return NO_DATA_MESSAGE.to_string();
        }

        match FaqQuery::parse(raw) {
            FaqQuery::All => pretty(&self.doc.all()),
            FaqQuery::Company => pretty(&self.doc.company_info()),
            FaqQuery::Products => pretty(&self.doc.products()),
            FaqQuery::Pricing => pretty(&self.doc.pricing()),
            FaqQuery::Faq => pretty(&self.doc.faq()),
            FaqQuery::Field(key) => {
                if let Some(value) = self.doc.get_exact(&key) {
                    return pretty(value);
                }
                if let Some((name, value)) = self.doc.find_substring(&key) {
                    let mut wrapped = Map::new();
                    wrapped.insert(name.clone(), value.clone());
                    return pretty(&Value::Object(wrapped));
                }
                format!(
                    "No information found for query: {}. Available sections: {}",
                    raw, SECTION_NAMES
                )
            }
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
