//! Compiled JSON Schema contracts for tool inputs and outputs.

use jsonschema::Draft;
use serde_json::Value;

/// Bound on the number of violations reported in a single message.
const MAX_ERRORS: usize = 5;

/// A schema document together with its compiled validator.
///
/// The document is what `tools/list` publishes; the validator is what
/// `tools/call` enforces, so the two can never drift apart.
pub struct Contract {
    document: Value,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl Contract {
    /// Compile a draft 2020-12 schema.
    pub fn compile(document: Value) -> Result<Self, String> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&document)
            .map_err(|e| format!("failed to compile schema: {e}"))?;
        Ok(Self {
            document,
            validator,
        })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Validate an instance; the error lists the first few violations.
    pub fn validate(&self, instance: &Value) -> Result<(), String> {
        if self.validator.is_valid(instance) {
            return Ok(());
        }

        let lines: Vec<String> = self
            .validator
            .iter_errors(instance)
            .take(MAX_ERRORS)
            .map(|e| e.to_string())
            .collect();

        Err(lines.join("; "))
    }
}

/// Object schema with the given properties and required keys.
pub fn object(properties: Value, required: &[&str]) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
