use crate::envelope::Envelope;
use crate::status::Status;
use anyhow::{anyhow, Result};
use jsonschema::{Draft, JSONSchema, ValidationError};
use serde_json::Value;

const JSEND_SCHEMA: &str = include_str!("../../../contracts/envelopes/jsend.json");

/// Checks JSON documents against the JSend wire-format schema.
///
/// Decoding already enforces the per-status required keys; the schema also
/// pins value types (`message` string, `code` 64-bit integer or null) and is
/// what external producers are linted against.
///
/// The schema is a `oneOf` over one definition per status. When a document
/// names a known status, failures are reported against that status's
/// definition alone instead of the whole `oneOf`.
pub struct JSendValidator {
    schema: JSONSchema,
    branches: Vec<(Status, JSONSchema)>,
}

fn compile(schema: &Value) -> Result<JSONSchema> {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| anyhow!("Failed to compile JSend schema: {}", e))
}

fn describe<'a>(errors: impl Iterator<Item = ValidationError<'a>>) -> Vec<String> {
    errors
        .map(|error| format!("{} at {}", error, error.instance_path))
        .collect()
}

impl JSendValidator {
    pub fn new() -> Result<Self> {
        let schema_value: Value = serde_json::from_str(JSEND_SCHEMA)
            .map_err(|e| anyhow!("Failed to parse JSend schema: {}", e))?;

        let mut branches = Vec::with_capacity(Status::ALL.len());
        for status in Status::ALL {
            let definition = &schema_value["definitions"][status.as_str()];
            if definition.is_null() {
                return Err(anyhow!("JSend schema has no definition for {}", status));
            }
            branches.push((status, compile(definition)?));
        }

        Ok(Self {
            schema: compile(&schema_value)?,
            branches,
        })
    }

    pub fn validate(&self, envelope: &Envelope) -> Result<()> {
        self.validate_json(&Value::Object(envelope.to_record()))
    }

    pub fn validate_json(&self, document: &Value) -> Result<()> {
        if self.schema.is_valid(document) {
            return Ok(());
        }

        let status = document
            .get("status")
            .and_then(Value::as_str)
            .and_then(|status| status.parse::<Status>().ok());

        if let Some((status, branch)) = status.and_then(|status| self.branch(status)) {
            if let Err(errors) = branch.validate(document) {
                return Err(anyhow!(
                    "JSend validation failed for {} envelope: {}",
                    status,
                    describe(errors).join(", ")
                ));
            }
        }

        let error_messages = match self.schema.validate(document) {
            Ok(()) => Vec::new(),
            Err(errors) => describe(errors),
        };

        Err(anyhow!(
            "JSend validation failed: {}",
            error_messages.join(", ")
        ))
    }

    fn branch(&self, status: Status) -> Option<(Status, &JSONSchema)> {
        self.branches
            .iter()
            .find(|(branch, _)| *branch == status)
            .map(|(branch, schema)| (*branch, schema))
    }
}

impl Envelope {
    pub fn validate(&self) -> Result<()> {
        JSendValidator::new()?.validate(self)
    }

    pub fn validate_with(&self, validator: &JSendValidator) -> Result<()> {
        validator.validate(self)
    }
}
