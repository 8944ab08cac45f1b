//! JSend linter
//!
//! Decodes JSend documents, checks them against the JSend schema and renders
//! envelopes in canonical form.

use anyhow::{Context, Result};
use jsend::{Encoding, Envelope, JSendValidator, ResponseSink};
use serde_json::Value;
use tracing::debug;

/// How envelopes are written to the output sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub pretty: bool,
}

impl OutputOptions {
    pub fn encoding(&self) -> Encoding {
        if self.pretty {
            Encoding::Pretty
        } else {
            Encoding::Compact
        }
    }
}

/// Decodes `input` as a JSend document, optionally validating it against the
/// bundled schema first so type errors are reported with their JSON pointer.
pub fn check_document(input: &str, schema: bool) -> Result<Envelope> {
    if schema {
        let document: Value =
            serde_json::from_str(input).context("JSend JSON can not be decoded")?;
        JSendValidator::new()?.validate_json(&document)?;
        debug!("document matches JSend schema");
    }

    let envelope = Envelope::decode(input)?;
    debug!(status = %envelope.status(), "document decoded");
    Ok(envelope)
}

/// Parses a `--data` argument. Missing data stays absent.
pub fn parse_data(data: Option<&str>) -> Result<Option<Value>> {
    data.map(|raw| serde_json::from_str(raw).with_context(|| format!("Invalid JSON data: {}", raw)))
        .transpose()
}

pub fn emit<S: ResponseSink>(envelope: &Envelope, sink: &mut S, options: OutputOptions) -> Result<()> {
    envelope
        .send_as(sink, options.encoding())
        .context("Failed to write JSend response")
}
