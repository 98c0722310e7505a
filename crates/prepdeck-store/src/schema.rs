//! Versioned on-disk schema for the history file.
//!
//! The payload is a single JSON document: an envelope carrying a schema
//! version and the result list, newest first. Early builds persisted a bare
//! array; loading migrates that shape transparently. Individual entries
//! that no longer deserialize are dropped with a warning instead of failing
//! the whole file, so one bad record cannot hide the rest of the history.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use prepdeck_core::result::InterviewResult;

/// Current history schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    schema_version: u32,
    results: &'a [InterviewResult],
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    schema_version: u32,
    #[serde(default)]
    results: Vec<Value>,
}

/// Serialize a newest-first result list into the current envelope.
pub fn encode_history(results: &[InterviewResult]) -> Result<String> {
    serde_json::to_string_pretty(&Envelope {
        schema_version: SCHEMA_VERSION,
        results,
    })
    .context("failed to serialize history")
}

/// Parse a history payload, migrating legacy bare-array files and skipping
/// malformed entries.
pub fn decode_history(content: &str) -> Result<Vec<InterviewResult>> {
    let value: Value = serde_json::from_str(content).context("history file is not valid JSON")?;

    let raw_entries = match value {
        // Legacy payload: a bare array of results, no envelope.
        Value::Array(entries) => {
            tracing::info!("migrating legacy history payload to schema v{SCHEMA_VERSION}");
            entries
        }
        other => {
            let envelope: RawEnvelope = serde_json::from_value(other)
                .context("history file has neither an envelope nor a result array")?;
            if envelope.schema_version > SCHEMA_VERSION {
                tracing::warn!(
                    found = envelope.schema_version,
                    supported = SCHEMA_VERSION,
                    "history file written by a newer prepdeck; loading best-effort"
                );
            }
            envelope.results
        }
    };

    let total = raw_entries.len();
    let results: Vec<InterviewResult> = raw_entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!("skipping malformed history entry: {e}");
                None
            }
        })
        .collect();

    if results.len() < total {
        tracing::warn!(
            dropped = total - results.len(),
            kept = results.len(),
            "history contained malformed entries"
        );
    }

    Ok(results)
}
