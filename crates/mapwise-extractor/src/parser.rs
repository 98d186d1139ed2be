//! Parse LLM output into mapping records

use crate::error::ExtractorError;
use mapwise_domain::MappingRecord;
use serde_json::Value;
use tracing::warn;

/// Parse an LLM JSON response into mapping records
///
/// The answer may be a single object or an array, optionally wrapped in a
/// Markdown code fence. Entries that do not form a valid record are skipped.
pub fn parse_llm_response(response: &str) -> Result<Vec<MappingRecord>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let entries = match json {
        Value::Array(entries) => entries,
        Value::Object(_) => vec![json],
        _ => {
            return Err(ExtractorError::InvalidFormat(
                "Expected JSON object or array".to_string(),
            ))
        }
    };

    let mut records = Vec::new();
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<MappingRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Failed to parse mapping {}: {}", idx, e),
        }
    }

    Ok(records)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // skip the opening fence line and a closing fence if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
