//! Structured-output handling at the completion boundary.
//!
//! Models rarely return clean JSON: replies arrive wrapped in code fences,
//! preceded by prose, or with raw newlines inside string literals. The
//! helpers here recover a typed value from that kind of output, falling back
//! to labeled-field extraction for routing decisions.

use regex::Regex;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

use crate::error::{FlowError, FlowResult};
use crate::models::Decision;

/// Pull the first JSON object out of a raw model response and deserialize it.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> FlowResult<T> {
    let cleaned = strip_code_fences(raw);
    let window = brace_window(&cleaned).unwrap_or(&cleaned);

    serde_json::from_str(window).or_else(|first_err| {
        let sanitized = escape_control_chars(window);
        serde_json::from_str(&sanitized).map_err(|_| {
            FlowError::Completion(format!("unparsable structured output: {first_err}"))
        })
    })
}

/// Parse a routing decision, tolerating non-JSON replies of the form
/// `next: SOMETHING` / `reason: ...`.
pub fn parse_decision(raw: &str) -> FlowResult<Decision> {
    if let Ok(decision) = parse_json::<Decision>(raw) {
        return Ok(decision);
    }

    let next_re =
        Regex::new(r#"(?i)"?next"?\s*[:=]\s*"?([A-Za-z_][A-Za-z0-9_]*)"?"#).map_err(FlowError::completion)?;
    let reason_re = Regex::new(r#"(?i)"?reason"?\s*[:=]\s*"?([^"\n}]+)"?"#).map_err(FlowError::completion)?;

    let next = next_re
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            FlowError::Completion(format!("no routing decision in response: {}", crate::util::truncate(raw, 200)))
        })?;

    let reason = reason_re
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Ok(Decision { next, reason })
}

/// Render an instruction block asking the model to answer with a single line
/// of JSON conforming to the given type's schema.
pub fn schema_instructions<T: JsonSchema>() -> String {
    let schema = schema_for!(T);
    let compact = serde_json::to_string(&schema).unwrap_or_default();
    format!(
        "Respond with a single line of valid JSON conforming to this schema, \
         with no surrounding text or code fences:\n{compact}"
    )
}

fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.contains("```") {
        return trimmed.to_string();
    }
    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn brace_window(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&s[start..=end])
}

/// Escape raw control characters inside string literals. Models that were
/// asked for single-line JSON still emit literal newlines in code snippets.
fn escape_control_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in s.chars() {
        if in_string && !escaped {
            match c {
                '\n' => {
                    out.push_str("\\n");
                    continue;
                }
                '\r' => continue,
                '\t' => {
                    out.push_str("\\t");
                    continue;
                }
                _ => {}
            }
        }
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            in_string = !in_string;
        }
        out.push(c);
    }
    out
}
