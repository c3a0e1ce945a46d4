//! Best-effort extraction of an [`AnalysisResult`] from raw model output.
//!
//! The model is instructed to answer in a fixed four-field JSON shape, but
//! real output routinely arrives wrapped in prose, fenced, or slightly
//! malformed. A tolerant literal field scan (not a strict JSON parser) keeps
//! the fallback behavior stable across all of that; upgrading to strict
//! parsing would change which inputs fall back.

use tracing::debug;

use crate::model::{AnalysisResult, LogRecord, StackFrame};

/// Rendered when a record has no frames to point at.
const UNKNOWN_LOCATION: &str = "unknown location";

/// Interprets raw model output. Never fails: every path ends in a fully
/// populated result — parsed fields, or the default fallback when the
/// required `rootCause` field cannot be recovered.
pub fn interpret(raw_response: &str, record: &LogRecord) -> AnalysisResult {
    let payload = json_candidate(raw_response);

    let root_cause = extract_field(payload, "rootCause");
    if root_cause.is_empty() {
        debug!(
            response_len = raw_response.len(),
            "no usable rootCause in model output; using the default result"
        );
        return default_result(record);
    }

    AnalysisResult {
        root_cause,
        summary: extract_field(payload, "summary"),
        fix_suggestion: extract_field(payload, "fixSuggestion"),
        related_location: extract_field(payload, "relatedLocation"),
    }
}

/// Deterministic result for when the model answered but the answer could not
/// be interpreted.
pub fn default_result(record: &LogRecord) -> AnalysisResult {
    let class = exception_class(record);
    AnalysisResult {
        root_cause: format!("Exception type: {} - {}", class, record.exception_message),
        summary: format!("A {class} exception occurred; the related code path needs review"),
        fix_suggestion: "Check the business code pointed at by the stack trace for common \
                         problems such as null dereferences, index out of bounds, and invalid \
                         casts"
            .to_string(),
        related_location: top_frame_location(record),
    }
}

/// Deterministic result for when the analysis call itself failed. Worded
/// differently from [`default_result`] so callers (and tests) can tell the
/// two degradation paths apart.
pub fn unavailable_result(record: &LogRecord, error: &str) -> AnalysisResult {
    let class = exception_class(record);
    AnalysisResult {
        root_cause: format!("AI analysis temporarily unavailable: {error}"),
        summary: format!("The log contains a {class} exception"),
        fix_suggestion: "Retry later, or analyze the code manually starting from the stack trace"
            .to_string(),
        related_location: top_frame_location(record),
    }
}

/// The substring from the first `{` to the last `}` when both exist in
/// order; otherwise the whole text.
fn json_candidate(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

/// Literal scan for `"<field>": "` (then the tight `"<field>":"` variant),
/// returning the content up to the next unescaped quote. Tolerates missing
/// fields, surrounding noise, and any field order. Unterminated values count
/// as missing.
fn extract_field(payload: &str, field: &str) -> String {
    let spaced = format!("\"{field}\": \"");
    let tight = format!("\"{field}\":\"");

    let start = payload
        .find(&spaced)
        .map(|i| i + spaced.len())
        .or_else(|| payload.find(&tight).map(|i| i + tight.len()));
    let Some(start) = start else {
        return String::new();
    };

    let rest = &payload[start..];
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => return rest[..idx].to_string(),
            _ => {}
        }
    }
    String::new()
}

fn exception_class(record: &LogRecord) -> &str {
    record.exception_class.as_deref().unwrap_or("UnknownException")
}

fn top_frame_location(record: &LogRecord) -> String {
    record
        .stack_frames
        .first()
        .map(StackFrame::location)
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}
