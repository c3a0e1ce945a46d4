//! Analysis-prompt rendering.
//!
//! Keep the prompt compact: basic exception info, the top business frames
//! with source context for model grounding, then the required output shape.

use crate::model::{LogRecord, StackFrame};

/// At most this many frames are rendered into a prompt.
pub const MAX_PROMPT_FRAMES: usize = 5;

/// Source lookup used to attach code context to stack frames.
///
/// Implementations must never fail: any lookup problem (missing file,
/// unknown class, invalid frame) yields an empty sequence, so prompt
/// construction cannot abort because of a snippet failure.
pub trait SnippetSource {
    /// Lines around `frame.line_number` in the frame's source file, covering
    /// `line - (context_lines - 1) ..= line + (context_lines - 1)` clamped to
    /// the file. Empty when the source cannot be resolved.
    fn fetch_snippet(&self, frame: &StackFrame, context_lines: usize) -> Vec<String>;
}

/// A snippet source that never resolves anything. Useful when source lookup
/// is disabled and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnippets;

impl SnippetSource for NoSnippets {
    fn fetch_snippet(&self, _frame: &StackFrame, _context_lines: usize) -> Vec<String> {
        Vec::new()
    }
}

/// Renders the full analysis prompt for one record.
///
/// Section order is fixed: role instruction, basic info, up to
/// [`MAX_PROMPT_FRAMES`] frames (record order, never re-sorted) with optional
/// source context, the four-point analysis request, and the required JSON
/// output shape.
pub fn build_analysis_prompt<S: SnippetSource>(
    record: &LogRecord,
    snippets: &S,
    context_lines: usize,
) -> String {
    let mut s = String::new();

    s.push_str(
        "You are an expert in production exception analysis. Analyze the exception log \
         below and provide a professional diagnosis.\n\n",
    );

    s.push_str("=== Basic Info ===\n");
    s.push_str(&format!(
        "Timestamp: {}\n",
        record.timestamp.as_deref().unwrap_or("unknown")
    ));
    s.push_str(&format!("Level: {}\n", record.level));
    s.push_str(&format!(
        "Exception class: {}\n",
        record.exception_class.as_deref().unwrap_or("unknown")
    ));
    s.push_str(&format!("Exception message: {}\n\n", record.exception_message));

    if !record.stack_frames.is_empty() {
        s.push_str("=== Business Stack Frames ===\n");
        for (i, frame) in record.stack_frames.iter().take(MAX_PROMPT_FRAMES).enumerate() {
            s.push_str(&format!(
                "{}. {}.{}({}:{})\n",
                i + 1,
                frame.class_name,
                frame.method_name,
                frame.simple_class_name(),
                frame.line_number
            ));
            push_snippet(&mut s, frame, snippets, context_lines);
            s.push('\n');
        }
    }

    s.push_str("=== Analysis Request ===\n");
    s.push_str("1. Root cause: identify the underlying cause of this exception\n");
    s.push_str("2. Summary: describe the problem in one or two concise sentences\n");
    s.push_str("3. Fix suggestion: give concrete remediation steps and code changes\n");
    s.push_str("4. Related location: point at the code position that most likely needs the change\n\n");

    s.push_str("Respond with the analysis in exactly this JSON shape:\n");
    s.push_str("{\n");
    s.push_str("  \"rootCause\": \"...\",\n");
    s.push_str("  \"summary\": \"...\",\n");
    s.push_str("  \"fixSuggestion\": \"...\",\n");
    s.push_str("  \"relatedLocation\": \"...\"\n");
    s.push_str("}\n");

    s
}

/// Indented source listing with a `>` marker on the faulting line. The
/// numbering start mirrors the locator's window clamp so the marker lands on
/// `frame.line_number`.
fn push_snippet<S: SnippetSource>(
    s: &mut String,
    frame: &StackFrame,
    snippets: &S,
    context_lines: usize,
) {
    let lines = snippets.fetch_snippet(frame, context_lines);
    if lines.is_empty() {
        return;
    }

    s.push_str("   Source context:\n");
    let start = (frame.line_number - (context_lines as i32 - 1)).max(1);
    for (offset, text) in lines.iter().enumerate() {
        let line_no = start + offset as i32;
        let marker = if line_no == frame.line_number { ">" } else { " " };
        s.push_str(&format!("   {} {:4}: {}\n", marker, line_no, text.trim()));
    }
}
