//! Domain entities for a single log-analysis request.
//!
//! All three entities are request-local: they are built fresh per request,
//! flow through parse → filter → analyze, and are dropped with the response.

use serde::Serialize;

/// One parsed stack-trace frame.
///
/// `class_name` and `method_name` are non-empty on every constructed frame;
/// segments that do not match the frame grammar are dropped by the parser
/// rather than constructed with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Fully qualified declaring type, e.g. `com.dyyl.order.OrderService`.
    pub class_name: String,
    /// Method (or synthetic lambda) name.
    pub method_name: String,
    /// 1-based source line; `<= 0` means unknown (`-1` when the grammar
    /// carried no line number).
    pub line_number: i32,
    /// Whether the frame belongs to business code. Provisional after parsing;
    /// authoritative only once [`crate::filter::FrameFilter`] has run.
    pub business_flag: bool,
}

impl StackFrame {
    /// `class.method:line` rendering used in prompts and fallback results.
    pub fn location(&self) -> String {
        format!("{}.{}:{}", self.class_name, self.method_name, self.line_number)
    }

    /// The type name without its package, e.g. `OrderService`.
    pub fn simple_class_name(&self) -> &str {
        match self.class_name.rfind('.') {
            Some(idx) => &self.class_name[idx + 1..],
            None => &self.class_name,
        }
    }
}

/// Structured view of one raw exception log.
///
/// Field defaults mirror what the label extraction could not find: empty
/// project, `None` timestamp, `UNKNOWN` level, `None` exception class.
/// `stack_frames` keeps the source order (throw site first); later stages
/// only filter or annotate frames, never reorder them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub project_name: String,
    pub timestamp: Option<String>,
    pub level: String,
    pub exception_class: Option<String>,
    pub exception_message: String,
    pub stack_frames: Vec<StackFrame>,
    /// Original input, verbatim, for audit and fallback rendering.
    pub raw_log: String,
}

/// Final analysis payload returned to the caller.
///
/// Every field is populated on every path: parsed model output, the default
/// fallback, or the unavailable-service fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub root_cause: String,
    pub summary: String,
    pub fix_suggestion: String,
    pub related_location: String,
}
