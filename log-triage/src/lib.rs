//! Core pipeline for AI-assisted exception-log triage.
//!
//! One request flows through four stages:
//!
//! 1) **Parse** — [`parser::RegexLogParser`] extracts a [`model::LogRecord`]
//!    (timestamp, severity, exception descriptor, stack frames) from raw log
//!    text via fixed label patterns and the bracketed frame-list grammar.
//! 2) **Filter** — [`filter::FrameFilter`] narrows the stack to business
//!    frames (configured package prefixes, valid line numbers) with a
//!    guaranteed non-empty fallback when any frames existed at all.
//! 3) **Prompt** — [`prompt::build_analysis_prompt`] renders the record,
//!    attaching source context for the top frames through the
//!    [`prompt::SnippetSource`] trait.
//! 4) **Interpret** — [`interpret::interpret`] recovers the four-field
//!    analysis from whatever text the model produced, with deterministic
//!    fallbacks for unusable responses and failed calls.
//!
//! The crate is infallible past parsing: only "nothing in the input matched"
//! surfaces as an absent record; every later failure mode degrades to a
//! fully populated [`model::AnalysisResult`]. Model and source lookup are
//! trait seams ([`analyzer::AnalysisModel`], [`prompt::SnippetSource`]) with
//! static dispatch — no `async-trait`, no boxed trait objects.

pub mod analyzer;
pub mod classify;
pub mod filter;
pub mod interpret;
pub mod model;
pub mod parser;
pub mod prompt;

pub use analyzer::{AnalysisModel, LogAnalyzer};
pub use classify::PackagePrefixClassifier;
pub use filter::FrameFilter;
pub use model::{AnalysisResult, LogRecord, StackFrame};
pub use parser::RegexLogParser;
pub use prompt::{NoSnippets, SnippetSource};
