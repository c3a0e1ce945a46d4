//! Filesystem-backed source lookup for stack frames.
//!
//! Resolution is driven by a project-path map (`code-locator-paths.json` by
//! default): a JSON object from project name to source-root directory. A
//! fully qualified class maps to `<package path>/<SimpleClass>.java` under
//! one of the configured roots; inner classes (`Outer$Inner`) resolve to the
//! enclosing top-level class file.
//!
//! The locator implements [`log_triage::SnippetSource`] and therefore never
//! errors: every failure (missing map, unknown class, unreadable file,
//! out-of-range line) is logged and yields an empty snippet.

pub mod locator;

pub use locator::LocalCodeLocator;
