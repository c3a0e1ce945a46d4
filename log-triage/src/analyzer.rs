//! The composite analysis operation: prompt → model call → interpretation.

use std::future::Future;

use tracing::{debug, error};

use crate::interpret::{interpret, unavailable_result};
use crate::model::{AnalysisResult, LogRecord};
use crate::prompt::{SnippetSource, build_analysis_prompt};

/// The external reasoning call: send a prompt, receive model text.
///
/// `Ok`/`Err` is how the analyzer tells the two degradation paths apart —
/// a transport/provider failure produces the unavailable-service result,
/// while a successful call with unusable text produces the default result.
pub trait AnalysisModel {
    type Error: std::fmt::Display;

    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl AnalysisModel for llm_client::chat::ChatCompletionService {
    type Error = llm_client::error::LlmClientError;

    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        self.generate(prompt, None)
    }
}

/// Runs the full analysis for one filtered record.
///
/// Stateless across requests; holds only the model client, the snippet
/// source, and the configured snippet context width.
#[derive(Debug)]
pub struct LogAnalyzer<M, S> {
    model: M,
    snippets: S,
    context_lines: usize,
}

impl<M: AnalysisModel, S: SnippetSource> LogAnalyzer<M, S> {
    pub fn new(model: M, snippets: S, context_lines: usize) -> Self {
        Self {
            model,
            snippets,
            context_lines,
        }
    }

    /// Analyzes a record. Infallible by contract: a failing model call or an
    /// unusable response both degrade to a fully populated fallback result.
    pub async fn analyze(&self, record: &LogRecord) -> AnalysisResult {
        let prompt = build_analysis_prompt(record, &self.snippets, self.context_lines);
        debug!(
            prompt_len = prompt.len(),
            frames = record.stack_frames.len(),
            "analysis prompt built"
        );

        match self.model.complete(&prompt).await {
            Ok(response) => interpret(&response, record),
            Err(err) => {
                error!(error = %err, "analysis model call failed; degrading to fallback");
                unavailable_result(record, &err.to_string())
            }
        }
    }
}
