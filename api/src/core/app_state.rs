use std::path::Path;

use llm_client::{ChatCompletionService, ChatModelConfig, HealthService};
use log_triage::{FrameFilter, LogAnalyzer, PackagePrefixClassifier, RegexLogParser};
use source_locator::LocalCodeLocator;

use crate::error_handler::AppError;

/// Concrete analyzer wiring used by the HTTP handlers.
pub type AppAnalyzer = LogAnalyzer<ChatCompletionService, LocalCodeLocator>;

/// Shared, read-only state for all HTTP handlers. Built once at startup and
/// passed around in an `Arc`; nothing in here is mutated per request.
pub struct AppState {
    pub parser: RegexLogParser,
    pub filter: FrameFilter,
    pub analyzer: AppAnalyzer,
    /// Kept alongside the analyzer for the health probe.
    pub llm_config: ChatModelConfig,
    pub health: HealthService,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// - `BUSINESS_PACKAGES`      = comma-separated business package prefixes
    ///   (default `com.dyyl,com.wkb`)
    /// - `SNIPPET_CONTEXT_LINES`  = snippet window width (default `3`)
    /// - `CODE_LOCATOR_PATH_FILE` = project-path map location
    ///   (default `code-locator-paths.json`)
    /// - `CODE_LOCATOR_ENABLED`   = toggle for source lookup (default `true`)
    /// - plus the `LLM_*` variables read by [`ChatModelConfig::from_env`].
    pub fn from_env() -> Result<Self, AppError> {
        let classifier = PackagePrefixClassifier::from_csv(&env_or("BUSINESS_PACKAGES", ""));

        let context_lines = match std::env::var("SNIPPET_CONTEXT_LINES") {
            Ok(v) if !v.trim().is_empty() => {
                v.trim().parse::<usize>().map_err(|_| AppError::Config {
                    var: "SNIPPET_CONTEXT_LINES",
                    reason: "expected a positive integer",
                })?
            }
            _ => 3,
        };

        let locator_enabled = env_or("CODE_LOCATOR_ENABLED", "true") != "false";
        let path_file = env_or("CODE_LOCATOR_PATH_FILE", "code-locator-paths.json");
        let locator = LocalCodeLocator::from_path_file(Path::new(&path_file), locator_enabled);

        let llm_config = ChatModelConfig::from_env()?;
        let model = ChatCompletionService::new(llm_config.clone())?;
        let health = HealthService::new(Some(10))?;

        Ok(Self {
            parser: RegexLogParser::new(classifier.clone()),
            filter: FrameFilter::new(classifier),
            analyzer: LogAnalyzer::new(model, locator, context_lines),
            llm_config,
            health,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
