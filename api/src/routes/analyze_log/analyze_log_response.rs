use log_triage::model::{AnalysisResult, LogRecord};
use serde::Serialize;

/// Success payload of the analyze route: the AI analysis plus an echo of the
/// parsed log basics.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeLogResponse {
    pub analysis: AnalysisResult,
    pub log_info: LogInfo,
}

/// Basic parsed-log facts echoed back alongside the analysis. Taken from the
/// record as parsed, before frame filtering.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInfo {
    pub exception_class: Option<String>,
    pub exception_message: String,
    pub timestamp: Option<String>,
    pub level: String,
}

impl LogInfo {
    pub fn from_record(record: &LogRecord) -> Self {
        Self {
            exception_class: record.exception_class.clone(),
            exception_message: record.exception_message.clone(),
            timestamp: record.timestamp.clone(),
            level: record.level.clone(),
        }
    }
}
