//! Regex extraction of a [`LogRecord`] from raw exception-log text.
//!
//! The ingested logs carry fixed Chinese field labels (`异常项目:`,
//! `异常时间:`, ...). Each label is matched independently, so a missing
//! section never blocks extraction of the others. The stack block is the
//! content between `详细信息:` + `[` and the first `]` — or end of input when
//! the closing bracket is missing, which truncated logs routinely are.

use regex::Regex;
use tracing::{trace, warn};

use crate::classify::PackagePrefixClassifier;
use crate::model::{LogRecord, StackFrame};

/// Pattern-based log parser. Compiles its patterns once at construction and
/// is reused across requests.
#[derive(Debug)]
pub struct RegexLogParser {
    project_re: Regex,
    timestamp_re: Regex,
    level_re: Regex,
    descriptor_re: Regex,
    stack_block_re: Regex,
    frame_re: Regex,
    frame_split_re: Regex,
    classifier: PackagePrefixClassifier,
}

impl RegexLogParser {
    /// The classifier pre-populates `business_flag` on parsed frames; the
    /// authoritative pass happens later in [`crate::filter::FrameFilter`].
    pub fn new(classifier: PackagePrefixClassifier) -> Self {
        Self {
            project_re: Regex::new(r"异常项目: (.+)").expect("project pattern"),
            timestamp_re: Regex::new(r"异常时间: (\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})")
                .expect("timestamp pattern"),
            level_re: Regex::new(r"异常级别: (\w+)").expect("level pattern"),
            descriptor_re: Regex::new(r"异常描述: (.+)").expect("descriptor pattern"),
            stack_block_re: Regex::new(r"详细信息:\s*\[([\s\S]*?)(?:\]|$)")
                .expect("stack block pattern"),
            frame_re: Regex::new(r"([^(]+)\(([^:]+)(?::(\d+))?\)").expect("frame pattern"),
            frame_split_re: Regex::new(r",\s*\r?\n?|,\s+").expect("frame splitter"),
            classifier,
        }
    }

    /// Extracts a structured record from raw log text.
    ///
    /// Returns `None` only when none of the labeled sections (project,
    /// timestamp, level, descriptor, stack block) matched at all; any partial
    /// match yields a best-effort record with defaults.
    pub fn parse(&self, raw_log: &str) -> Option<LogRecord> {
        let project = first_group(&self.project_re, raw_log);
        let timestamp = first_group(&self.timestamp_re, raw_log);
        let level = first_group(&self.level_re, raw_log);
        let descriptor = first_group(&self.descriptor_re, raw_log);
        let stack_block = self
            .stack_block_re
            .captures(raw_log)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());

        if project.is_none()
            && timestamp.is_none()
            && level.is_none()
            && descriptor.is_none()
            && stack_block.is_none()
        {
            warn!(len = raw_log.len(), "no recognizable sections in log input");
            return None;
        }

        // The descriptor splits on the FIRST ": " into class and message;
        // without a separator the whole descriptor is the class.
        let (exception_class, exception_message) = match descriptor {
            Some(desc) => match desc.split_once(": ") {
                Some((class, message)) => (Some(class.to_string()), message.to_string()),
                None => (Some(desc), String::new()),
            },
            None => (None, String::new()),
        };

        let stack_frames = stack_block
            .map(|block| self.parse_frames(&block))
            .unwrap_or_default();

        Some(LogRecord {
            project_name: project.unwrap_or_default(),
            timestamp,
            level: level.unwrap_or_else(|| "UNKNOWN".to_string()),
            exception_class,
            exception_message,
            stack_frames,
            raw_log: raw_log.to_string(),
        })
    }

    fn parse_frames(&self, block: &str) -> Vec<StackFrame> {
        self.frame_split_re
            .split(block)
            .filter_map(|segment| self.parse_frame(segment.trim()))
            .collect()
    }

    /// One frame segment: `<fully.qualified.method>(<file>[:<line>])`.
    /// Segments that do not match the grammar, or whose method path has no
    /// package separator, are skipped as log noise.
    fn parse_frame(&self, segment: &str) -> Option<StackFrame> {
        let caps = self.frame_re.captures(segment)?;
        let method_path = caps.get(1)?.as_str().trim();

        let Some(last_dot) = method_path.rfind('.') else {
            trace!(segment, "frame segment has no package separator; skipping");
            return None;
        };
        let class_name = &method_path[..last_dot];
        let method_name = &method_path[last_dot + 1..];
        if class_name.is_empty() || method_name.is_empty() {
            trace!(segment, "frame segment yields empty class or method; skipping");
            return None;
        }

        let line_number = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .unwrap_or(-1);

        Some(StackFrame {
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            line_number,
            business_flag: self.classifier.is_business_class(class_name),
        })
    }
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "异常项目: order-web\n\
IP地址: 172.22.1.15\n\
异常级别: ERROR\n\
异常来源: com.dyyl.order.controller.YlMeetingSignController\n\
异常时间: 2025-09-27 15:48:12\n\
日志内容: 上传图片失败\n\
异常描述: java.lang.NullPointerException\n\
详细信息:\n \
[com.dyyl.order.meeting.application.service.RegistrationServiceImpl.lambda$uploadShareImage$10(RegistrationServiceImpl.java:694), \
java.util.stream.ReferencePipeline$2$1.accept(ReferencePipeline.java:174), \
java.util.ArrayList$ArrayListSpliterator.forEachRemaining(ArrayList.java:1384), \
java.util.stream.AbstractPipeline.copyInto(AbstractPipeline.java:482), \
java.util.stream.AbstractPipeline.wrapAndCopyInto(AbstractPipeline.java:472), \
java.util.stream.ReduceOps$ReduceOp.evaluateSequential(ReduceOps.java:842)]\n";

    fn parser() -> RegexLogParser {
        RegexLogParser::new(PackagePrefixClassifier::default())
    }

    #[test]
    fn parses_full_labeled_log() {
        let record = parser().parse(SAMPLE_LOG).expect("record");

        assert_eq!(record.project_name, "order-web");
        assert_eq!(record.timestamp.as_deref(), Some("2025-09-27 15:48:12"));
        assert_eq!(record.level, "ERROR");
        assert_eq!(
            record.exception_class.as_deref(),
            Some("java.lang.NullPointerException")
        );
        assert_eq!(record.exception_message, "");
        assert_eq!(record.raw_log, SAMPLE_LOG);

        let frames = &record.stack_frames;
        assert_eq!(frames.len(), 6);

        assert_eq!(
            frames[0].class_name,
            "com.dyyl.order.meeting.application.service.RegistrationServiceImpl"
        );
        assert_eq!(frames[0].method_name, "lambda$uploadShareImage$10");
        assert_eq!(frames[0].line_number, 694);
        assert!(frames[0].business_flag);

        assert_eq!(frames[1].class_name, "java.util.stream.ReferencePipeline$2$1");
        assert_eq!(frames[1].method_name, "accept");
        assert_eq!(frames[1].line_number, 174);
        assert!(!frames[1].business_flag);

        assert_eq!(frames[5].class_name, "java.util.stream.ReduceOps$ReduceOp");
        assert_eq!(frames[5].method_name, "evaluateSequential");
        assert_eq!(frames[5].line_number, 842);
        assert!(!frames[5].business_flag);
    }

    #[test]
    fn frame_grammar_with_line_number() {
        let record = parser()
            .parse("详细信息: [com.a.b.C.method(C.java:42)]")
            .expect("record");
        assert_eq!(record.stack_frames.len(), 1);
        let frame = &record.stack_frames[0];
        assert_eq!(frame.class_name, "com.a.b.C");
        assert_eq!(frame.method_name, "method");
        assert_eq!(frame.line_number, 42);
    }

    #[test]
    fn frame_without_line_number_yields_minus_one() {
        let record = parser()
            .parse("详细信息: [com.a.b.C.method(Unknown Source)]")
            .expect("record");
        assert_eq!(record.stack_frames.len(), 1);
        assert_eq!(record.stack_frames[0].line_number, -1);
    }

    #[test]
    fn noise_segments_are_skipped() {
        let record = parser()
            .parse("详细信息: [garbage without parens, com.a.b.C.method(C.java:7), trailing noise]")
            .expect("record");
        assert_eq!(record.stack_frames.len(), 1);
        assert_eq!(record.stack_frames[0].line_number, 7);
    }

    #[test]
    fn frame_without_package_separator_is_dropped() {
        let record = parser()
            .parse("详细信息: [nodotmethod(File.java:10)]")
            .expect("record");
        assert!(record.stack_frames.is_empty());
    }

    #[test]
    fn stack_block_without_closing_bracket_is_accepted() {
        let record = parser()
            .parse("详细信息: [com.a.b.C.method(C.java:42), com.a.b.D.other(D.java:7)")
            .expect("record");
        assert_eq!(record.stack_frames.len(), 2);
    }

    #[test]
    fn descriptor_splits_on_first_colon_space() {
        let record = parser()
            .parse("异常描述: java.lang.IllegalStateException: context: not started")
            .expect("record");
        assert_eq!(
            record.exception_class.as_deref(),
            Some("java.lang.IllegalStateException")
        );
        assert_eq!(record.exception_message, "context: not started");
    }

    #[test]
    fn unmatched_sections_get_defaults() {
        let record = parser().parse("异常级别: WARN").expect("record");
        assert_eq!(record.level, "WARN");
        assert_eq!(record.project_name, "");
        assert_eq!(record.timestamp, None);
        assert_eq!(record.exception_class, None);
        assert_eq!(record.exception_message, "");
        assert!(record.stack_frames.is_empty());
    }

    #[test]
    fn level_defaults_to_unknown() {
        let record = parser().parse("异常项目: order-web").expect("record");
        assert_eq!(record.level, "UNKNOWN");
    }

    #[test]
    fn unrecognizable_input_yields_none() {
        assert!(parser().parse("completely unrelated text").is_none());
        assert!(parser().parse("").is_none());
    }

    #[test]
    fn malformed_timestamp_is_ignored() {
        let record = parser()
            .parse("异常时间: 2025/09/27 15:48\n异常级别: ERROR")
            .expect("record");
        assert_eq!(record.timestamp, None);
        assert_eq!(record.level, "ERROR");
    }
}
