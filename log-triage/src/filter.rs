//! Narrowing a record's stack to business-relevant frames.

use tracing::debug;

use crate::classify::PackagePrefixClassifier;
use crate::model::LogRecord;

/// Replaces a record's frames with the business-relevant subsequence.
///
/// Selection keeps frames that are business code *and* carry a valid line
/// number, in their original order. When the selection is empty but the
/// record had frames, the very first original frame is kept so downstream
/// consumers always have a location to report against. An already-filtered
/// record passes through unchanged (idempotent).
#[derive(Debug, Clone)]
pub struct FrameFilter {
    classifier: PackagePrefixClassifier,
}

impl FrameFilter {
    pub fn new(classifier: PackagePrefixClassifier) -> Self {
        Self { classifier }
    }

    pub fn filter(&self, mut record: LogRecord) -> LogRecord {
        if record.stack_frames.is_empty() {
            return record;
        }

        let mut kept: Vec<_> = record
            .stack_frames
            .iter()
            .filter(|f| self.classifier.is_business_frame(f) && f.line_number > 0)
            .cloned()
            .collect();

        if kept.is_empty() {
            debug!(
                total = record.stack_frames.len(),
                "no business frames with valid lines; keeping the first frame"
            );
            kept.push(record.stack_frames[0].clone());
        }

        // The filter is the source of truth for the flag.
        for frame in &mut kept {
            frame.business_flag = self.classifier.is_business_frame(frame);
        }

        record.stack_frames = kept;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StackFrame;

    fn frame(class: &str, line: i32) -> StackFrame {
        StackFrame {
            class_name: class.to_string(),
            method_name: "run".to_string(),
            line_number: line,
            business_flag: false,
        }
    }

    fn record(frames: Vec<StackFrame>) -> LogRecord {
        LogRecord {
            project_name: "order-web".to_string(),
            timestamp: None,
            level: "ERROR".to_string(),
            exception_class: Some("java.lang.NullPointerException".to_string()),
            exception_message: String::new(),
            stack_frames: frames,
            raw_log: String::new(),
        }
    }

    fn filter() -> FrameFilter {
        FrameFilter::new(PackagePrefixClassifier::default())
    }

    #[test]
    fn keeps_only_business_frames_with_valid_lines() {
        let filtered = filter().filter(record(vec![
            frame("com.dyyl.order.RegistrationServiceImpl", 694),
            frame("java.util.stream.ReferencePipeline$2$1", 174),
            frame("java.util.ArrayList$ArrayListSpliterator", 1384),
        ]));
        assert_eq!(filtered.stack_frames.len(), 1);
        assert_eq!(
            filtered.stack_frames[0].class_name,
            "com.dyyl.order.RegistrationServiceImpl"
        );
        assert!(filtered.stack_frames[0].business_flag);
    }

    #[test]
    fn falls_back_to_first_frame_when_nothing_is_business() {
        let filtered = filter().filter(record(vec![
            frame("java.util.ArrayList", 101),
            frame("org.springframework.web.filter.OncePerRequestFilter", 112),
        ]));
        assert_eq!(filtered.stack_frames.len(), 1);
        assert_eq!(filtered.stack_frames[0].class_name, "java.util.ArrayList");
        assert!(!filtered.stack_frames[0].business_flag);
    }

    #[test]
    fn business_frame_with_invalid_line_is_excluded() {
        let filtered = filter().filter(record(vec![
            frame("com.dyyl.order.OrderService", 0),
            frame("com.dyyl.order.PaymentService", 55),
        ]));
        assert_eq!(filtered.stack_frames.len(), 1);
        assert_eq!(filtered.stack_frames[0].class_name, "com.dyyl.order.PaymentService");
    }

    #[test]
    fn empty_stack_stays_empty() {
        let filtered = filter().filter(record(Vec::new()));
        assert!(filtered.stack_frames.is_empty());
    }

    #[test]
    fn preserves_original_order() {
        let filtered = filter().filter(record(vec![
            frame("com.dyyl.a.First", 10),
            frame("java.util.ArrayList", 20),
            frame("com.dyyl.b.Second", 30),
        ]));
        let classes: Vec<_> = filtered
            .stack_frames
            .iter()
            .map(|f| f.class_name.as_str())
            .collect();
        assert_eq!(classes, ["com.dyyl.a.First", "com.dyyl.b.Second"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let f = filter();
        for frames in [
            vec![
                frame("com.dyyl.order.RegistrationServiceImpl", 694),
                frame("java.util.stream.ReferencePipeline$2$1", 174),
            ],
            vec![frame("java.util.ArrayList", 101)],
            vec![frame("com.dyyl.order.OrderService", 0)],
            Vec::new(),
        ] {
            let once = f.filter(record(frames));
            let twice = f.filter(once.clone());
            assert_eq!(once, twice);
        }
    }
}
