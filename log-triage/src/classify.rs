//! Business-frame classification by package prefix.

use crate::model::StackFrame;

/// Package prefixes treated as business code when nothing is configured.
pub const DEFAULT_BUSINESS_PACKAGES: &[&str] = &["com.dyyl", "com.wkb"];

/// Decides whether a stack frame belongs to business code (vs. framework or
/// library code) by prefix membership. First matching prefix wins; the set is
/// order-insensitive.
#[derive(Debug, Clone)]
pub struct PackagePrefixClassifier {
    prefixes: Vec<String>,
}

impl PackagePrefixClassifier {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Builds a classifier from a comma-separated prefix list, e.g. the
    /// `BUSINESS_PACKAGES` environment variable. Empty entries are skipped;
    /// an entirely empty input falls back to [`DEFAULT_BUSINESS_PACKAGES`].
    pub fn from_csv(csv: &str) -> Self {
        let prefixes: Vec<String> = csv
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if prefixes.is_empty() {
            Self::default()
        } else {
            Self::new(prefixes)
        }
    }

    /// True iff the class name is non-empty and starts with a configured
    /// business-package prefix.
    pub fn is_business_class(&self, class_name: &str) -> bool {
        if class_name.is_empty() {
            return false;
        }
        self.prefixes.iter().any(|p| class_name.starts_with(p.as_str()))
    }

    pub fn is_business_frame(&self, frame: &StackFrame) -> bool {
        self.is_business_class(&frame.class_name)
    }
}

impl Default for PackagePrefixClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BUSINESS_PACKAGES.iter().map(|s| s.to_string()).collect())
    }
}
