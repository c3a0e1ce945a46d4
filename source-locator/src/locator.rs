use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use log_triage::model::StackFrame;
use log_triage::prompt::SnippetSource;

/// Source lookup over locally checked-out project trees.
#[derive(Debug, Clone, Default)]
pub struct LocalCodeLocator {
    /// Project name → source-root directory.
    project_paths: HashMap<String, String>,
    enabled: bool,
}

impl LocalCodeLocator {
    pub fn new(project_paths: HashMap<String, String>, enabled: bool) -> Self {
        Self {
            project_paths,
            enabled,
        }
    }

    /// Loads the project-path map from a JSON file. Never fails: a missing
    /// or malformed file leaves the map empty (source lookup is then
    /// effectively disabled for every project) and is reported in the log.
    pub fn from_path_file(path: &Path, enabled: bool) -> Self {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "project-path map not found; source lookup will be limited"
            );
            return Self::new(HashMap::new(), enabled);
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => {
                    info!(
                        path = %path.display(),
                        projects = map.len(),
                        "loaded project-path map"
                    );
                    Self::new(map, enabled)
                }
                Err(err) => {
                    error!(path = %path.display(), error = %err, "malformed project-path map");
                    Self::new(HashMap::new(), enabled)
                }
            },
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to read project-path map");
                Self::new(HashMap::new(), enabled)
            }
        }
    }

    /// Walks the configured roots for the class's source file; first hit
    /// wins. Inner-class suffixes (`$...`) are stripped, since inner classes
    /// live in their enclosing top-level class file.
    fn resolve_source_file(&self, class_name: &str) -> Option<PathBuf> {
        let top_level = class_name.split('$').next().unwrap_or(class_name);
        let mut relative = PathBuf::new();
        for part in top_level.split('.') {
            relative.push(part);
        }
        relative.set_extension("java");

        for (project, root) in &self.project_paths {
            let root_path = Path::new(root);
            if !root_path.is_dir() {
                warn!(project = %project, root = %root, "configured source root is not a directory");
                continue;
            }
            for entry in WalkDir::new(root_path).into_iter().filter_map(Result::ok) {
                if entry.file_type().is_file() && entry.path().ends_with(&relative) {
                    return Some(entry.into_path());
                }
            }
        }
        None
    }
}

impl SnippetSource for LocalCodeLocator {
    fn fetch_snippet(&self, frame: &StackFrame, context_lines: usize) -> Vec<String> {
        if frame.class_name.is_empty() || frame.line_number <= 0 {
            warn!(
                class = %frame.class_name,
                line = frame.line_number,
                "invalid stack frame for source lookup"
            );
            return Vec::new();
        }
        if !self.enabled {
            debug!("source lookup disabled");
            return Vec::new();
        }

        let Some(path) = self.resolve_source_file(&frame.class_name) else {
            warn!(class = %frame.class_name, "no source file found for class");
            return Vec::new();
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                let lines: Vec<&str> = content.lines().collect();
                extract_window(&lines, frame.line_number, context_lines)
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to read source file");
                Vec::new()
            }
        }
    }
}

/// The window `line - (context_lines - 1) ..= line + (context_lines - 1)`,
/// clamped to the file. Empty when the target line is out of range.
fn extract_window(lines: &[&str], line_number: i32, context_lines: usize) -> Vec<String> {
    let total = lines.len();
    let target = line_number as usize;
    if target == 0 || target > total {
        warn!(total, line = line_number, "frame line is out of range for its source file");
        return Vec::new();
    }

    let radius = context_lines.saturating_sub(1);
    let start = target.saturating_sub(radius).max(1);
    let end = (target + radius).min(total);
    lines[start - 1..end].iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn frame(class: &str, line: i32) -> StackFrame {
        StackFrame {
            class_name: class.to_string(),
            method_name: "run".to_string(),
            line_number: line,
            business_flag: true,
        }
    }

    /// Creates `<root>/com/dyyl/order/OrderService.java` with 10 numbered lines.
    fn fixture() -> (tempfile::TempDir, LocalCodeLocator) {
        let dir = tempfile::tempdir().expect("tempdir");
        let pkg = dir.path().join("com/dyyl/order");
        fs::create_dir_all(&pkg).expect("mkdirs");
        let body: String = (1..=10).map(|i| format!("line {i};\n")).collect();
        fs::write(pkg.join("OrderService.java"), body).expect("write source");

        let mut map = HashMap::new();
        map.insert(
            "order-web".to_string(),
            dir.path().to_string_lossy().into_owned(),
        );
        let locator = LocalCodeLocator::new(map, true);
        (dir, locator)
    }

    #[test]
    fn fetches_clamped_window_around_line() {
        let (_dir, locator) = fixture();
        let lines = locator.fetch_snippet(&frame("com.dyyl.order.OrderService", 5), 3);
        assert_eq!(lines, ["line 3;", "line 4;", "line 5;", "line 6;", "line 7;"]);
    }

    #[test]
    fn window_clamps_at_file_boundaries() {
        let (_dir, locator) = fixture();
        let head = locator.fetch_snippet(&frame("com.dyyl.order.OrderService", 1), 3);
        assert_eq!(head, ["line 1;", "line 2;", "line 3;"]);

        let tail = locator.fetch_snippet(&frame("com.dyyl.order.OrderService", 10), 3);
        assert_eq!(tail, ["line 8;", "line 9;", "line 10;"]);
    }

    #[test]
    fn inner_class_resolves_to_enclosing_file() {
        let (_dir, locator) = fixture();
        let lines = locator.fetch_snippet(&frame("com.dyyl.order.OrderService$Builder", 5), 3);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn invalid_frames_yield_empty() {
        let (_dir, locator) = fixture();
        assert!(locator.fetch_snippet(&frame("", 5), 3).is_empty());
        assert!(
            locator
                .fetch_snippet(&frame("com.dyyl.order.OrderService", 0), 3)
                .is_empty()
        );
        assert!(
            locator
                .fetch_snippet(&frame("com.dyyl.order.OrderService", -1), 3)
                .is_empty()
        );
    }

    #[test]
    fn unknown_class_yields_empty() {
        let (_dir, locator) = fixture();
        assert!(
            locator
                .fetch_snippet(&frame("com.nonexistent.Missing", 5), 3)
                .is_empty()
        );
    }

    #[test]
    fn out_of_range_line_yields_empty() {
        let (_dir, locator) = fixture();
        assert!(
            locator
                .fetch_snippet(&frame("com.dyyl.order.OrderService", 400), 3)
                .is_empty()
        );
    }

    #[test]
    fn disabled_lookup_yields_empty() {
        let (dir, _) = fixture();
        let mut map = HashMap::new();
        map.insert(
            "order-web".to_string(),
            dir.path().to_string_lossy().into_owned(),
        );
        let locator = LocalCodeLocator::new(map, false);
        assert!(
            locator
                .fetch_snippet(&frame("com.dyyl.order.OrderService", 5), 3)
                .is_empty()
        );
    }

    #[test]
    fn missing_path_file_leaves_map_empty() {
        let locator = LocalCodeLocator::from_path_file(Path::new("does-not-exist.json"), true);
        assert!(
            locator
                .fetch_snippet(&frame("com.dyyl.order.OrderService", 5), 3)
                .is_empty()
        );
    }
}
