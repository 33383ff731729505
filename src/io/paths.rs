use std::path::{Path, PathBuf};

/// Listing updated when no `--path` is given
pub const DEFAULT_MANIFEST_PATH: &str = "develop/vpm-ochibi-chans-converter-tool-dev.json";

/// Package whose versions the tool manages by default
pub const DEFAULT_PACKAGE_ID: &str = "jp.aramaa.ochibi-chans-converter-tool";

/// Utilities for working with listing paths
pub struct PathUtils;

impl PathUtils {
    /// JSON files directly inside `dir`, sorted
    pub fn json_candidates(dir: &Path) -> Vec<PathBuf> {
        let pattern = format!("{}/*.json", glob::Pattern::escape(&dir.to_string_lossy()));

        let mut candidates: Vec<PathBuf> = match glob::glob(&pattern) {
            Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
            Err(_) => Vec::new(),
        };
        candidates.sort();
        candidates
    }

    /// Hint text appended to a "file not found" error.
    ///
    /// Empty when there is nothing useful to suggest, otherwise starts with
    /// a space so it can be appended to a sentence.
    pub fn not_found_hint(cwd: &Path, default_path: &Path) -> String {
        let mut hints = Vec::new();

        let candidates = Self::json_candidates(cwd);
        if !candidates.is_empty() {
            let names: Vec<String> = candidates
                .iter()
                .map(|candidate| candidate.display().to_string())
                .collect();
            hints.push(format!(
                "Available JSON files in current directory: {}.",
                names.join(", ")
            ));
        }

        if cwd.join(default_path).exists() {
            hints.push(format!(
                "For this tool, default --path is '{}'.",
                default_path.display()
            ));
        }

        if hints.is_empty() {
            String::new()
        } else {
            format!(" {}", hints.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_json_candidates_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let candidates = PathUtils::json_candidates(temp_dir.path());
        let names: Vec<_> = candidates
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_hint_mentions_default_path_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let default_path = PathBuf::from(DEFAULT_MANIFEST_PATH);
        fs::create_dir_all(temp_dir.path().join("develop")).unwrap();
        fs::write(temp_dir.path().join(&default_path), "{}").unwrap();

        let hint = PathUtils::not_found_hint(temp_dir.path(), &default_path);
        assert!(hint.starts_with(' '));
        assert!(hint.contains("default --path is 'develop/vpm-ochibi-chans-converter-tool-dev.json'"));
        assert!(!hint.contains("Available JSON files"));
    }

    #[test]
    fn test_hint_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let hint = PathUtils::not_found_hint(temp_dir.path(), Path::new("missing.json"));
        assert_eq!(hint, "");
    }
}
