use crate::error::{Csv2JsonError, Result};
use log::debug;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Glob filter matched against paths relative to the input directory
///
/// `*` and `?` stay within one path segment, `**/` spans zero or more
/// directories and `[...]` / `[!...]` are character classes.
///
/// Hidden entries (names starting with `.`) only match when a segment of
/// the pattern itself starts with `.`.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
    allows_hidden: bool,
}

impl GlobPattern {
    /// Compiles a glob pattern
    ///
    /// # Errors
    ///
    /// Returns [`Csv2JsonError::InvalidPattern`] for empty patterns and
    /// unterminated character classes.
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| Csv2JsonError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut re = String::from("^");
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '*' if chars.get(i + 1) == Some(&'*') => {
                    let at_segment_start = i == 0 || chars[i - 1] == '/';
                    if at_segment_start && chars.get(i + 2) == Some(&'/') {
                        re.push_str("(?:.*/)?");
                        i += 3;
                    } else {
                        re.push_str(".*");
                        i += 2;
                    }
                }
                '*' => {
                    re.push_str("[^/]*");
                    i += 1;
                }
                '?' => {
                    re.push_str("[^/]");
                    i += 1;
                }
                '[' => {
                    let close = chars[i + 1..]
                        .iter()
                        .skip(1)
                        .position(|&c| c == ']')
                        .map(|p| i + 2 + p)
                        .ok_or_else(|| invalid("unterminated character class"))?;

                    let mut class: String = chars[i + 1..close].iter().collect();
                    if let Some(rest) = class.strip_prefix('!') {
                        class = format!("^{}", rest);
                    }
                    re.push('[');
                    re.push_str(&class.replace('\\', "\\\\").replace('[', "\\["));
                    re.push(']');
                    i = close + 1;
                }
                c => {
                    re.push_str(&regex::escape(&c.to_string()));
                    i += 1;
                }
            }
        }
        re.push('$');

        let regex = Regex::new(&re).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            allows_hidden: pattern.split('/').any(|segment| segment.starts_with('.')),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Checks a relative path against the pattern
    pub fn matches(&self, relative: &Path) -> bool {
        let normalized: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        if !self.allows_hidden && normalized.iter().any(|name| is_hidden(name)) {
            return false;
        }
        self.regex.is_match(&normalized.join("/"))
    }
}

/// Lists files below `root` whose relative path matches `pattern`
///
/// The walk is depth-first with each directory's entries sorted by name,
/// so the result order is stable across runs.
pub fn find_files(root: &Path, pattern: &GlobPattern) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root, root, pattern, &mut files)?;
    debug!(
        "Found {} file(s) matching '{}' in {}",
        files.len(),
        pattern.as_str(),
        root.display()
    );
    Ok(files)
}

fn walk(root: &Path, dir: &Path, pattern: &GlobPattern, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        let hidden = path
            .file_name()
            .map(|name| is_hidden(&name.to_string_lossy()))
            .unwrap_or(false);
        if hidden && !pattern.allows_hidden {
            continue;
        }

        if path.is_dir() {
            walk(root, &path, pattern, files)?;
        } else if path.is_file() {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if pattern.matches(relative) {
                files.push(path);
            }
        }
    }

    Ok(())
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs::File;
    use tempfile::TempDir;

    #[rstest]
    #[case("**/*.csv", "landmarks.csv", true)]
    #[case("**/*.csv", "a/b/landmarks.csv", true)]
    #[case("**/*.csv", "landmarks.csv.bak", false)]
    #[case("*.csv", "a/landmarks.csv", false)]
    #[case("*.csv", "landmarks.csv", true)]
    #[case("**/*.dcm", "P001/series/0001.dcm", true)]
    #[case("**/*.txt", "tags.TXT", false)]
    #[case("data/**/*.txt", "data/tags.txt", true)]
    #[case("data/**/*.txt", "data/x/y/tags.txt", true)]
    #[case("data/**/*.txt", "other/tags.txt", false)]
    #[case("P00?.dcm", "P001.dcm", true)]
    #[case("P00?.dcm", "P0010.dcm", false)]
    #[case("P[0-9]*.dcm", "P7.dcm", true)]
    #[case("P[!0-9]*.dcm", "P7.dcm", false)]
    #[case("report(1).csv", "report(1).csv", true)]
    #[case("**/*.csv", "._landmarks.csv", false)]
    #[case("**/*.csv", ".cache/landmarks.csv", false)]
    #[case("*.csv", ".csv", false)]
    #[case("?landmarks.csv", ".landmarks.csv", false)]
    #[case("**/*.dcm", "a/.P001.dcm", false)]
    #[case(".cache/*.csv", ".cache/landmarks.csv", true)]
    #[case("**/.*.csv", "a/._landmarks.csv", true)]
    fn test_glob_matches(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        let glob = GlobPattern::new(pattern).unwrap();
        assert_eq!(glob.matches(Path::new(path)), expected, "{pattern} vs {path}");
    }

    #[rstest]
    #[case("")]
    #[case("[abc")]
    fn test_invalid_glob(#[case] pattern: &str) {
        assert!(matches!(
            GlobPattern::new(pattern),
            Err(Csv2JsonError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_find_files_recursive_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        File::create(root.join("b/nested/P002.dcm")).unwrap();
        File::create(root.join("a/P001.dcm")).unwrap();
        File::create(root.join("P000.dcm")).unwrap();
        File::create(root.join("notes.txt")).unwrap();

        let glob = GlobPattern::new("**/*.dcm").unwrap();
        let files = find_files(root, &glob).unwrap();

        assert_eq!(
            files,
            vec![
                root.join("P000.dcm"),
                root.join("a/P001.dcm"),
                root.join("b/nested/P002.dcm"),
            ]
        );
    }

    #[test]
    fn test_find_files_skips_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".cache")).unwrap();
        File::create(root.join("._landmarks.csv")).unwrap();
        File::create(root.join(".cache/landmarks.csv")).unwrap();
        File::create(root.join("landmarks.csv")).unwrap();

        let glob = GlobPattern::new("**/*.csv").unwrap();
        assert_eq!(find_files(root, &glob).unwrap(), vec![root.join("landmarks.csv")]);

        let hidden = GlobPattern::new(".cache/*.csv").unwrap();
        assert_eq!(
            find_files(root, &hidden).unwrap(),
            vec![root.join(".cache/landmarks.csv")]
        );
    }

    #[test]
    fn test_find_files_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let glob = GlobPattern::new("**/*.csv").unwrap();
        assert!(find_files(&temp_dir.path().join("missing"), &glob).is_err());
    }
}
