use crate::extraction::source::{open_source, MetadataSource};
use crate::observer::RunObserver;
use crate::types::{Dimensions, MatchMode};
use log::debug;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Side information resolved for one key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxMetadata {
    /// Original image dimensions, `None` when unresolved
    pub dimensions: Option<Dimensions>,

    /// Resolved tags in request order; unresolved tags are absent
    pub tags: Vec<(String, String)>,
}

impl AuxMetadata {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Finds the auxiliary file belonging to a key
///
/// - [`MatchMode::Substring`]: the key appears anywhere in the path; the
///   last match in `files` order wins.
/// - [`MatchMode::Exact`]: the key equals a component of the path below
///   `root` or the file stem; the lexicographically smallest match wins.
pub fn find_match<'a>(
    key: &str,
    root: &Path,
    files: &'a [PathBuf],
    mode: MatchMode,
) -> Option<&'a PathBuf> {
    match mode {
        MatchMode::Substring => files
            .iter()
            .rev()
            .find(|path| path.to_string_lossy().contains(key)),
        MatchMode::Exact => files
            .iter()
            .filter(|path| is_exact_match(key, path.strip_prefix(root).unwrap_or(path)))
            .min(),
    }
}

fn is_exact_match(key: &str, path: &Path) -> bool {
    if key.is_empty() {
        return false;
    }

    let stem_matches = path
        .file_stem()
        .map(|stem| stem.to_string_lossy() == key)
        .unwrap_or(false);

    stem_matches
        || path.components().any(|component| match component {
            Component::Normal(name) => name.to_string_lossy() == key,
            _ => false,
        })
}

/// Resolves dimensions and tags for CSV keys
///
/// Results are memoized per key for the lifetime of the resolver, so each
/// auxiliary file is opened at most once per distinct key.
pub struct MetadataResolver {
    root: PathBuf,
    files: Vec<PathBuf>,
    match_mode: MatchMode,
    tag_names: Vec<String>,
    cache: HashMap<String, AuxMetadata>,
}

impl MetadataResolver {
    pub fn new(
        root: impl Into<PathBuf>,
        files: Vec<PathBuf>,
        match_mode: MatchMode,
        tag_names: Vec<String>,
    ) -> Self {
        Self {
            root: root.into(),
            files,
            match_mode,
            tag_names,
            cache: HashMap::new(),
        }
    }

    /// Number of candidate auxiliary files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Auxiliary file selected for a key
    pub fn find_file(&self, key: &str) -> Option<&Path> {
        find_match(key, &self.root, &self.files, self.match_mode).map(PathBuf::as_path)
    }

    /// Resolves metadata for a key
    ///
    /// Lookup failures are reported to `observer` and never abort:
    /// dimensions fall back to `None` and missing tags are left out.
    pub fn resolve(&mut self, key: &str, observer: &mut dyn RunObserver) -> AuxMetadata {
        if let Some(cached) = self.cache.get(key) {
            debug!("Using cached metadata for key {}", key);
            return cached.clone();
        }

        let metadata = self.resolve_uncached(key, observer);
        self.cache.insert(key.to_string(), metadata.clone());
        metadata
    }

    fn resolve_uncached(&self, key: &str, observer: &mut dyn RunObserver) -> AuxMetadata {
        let source: Option<Box<dyn MetadataSource>> = match self.find_file(key) {
            Some(path) => {
                debug!("Key {} matched {}", key, path.display());
                match open_source(path) {
                    Ok(source) => Some(source),
                    Err(e) => {
                        observer.on_warning(
                            key,
                            &format!("could not read {}: {}", path.display(), e),
                        );
                        None
                    }
                }
            }
            None => {
                observer.on_warning(key, "no auxiliary file matches key");
                None
            }
        };

        let dimensions = match source.as_deref().map(|s| s.dimensions()) {
            Some(Ok(dimensions)) => Some(dimensions),
            Some(Err(e)) => {
                observer.on_warning(
                    key,
                    &format!("could not read dimensions ({}), using 0 x 0", e),
                );
                None
            }
            None => None,
        };

        let mut tags = Vec::with_capacity(self.tag_names.len());
        for name in &self.tag_names {
            match source.as_deref().and_then(|s| s.tag(name)) {
                Some(value) => tags.push((name.clone(), value)),
                None => observer.on_warning(key, &format!("tag '{}' not found", name)),
            }
        }

        AuxMetadata { dimensions, tags }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_substring_last_match_wins() {
        let files = paths(&["in/a/P001.dcm", "in/b/P001_2.dcm", "in/c/P002.dcm"]);
        assert_eq!(
            find_match("P001", Path::new("in"), &files, MatchMode::Substring),
            Some(&PathBuf::from("in/b/P001_2.dcm"))
        );
    }

    #[test]
    fn test_substring_short_key_matches_unrelated_paths() {
        // Known quirk: "1" matches any path containing the digit
        let files = paths(&["in/P001.dcm", "in/P201.dcm", "in/P333.dcm"]);
        assert_eq!(
            find_match("1", Path::new("in"), &files, MatchMode::Substring),
            Some(&PathBuf::from("in/P201.dcm"))
        );
    }

    #[test]
    fn test_substring_matches_directory_names() {
        let files = paths(&["in/P003/image.dcm"]);
        assert!(find_match("P003", Path::new("in"), &files, MatchMode::Substring).is_some());
    }

    #[test]
    fn test_exact_requires_whole_component() {
        let files = paths(&["in/P001.dcm", "in/P201.dcm", "in/P333.dcm"]);
        assert_eq!(find_match("1", Path::new("in"), &files, MatchMode::Exact), None);
        assert_eq!(
            find_match("P201", Path::new("in"), &files, MatchMode::Exact),
            Some(&PathBuf::from("in/P201.dcm"))
        );
    }

    #[test]
    fn test_exact_smallest_path_wins() {
        let files = paths(&["in/z/P001.dcm", "in/P001/b.dcm", "in/P001/a.dcm"]);
        assert_eq!(
            find_match("P001", Path::new("in"), &files, MatchMode::Exact),
            Some(&PathBuf::from("in/P001/a.dcm"))
        );
    }

    #[test]
    fn test_exact_ignores_components_above_root() {
        let root = Path::new("/data/incoming");
        let files = paths(&["/data/incoming/P001.dcm", "/data/incoming/P002/a.dcm"]);

        assert_eq!(find_match("incoming", root, &files, MatchMode::Exact), None);
        assert_eq!(find_match("data", root, &files, MatchMode::Exact), None);
        assert_eq!(
            find_match("P002", root, &files, MatchMode::Exact),
            Some(&PathBuf::from("/data/incoming/P002/a.dcm"))
        );
    }

    #[rstest]
    #[case(MatchMode::Substring)]
    #[case(MatchMode::Exact)]
    fn test_no_match(#[case] mode: MatchMode) {
        let files = paths(&["in/P001.dcm"]);
        assert_eq!(find_match("Q9", Path::new("in"), &files, mode), None);
        assert_eq!(find_match("Q9", Path::new("in"), &[], mode), None);
    }

    #[test]
    fn test_resolve_from_text_dump() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("P001.txt");
        fs::write(
            &path,
            "(0010, 0020) Patient ID LO: 'P001'\n(0018, 1149) Field of View Dimension(s) IS: [430.7, 350]\n",
        )
        .unwrap();

        let mut resolver = MetadataResolver::new(
            temp_dir.path(),
            vec![path],
            MatchMode::Substring,
            vec!["PatientID".to_string(), "StudyDate".to_string()],
        );
        let mut observer = RecordingObserver::new();
        let metadata = resolver.resolve("P001", &mut observer);

        assert_eq!(metadata.dimensions, Some(Dimensions::new(430.7, 350.0)));
        assert_eq!(metadata.tag("PatientID"), Some("P001"));
        assert_eq!(metadata.tag("StudyDate"), None);
        assert_eq!(
            observer.warnings_for("P001"),
            vec!["tag 'StudyDate' not found"]
        );
    }

    #[test]
    fn test_resolve_without_file_warns() {
        let mut resolver = MetadataResolver::new(
            "in",
            Vec::new(),
            MatchMode::Substring,
            vec!["PatientID".to_string()],
        );
        let mut observer = RecordingObserver::new();
        let metadata = resolver.resolve("P001", &mut observer);

        assert_eq!(metadata, AuxMetadata::default());
        assert_eq!(
            observer.warnings_for("P001"),
            vec!["no auxiliary file matches key", "tag 'PatientID' not found"]
        );
    }

    #[test]
    fn test_resolve_is_memoized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("P001.txt");
        fs::write(&path, "Field of View Dimension(s): [10, 20]\n").unwrap();

        let mut resolver =
            MetadataResolver::new(temp_dir.path(), vec![path.clone()], MatchMode::Substring, vec![]);
        let mut observer = RecordingObserver::new();
        let first = resolver.resolve("P001", &mut observer);

        // A second lookup must not touch the file again
        fs::remove_file(&path).unwrap();
        let second = resolver.resolve("P001", &mut observer);

        assert_eq!(first, second);
        assert_eq!(second.dimensions, Some(Dimensions::new(10.0, 20.0)));
        assert!(observer.warnings.is_empty());
    }

    #[test]
    fn test_resolve_unreadable_file_warns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("P001.dcm");
        fs::write(&path, "garbage").unwrap();

        let mut resolver =
            MetadataResolver::new(temp_dir.path(), vec![path], MatchMode::Substring, vec![]);
        let mut observer = RecordingObserver::new();
        let metadata = resolver.resolve("P001", &mut observer);

        assert_eq!(metadata.dimensions, None);
        let warnings = observer.warnings_for("P001");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("could not read"));
    }
}
