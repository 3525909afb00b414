use std::fs::ReadDir;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::trace;

use crate::core::{FolderError, Result, utils};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Lazy, single-level listing of a directory filtered by a shell-glob pattern.
///
/// Each `Entries` wraps its own `read_dir` handle, so every call that produces one
/// sees the directory as it is at that moment. Nothing is cached between calls.
///
/// The pattern is matched against entry names only, never against the full path,
/// so a pattern containing a separator matches nothing.
#[derive(Debug)]
pub struct Entries {
    dir: PathBuf,
    read_dir: ReadDir,
    pattern: Pattern,
    options: MatchOptions,
    kind: Option<EntryKind>,
}

impl Entries {
    /// Opens `dir` for listing. `kind == None` keeps files and directories alike.
    pub(crate) fn open(
        dir: &Path,
        pattern: &str,
        options: MatchOptions,
        kind: Option<EntryKind>,
    ) -> Result<Self> {
        let compiled = Pattern::new(pattern).map_err(|source| FolderError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        trace!("listing {} with pattern '{}'", dir.display(), pattern);
        let read_dir = std::fs::read_dir(dir).map_err(|e| utils::classify_io(dir, e))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            read_dir,
            pattern: compiled,
            options,
            kind,
        })
    }

    /// Directory being listed.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn accepts(kind: Option<EntryKind>, path: &Path) -> bool {
    match kind {
        None => true,
        Some(EntryKind::Directory) => path.is_dir(),
        Some(EntryKind::File) => !path.is_dir(),
    }
}

impl Iterator for Entries {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.read_dir.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(utils::classify_io(&self.dir, e))),
            };
            let name = entry.file_name();
            if !self
                .pattern
                .matches_with(&name.to_string_lossy(), self.options)
            {
                continue;
            }
            let path = entry.path();
            if accepts(self.kind, &path) {
                return Some(Ok(path));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tempdir::TempDir;

    use super::*;

    fn populated_dir() -> TempDir {
        let tmp = TempDir::new("listing_test").unwrap();
        std::fs::write(tmp.path().join("a.txt"), b"a").unwrap();
        std::fs::write(tmp.path().join("b.log"), b"b").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("sub").join("deep.txt"), b"d").unwrap();
        tmp
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn names(entries: Entries) -> BTreeSet<String> {
        entries
            .map(|p| p.unwrap().file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_any_kind_lists_single_level() {
        let tmp = populated_dir();
        let entries = Entries::open(tmp.path(), "*", MatchOptions::new(), None).unwrap();
        assert_eq!(entries.dir(), tmp.path());
        assert_eq!(names(entries), set(&["a.txt", "b.log", "sub"]));
    }

    #[test]
    fn test_kind_filter() {
        let tmp = populated_dir();
        let files =
            Entries::open(tmp.path(), "*", MatchOptions::new(), Some(EntryKind::File)).unwrap();
        let dirs = Entries::open(
            tmp.path(),
            "*",
            MatchOptions::new(),
            Some(EntryKind::Directory),
        )
        .unwrap();
        assert_eq!(names(files), set(&["a.txt", "b.log"]));
        assert_eq!(names(dirs), set(&["sub"]));
    }

    #[test]
    fn test_pattern_with_separator_matches_nothing() {
        let tmp = populated_dir();
        let entries = Entries::open(tmp.path(), "sub/*", MatchOptions::new(), None).unwrap();
        assert!(names(entries).is_empty());
    }

    #[test]
    fn test_case_insensitive_options() {
        let tmp = populated_dir();
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        let entries = Entries::open(tmp.path(), "A.*", options, None).unwrap();
        assert_eq!(names(entries), set(&["a.txt"]));
    }

    #[test]
    fn test_invalid_pattern() {
        let tmp = populated_dir();
        let result = Entries::open(tmp.path(), "[", MatchOptions::new(), None);
        assert!(matches!(result, Err(FolderError::InvalidPattern { .. })));
    }

    #[test]
    fn test_missing_dir() {
        let tmp = populated_dir();
        let missing = tmp.path().join("nope");
        let result = Entries::open(&missing, "*", MatchOptions::new(), None);
        assert!(matches!(result, Err(FolderError::NotFound { .. })));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let tmp = populated_dir();
        let file = tmp.path().join("a.txt");
        let result = Entries::open(&file, "*", MatchOptions::new(), None);
        assert!(matches!(result, Err(FolderError::NotADirectory { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_exact_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = populated_dir();
        let raw = OsStr::from_bytes(b"bad\xff.txt");
        std::fs::write(tmp.path().join(raw), b"x").unwrap();

        let entries =
            Entries::open(tmp.path(), "bad*", MatchOptions::new(), Some(EntryKind::File)).unwrap();
        let found: Vec<PathBuf> = entries.map(|p| p.unwrap()).collect();
        assert_eq!(found, vec![tmp.path().join(raw)]);
        assert!(found[0].exists());
    }
}
