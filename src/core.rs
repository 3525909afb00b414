use std::path::PathBuf;

/// Errors produced by folder operations.
///
/// Every variant names the path (or child name) it is about, so callers can report
/// the failure without keeping extra context around.
#[derive(thiserror::Error, Debug)]
pub enum FolderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{} is already registered as a child", path.display())]
    DuplicateChild { path: PathBuf },

    #[error("parent directory of {} does not exist", path.display())]
    ParentMissing { path: PathBuf },

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("no subfolder with name '{name}' found")]
    ChildNotFound { name: String },

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FolderError>;

pub mod utils {
    use std::ffi::OsString;
    use std::io::ErrorKind;
    use std::path::{Component, Path};

    use super::{FolderError, Result};

    /// Returns the final normal segment of `name`, byte for byte, which becomes the
    /// folder name. `""`, `"/"`, `"."` and `".."` have no such segment and are rejected.
    pub fn leaf_name<P: AsRef<Path>>(name: P) -> Result<OsString> {
        let name = name.as_ref();
        match name.components().next_back() {
            Some(Component::Normal(leaf)) => Ok(leaf.to_os_string()),
            _ => Err(FolderError::InvalidArgument(format!(
                "folder name must end with a normal path segment: {:?}",
                name
            ))),
        }
    }

    /// Maps a raw I/O error to the matching `FolderError` category.
    pub fn classify_io(path: &Path, err: std::io::Error) -> FolderError {
        let path = path.to_path_buf();
        match err.kind() {
            ErrorKind::NotFound => FolderError::NotFound { path },
            ErrorKind::AlreadyExists => FolderError::AlreadyExists { path },
            ErrorKind::NotADirectory => FolderError::NotADirectory { path },
            _ => FolderError::Io { path, source: err },
        }
    }

    /// Like `classify_io`, but for the single-directory create primitive, where
    /// a missing entry can only be the parent.
    pub fn classify_create_dir(path: &Path, err: std::io::Error) -> FolderError {
        match err.kind() {
            ErrorKind::NotFound => FolderError::ParentMissing {
                path: path.to_path_buf(),
            },
            _ => classify_io(path, err),
        }
    }
}
