use std::path::{Path, PathBuf};

/// Where a folder hangs in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// The folder was created against an external path and has no parent node.
    Root(PathBuf),
    /// The folder is owned by the parent node living at this path.
    Attached(PathBuf),
}

impl Anchor {
    /// Path the folder name is joined onto.
    pub fn base(&self) -> &Path {
        match self {
            Anchor::Root(path) | Anchor::Attached(path) => path,
        }
    }

    /// Path of the owning parent node, `None` for roots.
    pub fn parent(&self) -> Option<&Path> {
        match self {
            Anchor::Root(_) => None,
            Anchor::Attached(path) => Some(path),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Anchor::Root(_))
    }
}
