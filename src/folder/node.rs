//! The folder tree itself.
//!
//! A `Folder` wraps one directory path. Children are owned by value in insertion order;
//! each child keeps only the path of its parent (see [`Anchor`]), never a second owning
//! reference. Constructing or attaching a folder never touches the disk; only `mkdir`,
//! `mktree` and `rmtree` do.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::ops::{Deref, Div};
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use log::debug;

use super::anchor::Anchor;
use super::listing::{Entries, EntryKind};
use crate::core::{FolderError, Result, utils};

/// One directory in a declaratively built folder tree.
///
/// ### Invariants
///
/// 1. **Path consistency**: `path == anchor.base().join(name)`, for roots and children alike.
/// 2. **Uniqueness**: no two children share a path.
/// 3. **Acyclic**: children are owned by value, so a folder can never be its own ancestor.
///
/// Registered children are only reachable mutably through [`FolderMut`], which cannot
/// replace a child wholesale, so the invariants hold for the whole tree.
///
/// ### Example:
/// ```no_run
/// use folder_kit::Folder;
///
/// let mut root = Folder::root("/tmp", "project").unwrap();
/// root.add_child("data").unwrap();
/// root.mktree(true).unwrap();
///
/// std::fs::create_dir(root.join("extra")).unwrap();
/// root.discover().unwrap();
/// assert!(root.child("extra").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Folder {
    name: OsString,
    path: PathBuf,
    anchor: Anchor,
    children: Vec<Folder>,
    match_options: MatchOptions,
}

impl Folder {
    /// Creates a root folder at `anchor / name`.
    /// * `name` may be a plain name or a path; only its final segment is kept.
    ///
    /// Fails with `InvalidArgument` if `name` has no final segment (`""`, `"/"`, `".."`).
    pub fn root<A: AsRef<Path>, N: AsRef<Path>>(anchor: A, name: N) -> Result<Self> {
        Self::anchored(
            Anchor::Root(anchor.as_ref().to_path_buf()),
            name,
            MatchOptions::new(),
        )
    }

    fn anchored<N: AsRef<Path>>(
        anchor: Anchor,
        name: N,
        match_options: MatchOptions,
    ) -> Result<Self> {
        let name = utils::leaf_name(name)?;
        let path = anchor.base().join(&name);
        Ok(Self {
            name,
            path,
            anchor,
            children: Vec::new(),
            match_options,
        })
    }

    /// Sets the glob options used by `iterfiles`, `iterdirs` and `iter` on this folder
    /// and every folder currently registered below it. Children added later inherit them.
    pub fn with_match_options(mut self, options: MatchOptions) -> Self {
        self.set_match_options(options);
        self
    }

    fn set_match_options(&mut self, options: MatchOptions) {
        self.match_options = options;
        for child in &mut self.children {
            child.set_match_options(options);
        }
    }

    /// Registers a new child folder at `self.path / name` and returns a handle to it.
    /// Nothing is created on disk.
    ///
    /// Fails with `DuplicateChild` if a child with the same path is already registered.
    pub fn add_child<N: AsRef<Path>>(&mut self, name: N) -> Result<FolderMut<'_>> {
        let child = Self::anchored(
            Anchor::Attached(self.path.clone()),
            name,
            self.match_options,
        )?;
        if self.children.iter().any(|c| c.path == child.path) {
            return Err(FolderError::DuplicateChild { path: child.path });
        }
        let index = self.children.len();
        self.children.push(child);
        Ok(FolderMut {
            folder: &mut self.children[index],
        })
    }

    /// Final path segment, exactly as it is on disk.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Path of the owning parent folder, `None` for roots.
    pub fn parent_path(&self) -> Option<&Path> {
        self.anchor.parent()
    }

    pub fn is_root(&self) -> bool {
        self.anchor.is_root()
    }

    pub fn children(&self) -> &[Folder] {
        &self.children
    }

    /// Returns the first child (in insertion order) named `name`.
    /// All children are scanned before `ChildNotFound` is returned.
    pub fn child<N: AsRef<OsStr>>(&self, name: N) -> Result<&Folder> {
        let name = name.as_ref();
        self.children
            .iter()
            .find(|c| c.name.as_os_str() == name)
            .ok_or_else(|| child_not_found(name))
    }

    pub fn child_mut<N: AsRef<OsStr>>(&mut self, name: N) -> Result<FolderMut<'_>> {
        let name = name.as_ref();
        self.children
            .iter_mut()
            .find(|c| c.name.as_os_str() == name)
            .map(|folder| FolderMut { folder })
            .ok_or_else(|| child_not_found(name))
    }

    /// Iterates over every registered folder below this one, depth-first, pre-order.
    /// The folder itself is not included.
    pub fn descendants(&self) -> impl Iterator<Item = &Folder> {
        let mut stack: Vec<&Folder> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Joins this folder's path with `segment`. Returns a plain path, not a folder.
    pub fn join<P: AsRef<Path>>(&self, segment: P) -> PathBuf {
        self.path.join(segment)
    }

    /// Registers every on-disk subdirectory that is not yet a child, then recurses into
    /// all children, old and new.
    ///
    /// Running it twice on an unchanged disk adds nothing the second time. Children whose
    /// directories have vanished are kept. Fails with `NotFound` / `NotADirectory` when a
    /// visited folder cannot be listed; folders discovered before the failure stay registered.
    pub fn discover(&mut self) -> Result<()> {
        let found = self.iterdirs("*")?.collect::<Result<Vec<_>>>()?;
        for path in found {
            if self.children.iter().any(|c| c.path == path) {
                continue;
            }
            debug!("discovered {}", path.display());
            self.add_child(&path)?;
        }
        for child in &mut self.children {
            child.discover()?;
        }
        Ok(())
    }

    /// Creates this folder's directory (parents are never created implicitly).
    /// * `force` - remove the directory and everything in it first, then create it empty.
    ///
    /// Fails with `ParentMissing` if the parent directory is absent, and, when `force`
    /// is false, with `AlreadyExists` if the path is already taken.
    pub fn mkdir(&self, force: bool) -> Result<()> {
        if let Some(parent) = self.anchor.parent()
            && !parent.exists()
        {
            return Err(FolderError::ParentMissing {
                path: self.path.clone(),
            });
        }

        if force {
            self.rmtree()?;
            return self.mkdir(false);
        }

        debug!("creating directory {}", self.path.display());
        std::fs::create_dir(&self.path).map_err(|e| utils::classify_create_dir(&self.path, e))
    }

    /// Creates this folder and then every registered descendant, in child order.
    /// `force` applies to each folder separately. The first failure stops the walk;
    /// directories already created are left in place.
    pub fn mktree(&self, force: bool) -> Result<()> {
        self.mkdir(force)?;
        for child in &self.children {
            child.mktree(force)?;
        }
        Ok(())
    }

    /// Removes this folder's directory and everything under it. No-op if the path does
    /// not exist. Registered children are kept in memory.
    pub fn rmtree(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        if !self.path.is_dir() {
            return Err(FolderError::NotADirectory {
                path: self.path.clone(),
            });
        }
        debug!("removing tree {}", self.path.display());
        std::fs::remove_dir_all(&self.path).map_err(|e| utils::classify_io(&self.path, e))
    }

    /// Returns true, if the folder's path currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Files directly in this folder whose names match `pattern`.
    pub fn iterfiles(&self, pattern: &str) -> Result<Entries> {
        Entries::open(
            &self.path,
            pattern,
            self.match_options,
            Some(EntryKind::File),
        )
    }

    /// Directories directly in this folder whose names match `pattern`.
    pub fn iterdirs(&self, pattern: &str) -> Result<Entries> {
        Entries::open(
            &self.path,
            pattern,
            self.match_options,
            Some(EntryKind::Directory),
        )
    }

    /// Files and directories directly in this folder whose names match `pattern`.
    pub fn iter(&self, pattern: &str) -> Result<Entries> {
        Entries::open(&self.path, pattern, self.match_options, None)
    }

    /// Renders the registered tree: the folder name, its files indented by two spaces,
    /// then each child's rendering indented by two more spaces.
    ///
    /// Files are listed fresh on every call. A folder whose directory does not exist
    /// renders just its name.
    pub fn graph(&self) -> Result<String> {
        let mut lines = Vec::new();
        self.graph_lines(0, &mut lines)?;
        Ok(lines.join("\n"))
    }

    fn graph_lines(&self, depth: usize, lines: &mut Vec<String>) -> Result<()> {
        let indent = "  ".repeat(depth);
        lines.push(format!("{}{}", indent, self.name.to_string_lossy()));
        if self.path.is_dir() {
            for file in self.iterfiles("*")? {
                let file = file?;
                let file_name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                lines.push(format!("{}  {}", indent, file_name));
            }
        }
        for child in &self.children {
            child.graph_lines(depth + 1, lines)?;
        }
        Ok(())
    }
}

fn child_not_found(name: &OsStr) -> FolderError {
    FolderError::ChildNotFound {
        name: name.to_string_lossy().into_owned(),
    }
}

/// Mutable handle to a folder registered inside a tree.
///
/// Reads go through `Deref<Target = Folder>`. Mutation is limited to growing the tree
/// (`add_child`, `discover`) and reaching deeper children, so a handle can never move a
/// child to another path or swap in a foreign folder.
#[derive(Debug)]
pub struct FolderMut<'a> {
    folder: &'a mut Folder,
}

impl FolderMut<'_> {
    pub fn add_child<N: AsRef<Path>>(&mut self, name: N) -> Result<FolderMut<'_>> {
        self.folder.add_child(name)
    }

    pub fn child_mut<N: AsRef<OsStr>>(&mut self, name: N) -> Result<FolderMut<'_>> {
        self.folder.child_mut(name)
    }

    pub fn discover(&mut self) -> Result<()> {
        self.folder.discover()
    }
}

impl Deref for FolderMut<'_> {
    type Target = Folder;

    fn deref(&self) -> &Folder {
        &*self.folder
    }
}

impl<P: AsRef<Path>> Div<P> for &Folder {
    type Output = PathBuf;

    fn div(self, rhs: P) -> PathBuf {
        self.join(rhs)
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
