//! A small library for describing a directory hierarchy as an in-memory tree of folders.
//!
//! ### Overview
//!
//! `folder-kit` lets you declare the folders a program expects, create them on disk in one
//! call, pick up subfolders somebody else created, and list the files and folders inside.
//!
//! **Key ideas**:
//! - **Declarative**: Build the tree in memory first (`Folder::root`, `Folder::add_child`),
//!   then materialize it with `mktree()`.
//! - **Discovery**: `discover()` registers on-disk subfolders the tree does not know yet.
//! - **Listing**: `iterfiles()`, `iterdirs()` and `iter()` read a fresh directory listing on
//!   every call, filtered by a shell-glob pattern.
//! - **Ownership**: A parent owns its children by value; a child only remembers the path of
//!   its parent, so the tree can never contain a cycle.
//!
//! ### Example
//! ```no_run
//! use folder_kit::Folder;
//!
//! let mut root = Folder::root(std::env::temp_dir(), "my_project").unwrap();
//! root.add_child("data").unwrap();
//! root.add_child("logs").unwrap();
//! root.mktree(true).unwrap();
//!
//! assert!(root.child("data").unwrap().exists());
//! println!("{}", root.graph().unwrap());
//! ```

mod core;
mod folder;

pub use crate::core::{FolderError, Result};
pub use folder::{Anchor, Entries, EntryKind, Folder, FolderMut};
