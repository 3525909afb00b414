mod anchor;
mod listing;
mod node;

pub use anchor::Anchor;
pub use listing::{Entries, EntryKind};
pub use node::{Folder, FolderMut};
