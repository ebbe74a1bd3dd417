//! Normalize heterogeneous "a user dropped or selected some files" inputs
//! into a single flat, ordered list of files, each annotated with the
//! relative path it occupied in its source hierarchy.
//!
//! Inputs may be a flat picker selection, a drag-and-drop payload carrying
//! nested directories, or a list of file-system-access handles. The core is
//! the asynchronous tree resolution engine in [`resolve`]: directories are
//! enumerated in batches, children fan out concurrently, and results join
//! in submission order so output is deterministic. Known OS junk files
//! (`.DS_Store`, `Thumbs.db`) are filtered from drop sources.
//!
//! The host platform stays behind the capability traits in [`types`]; a
//! native implementation over the local filesystem lives in [`fs`].
//!
//! ```ignore
//! let input = EventInput::data_transfer(transfer, DragEventKind::Drop);
//! let files = from_event(input).await?;
//! for file in &files {
//!     println!("{} ({} bytes)", file.path(), file.size());
//! }
//! ```

pub mod error;
pub mod event;
pub mod filter;
pub mod fs;
pub mod resolve;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{HostError, ResolveError};
pub use event::{DragEventKind, EventInput, from_event};
pub use filter::{IGNORED_FILES, remove_ignored};
pub use resolve::resolve_node;
pub use source::{
    DataTransfer, DataTransferItem, from_data_transfer, from_handles, from_input_change,
};
pub use types::{
    DirectoryEntry, DirectoryReader, FileCapability, FileEntry, FileHandle, FileRecord,
    FileWithPath, TreeNode, VecReader,
};
