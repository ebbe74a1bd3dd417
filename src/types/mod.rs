//! Capability traits and value types for dropped or selected files.
//!
//! The host platform (a browser-like environment, or the native filesystem
//! host in [`crate::fs`]) owns every file; this crate only sees opaque
//! capabilities. A dropped hierarchy arrives as [`TreeNode`]s and leaves as
//! flat [`FileWithPath`] records.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::SystemTime;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Host-owned handle to a single file's bytes and basic metadata.
///
/// The engine never reads contents and never mutates the capability; it only
/// reads the name and wraps the handle.
pub trait FileCapability: Send + Sync {
    /// Base name of the file, without any path segments.
    fn name(&self) -> &str;

    /// Size in bytes, as reported by the host.
    fn size(&self) -> u64;

    /// Last-modified time, when the host exposes one.
    fn modified(&self) -> Option<SystemTime> {
        None
    }
}

/// Live capability handle in the file-system-access style: can be asked for
/// the file behind it at any time.
#[async_trait]
pub trait FileHandle: Send + Sync {
    /// Name the handle was issued under.
    fn name(&self) -> &str;

    /// Materialize the current file behind the handle. Suspends, and fails
    /// if the handle has been revoked.
    async fn get_file(&self) -> Result<Arc<dyn FileCapability>, HostError>;
}

/// A leaf file inside a dropped hierarchy.
#[async_trait]
pub trait FileEntry: Send + Sync {
    /// Path of this entry relative to the dropped root.
    fn path(&self) -> String;

    /// Materialize the file capability. This is a suspension point (it may
    /// wait on a permission grant or a read) and may fail if the underlying
    /// handle was revoked.
    async fn file(&self) -> Result<Arc<dyn FileCapability>, HostError>;
}

/// A directory inside a dropped hierarchy.
pub trait DirectoryEntry: Send + Sync {
    /// Path of this directory relative to the dropped root.
    fn path(&self) -> String;

    /// Start a fresh enumeration of the directory's immediate children.
    fn read(&self) -> Box<dyn DirectoryReader>;
}

/// Pull-based batch enumeration of a directory's immediate children.
///
/// `next_batch` is called repeatedly until it reports `Ok(None)`. Hosts
/// whose native listing API delivers batches through callbacks adapt it to
/// this contract; no ordering between batches is promised beyond whatever
/// the host returns.
#[async_trait]
pub trait DirectoryReader: Send {
    async fn next_batch(&mut self) -> Result<Option<Vec<TreeNode>>, HostError>;
}

/// One node of a dropped hierarchy.
#[derive(Clone)]
pub enum TreeNode {
    File(Arc<dyn FileEntry>),
    Directory(Arc<dyn DirectoryEntry>),
}

impl TreeNode {
    /// Path of the node relative to the dropped root.
    pub fn path(&self) -> String {
        match self {
            TreeNode::File(entry) => entry.path(),
            TreeNode::Directory(dir) => dir.path(),
        }
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::File(entry) => f.debug_tuple("File").field(&entry.path()).finish(),
            TreeNode::Directory(dir) => f.debug_tuple("Directory").field(&dir.path()).finish(),
        }
    }
}

/// A static batch list, for hosts that already hold all children in memory.
pub struct VecReader {
    batches: VecDeque<Vec<TreeNode>>,
}

impl VecReader {
    pub fn new(batches: Vec<Vec<TreeNode>>) -> Self {
        Self {
            batches: batches.into(),
        }
    }
}

#[async_trait]
impl DirectoryReader for VecReader {
    async fn next_batch(&mut self) -> Result<Option<Vec<TreeNode>>, HostError> {
        Ok(self.batches.pop_front())
    }
}

/// A file capability annotated with the relative path it occupied in its
/// source hierarchy. The engine's output unit.
///
/// The path is fixed at resolution time; it is not a live view, so nothing
/// is re-derived if the underlying tree mutates afterwards.
#[derive(Clone)]
pub struct FileWithPath {
    file: Arc<dyn FileCapability>,
    path: String,
    handle: Option<Weak<dyn FileHandle>>,
}

impl FileWithPath {
    /// Annotate a capability with its relative path. Without an explicit
    /// path the bare file name is used, so a flat selection round-trips
    /// unchanged.
    pub fn new(file: Arc<dyn FileCapability>, path: Option<String>) -> Self {
        let path = path.unwrap_or_else(|| file.name().to_string());
        Self {
            file,
            path,
            handle: None,
        }
    }

    /// Annotate a capability obtained through a live handle, keeping a
    /// non-owning back-reference so callers can re-acquire the file later.
    pub fn with_handle(
        file: Arc<dyn FileCapability>,
        path: Option<String>,
        handle: &Arc<dyn FileHandle>,
    ) -> Self {
        let mut annotated = Self::new(file, path);
        annotated.handle = Some(Arc::downgrade(handle));
        annotated
    }

    /// Base name of the file.
    pub fn name(&self) -> &str {
        self.file.name()
    }

    /// Relative path within the originating hierarchy.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.file.size()
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.file.modified()
    }

    /// The wrapped capability.
    pub fn file(&self) -> &Arc<dyn FileCapability> {
        &self.file
    }

    /// Upgrade the back-reference to a live handle, if one was attached and
    /// the host still holds it.
    pub fn handle(&self) -> Option<Arc<dyn FileHandle>> {
        self.handle.as_ref().and_then(Weak::upgrade)
    }
}

// Structural equality: name and path. Back-reference identity is excluded
// on purpose; two resolutions of the same capability compare equal.
impl PartialEq for FileWithPath {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.path == other.path
    }
}

impl Eq for FileWithPath {}

impl fmt::Debug for FileWithPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWithPath")
            .field("name", &self.name())
            .field("path", &self.path)
            .field("size", &self.size())
            .finish()
    }
}

/// Serializable snapshot of a resolved record, for callers that persist or
/// log the outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    pub size: u64,
}

impl From<&FileWithPath> for FileRecord {
    fn from(file: &FileWithPath) -> Self {
        Self {
            name: file.name().to_string(),
            path: file.path().to_string(),
            size: file.size(),
        }
    }
}
