//! Native filesystem host: the capability traits implemented over the local
//! filesystem with `tokio::fs`, so hierarchies can be resolved without a
//! browser-like platform host.
//!
//! Children are enumerated in bounded batches, mirroring the paginated
//! listing protocol the engine is built around. Relative paths are produced
//! against the directory the hierarchy was rooted at; the root's own name is
//! not part of them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::HostError;
use crate::types::{DirectoryEntry, DirectoryReader, FileCapability, FileEntry, TreeNode};

/// Upper bound on children returned per enumeration batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// File capability backed by metadata captured at materialization time.
#[derive(Debug, Clone)]
pub struct FsFile {
    name: String,
    size: u64,
    modified: Option<SystemTime>,
}

impl FileCapability for FsFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

/// A leaf file on the local filesystem.
pub struct FsEntry {
    abs: PathBuf,
    rel: String,
}

#[async_trait]
impl FileEntry for FsEntry {
    fn path(&self) -> String {
        self.rel.clone()
    }

    async fn file(&self) -> Result<Arc<dyn FileCapability>, HostError> {
        let meta = tokio::fs::metadata(&self.abs).await?;
        let name = base_name(&self.abs)?;
        Ok(Arc::new(FsFile {
            name,
            size: meta.len(),
            modified: meta.modified().ok(),
        }))
    }
}

/// A directory on the local filesystem.
pub struct FsDirectory {
    abs: PathBuf,
    rel: String,
    batch_size: usize,
}

impl FsDirectory {
    /// Root a hierarchy at `path`. Descendant paths are produced relative to
    /// it, without the directory's own name as a leading segment.
    pub fn root(path: impl Into<PathBuf>) -> Self {
        Self {
            abs: path.into(),
            rel: String::new(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the enumeration batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

impl DirectoryEntry for FsDirectory {
    fn path(&self) -> String {
        // The hierarchy root has no relative path; report where it lives so
        // error context stays useful.
        if self.rel.is_empty() {
            self.abs.display().to_string()
        } else {
            self.rel.clone()
        }
    }

    fn read(&self) -> Box<dyn DirectoryReader> {
        Box::new(FsReader {
            abs: self.abs.clone(),
            rel: self.rel.clone(),
            batch_size: self.batch_size,
            entries: None,
            done: false,
        })
    }
}

/// Drains `tokio::fs::ReadDir` in bounded batches. Symlinks and special
/// files are skipped; enumeration order is whatever the OS returns.
pub struct FsReader {
    abs: PathBuf,
    rel: String,
    batch_size: usize,
    entries: Option<tokio::fs::ReadDir>,
    done: bool,
}

#[async_trait]
impl DirectoryReader for FsReader {
    async fn next_batch(&mut self) -> Result<Option<Vec<TreeNode>>, HostError> {
        if self.done {
            return Ok(None);
        }
        let reader = match &mut self.entries {
            Some(reader) => reader,
            entries @ None => entries.insert(tokio::fs::read_dir(&self.abs).await?),
        };

        let mut batch = Vec::new();
        while batch.len() < self.batch_size {
            let Some(entry) = reader.next_entry().await? else {
                self.done = true;
                break;
            };
            let name = entry.file_name().into_string().map_err(|name| {
                HostError::new(format!(
                    "non UTF-8 file name '{}' under '{}'",
                    name.to_string_lossy(),
                    self.abs.display()
                ))
            })?;
            let rel = join_rel(&self.rel, &name);
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                batch.push(TreeNode::Directory(Arc::new(FsDirectory {
                    abs: entry.path(),
                    rel,
                    batch_size: self.batch_size,
                })));
            } else if file_type.is_file() {
                batch.push(TreeNode::File(Arc::new(FsEntry {
                    abs: entry.path(),
                    rel,
                })));
            }
            // Symlinks and special files fall through unrecorded.
        }

        if batch.is_empty() {
            self.done = true;
            return Ok(None);
        }
        Ok(Some(batch))
    }
}

/// Classify a filesystem path into a tree node: a directory becomes a
/// hierarchy root, anything else a standalone leaf whose relative path is
/// its bare name.
pub async fn node_from_path(path: impl Into<PathBuf>) -> Result<TreeNode, HostError> {
    let path = path.into();
    let meta = tokio::fs::metadata(&path).await?;
    if meta.is_dir() {
        Ok(TreeNode::Directory(Arc::new(FsDirectory::root(path))))
    } else {
        let rel = base_name(&path)?;
        Ok(TreeNode::File(Arc::new(FsEntry { abs: path, rel })))
    }
}

fn base_name(path: &std::path::Path) -> Result<String, HostError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| HostError::new(format!("non UTF-8 file name at '{}'", path.display())))
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
