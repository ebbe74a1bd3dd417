//! Recursive resolution of dropped hierarchies into flat file lists.
//!
//! Directories are drained batch by batch. Every child of a batch starts
//! resolving before the next batch is requested, so enumeration latency
//! overlaps with recursive resolution without unbounded buffering. Results
//! are joined in submission order (batch order, then child order within a
//! batch), never completion order, so the output is deterministic across
//! runs.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::types::{DirectoryEntry, FileEntry, FileWithPath, TreeNode};

type BoxedResolve = Pin<Box<dyn Future<Output = Result<Vec<FileWithPath>, ResolveError>> + Send>>;

/// Resolve one node of a dropped hierarchy into its flattened descendant
/// files.
///
/// A leaf file yields exactly one record; a directory yields every
/// descendant leaf, each annotated with its hierarchy-relative path.
/// Directories themselves never appear in the output. A directory resolves
/// all-or-nothing: the first acquisition or enumeration failure in the
/// subtree aborts the whole call.
pub async fn resolve_node(node: TreeNode) -> Result<Vec<FileWithPath>, ResolveError> {
    match node {
        TreeNode::File(entry) => Ok(vec![resolve_file(entry).await?]),
        TreeNode::Directory(dir) => walk_directory(dir).await,
    }
}

// Recursion through spawned tasks needs a type-erased future.
fn resolve_node_boxed(node: TreeNode) -> BoxedResolve {
    Box::pin(resolve_node(node))
}

async fn resolve_file(entry: Arc<dyn FileEntry>) -> Result<FileWithPath, ResolveError> {
    let path = entry.path();
    let file = entry
        .file()
        .await
        .map_err(|e| ResolveError::Acquisition {
            path: path.clone(),
            reason: e.reason,
        })?;
    Ok(FileWithPath::new(file, Some(path)))
}

async fn walk_directory(dir: Arc<dyn DirectoryEntry>) -> Result<Vec<FileWithPath>, ResolveError> {
    let mut reader = dir.read();
    let mut pending: Vec<Vec<JoinHandle<Result<Vec<FileWithPath>, ResolveError>>>> = Vec::new();

    loop {
        match reader.next_batch().await {
            Ok(Some(children)) => {
                // An explicit empty batch is the host's end-of-listing
                // sentinel, same as `None`.
                if children.is_empty() {
                    break;
                }
                trace!(dir = %dir.path(), children = children.len(), "directory batch received");
                let handles = children
                    .into_iter()
                    .map(|child| tokio::spawn(resolve_node_boxed(child)))
                    .collect();
                pending.push(handles);
            }
            Ok(None) => break,
            Err(e) => {
                // In-flight branches are discarded, not cancelled; the walk
                // itself is all-or-nothing.
                return Err(ResolveError::Enumeration {
                    path: dir.path(),
                    reason: e.reason,
                });
            }
        }
    }

    let mut files = Vec::new();
    for batch in pending {
        for handle in batch {
            files.extend(handle.await??);
        }
    }
    debug!(dir = %dir.path(), files = files.len(), "directory resolved");
    Ok(files)
}
