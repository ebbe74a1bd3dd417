//! Adapter for lists of file-system-access handles.

use std::sync::Arc;

use crate::error::ResolveError;
use crate::types::{FileHandle, FileWithPath};

/// Resolve a list of live handles to their current files: all handles
/// concurrently, joined in input order. Each record keeps a weak
/// back-reference to its handle so callers can re-acquire the file later.
///
/// Handles are taken to be file handles; directory recursion does not
/// happen on this path. No junk filtering is applied.
pub async fn from_handles(
    handles: Vec<Arc<dyn FileHandle>>,
) -> Result<Vec<FileWithPath>, ResolveError> {
    let tasks: Vec<_> = handles
        .into_iter()
        .map(|handle| {
            tokio::spawn(async move {
                let file = handle.get_file().await.map_err(|e| ResolveError::Acquisition {
                    path: handle.name().to_string(),
                    reason: e.reason,
                })?;
                Ok::<_, ResolveError>(FileWithPath::with_handle(file, None, &handle))
            })
        })
        .collect();

    let mut files = Vec::with_capacity(tasks.len());
    for task in tasks {
        files.push(task.await??);
    }
    Ok(files)
}
