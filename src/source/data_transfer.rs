//! Adapter for drag-and-drop payloads.
//!
//! The payload either supports per-item capability discovery or falls back
//! to a legacy flat file list with no folder information. Items are
//! classified once into an explicit source union instead of probing
//! capability surfaces throughout the resolution logic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::error::{HostError, ResolveError};
use crate::event::DragEventKind;
use crate::filter::remove_ignored;
use crate::resolve::resolve_node;
use crate::types::{FileCapability, FileHandle, FileWithPath, TreeNode};

/// Drag-and-drop payload surface, as exposed by the host platform.
pub trait DataTransfer: Send + Sync {
    /// Per-item discovery, when the platform supports it. `None` means only
    /// the legacy flat file list is available.
    fn items(&self) -> Option<Vec<Arc<dyn DataTransferItem>>>;

    /// Legacy flat file list; carries no folder information.
    fn files(&self) -> Vec<Arc<dyn FileCapability>>;
}

/// One dragged item and the capability surfaces it may expose.
#[async_trait]
pub trait DataTransferItem: Send + Sync {
    /// Whether the item carries a file payload at all (as opposed to, say,
    /// dragged text).
    fn is_file(&self) -> bool;

    /// Metadata-only stand-in for events where the platform forbids content
    /// access. Names may be empty; that is platform policy, not a bug.
    fn stub(&self) -> Arc<dyn FileCapability>;

    /// Modern file-system-access handle, when the platform provides one.
    async fn file_handle(&self) -> Result<Option<Arc<dyn FileHandle>>, HostError>;

    /// Legacy file-system entry; may be a whole directory.
    fn entry(&self) -> Option<TreeNode>;

    /// Plain file payload.
    fn as_file(&self) -> Option<Arc<dyn FileCapability>>;
}

/// How a dragged item will be resolved, decided once per item.
enum ItemSource {
    Handle(Arc<dyn FileHandle>),
    Entry(TreeNode),
    Raw(Arc<dyn FileCapability>),
}

/// Probe an item's capability surfaces in priority order: live handle,
/// then file-system entry, then plain file payload. An item exposing none
/// of the three is an acquisition failure, not a silent skip.
async fn classify(item: &dyn DataTransferItem) -> Result<ItemSource, ResolveError> {
    let probed = item.file_handle().await.map_err(|e| ResolveError::Acquisition {
        path: item.stub().name().to_string(),
        reason: e.reason,
    })?;
    if let Some(handle) = probed {
        return Ok(ItemSource::Handle(handle));
    }
    if let Some(node) = item.entry() {
        return Ok(ItemSource::Entry(node));
    }
    if let Some(file) = item.as_file() {
        return Ok(ItemSource::Raw(file));
    }
    Err(ResolveError::Acquisition {
        path: item.stub().name().to_string(),
        reason: "item does not expose a file".to_string(),
    })
}

async fn resolve_item(source: ItemSource) -> Result<Vec<FileWithPath>, ResolveError> {
    match source {
        ItemSource::Handle(handle) => {
            let file = handle.get_file().await.map_err(|e| ResolveError::Acquisition {
                path: handle.name().to_string(),
                reason: e.reason,
            })?;
            Ok(vec![FileWithPath::with_handle(file, None, &handle)])
        }
        ItemSource::Entry(node) => resolve_node(node).await,
        ItemSource::Raw(file) => Ok(vec![FileWithPath::new(file, None)]),
    }
}

/// Resolve a drag-and-drop payload into annotated files.
///
/// Outside a drop the platform forbids reading dragged content, so items
/// come back as metadata-only stubs with no recursion and no
/// materialization. Inside a drop every file-kind item is classified once
/// and resolved concurrently (joined in item order), directories recurse,
/// and junk entries are filtered from the result.
pub async fn from_data_transfer(
    transfer: Arc<dyn DataTransfer>,
    kind: DragEventKind,
) -> Result<Vec<FileWithPath>, ResolveError> {
    let Some(items) = transfer.items() else {
        // Legacy fallback: leaves only, no folder information.
        let files = transfer
            .files()
            .into_iter()
            .map(|file| FileWithPath::new(file, None))
            .collect();
        return Ok(remove_ignored(files));
    };

    let items: Vec<_> = items.into_iter().filter(|item| item.is_file()).collect();

    if kind != DragEventKind::Drop {
        trace!(kind = ?kind, items = items.len(), "non-drop drag event, returning stubs");
        return Ok(items
            .iter()
            .map(|item| FileWithPath::new(item.stub(), None))
            .collect());
    }

    let tasks: Vec<_> = items
        .into_iter()
        .map(|item| {
            tokio::spawn(async move { resolve_item(classify(item.as_ref()).await?).await })
        })
        .collect();

    let mut files = Vec::new();
    for task in tasks {
        files.extend(task.await??);
    }
    Ok(remove_ignored(files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemHandle, dir_node, file_node, mem_file};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubTransfer {
        items: Option<Vec<Arc<dyn DataTransferItem>>>,
        files: Vec<Arc<dyn FileCapability>>,
    }

    impl DataTransfer for StubTransfer {
        fn items(&self) -> Option<Vec<Arc<dyn DataTransferItem>>> {
            self.items.clone()
        }

        fn files(&self) -> Vec<Arc<dyn FileCapability>> {
            self.files.clone()
        }
    }

    struct StubItem {
        name: String,
        file_kind: bool,
        handle: Option<Arc<dyn FileHandle>>,
        entry: Option<TreeNode>,
        raw: Option<Arc<dyn FileCapability>>,
        probed: Arc<AtomicBool>,
    }

    impl Default for StubItem {
        fn default() -> Self {
            Self {
                name: String::new(),
                file_kind: true,
                handle: None,
                entry: None,
                raw: None,
                probed: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl DataTransferItem for StubItem {
        fn is_file(&self) -> bool {
            self.file_kind
        }

        fn stub(&self) -> Arc<dyn FileCapability> {
            mem_file(&self.name)
        }

        async fn file_handle(&self) -> Result<Option<Arc<dyn FileHandle>>, HostError> {
            self.probed.store(true, Ordering::SeqCst);
            Ok(self.handle.clone())
        }

        fn entry(&self) -> Option<TreeNode> {
            self.entry.clone()
        }

        fn as_file(&self) -> Option<Arc<dyn FileCapability>> {
            self.raw.clone()
        }
    }

    fn raw_item(name: &str) -> Arc<dyn DataTransferItem> {
        Arc::new(StubItem {
            name: name.to_string(),
            raw: Some(mem_file(name)),
            ..StubItem::default()
        })
    }

    fn transfer_with(items: Vec<Arc<dyn DataTransferItem>>) -> Arc<dyn DataTransfer> {
        Arc::new(StubTransfer {
            items: Some(items),
            files: Vec::new(),
        })
    }

    #[tokio::test]
    async fn test_drop_filters_junk() {
        let transfer = transfer_with(vec![
            raw_item("a.txt"),
            raw_item(".DS_Store"),
            raw_item("Thumbs.db"),
            raw_item("b.txt"),
        ]);
        let files = from_data_transfer(transfer, DragEventKind::Drop).await.unwrap();
        let names: Vec<_> = files.iter().map(FileWithPath::name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_drop_recurses_into_directory_entries() {
        let tree = dir_node(
            "",
            vec![vec![
                file_node("a.txt"),
                dir_node("sub", vec![vec![file_node("sub/b.txt"), file_node("sub/c.txt")]]),
            ]],
        );
        let item: Arc<dyn DataTransferItem> = Arc::new(StubItem {
            name: "root".to_string(),
            entry: Some(tree),
            ..StubItem::default()
        });
        let files = from_data_transfer(transfer_with(vec![item]), DragEventKind::Drop)
            .await
            .unwrap();
        let paths: Vec<_> = files.iter().map(FileWithPath::path).collect();
        assert_eq!(paths, vec!["a.txt", "sub/b.txt", "sub/c.txt"]);
    }

    #[tokio::test]
    async fn test_handle_wins_over_raw_file() {
        let handle: Arc<dyn FileHandle> = Arc::new(MemHandle::new("pic.png"));
        // Hold a strong reference; the attached back-reference is weak.
        let keep_alive = handle.clone();
        let item: Arc<dyn DataTransferItem> = Arc::new(StubItem {
            name: "pic.png".to_string(),
            handle: Some(handle),
            raw: Some(mem_file("pic.png")),
            ..StubItem::default()
        });
        let files = from_data_transfer(transfer_with(vec![item]), DragEventKind::Drop)
            .await
            .unwrap();
        assert_eq!(files.len(), 1);
        // Only the handle path attaches a back-reference.
        assert!(files[0].handle().is_some());
        drop(keep_alive);
    }

    #[tokio::test]
    async fn test_non_file_items_excluded() {
        let text_item: Arc<dyn DataTransferItem> = Arc::new(StubItem {
            name: "dragged text".to_string(),
            file_kind: false,
            ..StubItem::default()
        });
        let files = from_data_transfer(
            transfer_with(vec![text_item, raw_item("a.txt")]),
            DragEventKind::Drop,
        )
        .await
        .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "a.txt");
    }

    #[tokio::test]
    async fn test_non_drop_returns_stubs_without_probing() {
        let probed = Arc::new(AtomicBool::new(false));
        let item: Arc<dyn DataTransferItem> = Arc::new(StubItem {
            name: "a.txt".to_string(),
            raw: Some(mem_file("a.txt")),
            probed: probed.clone(),
            ..StubItem::default()
        });
        let files = from_data_transfer(transfer_with(vec![item]), DragEventKind::DragEnter)
            .await
            .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "a.txt");
        assert!(!probed.load(Ordering::SeqCst), "must not touch content surfaces");
    }

    #[tokio::test]
    async fn test_item_without_surfaces_fails() {
        let bare: Arc<dyn DataTransferItem> = Arc::new(StubItem {
            name: "ghost".to_string(),
            ..StubItem::default()
        });
        let err = from_data_transfer(transfer_with(vec![bare]), DragEventKind::Drop)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Acquisition { .. }));
    }

    #[tokio::test]
    async fn test_flat_fallback_filters_junk() {
        let transfer: Arc<dyn DataTransfer> = Arc::new(StubTransfer {
            items: None,
            files: vec![mem_file("a.txt"), mem_file(".DS_Store")],
        });
        let files = from_data_transfer(transfer, DragEventKind::Drop).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path(), "a.txt");
    }
}
