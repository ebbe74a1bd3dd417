//! Single entry point: classify an input by shape and dispatch to the
//! matching adapter.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResolveError;
use crate::source::{DataTransfer, from_data_transfer, from_handles, from_input_change};
use crate::types::{FileCapability, FileHandle, FileWithPath};

/// The drag event a payload arrived with. Only a drop grants access to the
/// dragged content; every other kind yields metadata stubs (platform
/// security policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragEventKind {
    Drop,
    DragEnter,
    DragOver,
    DragLeave,
}

/// An input to [`from_event`], classified by shape rather than by flag.
pub enum EventInput {
    /// Drag-and-drop payload together with its event kind.
    DataTransfer {
        transfer: Arc<dyn DataTransfer>,
        kind: DragEventKind,
    },
    /// Change event from a file input: a flat selection, no folders.
    Change { files: Vec<Arc<dyn FileCapability>> },
    /// A list of file-system-access handles.
    Handles(Vec<Arc<dyn FileHandle>>),
    /// Anything else. Resolves to an empty list, never an error, so callers
    /// may probe with arbitrary event-like values.
    Unrecognized,
}

impl EventInput {
    pub fn data_transfer(transfer: Arc<dyn DataTransfer>, kind: DragEventKind) -> Self {
        Self::DataTransfer { transfer, kind }
    }
}

impl From<Vec<Arc<dyn FileCapability>>> for EventInput {
    fn from(files: Vec<Arc<dyn FileCapability>>) -> Self {
        Self::Change { files }
    }
}

impl From<Vec<Arc<dyn FileHandle>>> for EventInput {
    fn from(handles: Vec<Arc<dyn FileHandle>>) -> Self {
        Self::Handles(handles)
    }
}

/// Normalize any supported input into a flat, ordered list of files
/// annotated with their hierarchy-relative paths.
///
/// Dispatch is by input shape: drag-and-drop payloads recurse into dropped
/// folders and filter junk entries; picker selections are annotated as-is;
/// handle lists are resolved concurrently with back-references attached.
/// Unrecognized inputs resolve to an empty list.
pub async fn from_event(input: EventInput) -> Result<Vec<FileWithPath>, ResolveError> {
    match input {
        EventInput::DataTransfer { transfer, kind } => from_data_transfer(transfer, kind).await,
        EventInput::Change { files } => Ok(from_input_change(files)),
        EventInput::Handles(handles) => from_handles(handles).await,
        EventInput::Unrecognized => {
            debug!("unrecognized input shape, resolving to empty list");
            Ok(Vec::new())
        }
    }
}
