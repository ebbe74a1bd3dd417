//! Adapter for file-picker change events.

use std::sync::Arc;

use crate::types::{FileCapability, FileWithPath};

/// Annotate a flat picker selection. No folder semantics are possible here,
/// so every path is the bare file name and input order is preserved.
///
/// The ignore set is not applied on this path: an explicit picker selection
/// is taken at face value, unlike an uncontrolled drop source.
pub fn from_input_change(files: Vec<Arc<dyn FileCapability>>) -> Vec<FileWithPath> {
    files
        .into_iter()
        .map(|file| FileWithPath::new(file, None))
        .collect()
}
