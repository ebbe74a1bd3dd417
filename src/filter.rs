//! Removal of OS-generated junk entries from resolved file lists.

use crate::types::FileWithPath;

/// Thumbnail-cache artifacts created by macOS and Windows file managers.
/// Fixed, process-wide; never configurable at runtime.
pub const IGNORED_FILES: [&str; 2] = [".DS_Store", "Thumbs.db"];

/// Drop entries whose base name matches the ignore set exactly, preserving
/// the order of everything else. Matching is on the name, not the path, so
/// junk buried inside dropped folders is removed too.
pub fn remove_ignored(files: Vec<FileWithPath>) -> Vec<FileWithPath> {
    files
        .into_iter()
        .filter(|file| !IGNORED_FILES.contains(&file.name()))
        .collect()
}
