//! In-memory host used by unit tests: files, directories, and handles with
//! injectable delays and failures.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::HostError;
use crate::types::{
    DirectoryEntry, DirectoryReader, FileCapability, FileEntry, FileHandle, TreeNode, VecReader,
};

pub struct MemFile {
    pub name: String,
    pub size: u64,
}

impl FileCapability for MemFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }
}

pub fn mem_file(name: &str) -> Arc<dyn FileCapability> {
    Arc::new(MemFile {
        name: name.to_string(),
        size: 0,
    })
}

pub struct MemHandle {
    name: String,
    fail: bool,
}

impl MemHandle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: true,
        }
    }
}

#[async_trait]
impl FileHandle for MemHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_file(&self) -> Result<Arc<dyn FileCapability>, HostError> {
        if self.fail {
            return Err(HostError::new("handle revoked"));
        }
        Ok(mem_file(&self.name))
    }
}

struct MemEntry {
    path: String,
    delay: Duration,
    fail: bool,
}

#[async_trait]
impl FileEntry for MemEntry {
    fn path(&self) -> String {
        self.path.clone()
    }

    async fn file(&self) -> Result<Arc<dyn FileCapability>, HostError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(HostError::new("permission denied"));
        }
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        Ok(mem_file(name))
    }
}

pub fn file_node(path: &str) -> TreeNode {
    TreeNode::File(Arc::new(MemEntry {
        path: path.to_string(),
        delay: Duration::ZERO,
        fail: false,
    }))
}

pub fn slow_file_node(path: &str, delay_ms: u64) -> TreeNode {
    TreeNode::File(Arc::new(MemEntry {
        path: path.to_string(),
        delay: Duration::from_millis(delay_ms),
        fail: false,
    }))
}

pub fn failing_file_node(path: &str) -> TreeNode {
    TreeNode::File(Arc::new(MemEntry {
        path: path.to_string(),
        delay: Duration::ZERO,
        fail: true,
    }))
}

struct MemDir {
    path: String,
    batches: Vec<Vec<TreeNode>>,
    fail_after: Option<usize>,
}

impl DirectoryEntry for MemDir {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn read(&self) -> Box<dyn DirectoryReader> {
        match self.fail_after {
            None => Box::new(VecReader::new(self.batches.clone())),
            Some(fail_after) => Box::new(FailingReader {
                batches: self.batches.clone().into(),
                served: 0,
                fail_after,
            }),
        }
    }
}

struct FailingReader {
    batches: VecDeque<Vec<TreeNode>>,
    served: usize,
    fail_after: usize,
}

#[async_trait]
impl DirectoryReader for FailingReader {
    async fn next_batch(&mut self) -> Result<Option<Vec<TreeNode>>, HostError> {
        if self.served == self.fail_after {
            return Err(HostError::new("device went away"));
        }
        self.served += 1;
        Ok(self.batches.pop_front())
    }
}

pub fn dir_node(path: &str, batches: Vec<Vec<TreeNode>>) -> TreeNode {
    TreeNode::Directory(Arc::new(MemDir {
        path: path.to_string(),
        batches,
        fail_after: None,
    }))
}

/// Directory whose enumeration fails after `fail_after` successful batches.
pub fn failing_dir_node(path: &str, batches: Vec<Vec<TreeNode>>, fail_after: usize) -> TreeNode {
    TreeNode::Directory(Arc::new(MemDir {
        path: path.to_string(),
        batches,
        fail_after: Some(fail_after),
    }))
}
