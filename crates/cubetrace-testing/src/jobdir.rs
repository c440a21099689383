//! Isolated on-disk job directory fixtures.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary job directory with per-node subdirectories, shaped the way a
/// distributed run lays its logs out. Torn down when dropped.
///
/// # Example
/// ```no_run
/// use cubetrace_testing::JobDir;
///
/// let dir = JobDir::new();
/// dir.write_worker_log(0, 0, 9, "878.100 <c-1#9:0> Destructing logger\n")
///     .unwrap();
/// ```
pub struct JobDir {
    temp_dir: TempDir,
}

impl Default for JobDir {
    fn default() -> Self {
        Self::new()
    }
}

impl JobDir {
    /// Create a new empty job directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// The job directory root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a worker log named `log.<rank>#<job>` under node directory
    /// `node`.
    pub fn write_worker_log(
        &self,
        node: u32,
        rank: u32,
        job: u32,
        content: &str,
    ) -> Result<PathBuf> {
        self.write_node_file(node, &format!("log.{}#{}", rank, job), content)
    }

    /// Write the client log `log.<node>` under node directory `node`.
    pub fn write_client_log(&self, node: u32, content: &str) -> Result<PathBuf> {
        self.write_node_file(node, &format!("log.{}", node), content)
    }

    /// Write an arbitrary file under node directory `node`.
    pub fn write_node_file(&self, node: u32, name: &str, content: &str) -> Result<PathBuf> {
        let node_dir = self.temp_dir.path().join(node.to_string());
        fs::create_dir_all(&node_dir)?;
        let path = node_dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }
}
