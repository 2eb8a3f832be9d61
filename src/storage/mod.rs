//! Object storage collaborator
//!
//! Two operations are consumed per job: download the incoming audio blob
//! into a local working file and upload the transcript back. Containers
//! are logical names (`audio`, `text`) resolved by the implementation.

mod fs;

pub use fs::FsObjectStore;

use anyhow::Result;
use std::path::Path;

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download `container/blob` into `dest`, overwriting an existing file.
    ///
    /// Returns the number of bytes written.
    async fn download(&self, container: &str, blob: &str, dest: &Path) -> Result<u64>;

    /// Upload `src` to `container/blob`, overwriting an existing blob.
    async fn upload(&self, container: &str, blob: &str, src: &Path) -> Result<()>;
}
