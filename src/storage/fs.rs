use super::ObjectStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Filesystem-backed object store
///
/// Containers map to subdirectories under a root directory; the root is
/// what the `storage.connection` setting points at. Used by the binary
/// and the integration tests; a cloud blob store slots in behind the same
/// trait.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create store root: {}", root.display()))?;

        Ok(Self { root })
    }

    fn blob_path(&self, container: &str, blob: &str) -> PathBuf {
        self.root.join(container).join(blob)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FsObjectStore {
    async fn download(&self, container: &str, blob: &str, dest: &Path) -> Result<u64> {
        let src = self.blob_path(container, blob);

        let bytes = tokio::fs::copy(&src, dest)
            .await
            .with_context(|| format!("Failed to download blob {}/{}", container, blob))?;

        info!("Downloaded {}/{} ({} bytes)", container, blob, bytes);

        Ok(bytes)
    }

    async fn upload(&self, container: &str, blob: &str, src: &Path) -> Result<()> {
        let dest = self.blob_path(container, blob);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create container: {}", container))?;
        }

        let bytes = tokio::fs::copy(src, &dest)
            .await
            .with_context(|| format!("Failed to upload blob {}/{}", container, blob))?;

        info!("Uploaded {}/{} ({} bytes)", container, blob, bytes);

        Ok(())
    }
}
