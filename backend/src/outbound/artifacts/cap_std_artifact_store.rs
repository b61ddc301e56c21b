//! `ArtifactStore` backed by a capability-scoped public directory.
//!
//! All paths are resolved relative to the opened [`Dir`], so neither an
//! uploaded file name nor a stem can escape it.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use mockable::Clock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ArtifactStore, ArtifactStoreError, StagedArtifact, extension_of};

/// Artifact store rooted at the configured public directory.
#[derive(Clone)]
pub struct CapStdArtifactStore {
    dir: Arc<Dir>,
    clock: Arc<dyn Clock>,
}

impl CapStdArtifactStore {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Path, clock: Arc<dyn Clock>) -> Result<Self, ArtifactStoreError> {
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(map_io_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(map_io_error)?;
        Ok(Self {
            dir: Arc::new(dir),
            clock,
        })
    }

    fn staged_name(&self, extension: &str) -> String {
        let millis = self.clock.utc().timestamp_millis();
        format!("{millis}-{}{extension}", Uuid::new_v4().simple())
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, ArtifactStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> io::Result<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || op(&dir))
            .await
            .map_err(|err| ArtifactStoreError::io(err.to_string()))?
            .map_err(map_io_error)
    }
}

fn map_io_error(error: io::Error) -> ArtifactStoreError {
    debug!(kind = ?error.kind(), %error, "artifact storage failed");
    ArtifactStoreError::io(error.to_string())
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[async_trait]
impl ArtifactStore for CapStdArtifactStore {
    async fn stage(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StagedArtifact, ArtifactStoreError> {
        let extension = extension_of(original_name).to_owned();
        let file_name = self.staged_name(&extension);
        let target = file_name.clone();
        self.run_blocking(move |dir| dir.write(&target, bytes)).await?;
        Ok(StagedArtifact::new(file_name, extension))
    }

    async fn promote(
        &self,
        staged: &StagedArtifact,
        stem: &str,
    ) -> Result<String, ArtifactStoreError> {
        if !is_plain_name(stem) {
            return Err(ArtifactStoreError::invalid_name(stem));
        }
        let from = staged.file_name().to_owned();
        let to = staged.promoted_name(stem);
        let target = to.clone();
        let renamed = self
            .run_blocking(move |dir| {
                if dir.exists(&target) {
                    return Ok(false);
                }
                dir.rename(&from, dir, &target).map(|()| true)
            })
            .await?;
        if renamed {
            Ok(to)
        } else {
            Err(ArtifactStoreError::occupied(to))
        }
    }

    async fn discard(&self, staged: &StagedArtifact) -> Result<(), ArtifactStoreError> {
        let name = staged.file_name().to_owned();
        self.run_blocking(move |dir| match dir.remove_file(&name) {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        })
        .await
    }
}
