//! Port abstraction for uploaded program artifacts.
//!
//! Uploads land under a temporary name first. Once a program code has been
//! allocated the staged file is promoted to `{code}{ext}`; rejected requests
//! discard it instead.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by artifact storage adapters.
    pub enum ArtifactStoreError {
        /// The supplied file name cannot be stored safely.
        InvalidName { name } => "artifact name is not permitted: {name}",
        /// A promoted file with the target name already exists.
        Occupied { name } => "artifact {name} already exists",
        /// Filesystem I/O failed.
        Io { message } => "artifact storage failed: {message}",
    }
}

/// An upload written under its temporary name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    file_name: String,
    extension: String,
}

impl StagedArtifact {
    /// Describe a staged file by its temporary name and original extension.
    ///
    /// `extension` includes the leading dot, or is empty.
    pub fn new(file_name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extension: extension.into(),
        }
    }

    /// Temporary file name inside the artifact directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Original extension including the dot, such as `.pdf`.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.extension.as_str()
    }

    /// Final file name once promoted under `stem`.
    #[must_use]
    pub fn promoted_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.extension)
    }
}

/// Extension of `original_name`, including the dot, or empty when absent.
///
/// # Examples
/// ```
/// use org_registry::domain::ports::extension_of;
///
/// assert_eq!(extension_of("charter.final.pdf"), ".pdf");
/// assert_eq!(extension_of("README"), "");
/// assert_eq!(extension_of(".env"), "");
/// ```
#[must_use]
pub fn extension_of(original_name: &str) -> &str {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    match base.rfind('.') {
        Some(0) | None => "",
        Some(index) => &base[index..],
    }
}

/// Storage for uploaded artifacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `bytes` under a fresh temporary name derived from `original_name`.
    async fn stage(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StagedArtifact, ArtifactStoreError>;

    /// Rename a staged file to `{stem}{ext}` and return the final file name.
    ///
    /// An existing file under the final name is never replaced.
    async fn promote(
        &self,
        staged: &StagedArtifact,
        stem: &str,
    ) -> Result<String, ArtifactStoreError>;

    /// Delete a staged file that will not be promoted.
    async fn discard(&self, staged: &StagedArtifact) -> Result<(), ArtifactStoreError>;
}
