//! Driving port for program management.
use async_trait::async_trait;

use crate::domain::{
    DeleteMode, EntityName, Error, Program, ProgramCategory, ProgramCode, PublicId,
};

/// File received with a create request, still held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    /// Client-supplied file name; only its extension is kept.
    pub original_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedArtifact")
            .field("original_name", &self.original_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Input for [`ProgramCatalogue::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProgramRequest {
    /// Unique program name.
    pub name: EntityName,
    /// Departments to link.
    pub department_ids: Vec<PublicId>,
    /// Directorates to link.
    pub directorate_ids: Vec<PublicId>,
    /// Code series.
    pub category: ProgramCategory,
    /// Free-form user identifiers.
    pub users: Vec<String>,
    /// Uploaded artifact, required.
    pub artifact: Option<UploadedArtifact>,
}

/// Domain use-case port for programs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramCatalogue: Send + Sync {
    /// Create a program and return its allocated code.
    async fn create(&self, request: CreateProgramRequest) -> Result<ProgramCode, Error>;

    /// Every live program. An empty catalogue yields an empty list.
    async fn list(&self) -> Result<Vec<Program>, Error>;

    /// A single live program.
    async fn find(&self, code: &ProgramCode) -> Result<Program, Error>;

    /// Delete a program.
    async fn delete(&self, code: &ProgramCode, mode: DeleteMode) -> Result<(), Error>;
}
