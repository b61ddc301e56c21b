//! Program assembly service.
//!
//! Creation stages the uploaded artifact, validates the request against the
//! registries, then allocates a code, promotes the artifact to that code and
//! persists the program while holding the category lock.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ArtifactStore, ArtifactStoreError, CreateProgramRequest, DepartmentRegistry,
    DirectorateRegistry, ProgramCatalogue, ProgramRepository, RepositoryError, StagedArtifact,
    map_repository_error,
};
use crate::domain::{
    CategoryLocks, CodeAllocationError, DeleteMode, EntityId, Error, NewProgram, Program,
    ProgramCode, next_program_code,
};

/// Program service implementing [`ProgramCatalogue`].
#[derive(Clone)]
pub struct ProgramService<P, A> {
    programs: Arc<P>,
    artifacts: Arc<A>,
    departments: Arc<dyn DepartmentRegistry>,
    directorates: Arc<dyn DirectorateRegistry>,
    locks: CategoryLocks,
}

impl<P, A> ProgramService<P, A> {
    /// Create a new service.
    pub fn new(
        programs: Arc<P>,
        artifacts: Arc<A>,
        departments: Arc<dyn DepartmentRegistry>,
        directorates: Arc<dyn DirectorateRegistry>,
    ) -> Self {
        Self {
            programs,
            artifacts,
            departments,
            directorates,
            locks: CategoryLocks::new(),
        }
    }
}

fn map_artifact_error(error: ArtifactStoreError) -> Error {
    match error {
        ArtifactStoreError::InvalidName { name } => {
            Error::invalid_request(format!("File name {name} is not permitted"))
        }
        ArtifactStoreError::Occupied { name } => {
            Error::conflict(format!("An artifact named {name} is already stored"))
        }
        ArtifactStoreError::Io { message } => {
            Error::internal(format!("artifact storage failed: {message}"))
        }
    }
}

fn map_allocation_error(error: CodeAllocationError) -> Error {
    Error::internal(format!("program code allocation failed: {error}"))
}

fn not_found(code: &ProgramCode) -> Error {
    Error::not_found(format!("Program with code {code} not found"))
}

/// Links resolved during validation.
struct ResolvedLinks {
    department_ids: Vec<EntityId>,
    directorate_ids: Vec<EntityId>,
}

impl<P, A> ProgramService<P, A>
where
    P: ProgramRepository,
    A: ArtifactStore,
{
    async fn validate(&self, request: &CreateProgramRequest) -> Result<ResolvedLinks, Error> {
        let existing = self
            .programs
            .find_id_by_name(request.name.as_ref())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(format!(
                "Program with name {} already exists",
                request.name
            )));
        }

        let departments = self
            .departments
            .find_by_ids(&request.department_ids)
            .await?;
        if departments.is_empty() {
            return Err(Error::not_found("Departments not found"));
        }

        let directorates = self
            .directorates
            .find_by_ids(&request.directorate_ids)
            .await?;
        if directorates.is_empty() {
            return Err(Error::not_found("Directorates not found"));
        }

        Ok(ResolvedLinks {
            department_ids: departments.iter().map(|d| d.id()).collect(),
            directorate_ids: directorates.iter().map(|d| d.id()).collect(),
        })
    }

    async fn discard_quietly(&self, staged: &StagedArtifact) {
        if let Err(error) = self.artifacts.discard(staged).await {
            warn!(file = staged.file_name(), %error, "failed to discard staged artifact");
        }
    }

    async fn allocate_and_insert(
        &self,
        request: CreateProgramRequest,
        links: ResolvedLinks,
        staged: &StagedArtifact,
    ) -> Result<ProgramCode, Error> {
        let category = request.category;
        let _guard = self.locks.acquire(category).await;

        let allocated = match self.programs.codes_in_category(category).await {
            Ok(issued) => next_program_code(category, &issued).map_err(map_allocation_error),
            Err(error) => Err(map_repository_error(error)),
        };
        let code = match allocated {
            Ok(code) => code,
            Err(error) => {
                self.discard_quietly(staged).await;
                return Err(error);
            }
        };

        if let Err(error) = self.artifacts.promote(staged, code.as_str()).await {
            self.discard_quietly(staged).await;
            return Err(map_artifact_error(error));
        }
        // From here on the artifact is kept even if the insert fails.

        let program = NewProgram {
            id: EntityId::generate(),
            code: code.clone(),
            name: request.name,
            users: request.users,
            department_ids: links.department_ids,
            directorate_ids: links.directorate_ids,
            category,
        };
        self.programs
            .insert(&program)
            .await
            .map_err(|error| match error {
                RepositoryError::Duplicate { .. } => Error::conflict(format!(
                    "Program with name {} or code {} already exists",
                    program.name, program.code
                )),
                other => map_repository_error(other),
            })?;

        info!(code = %code, category = %category, "program created");
        Ok(code)
    }
}

#[async_trait]
impl<P, A> ProgramCatalogue for ProgramService<P, A>
where
    P: ProgramRepository,
    A: ArtifactStore,
{
    async fn create(&self, mut request: CreateProgramRequest) -> Result<ProgramCode, Error> {
        let staged = match request.artifact.take() {
            Some(upload) => Some(
                self.artifacts
                    .stage(&upload.original_name, upload.bytes)
                    .await
                    .map_err(map_artifact_error)?,
            ),
            None => None,
        };

        let links = match self.validate(&request).await {
            Ok(links) => links,
            Err(error) => {
                if let Some(staged) = &staged {
                    self.discard_quietly(staged).await;
                }
                return Err(error);
            }
        };

        let Some(staged) = staged else {
            return Err(Error::invalid_request("File is required"));
        };

        self.allocate_and_insert(request, links, &staged).await
    }

    async fn list(&self) -> Result<Vec<Program>, Error> {
        self.programs
            .list_active()
            .await
            .map_err(map_repository_error)
    }

    async fn find(&self, code: &ProgramCode) -> Result<Program, Error> {
        self.programs
            .find_by_code(code)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(code))
    }

    async fn delete(&self, code: &ProgramCode, mode: DeleteMode) -> Result<(), Error> {
        let program = self.find(code).await?;
        self.programs
            .delete(program.id, mode)
            .await
            .map_err(map_repository_error)
    }
}
