//! Department registry service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    DepartmentRegistry, DepartmentRepository, RepositoryError, map_repository_error,
};
use crate::domain::{DeleteMode, Department, EntityName, Error, PublicId};

/// Department service implementing [`DepartmentRegistry`].
#[derive(Clone)]
pub struct DepartmentService<R> {
    repository: Arc<R>,
}

impl<R> DepartmentService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn name_taken(name: &str) -> Error {
    Error::conflict(format!("Department with name {name} already exists"))
}

fn not_found(public_id: PublicId) -> Error {
    Error::not_found(format!("Department with id {public_id} not found"))
}

#[async_trait]
impl<R> DepartmentRegistry for DepartmentService<R>
where
    R: DepartmentRepository,
{
    async fn create(&self, name: EntityName) -> Result<Department, Error> {
        let existing = self
            .repository
            .find_by_name(name.as_ref())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(name_taken(name.as_ref()));
        }

        let department = Department::new(name);
        self.repository
            .insert(&department)
            .await
            .map_err(|error| match error {
                RepositoryError::Duplicate { .. } => name_taken(department.name().as_ref()),
                other => map_repository_error(other),
            })?;
        Ok(department)
    }

    async fn list(&self) -> Result<Vec<Department>, Error> {
        let departments = self
            .repository
            .list_active()
            .await
            .map_err(map_repository_error)?;
        if departments.is_empty() {
            return Err(Error::not_found("Departments not found"));
        }
        Ok(departments)
    }

    async fn find(&self, public_id: PublicId) -> Result<Department, Error> {
        self.repository
            .find_by_public_id(public_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(public_id))
    }

    async fn find_by_ids(&self, public_ids: &[PublicId]) -> Result<Vec<Department>, Error> {
        if public_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository
            .find_by_public_ids(public_ids)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, public_id: PublicId, mode: DeleteMode) -> Result<(), Error> {
        let department = self.find(public_id).await?;
        if mode == DeleteMode::Hard {
            let programs = self
                .repository
                .count_active_programs(department.id())
                .await
                .map_err(map_repository_error)?;
            if programs > 0 {
                info!(department = %public_id, programs, "department hard delete refused");
                return Err(Error::conflict(
                    "Department is linked to programs. Delete them first",
                ));
            }
        }
        self.repository
            .delete(department.id(), mode)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockDepartmentRepository;
    use rstest::rstest;

    fn department(name: &str) -> Department {
        Department::new(EntityName::new(name).expect("valid name"))
    }

    fn service(repository: MockDepartmentRepository) -> DepartmentService<MockDepartmentRepository> {
        DepartmentService::new(Arc::new(repository))
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_taken_name() {
        let mut repository = MockDepartmentRepository::new();
        repository
            .expect_find_by_name()
            .returning(|name| Ok(Some(department(name))));
        repository.expect_insert().never();

        let err = service(repository)
            .create(EntityName::new("Finance").expect("valid"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "Department with name Finance already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn create_maps_store_duplicate_to_conflict() {
        let mut repository = MockDepartmentRepository::new();
        repository.expect_find_by_name().returning(|_| Ok(None));
        repository
            .expect_insert()
            .returning(|_| Err(RepositoryError::duplicate("departments_name_key")));

        let err = service(repository)
            .create(EntityName::new("Finance").expect("valid"))
            .await
            .expect_err("store duplicate rejected");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "Department with name Finance already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn create_inserts_new_department() {
        let mut repository = MockDepartmentRepository::new();
        repository.expect_find_by_name().returning(|_| Ok(None));
        repository.expect_insert().times(1).returning(|_| Ok(()));

        let created = service(repository)
            .create(EntityName::new("Finance").expect("valid"))
            .await
            .expect("created");
        assert_eq!(created.name().as_ref(), "Finance");
    }

    #[rstest]
    #[tokio::test]
    async fn list_reports_empty_registry_as_not_found() {
        let mut repository = MockDepartmentRepository::new();
        repository.expect_list_active().returning(|| Ok(Vec::new()));

        let err = service(repository).list().await.expect_err("empty");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Departments not found");
    }

    #[rstest]
    #[tokio::test]
    async fn find_reports_missing_department() {
        let mut repository = MockDepartmentRepository::new();
        repository.expect_find_by_public_id().returning(|_| Ok(None));
        let id = PublicId::generate();

        let err = service(repository).find(id).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), format!("Department with id {id} not found"));
    }

    #[rstest]
    #[case(DeleteMode::Soft)]
    #[case(DeleteMode::Hard)]
    #[tokio::test]
    async fn delete_forwards_mode(#[case] mode: DeleteMode) {
        let existing = department("Finance");
        let expected_id = existing.id();
        let mut repository = MockDepartmentRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_count_active_programs().returning(|_| Ok(0));
        repository
            .expect_delete()
            .withf(move |id, requested| *id == expected_id && *requested == mode)
            .times(1)
            .returning(|_, _| Ok(()));

        service(repository)
            .delete(PublicId::generate(), mode)
            .await
            .expect("deleted");
    }

    #[rstest]
    #[tokio::test]
    async fn hard_delete_refuses_department_linked_to_programs() {
        let existing = department("Finance");
        let mut repository = MockDepartmentRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_count_active_programs().returning(|_| Ok(1));
        repository.expect_delete().never();

        let err = service(repository)
            .delete(PublicId::generate(), DeleteMode::Hard)
            .await
            .expect_err("linked");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(
            err.message(),
            "Department is linked to programs. Delete them first"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn soft_delete_ignores_program_links() {
        let existing = department("Finance");
        let mut repository = MockDepartmentRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_count_active_programs().never();
        repository.expect_delete().times(1).returning(|_, _| Ok(()));

        service(repository)
            .delete(PublicId::generate(), DeleteMode::Soft)
            .await
            .expect("deleted");
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_are_service_unavailable() {
        let mut repository = MockDepartmentRepository::new();
        repository
            .expect_list_active()
            .returning(|| Err(RepositoryError::connection("refused")));

        let err = service(repository).list().await.expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_ids_skips_store_for_empty_batch() {
        let mut repository = MockDepartmentRepository::new();
        repository.expect_find_by_public_ids().never();

        let found = service(repository).find_by_ids(&[]).await.expect("empty ok");
        assert!(found.is_empty());
    }
}
