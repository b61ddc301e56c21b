//! Directorate registry service enforcing the hierarchy rules.
//!
//! Parents are assigned only at creation, so the API alone cannot introduce
//! cycles. The tree loader still rejects them in case stored data is edited
//! out of band.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    DirectorateRegistry, DirectorateRepository, RepositoryError, map_repository_error,
};
use crate::domain::{
    DeleteMode, Directorate, DirectorateNode, DirectorateTree, DirectorateTreeError, EntityName,
    Error, PublicId,
};

/// Directorate service implementing [`DirectorateRegistry`].
#[derive(Clone)]
pub struct DirectorateService<R> {
    repository: Arc<R>,
}

impl<R> DirectorateService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn name_taken(name: &str) -> Error {
    Error::conflict(format!("Directorate with name {name} already exists"))
}

fn not_found(public_id: PublicId) -> Error {
    Error::not_found(format!("Directorate with id {public_id} not found"))
}

fn map_tree_error(error: DirectorateTreeError) -> Error {
    Error::internal(format!("directorate hierarchy is corrupt: {error}"))
}

impl<R> DirectorateService<R>
where
    R: DirectorateRepository,
{
    async fn load_tree(&self) -> Result<DirectorateTree, Error> {
        let records = self
            .repository
            .list_active()
            .await
            .map_err(map_repository_error)?;
        DirectorateTree::build(records).map_err(map_tree_error)
    }

    async fn find_record(&self, public_id: PublicId) -> Result<Directorate, Error> {
        self.repository
            .find_by_public_id(public_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(public_id))
    }
}

#[async_trait]
impl<R> DirectorateRegistry for DirectorateService<R>
where
    R: DirectorateRepository,
{
    async fn create(
        &self,
        name: EntityName,
        parent: Option<PublicId>,
    ) -> Result<Directorate, Error> {
        let parent_id = match parent {
            Some(public_id) => {
                let parent = self
                    .repository
                    .find_by_public_id(public_id)
                    .await
                    .map_err(map_repository_error)?
                    .ok_or_else(|| {
                        Error::not_found(format!(
                            "Parent directorate with id {public_id} not found"
                        ))
                    })?;
                Some(parent.id())
            }
            None => None,
        };

        let existing = self
            .repository
            .find_by_name(name.as_ref())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(name_taken(name.as_ref()));
        }

        let directorate = Directorate::new(name, parent_id);
        self.repository
            .insert(&directorate)
            .await
            .map_err(|error| match error {
                RepositoryError::Duplicate { .. } => name_taken(directorate.name().as_ref()),
                other => map_repository_error(other),
            })?;
        Ok(directorate)
    }

    async fn list(&self) -> Result<Vec<DirectorateNode>, Error> {
        let tree = self.load_tree().await?;
        if tree.is_empty() {
            return Err(Error::not_found("Directorates not found"));
        }
        Ok(tree.nodes())
    }

    async fn find(&self, public_id: PublicId) -> Result<DirectorateNode, Error> {
        let tree = self.load_tree().await?;
        tree.find_by_public_id(public_id)
            .and_then(|directorate| tree.node(directorate.id()))
            .ok_or_else(|| not_found(public_id))
    }

    async fn find_by_ids(&self, public_ids: &[PublicId]) -> Result<Vec<Directorate>, Error> {
        if public_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository
            .find_by_public_ids(public_ids)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, public_id: PublicId, mode: DeleteMode) -> Result<(), Error> {
        let directorate = self.find_record(public_id).await?;
        let children = self
            .repository
            .count_active_children(directorate.id())
            .await
            .map_err(map_repository_error)?;
        if children > 0 {
            info!(directorate = %public_id, children, "directorate delete refused");
            return Err(Error::conflict("Directorate has children. Delete them first"));
        }
        if mode == DeleteMode::Hard {
            let programs = self
                .repository
                .count_active_programs(directorate.id())
                .await
                .map_err(map_repository_error)?;
            if programs > 0 {
                info!(directorate = %public_id, programs, "directorate hard delete refused");
                return Err(Error::conflict(
                    "Directorate is linked to programs. Delete them first",
                ));
            }
        }
        self.repository
            .delete(directorate.id(), mode)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockDirectorateRepository;
    use rstest::rstest;

    fn directorate(name: &str, parent: Option<&Directorate>) -> Directorate {
        Directorate::new(
            EntityName::new(name).expect("valid name"),
            parent.map(Directorate::id),
        )
    }

    fn service(
        repository: MockDirectorateRepository,
    ) -> DirectorateService<MockDirectorateRepository> {
        DirectorateService::new(Arc::new(repository))
    }

    #[rstest]
    #[tokio::test]
    async fn create_requires_live_parent() {
        let mut repository = MockDirectorateRepository::new();
        repository.expect_find_by_public_id().returning(|_| Ok(None));
        repository.expect_insert().never();
        let parent = PublicId::generate();

        let err = service(repository)
            .create(EntityName::new("Logistics").expect("valid"), Some(parent))
            .await
            .expect_err("missing parent");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(
            err.message(),
            format!("Parent directorate with id {parent} not found")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn create_links_parent_internal_id() {
        let parent = directorate("Operations", None);
        let parent_id = parent.id();
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(parent.clone())));
        repository.expect_find_by_name().returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(move |child| child.parent_id() == Some(parent_id))
            .times(1)
            .returning(|_| Ok(()));

        let child = service(repository)
            .create(
                EntityName::new("Logistics").expect("valid"),
                Some(PublicId::generate()),
            )
            .await
            .expect("created");
        assert_eq!(child.parent_id(), Some(parent_id));
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_taken_name() {
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_find_by_name()
            .returning(|name| Ok(Some(directorate(name, None))));
        repository.expect_insert().never();

        let err = service(repository)
            .create(EntityName::new("Operations").expect("valid"), None)
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "Directorate with name Operations already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_refuses_directorate_with_children() {
        let target = directorate("Operations", None);
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(target.clone())));
        repository.expect_count_active_children().returning(|_| Ok(2));
        repository.expect_delete().never();

        let err = service(repository)
            .delete(PublicId::generate(), DeleteMode::Hard)
            .await
            .expect_err("has children");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "Directorate has children. Delete them first");
    }

    #[rstest]
    #[tokio::test]
    async fn hard_delete_refuses_directorate_linked_to_programs() {
        let target = directorate("Operations", None);
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(target.clone())));
        repository.expect_count_active_children().returning(|_| Ok(0));
        repository.expect_count_active_programs().returning(|_| Ok(3));
        repository.expect_delete().never();

        let err = service(repository)
            .delete(PublicId::generate(), DeleteMode::Hard)
            .await
            .expect_err("linked");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(
            err.message(),
            "Directorate is linked to programs. Delete them first"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_childless_directorate() {
        let target = directorate("Operations", None);
        let target_id = target.id();
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_find_by_public_id()
            .returning(move |_| Ok(Some(target.clone())));
        repository.expect_count_active_children().returning(|_| Ok(0));
        repository
            .expect_delete()
            .withf(move |id, mode| *id == target_id && *mode == DeleteMode::Soft)
            .times(1)
            .returning(|_, _| Ok(()));

        service(repository)
            .delete(PublicId::generate(), DeleteMode::Soft)
            .await
            .expect("deleted");
    }

    #[rstest]
    #[tokio::test]
    async fn list_reports_empty_registry_as_not_found() {
        let mut repository = MockDirectorateRepository::new();
        repository.expect_list_active().returning(|| Ok(Vec::new()));

        let err = service(repository).list().await.expect_err("empty");
        assert_eq!(err.message(), "Directorates not found");
    }

    #[rstest]
    #[tokio::test]
    async fn find_populates_parent_and_children() {
        let root = directorate("Operations", None);
        let child = directorate("Logistics", Some(&root));
        let root_public = root.public_id();
        let records = vec![root.clone(), child.clone()];
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_list_active()
            .returning(move || Ok(records.clone()));

        let node = service(repository).find(root_public).await.expect("found");
        assert!(node.parent.is_none());
        assert_eq!(node.children, vec![child.to_ref()]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_surfaces_cycles_as_internal_errors() {
        let a_id = crate::domain::EntityId::generate();
        let b_id = crate::domain::EntityId::generate();
        let records = vec![
            Directorate::from_parts(
                a_id,
                PublicId::generate(),
                EntityName::new("A").expect("valid"),
                Some(b_id),
            ),
            Directorate::from_parts(
                b_id,
                PublicId::generate(),
                EntityName::new("B").expect("valid"),
                Some(a_id),
            ),
        ];
        let mut repository = MockDirectorateRepository::new();
        repository
            .expect_list_active()
            .returning(move || Ok(records.clone()));

        let err = service(repository).list().await.expect_err("cycle");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
