//! User directory service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, RepositoryError, UserDirectory, UserRepository,
    map_repository_error,
};
use crate::domain::{DeleteMode, Error, NewPassword, PublicId, User, Username};

/// User service implementing [`UserDirectory`].
#[derive(Clone)]
pub struct UserService<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H> {
    /// Create a new service.
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn username_taken(username: &str) -> Error {
    Error::conflict(format!("User with username {username} already exists"))
}

#[async_trait]
impl<R, H> UserDirectory for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn create(&self, username: &str, password: &str) -> Result<User, Error> {
        let existing = self
            .repository
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(username_taken(username));
        }

        let username =
            Username::new(username).map_err(|err| Error::invalid_request(err.to_string()))?;
        let password =
            NewPassword::new(password).map_err(|err| Error::invalid_request(err.to_string()))?;

        let hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let user = User::new(username, hash);
        self.repository
            .insert(&user)
            .await
            .map_err(|error| match error {
                RepositoryError::Duplicate { .. } => username_taken(user.username().as_str()),
                other => map_repository_error(other),
            })?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .list_active()
            .await
            .map_err(map_repository_error)?;
        if users.is_empty() {
            return Err(Error::not_found("Users not found"));
        }
        Ok(users)
    }

    async fn find(&self, public_id: PublicId) -> Result<User, Error> {
        self.repository
            .find_by_public_id(public_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("User with id {public_id} not found")))
    }

    async fn delete(&self, public_id: PublicId, mode: DeleteMode) -> Result<(), Error> {
        let user = self.find(public_id).await?;
        self.repository
            .delete(user.id(), mode)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::PasswordHash;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use rstest::rstest;

    fn stored(username: &str) -> User {
        User::new(
            Username::from_stored(username),
            PasswordHash::new("$argon2id$stub"),
        )
    }

    fn service(
        repository: MockUserRepository,
        hasher: MockPasswordHasher,
    ) -> UserService<MockUserRepository, MockPasswordHasher> {
        UserService::new(Arc::new(repository), Arc::new(hasher))
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_existing_username() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_username()
            .returning(|name| Ok(Some(stored(name))));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let err = service(repository, hasher)
            .create("ada", "Passw0rd")
            .await
            .expect_err("taken");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "User with username ada already exists");
    }

    #[rstest]
    #[case("ada..x", "Passw0rd", "Username is invalid")]
    #[case("ada", "password", "Password is invalid")]
    #[tokio::test]
    async fn create_applies_policies(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: &str,
    ) {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository.expect_insert().never();

        let err = service(repository, MockPasswordHasher::new())
            .create(username, password)
            .await
            .expect_err("policy violation");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_hashed_password() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|user| user.password_hash().as_str() == "$argon2id$hashed")
            .times(1)
            .returning(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Ok(PasswordHash::new("$argon2id$hashed")));

        let user = service(repository, hasher)
            .create("ada.lovelace", "Passw0rd")
            .await
            .expect("created");
        assert_eq!(user.username().as_str(), "ada.lovelace");
    }

    #[rstest]
    #[tokio::test]
    async fn list_reports_empty_directory_as_not_found() {
        let mut repository = MockUserRepository::new();
        repository.expect_list_active().returning(|| Ok(Vec::new()));

        let err = service(repository, MockPasswordHasher::new())
            .list()
            .await
            .expect_err("empty");
        assert_eq!(err.message(), "Users not found");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_missing_user() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_public_id().returning(|_| Ok(None));
        repository.expect_delete().never();
        let id = PublicId::generate();

        let err = service(repository, MockPasswordHasher::new())
            .delete(id, DeleteMode::Soft)
            .await
            .expect_err("missing");
        assert_eq!(err.message(), format!("User with id {id} not found"));
    }
}
