//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{DeleteMode, EntityId, PasswordHash, PublicId, User, Username};

use super::diesel_helpers::{map_diesel_error, map_pool_error, parse_entity_id};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, RepositoryError> {
    Ok(User::from_parts(
        parse_entity_id(&row.id)?,
        PublicId::from_uuid(row.public_id),
        Username::from_stored(row.username),
        PasswordHash::new(row.password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: user.id().to_string(),
            public_id: *user.public_id().as_uuid(),
            username: user.username().as_str(),
            password_hash: user.password_hash().as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .filter(users::deleted.eq(false))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::public_id.eq(public_id.as_uuid()))
            .filter(users::deleted.eq(false))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::username.eq(username))
            .filter(users::deleted.eq(false))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| RepositoryError::query("negative user count"))
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = users::table.find(id.to_string());
        match mode {
            DeleteMode::Soft => diesel::update(target)
                .set(users::deleted.eq(true))
                .execute(&mut conn)
                .await,
            DeleteMode::Hard => diesel::delete(target).execute(&mut conn).await,
        }
        .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn stored_usernames_skip_policy_checks() {
        let user = row_to_user(UserRow {
            id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".to_owned(),
            public_id: Uuid::new_v4(),
            username: "admin".to_owned(),
            password_hash: "$argon2id$v=19$stub".to_owned(),
        })
        .expect("valid row");
        assert_eq!(user.username().as_str(), "admin");
        assert_eq!(user.password_hash().as_str(), "$argon2id$v=19$stub");
    }
}
