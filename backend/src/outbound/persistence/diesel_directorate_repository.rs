//! PostgreSQL-backed `DirectorateRepository` implementation using Diesel ORM.
//!
//! Children are never stored; they are the rows whose `parent_id` points at
//! a directorate. Hard deletes rely on `ON DELETE SET NULL` to detach any
//! soft-deleted children left behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DirectorateRepository, RepositoryError};
use crate::domain::{DeleteMode, Directorate, EntityId, PublicId};

use super::diesel_helpers::{map_diesel_error, map_pool_error, parse_entity_id, parse_entity_name};
use super::models::{DirectorateRow, NewDirectorateRow};
use super::pool::DbPool;
use super::schema::{directorates, program_directorates, programs};

/// Diesel-backed implementation of the `DirectorateRepository` port.
#[derive(Clone)]
pub struct DieselDirectorateRepository {
    pool: DbPool,
}

impl DieselDirectorateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_directorate(row: DirectorateRow) -> Result<Directorate, RepositoryError> {
    let parent_id = row.parent_id.as_deref().map(parse_entity_id).transpose()?;
    Ok(Directorate::from_parts(
        parse_entity_id(&row.id)?,
        PublicId::from_uuid(row.public_id),
        parse_entity_name(&row.name)?,
        parent_id,
    ))
}

fn rows_to_directorates(rows: Vec<DirectorateRow>) -> Result<Vec<Directorate>, RepositoryError> {
    rows.into_iter().map(row_to_directorate).collect()
}

#[async_trait]
impl DirectorateRepository for DieselDirectorateRepository {
    async fn insert(&self, directorate: &Directorate) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDirectorateRow {
            id: directorate.id().to_string(),
            public_id: *directorate.public_id().as_uuid(),
            name: directorate.name().as_ref(),
            parent_id: directorate.parent_id().map(|id| id.to_string()),
        };
        diesel::insert_into(directorates::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Directorate>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = directorates::table
            .filter(directorates::deleted.eq(false))
            .order(directorates::id.asc())
            .select(DirectorateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_directorates(rows)
    }

    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<Directorate>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        directorates::table
            .filter(directorates::public_id.eq(public_id.as_uuid()))
            .filter(directorates::deleted.eq(false))
            .select(DirectorateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_directorate)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Directorate>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        directorates::table
            .filter(directorates::name.eq(name))
            .filter(directorates::deleted.eq(false))
            .select(DirectorateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_directorate)
            .transpose()
    }

    async fn find_by_public_ids(
        &self,
        public_ids: &[PublicId],
    ) -> Result<Vec<Directorate>, RepositoryError> {
        if public_ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = public_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = directorates::table
            .filter(directorates::public_id.eq_any(uuids))
            .filter(directorates::deleted.eq(false))
            .order(directorates::id.asc())
            .select(DirectorateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_directorates(rows)
    }

    async fn count_active_children(&self, id: EntityId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = directorates::table
            .filter(directorates::parent_id.eq(id.to_string()))
            .filter(directorates::deleted.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| RepositoryError::query("negative child count"))
    }

    async fn count_active_programs(&self, id: EntityId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = program_directorates::table
            .inner_join(programs::table)
            .filter(program_directorates::directorate_id.eq(id.to_string()))
            .filter(programs::deleted.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| RepositoryError::query("negative program count"))
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = directorates::table.find(id.to_string());
        match mode {
            DeleteMode::Soft => diesel::update(target)
                .set(directorates::deleted.eq(true))
                .execute(&mut conn)
                .await,
            DeleteMode::Hard => diesel::delete(target).execute(&mut conn).await,
        }
        .map_err(map_diesel_error)?;
        Ok(())
    }
}
