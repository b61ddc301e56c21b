//! PostgreSQL-backed `DepartmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DepartmentRepository, RepositoryError};
use crate::domain::{DeleteMode, Department, EntityId, PublicId};

use super::diesel_helpers::{map_diesel_error, map_pool_error, parse_entity_id, parse_entity_name};
use super::models::{DepartmentRow, NewDepartmentRow};
use super::pool::DbPool;
use super::schema::{departments, program_departments, programs};

/// Diesel-backed implementation of the `DepartmentRepository` port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    pool: DbPool,
}

impl DieselDepartmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_department(row: DepartmentRow) -> Result<Department, RepositoryError> {
    Ok(Department::from_parts(
        parse_entity_id(&row.id)?,
        PublicId::from_uuid(row.public_id),
        parse_entity_name(&row.name)?,
    ))
}

fn rows_to_departments(rows: Vec<DepartmentRow>) -> Result<Vec<Department>, RepositoryError> {
    rows.into_iter().map(row_to_department).collect()
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn insert(&self, department: &Department) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDepartmentRow {
            id: department.id().to_string(),
            public_id: *department.public_id().as_uuid(),
            name: department.name().as_ref(),
        };
        diesel::insert_into(departments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = departments::table
            .filter(departments::deleted.eq(false))
            .order(departments::id.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_departments(rows)
    }

    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        departments::table
            .filter(departments::public_id.eq(public_id.as_uuid()))
            .filter(departments::deleted.eq(false))
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_department)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        departments::table
            .filter(departments::name.eq(name))
            .filter(departments::deleted.eq(false))
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_department)
            .transpose()
    }

    async fn find_by_public_ids(
        &self,
        public_ids: &[PublicId],
    ) -> Result<Vec<Department>, RepositoryError> {
        if public_ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = public_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = departments::table
            .filter(departments::public_id.eq_any(uuids))
            .filter(departments::deleted.eq(false))
            .order(departments::id.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_departments(rows)
    }

    async fn count_active_programs(&self, id: EntityId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = program_departments::table
            .inner_join(programs::table)
            .filter(program_departments::department_id.eq(id.to_string()))
            .filter(programs::deleted.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| RepositoryError::query("negative program count"))
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = departments::table.find(id.to_string());
        match mode {
            DeleteMode::Soft => diesel::update(target)
                .set(departments::deleted.eq(true))
                .execute(&mut conn)
                .await,
            DeleteMode::Hard => diesel::delete(target).execute(&mut conn).await,
        }
        .map_err(map_diesel_error)?;
        Ok(())
    }
}
