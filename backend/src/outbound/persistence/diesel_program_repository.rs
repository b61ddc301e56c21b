//! PostgreSQL-backed `ProgramRepository` implementation using Diesel ORM.
//!
//! Department and directorate links live in join tables. Reads only resolve
//! links to live rows, so a soft-deleted department drops out of every
//! program that references it without touching the join rows.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ProgramRepository, RepositoryError};
use crate::domain::{
    DeleteMode, EntityId, NewProgram, Program, ProgramCategory, ProgramCode, PublicId, RegistryRef,
};

use super::diesel_helpers::{map_diesel_error, map_pool_error, parse_entity_id, parse_entity_name};
use super::models::{NewProgramRow, ProgramDepartmentRow, ProgramDirectorateRow, ProgramRow};
use super::pool::DbPool;
use super::schema::{
    departments, directorates, program_departments, program_directorates, programs,
    retired_program_codes,
};

/// Diesel-backed implementation of the `ProgramRepository` port.
#[derive(Clone)]
pub struct DieselProgramRepository {
    pool: DbPool,
}

impl DieselProgramRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// `(program_id, id, public_id, name)` of a linked registry entity.
type LinkRow = (String, String, Uuid, String);

type LinksByProgram = HashMap<String, Vec<RegistryRef>>;

fn group_links(rows: Vec<LinkRow>) -> Result<LinksByProgram, RepositoryError> {
    let mut grouped = LinksByProgram::new();
    for (program_id, id, public_id, name) in rows {
        grouped.entry(program_id).or_default().push(RegistryRef {
            id: parse_entity_id(&id)?,
            public_id: PublicId::from_uuid(public_id),
            name,
        });
    }
    Ok(grouped)
}

async fn load_department_links(
    conn: &mut AsyncPgConnection,
    program_ids: Vec<String>,
) -> Result<LinksByProgram, RepositoryError> {
    let rows: Vec<LinkRow> = program_departments::table
        .inner_join(departments::table)
        .filter(program_departments::program_id.eq_any(program_ids))
        .filter(departments::deleted.eq(false))
        .order(departments::name.asc())
        .select((
            program_departments::program_id,
            departments::id,
            departments::public_id,
            departments::name,
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    group_links(rows)
}

async fn load_directorate_links(
    conn: &mut AsyncPgConnection,
    program_ids: Vec<String>,
) -> Result<LinksByProgram, RepositoryError> {
    let rows: Vec<LinkRow> = program_directorates::table
        .inner_join(directorates::table)
        .filter(program_directorates::program_id.eq_any(program_ids))
        .filter(directorates::deleted.eq(false))
        .order(directorates::name.asc())
        .select((
            program_directorates::program_id,
            directorates::id,
            directorates::public_id,
            directorates::name,
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    group_links(rows)
}

fn assemble(
    row: ProgramRow,
    departments: &mut LinksByProgram,
    directorates: &mut LinksByProgram,
) -> Result<Program, RepositoryError> {
    Ok(Program {
        id: parse_entity_id(&row.id)?,
        name: parse_entity_name(&row.name)?,
        departments: departments.remove(&row.id).unwrap_or_default(),
        directorates: directorates.remove(&row.id).unwrap_or_default(),
        code: ProgramCode::new(row.code),
        users: row.users,
        category: ProgramCategory::from_process_based(row.process_based),
    })
}

async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<ProgramRow>,
) -> Result<Vec<Program>, RepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let mut departments = load_department_links(conn, ids.clone()).await?;
    let mut directorates = load_directorate_links(conn, ids).await?;
    rows.into_iter()
        .map(|row| assemble(row, &mut departments, &mut directorates))
        .collect()
}

#[async_trait]
impl ProgramRepository for DieselProgramRepository {
    async fn insert(&self, program: &NewProgram) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let program_id = program.id.to_string();
        let row = NewProgramRow {
            id: program_id.clone(),
            code: program.code.as_str(),
            name: program.name.as_ref(),
            users: &program.users,
            process_based: program.category.is_process_based(),
        };
        let department_rows: Vec<ProgramDepartmentRow> = program
            .department_ids
            .iter()
            .map(|id| ProgramDepartmentRow {
                program_id: program_id.clone(),
                department_id: id.to_string(),
            })
            .collect();
        let directorate_rows: Vec<ProgramDirectorateRow> = program
            .directorate_ids
            .iter()
            .map(|id| ProgramDirectorateRow {
                program_id: program_id.clone(),
                directorate_id: id.to_string(),
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(programs::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                if !department_rows.is_empty() {
                    diesel::insert_into(program_departments::table)
                        .values(&department_rows)
                        .execute(conn)
                        .await?;
                }
                if !directorate_rows.is_empty() {
                    diesel::insert_into(program_directorates::table)
                        .values(&directorate_rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_active(&self) -> Result<Vec<Program>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = programs::table
            .filter(programs::deleted.eq(false))
            .order(programs::code.asc())
            .select(ProgramRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn find_by_code(&self, code: &ProgramCode) -> Result<Option<Program>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = programs::table
            .filter(programs::code.eq(code.as_str()))
            .filter(programs::deleted.eq(false))
            .select(ProgramRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![row]).await?.pop())
    }

    async fn find_id_by_name(&self, name: &str) -> Result<Option<EntityId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        programs::table
            .filter(programs::name.eq(name))
            .filter(programs::deleted.eq(false))
            .select(programs::id)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .as_deref()
            .map(parse_entity_id)
            .transpose()
    }

    async fn codes_in_category(
        &self,
        category: ProgramCategory,
    ) -> Result<Vec<ProgramCode>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let process_based = category.is_process_based();
        let mut codes: Vec<String> = programs::table
            .filter(programs::process_based.eq(process_based))
            .select(programs::code)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let retired: Vec<String> = retired_program_codes::table
            .filter(retired_program_codes::process_based.eq(process_based))
            .select(retired_program_codes::code)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        codes.extend(retired);
        Ok(codes.into_iter().map(ProgramCode::new).collect())
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = id.to_string();
        match mode {
            DeleteMode::Soft => diesel::update(programs::table.find(key))
                .set(programs::deleted.eq(true))
                .execute(&mut conn)
                .await
                .map(drop),
            DeleteMode::Hard => {
                conn.transaction(|conn| {
                    async move {
                        let (code, process_based): (String, bool) = programs::table
                            .find(&key)
                            .select((programs::code, programs::process_based))
                            .first(conn)
                            .await?;
                        diesel::insert_into(retired_program_codes::table)
                            .values((
                                retired_program_codes::code.eq(code),
                                retired_program_codes::process_based.eq(process_based),
                            ))
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;
                        diesel::delete(programs::table.find(&key))
                            .execute(conn)
                            .await
                            .map(drop)
                    }
                    .scope_boxed()
                })
                .await
            }
        }
        .map_err(map_diesel_error)
    }
}
