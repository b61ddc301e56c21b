//! In-memory `ProgramRepository`.
//!
//! Programs are stored with their link ids and resolved against the live
//! department and directorate tables on every read. Codes of hard-deleted
//! programs are kept aside so they are never allocated again.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ProgramRepository, RepositoryError};
use crate::domain::{
    DeleteMode, Department, Directorate, EntityId, NewProgram, Program, ProgramCategory,
    ProgramCode, RegistryRef,
};

use super::table::{Record, Table};

impl Record for NewProgram {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("programs_code_key", self.code.to_string()),
            ("programs_name_key", self.name.to_string()),
        ]
    }
}

/// `ProgramRepository` over shared in-memory tables.
#[derive(Clone)]
pub struct InMemoryProgramRepository {
    programs: Arc<Table<NewProgram>>,
    retired_codes: Arc<RwLock<Vec<(ProgramCategory, ProgramCode)>>>,
    departments: Arc<Table<Department>>,
    directorates: Arc<Table<Directorate>>,
}

fn sorted_by_name(mut refs: Vec<RegistryRef>) -> Vec<RegistryRef> {
    refs.sort_by(|a, b| a.name.cmp(&b.name));
    refs
}

impl InMemoryProgramRepository {
    pub(super) fn new(
        programs: Arc<Table<NewProgram>>,
        retired_codes: Arc<RwLock<Vec<(ProgramCategory, ProgramCode)>>>,
        departments: Arc<Table<Department>>,
        directorates: Arc<Table<Directorate>>,
    ) -> Self {
        Self {
            programs,
            retired_codes,
            departments,
            directorates,
        }
    }

    async fn resolve(&self, stored: NewProgram) -> Program {
        let departments = self
            .departments
            .filter_live(|d| stored.department_ids.contains(&d.id()))
            .await
            .iter()
            .map(Department::to_ref)
            .collect();
        let directorates = self
            .directorates
            .filter_live(|d| stored.directorate_ids.contains(&d.id()))
            .await
            .iter()
            .map(Directorate::to_ref)
            .collect();
        Program {
            id: stored.id,
            code: stored.code,
            name: stored.name,
            users: stored.users,
            departments: sorted_by_name(departments),
            directorates: sorted_by_name(directorates),
            category: stored.category,
        }
    }
}

#[async_trait]
impl ProgramRepository for InMemoryProgramRepository {
    async fn insert(&self, program: &NewProgram) -> Result<(), RepositoryError> {
        self.programs.insert(program.clone()).await
    }

    async fn list_active(&self) -> Result<Vec<Program>, RepositoryError> {
        let mut stored = self.programs.filter_live(|_| true).await;
        stored.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        let mut programs = Vec::with_capacity(stored.len());
        for program in stored {
            programs.push(self.resolve(program).await);
        }
        Ok(programs)
    }

    async fn find_by_code(&self, code: &ProgramCode) -> Result<Option<Program>, RepositoryError> {
        match self.programs.find_live(|p| &p.code == code).await {
            Some(stored) => Ok(Some(self.resolve(stored).await)),
            None => Ok(None),
        }
    }

    async fn find_id_by_name(&self, name: &str) -> Result<Option<EntityId>, RepositoryError> {
        Ok(self
            .programs
            .find_live(|p| p.name.as_ref() == name)
            .await
            .map(|p| p.id))
    }

    async fn codes_in_category(
        &self,
        category: ProgramCategory,
    ) -> Result<Vec<ProgramCode>, RepositoryError> {
        let mut codes: Vec<ProgramCode> = self
            .programs
            .filter_all(|p| p.category == category)
            .await
            .into_iter()
            .map(|p| p.code)
            .collect();
        codes.extend(
            self.retired_codes
                .read()
                .await
                .iter()
                .filter(|(retired, _)| *retired == category)
                .map(|(_, code)| code.clone()),
        );
        Ok(codes)
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        if mode == DeleteMode::Hard {
            // Reserve the code before the row disappears.
            let mut retired = self.retired_codes.write().await;
            for program in self.programs.filter_all(|p| p.id == id).await {
                retired.push((program.category, program.code));
            }
        }
        self.programs.delete(id, mode).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityName;
    use crate::domain::ports::DepartmentRepository;
    use crate::outbound::memory::InMemoryStore;
    use rstest::rstest;

    fn program(
        code: &str,
        name: &str,
        category: ProgramCategory,
        departments: &[&Department],
    ) -> NewProgram {
        NewProgram {
            id: EntityId::generate(),
            code: ProgramCode::new(code),
            name: EntityName::new(name).expect("valid name"),
            users: vec!["ada".to_owned()],
            department_ids: departments.iter().map(|d| d.id()).collect(),
            directorate_ids: Vec::new(),
            category,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_departments_drop_out_of_programs() {
        let store = InMemoryStore::new();
        let departments = store.departments();
        let programs = store.programs();
        let finance = Department::new(EntityName::new("Finance").expect("name"));
        let legal = Department::new(EntityName::new("Legal").expect("name"));
        departments.insert(&finance).await.expect("insert");
        departments.insert(&legal).await.expect("insert");
        let payroll = program(
            "BB0001",
            "Payroll",
            ProgramCategory::UnitBased,
            &[&finance, &legal],
        );
        programs.insert(&payroll).await.expect("insert");

        departments.delete(legal.id(), DeleteMode::Soft).await.expect("delete");

        let found = programs
            .find_by_code(&ProgramCode::new("BB0001"))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.departments, vec![finance.to_ref()]);
    }

    #[rstest]
    #[tokio::test]
    async fn codes_include_deleted_programs_of_the_category_only() {
        let programs = InMemoryStore::new().programs();
        let kept = program("SB0001", "Audit", ProgramCategory::ProcessBased, &[]);
        let gone = program("SB0002", "Intake", ProgramCategory::ProcessBased, &[]);
        let other = program("BB0001", "Payroll", ProgramCategory::UnitBased, &[]);
        for p in [&kept, &gone, &other] {
            programs.insert(p).await.expect("insert");
        }
        programs.delete(gone.id, DeleteMode::Soft).await.expect("delete");

        let codes = programs
            .codes_in_category(ProgramCategory::ProcessBased)
            .await
            .expect("codes");
        assert_eq!(codes, vec![ProgramCode::new("SB0001"), ProgramCode::new("SB0002")]);
        assert!(programs.find_id_by_name("Intake").await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn hard_deleted_codes_stay_reserved() {
        let programs = InMemoryStore::new().programs();
        let payroll = program("BB0001", "Payroll", ProgramCategory::UnitBased, &[]);
        let audit = program("SB0001", "Audit", ProgramCategory::ProcessBased, &[]);
        programs.insert(&payroll).await.expect("insert");
        programs.insert(&audit).await.expect("insert");
        programs.delete(payroll.id, DeleteMode::Hard).await.expect("delete");

        assert!(programs.find_id_by_name("Payroll").await.expect("find").is_none());
        let unit = programs
            .codes_in_category(ProgramCategory::UnitBased)
            .await
            .expect("codes");
        assert_eq!(unit, vec![ProgramCode::new("BB0001")]);
        let process = programs
            .codes_in_category(ProgramCategory::ProcessBased)
            .await
            .expect("codes");
        assert_eq!(process, vec![ProgramCode::new("SB0001")]);
    }
}
