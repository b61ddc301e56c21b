//! Shared in-memory table with soft-delete flags and unique keys.
//!
//! Unique keys apply to every row, deleted or not, matching the global
//! unique indexes of the PostgreSQL schema.

use tokio::sync::RwLock;

use crate::domain::ports::RepositoryError;
use crate::domain::{DeleteMode, EntityId};

/// A record that can live in a [`Table`].
pub(super) trait Record: Clone + Send + Sync {
    /// Primary key.
    fn entity_id(&self) -> EntityId;

    /// `(constraint, value)` pairs that must be unique across the table.
    fn unique_keys(&self) -> Vec<(&'static str, String)>;
}

struct Row<T> {
    record: T,
    deleted: bool,
}

pub(super) struct Table<T> {
    rows: RwLock<Vec<Row<T>>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

fn duplicate(constraint: &str) -> RepositoryError {
    RepositoryError::duplicate(format!("{constraint} already holds this value"))
}

impl<T: Record> Table<T> {
    pub(super) async fn insert(&self, record: T) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        let id = record.entity_id();
        let keys = record.unique_keys();
        for row in rows.iter() {
            if row.record.entity_id() == id {
                return Err(duplicate("primary key"));
            }
            let existing = row.record.unique_keys();
            if let Some((constraint, _)) = keys.iter().find(|key| existing.contains(key)) {
                return Err(duplicate(constraint));
            }
        }
        rows.push(Row {
            record,
            deleted: false,
        });
        Ok(())
    }

    /// Live rows matching `predicate`, in insertion order.
    pub(super) async fn filter_live(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| !row.deleted && predicate(&row.record))
            .map(|row| row.record.clone())
            .collect()
    }

    pub(super) async fn find_live(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| !row.deleted && predicate(&row.record))
            .map(|row| row.record.clone())
    }

    /// Every row matching `predicate`, soft-deleted ones included.
    pub(super) async fn filter_all(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(&row.record))
            .map(|row| row.record.clone())
            .collect()
    }

    pub(super) async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Rewrite every row, deleted or not.
    pub(super) async fn update_all(&self, mut update: impl FnMut(&mut T)) {
        for row in self.rows.write().await.iter_mut() {
            update(&mut row.record);
        }
    }

    /// Flag or remove the row with `id`. Missing rows are ignored.
    pub(super) async fn delete(&self, id: EntityId, mode: DeleteMode) {
        let mut rows = self.rows.write().await;
        match mode {
            DeleteMode::Soft => {
                if let Some(row) = rows.iter_mut().find(|row| row.record.entity_id() == id) {
                    row.deleted = true;
                }
            }
            DeleteMode::Hard => rows.retain(|row| row.record.entity_id() != id),
        }
    }
}
