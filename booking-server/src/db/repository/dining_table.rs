//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::MemoryDb;
use crate::db::models::{DiningTable, DiningTableUpdate, TableId, TableStatus};

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All tables in id order
    pub fn find_all(&self) -> Vec<DiningTable> {
        self.base.db().lock().tables.values().cloned().collect()
    }

    /// Update status and/or capacity
    ///
    /// A table held by an active reservation keeps a non-AVAILABLE status and
    /// a capacity that still seats that party.
    pub fn update(&self, id: TableId, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        if !state.tables.contains_key(&id) {
            return Err(RepoError::NotFound(format!("Table {id} not found")));
        }

        let holder = state
            .reservations
            .values()
            .find(|r| r.table_id == id && r.status.is_active());

        if let Some(capacity) = data.capacity {
            if capacity == 0 {
                return Err(RepoError::Validation(
                    "Capacity must be greater than zero.".to_string(),
                ));
            }
            if let Some(r) = holder
                && capacity < r.party_size
            {
                return Err(RepoError::Validation(format!(
                    "Table {id} is held by reservation {} for {} guests.",
                    r.id, r.party_size
                )));
            }
        }

        if data.status == Some(TableStatus::Available)
            && let Some(r) = holder
        {
            return Err(RepoError::Validation(format!(
                "Table {id} is held by reservation {}.",
                r.id
            )));
        }

        let Some(table) = state.tables.get_mut(&id) else {
            return Err(RepoError::NotFound(format!("Table {id} not found")));
        };
        if let Some(capacity) = data.capacity {
            table.capacity = capacity;
        }
        if let Some(status) = data.status {
            table.status = status;
        }
        Ok(table.clone())
    }
}
