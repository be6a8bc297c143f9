//! Manager Repository

use super::BaseRepository;
use crate::db::MemoryDb;
use crate::db::models::Manager;

#[derive(Clone)]
pub struct ManagerRepository {
    base: BaseRepository,
}

impl ManagerRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Case-insensitive email lookup
    pub fn find_by_email(&self, email: &str) -> Option<Manager> {
        self.base
            .db()
            .lock()
            .managers
            .values()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ManagerId;
    use crate::db::test_support::seeded_db;

    #[test]
    fn seeded_manager_is_found() {
        let repo = ManagerRepository::new(seeded_db());
        let m = repo.find_by_email("Manager@Eden.org").unwrap();
        assert_eq!(m.id, ManagerId(1));
        assert_eq!(m.name, "Boss");
        assert!(repo.find_by_email("boss@eden.org").is_none());
    }
}
