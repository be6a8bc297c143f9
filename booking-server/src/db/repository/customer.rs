//! Customer Repository

use std::collections::BTreeSet;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::MemoryDb;
use crate::db::allocation;
use crate::db::models::{Customer, CustomerCreate, CustomerId, hash_password};

/// What a customer deletion removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDeletion {
    pub reservations: usize,
    pub tables_released: usize,
    pub feedback: usize,
    pub payments: usize,
}

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All customers in signup order
    pub fn find_all(&self) -> Vec<Customer> {
        self.base.db().lock().customers.values().cloned().collect()
    }

    pub fn find_by_id(&self, id: CustomerId) -> Option<Customer> {
        self.base.db().lock().customers.get(&id).cloned()
    }

    /// Case-insensitive email lookup
    pub fn find_by_email(&self, email: &str) -> Option<Customer> {
        self.base
            .db()
            .lock()
            .customers
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Register a customer
    ///
    /// Emails are unique across customers and the manager account.
    pub fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        // Hash outside the lock, argon2 is slow on purpose
        let password_hash =
            hash_password(&data.password).map_err(|e| RepoError::Credential(e.to_string()))?;

        let mut state = self.base.db().lock();
        if state.email_in_use(&data.email) {
            return Err(RepoError::Duplicate("This email is already in use.".to_string()));
        }

        let id = state.next_customer_id();
        let customer = Customer {
            id,
            username: data.username,
            email: data.email,
            password_hash,
            phone: data.phone,
        };
        state.customers.insert(id, customer.clone());
        Ok(customer)
    }

    /// Delete a customer and everything hanging off them
    ///
    /// Tables held by their active reservations are released. Payments go if
    /// they belong to a removed reservation or to the customer directly.
    pub fn delete(&self, id: CustomerId) -> RepoResult<CustomerDeletion> {
        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        if state.customers.remove(&id).is_none() {
            return Err(RepoError::NotFound("Customer not found.".to_string()));
        }

        let mut deletion = CustomerDeletion::default();
        let mut removed_reservations = BTreeSet::new();

        state.reservations.retain(|res_id, r| {
            if r.customer_id != id {
                return true;
            }
            if r.status.is_active() {
                allocation::release(&mut state.tables, r.table_id);
                deletion.tables_released += 1;
            }
            removed_reservations.insert(*res_id);
            false
        });
        deletion.reservations = removed_reservations.len();

        let before = state.feedback.len();
        state.feedback.retain(|_, f| f.customer_id != id);
        deletion.feedback = before - state.feedback.len();

        let before = state.payments.len();
        state
            .payments
            .retain(|_, p| p.customer_id != id && !removed_reservations.contains(&p.reservation_id));
        deletion.payments = before - state.payments.len();

        Ok(deletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::seeded_db;

    fn signup(repo: &CustomerRepository, email: &str) -> Customer {
        repo.create(CustomerCreate {
            username: "guest".into(),
            email: email.into(),
            password: "pw-123456".into(),
            phone: None,
        })
        .unwrap()
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let repo = CustomerRepository::new(seeded_db());
        let a = signup(&repo, "a@eden.org");
        let b = signup(&repo, "b@eden.org");
        assert_eq!(a.id, CustomerId(1));
        assert_eq!(b.id, CustomerId(2));
        assert!(a.verify_password("pw-123456").unwrap());
        assert_eq!(repo.find_all().len(), 2);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let repo = CustomerRepository::new(seeded_db());
        signup(&repo, "a@eden.org");
        let err = repo
            .create(CustomerCreate {
                username: "other".into(),
                email: "A@EDEN.ORG".into(),
                password: "pw".into(),
                phone: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[test]
    fn manager_email_cannot_be_registered() {
        let repo = CustomerRepository::new(seeded_db());
        let err = repo
            .create(CustomerCreate {
                username: "sneaky".into(),
                email: "manager@eden.org".into(),
                password: "pw".into(),
                phone: None,
            })
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[test]
    fn find_by_email_ignores_case() {
        let repo = CustomerRepository::new(seeded_db());
        let a = signup(&repo, "Ana@Eden.org");
        assert_eq!(repo.find_by_email("ana@eden.org").map(|c| c.id), Some(a.id));
        assert!(repo.find_by_email("nobody@eden.org").is_none());
    }

    #[test]
    fn delete_unknown_customer_is_not_found() {
        let repo = CustomerRepository::new(seeded_db());
        assert!(matches!(repo.delete(CustomerId(9)), Err(RepoError::NotFound(_))));
    }
}
