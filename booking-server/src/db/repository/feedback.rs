//! Feedback Repository

use chrono::NaiveDate;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::MemoryDb;
use crate::db::models::{CustomerId, Feedback};
use shared::models::{MAX_RATING, MIN_RATING};

/// New feedback entry
#[derive(Debug, Clone)]
pub struct FeedbackCreate {
    pub customer_id: CustomerId,
    pub rating: u8,
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub fn create(&self, data: FeedbackCreate) -> RepoResult<Feedback> {
        if !(MIN_RATING..=MAX_RATING).contains(&data.rating) {
            return Err(RepoError::Validation("Invalid rating.".to_string()));
        }

        let mut state = self.base.db().lock();
        if !state.customers.contains_key(&data.customer_id) {
            return Err(RepoError::NotFound("Customer not found.".to_string()));
        }

        let id = state.next_feedback_id();
        let feedback = Feedback {
            id,
            customer_id: data.customer_id,
            rating: data.rating,
            text: data.text,
            date: data.date,
        };
        state.feedback.insert(id, feedback.clone());
        Ok(feedback)
    }

    /// A customer's feedback, oldest first
    pub fn find_by_customer(&self, customer_id: CustomerId) -> Vec<Feedback> {
        self.base
            .db()
            .lock()
            .feedback
            .values()
            .filter(|f| f.customer_id == customer_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CustomerCreate, FeedbackId};
    use crate::db::repository::CustomerRepository;
    use crate::db::test_support::seeded_db;

    fn entry(customer_id: CustomerId, rating: u8) -> FeedbackCreate {
        FeedbackCreate {
            customer_id,
            rating,
            text: "Lovely dinner".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        }
    }

    #[test]
    fn create_and_list() {
        let db = seeded_db();
        let customers = CustomerRepository::new(db.clone());
        let c = customers
            .create(CustomerCreate {
                username: "critic".into(),
                email: "critic@eden.org".into(),
                password: "pw".into(),
                phone: None,
            })
            .unwrap()
            .id;
        let repo = FeedbackRepository::new(db);

        let f = repo.create(entry(c, 5)).unwrap();
        assert_eq!(f.id, FeedbackId(1));
        repo.create(entry(c, 1)).unwrap();
        assert_eq!(repo.find_by_customer(c).len(), 2);

        assert!(matches!(repo.create(entry(c, 0)), Err(RepoError::Validation(_))));
        assert!(matches!(repo.create(entry(c, 6)), Err(RepoError::Validation(_))));
        assert!(matches!(
            repo.create(entry(CustomerId(50), 3)),
            Err(RepoError::NotFound(_))
        ));

        assert_eq!(customers.delete(c).unwrap().feedback, 2);
        assert!(repo.find_by_customer(c).is_empty());
    }
}
