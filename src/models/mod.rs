pub mod expense;
pub mod trip;

/// A stored record carrying a collection-local numeric id.
pub trait Record {
    fn id(&self) -> u64;
}

/// Id for the next record of a collection: one past the current maximum.
///
/// Only the ids currently present are considered, so deleting the record with
/// the highest id frees that id for the next insert. Returns `None` once the
/// maximum id is `u64::MAX`.
pub fn next_id<R: Record>(items: &[R]) -> Option<u64> {
    match items.iter().map(Record::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::{Expense, ExpenseDraft};

    fn expense(id: u64) -> Expense {
        ExpenseDraft {
            trip_name: "Lisbon".into(),
            category: "Food".into(),
            amount: 1.0,
            date: "2024-05-01".into(),
            note: String::new(),
        }
        .into_expense(id)
    }

    #[test]
    fn empty_collection_starts_at_one() {
        assert_eq!(next_id::<Expense>(&[]), Some(1));
    }

    #[test]
    fn follows_highest_id_not_length() {
        let items = vec![expense(1), expense(7), expense(3)];
        assert_eq!(next_id(&items), Some(8));
    }

    #[test]
    fn deleting_highest_id_frees_it_for_reuse() {
        let mut items = vec![expense(1), expense(2), expense(3)];
        assert_eq!(next_id(&items), Some(4));
        items.retain(|e| e.id != 3);
        assert_eq!(next_id(&items), Some(3));
    }

    #[test]
    fn exhausted_id_space_yields_none() {
        let items = vec![expense(1), expense(u64::MAX)];
        assert_eq!(next_id(&items), None);
    }

    #[test]
    fn deleting_lower_id_does_not_reuse_it() {
        let mut items = vec![expense(1), expense(2), expense(3)];
        items.retain(|e| e.id != 2);
        assert_eq!(next_id(&items), Some(4));
    }
}
