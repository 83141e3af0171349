use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: u64,
    pub trip_name: String,
    pub category: String,
    #[serde(default)]
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Replaces every field except the id.
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.trip_name = draft.trip_name;
        self.category = draft.category;
        self.amount = draft.amount;
        self.date = draft.date;
        self.note = draft.note;
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

impl Record for Expense {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Validated expense fields, used both for creating and for updating.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub trip_name: String,
    pub category: String,
    pub amount: f64,
    pub date: String,
    pub note: String,
}

impl ExpenseDraft {
    pub fn into_expense(self, id: u64) -> Expense {
        Expense {
            id,
            trip_name: self.trip_name,
            category: self.category,
            amount: self.amount,
            date: self.date,
            note: self.note,
        }
    }
}
