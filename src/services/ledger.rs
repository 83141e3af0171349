use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    error::{AppError, ValidationError},
    models::{
        expense::{Expense, ExpenseDraft},
        next_id,
        trip::{NewTrip, Trip},
    },
    services::{
        budget::{aggregate, TripTotals},
        storage::RecordStore,
    },
};

/// A trip together with its freshly computed totals.
#[derive(Debug, Clone)]
pub struct TripSummary {
    pub trip: Trip,
    pub totals: TripTotals,
}

/// Expenses of one trip name, newest first.
///
/// `totals` is `None` when the trip the expenses point at no longer exists.
#[derive(Debug, Clone)]
pub struct ExpenseGroup {
    pub trip_name: String,
    pub totals: Option<TripTotals>,
    pub expenses: Vec<Expense>,
}

/// Write-side service over a [`RecordStore`].
///
/// Every mutation runs its load, mutate and save steps while holding one
/// lock, so concurrent requests cannot overwrite each other's changes.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn RecordStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Ledger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn trips(&self) -> Result<Vec<Trip>, AppError> {
        self.store.load_trips().await
    }

    pub async fn expenses(&self) -> Result<Vec<Expense>, AppError> {
        self.store.load_expenses().await
    }

    pub async fn expense(&self, id: u64) -> Result<Expense, AppError> {
        self.store
            .load_expenses()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)
    }

    pub async fn create_trip(&self, new_trip: NewTrip) -> Result<Trip, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut trips = self.store.load_trips().await?;
        if trips.iter().any(|t| t.trip_name == new_trip.trip_name) {
            warn!(trip = %new_trip.trip_name, "duplicate trip name rejected");
            return Err(ValidationError::DuplicateTripName(new_trip.trip_name).into());
        }

        let id = next_id(&trips).ok_or_else(|| ids_exhausted("trips"))?;
        let trip = new_trip.into_trip(id);
        trips.push(trip.clone());
        self.store.save_trips(&trips).await?;
        info!(id = trip.id, trip = %trip.trip_name, budget = trip.budget, "trip created");
        Ok(trip)
    }

    pub async fn create_expense(&self, draft: ExpenseDraft) -> Result<Expense, AppError> {
        let _guard = self.write_lock.lock().await;
        self.ensure_trip_exists(&draft.trip_name).await?;

        let mut expenses = self.store.load_expenses().await?;
        let id = next_id(&expenses).ok_or_else(|| ids_exhausted("expenses"))?;
        let expense = draft.into_expense(id);
        expenses.push(expense.clone());
        self.store.save_expenses(&expenses).await?;
        info!(id = expense.id, trip = %expense.trip_name, amount = expense.amount, "expense created");
        Ok(expense)
    }

    pub async fn update_expense(&self, id: u64, draft: ExpenseDraft) -> Result<Expense, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut expenses = self.store.load_expenses().await?;
        let Some(position) = expenses.iter().position(|e| e.id == id) else {
            return Err(AppError::NotFound);
        };
        self.ensure_trip_exists(&draft.trip_name).await?;

        expenses[position].apply(draft);
        let updated = expenses[position].clone();
        self.store.save_expenses(&expenses).await?;
        info!(id, trip = %updated.trip_name, amount = updated.amount, "expense updated");
        Ok(updated)
    }

    pub async fn delete_expense(&self, id: u64) -> Result<Expense, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut expenses = self.store.load_expenses().await?;
        let Some(position) = expenses.iter().position(|e| e.id == id) else {
            return Err(AppError::NotFound);
        };

        let removed = expenses.remove(position);
        self.store.save_expenses(&expenses).await?;
        info!(id, trip = %removed.trip_name, "expense deleted");
        Ok(removed)
    }

    pub async fn trip_totals(&self, trip_name: &str) -> Result<TripTotals, AppError> {
        let trips = self.store.load_trips().await?;
        let expenses = self.store.load_expenses().await?;
        Ok(aggregate(trip_name, &trips, &expenses))
    }

    pub async fn trip_summaries(&self) -> Result<Vec<TripSummary>, AppError> {
        let trips = self.store.load_trips().await?;
        let expenses = self.store.load_expenses().await?;
        let summaries = trips
            .iter()
            .map(|trip| TripSummary {
                totals: aggregate(&trip.trip_name, &trips, &expenses),
                trip: trip.clone(),
            })
            .collect();
        Ok(summaries)
    }

    /// Groups all expenses by trip: known trips first in storage order, then
    /// expenses whose trip is gone, in order of first appearance.
    pub async fn expense_groups(&self) -> Result<Vec<ExpenseGroup>, AppError> {
        let trips = self.store.load_trips().await?;
        let mut expenses = self.store.load_expenses().await?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        let mut groups: Vec<ExpenseGroup> = trips
            .iter()
            .map(|trip| ExpenseGroup {
                trip_name: trip.trip_name.clone(),
                totals: Some(aggregate(&trip.trip_name, &trips, &expenses)),
                expenses: Vec::new(),
            })
            .collect();

        for expense in expenses {
            match groups.iter_mut().find(|g| g.trip_name == expense.trip_name) {
                Some(group) => group.expenses.push(expense),
                None => groups.push(ExpenseGroup {
                    trip_name: expense.trip_name.clone(),
                    totals: None,
                    expenses: vec![expense],
                }),
            }
        }
        Ok(groups)
    }

    async fn ensure_trip_exists(&self, trip_name: &str) -> Result<(), AppError> {
        let trips = self.store.load_trips().await?;
        if trips.iter().any(|t| t.trip_name == trip_name) {
            Ok(())
        } else {
            warn!(trip = %trip_name, "expense for unknown trip rejected");
            Err(ValidationError::UnknownTrip(trip_name.to_string()).into())
        }
    }
}

fn ids_exhausted(collection: &str) -> AppError {
    AppError::Other(anyhow::anyhow!("no free id left in {collection}"))
}
