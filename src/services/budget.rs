use crate::models::{expense::Expense, trip::Trip};

/// Budget figures derived for one trip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TripTotals {
    pub budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
}

impl TripTotals {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Computes budget, spending and remaining balance for `trip_name`.
///
/// An unknown trip yields all zeroes, which callers cannot tell apart from a
/// zero-budget trip without expenses.
pub fn aggregate(trip_name: &str, trips: &[Trip], expenses: &[Expense]) -> TripTotals {
    let Some(trip) = trips.iter().find(|t| t.trip_name == trip_name) else {
        return TripTotals::default();
    };

    let total_spent: f64 = expenses
        .iter()
        .filter(|e| e.trip_name == trip_name)
        .map(|e| e.amount)
        .sum();

    TripTotals {
        budget: trip.budget,
        total_spent,
        remaining: trip.budget - total_spent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(name: &str, budget: f64) -> Trip {
        Trip {
            id: 1,
            trip_name: name.into(),
            destination: "Somewhere".into(),
            start_date: "2024-05-01".into(),
            end_date: "2024-05-08".into(),
            budget,
            travel_mode: "Car".into(),
        }
    }

    fn expense(id: u64, trip_name: &str, amount: f64) -> Expense {
        Expense {
            id,
            trip_name: trip_name.into(),
            category: "Misc".into(),
            amount,
            date: "2024-05-02".into(),
            note: String::new(),
        }
    }

    #[test]
    fn within_budget() {
        let trips = [trip("Lisbon", 100.0)];
        let expenses = [expense(1, "Lisbon", 30.0), expense(2, "Lisbon", 45.0)];
        let totals = aggregate("Lisbon", &trips, &expenses);
        assert_eq!(
            totals,
            TripTotals {
                budget: 100.0,
                total_spent: 75.0,
                remaining: 25.0
            }
        );
        assert!(!totals.is_over_budget());
    }

    #[test]
    fn over_budget_goes_negative() {
        let trips = [trip("Oslo", 50.0)];
        let expenses = [expense(1, "Oslo", 60.0)];
        let totals = aggregate("Oslo", &trips, &expenses);
        assert_eq!(totals.remaining, -10.0);
        assert!(totals.is_over_budget());
    }

    #[test]
    fn unknown_trip_is_all_zero() {
        let trips = [trip("Lisbon", 100.0)];
        let expenses = [expense(1, "no-such-trip", 10.0)];
        assert_eq!(
            aggregate("no-such-trip", &trips, &expenses),
            TripTotals::default()
        );
    }

    #[test]
    fn only_matching_expenses_count() {
        let trips = [trip("Lisbon", 100.0), trip("lisbon", 10.0)];
        let expenses = [expense(1, "Lisbon", 20.0), expense(2, "lisbon", 5.0)];
        assert_eq!(aggregate("Lisbon", &trips, &expenses).total_spent, 20.0);
        assert_eq!(aggregate("lisbon", &trips, &expenses).remaining, 5.0);
    }

    #[test]
    fn spending_exactly_the_budget_is_not_over() {
        let trips = [trip("Rome", 40.0)];
        let expenses = [expense(1, "Rome", 40.0)];
        assert!(!aggregate("Rome", &trips, &expenses).is_over_budget());
    }
}
