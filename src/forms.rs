use serde::Deserialize;

use crate::{
    error::ValidationError,
    models::{expense::ExpenseDraft, trip::NewTrip},
};

#[derive(Debug, Default, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub trip_name: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub travel_mode: String,
}

impl TripForm {
    pub fn parse(self) -> Result<NewTrip, ValidationError> {
        let trip_name = self.trip_name.trim();
        let destination = self.destination.trim();
        let start_date = self.start_date.trim();
        let end_date = self.end_date.trim();
        let budget = self.budget.trim();
        let travel_mode = self.travel_mode.trim();

        let fields = [trip_name, destination, start_date, end_date, budget, travel_mode];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingTripFields);
        }

        Ok(NewTrip {
            budget: parse_non_negative(budget, "Budget")?,
            trip_name: trip_name.to_string(),
            destination: destination.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            travel_mode: travel_mode.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub trip_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub note: String,
}

impl ExpenseForm {
    pub fn parse(self) -> Result<ExpenseDraft, ValidationError> {
        let trip_name = self.trip_name.trim();
        let category = self.category.trim();
        let amount = self.amount.trim();
        let date = self.date.trim();

        if [trip_name, category, amount, date]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ValidationError::MissingExpenseFields);
        }

        Ok(ExpenseDraft {
            amount: parse_non_negative(amount, "Amount")?,
            trip_name: trip_name.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            note: self.note.trim().to_string(),
        })
    }
}

fn parse_non_negative(raw: &str, field: &'static str) -> Result<f64, ValidationError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidNumber { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip_form(budget: &str) -> TripForm {
        TripForm {
            trip_name: " Lisbon ".into(),
            destination: "Portugal".into(),
            start_date: "2024-05-01".into(),
            end_date: "2024-05-08".into(),
            budget: budget.into(),
            travel_mode: "Train".into(),
        }
    }

    fn expense_form(amount: &str) -> ExpenseForm {
        ExpenseForm {
            trip_name: "Lisbon".into(),
            category: "Food".into(),
            amount: amount.into(),
            date: "2024-05-02".into(),
            note: "  pastéis  ".into(),
        }
    }

    #[test]
    fn trip_fields_are_trimmed() {
        let trip = trip_form("250.5").parse().unwrap();
        assert_eq!(trip.trip_name, "Lisbon");
        assert_eq!(trip.budget, 250.5);
    }

    #[test]
    fn blank_trip_field_is_missing() {
        let mut form = trip_form("100");
        form.destination = "   ".into();
        assert_eq!(form.parse(), Err(ValidationError::MissingTripFields));
    }

    #[test]
    fn budget_must_be_non_negative_number() {
        for raw in ["-1", "abc", "inf", "NaN"] {
            assert_eq!(
                trip_form(raw).parse(),
                Err(ValidationError::InvalidNumber { field: "Budget" }),
                "budget {raw:?} should be rejected"
            );
        }
        assert_eq!(trip_form("0").parse().unwrap().budget, 0.0);
    }

    #[test]
    fn note_is_optional() {
        let mut form = expense_form("12");
        form.note = String::new();
        let draft = form.parse().unwrap();
        assert_eq!(draft.note, "");
        assert_eq!(expense_form("12").parse().unwrap().note, "pastéis");
    }

    #[test]
    fn expense_requires_core_fields() {
        let mut form = expense_form("12");
        form.category = String::new();
        assert_eq!(form.parse(), Err(ValidationError::MissingExpenseFields));
    }

    #[test]
    fn invalid_amount_names_the_field() {
        let err = expense_form("-3").parse().unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a valid positive number!");
    }
}
