pub mod expenses;
pub mod trips;

use axum::Router;
use tower_http::services::ServeDir;

use crate::{services::budget::TripTotals, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(trips::router())
        .merge(expenses::router())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

/// Totals pre-formatted for templates.
#[derive(Clone)]
pub(crate) struct TotalsRow {
    budget: String,
    total_spent: String,
    remaining: String,
    is_over_budget: bool,
}

impl From<TripTotals> for TotalsRow {
    fn from(totals: TripTotals) -> Self {
        Self {
            budget: format_money(totals.budget),
            total_spent: format_money(totals.total_spent),
            remaining: format_money(totals.remaining),
            is_over_budget: totals.is_over_budget(),
        }
    }
}

pub(crate) fn format_money(value: f64) -> String {
    format!("{value:.2}")
}
