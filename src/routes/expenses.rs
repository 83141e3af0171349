use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    error::AppError,
    flash::{self, FlashLevel, FlashView},
    forms::ExpenseForm,
    models::{expense::Expense, trip::Trip},
    state::AppState,
};

use super::{format_money, TotalsRow};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(expenses_list).post(expense_create))
        .route("/expenses/new", get(expense_new_form))
        .route("/expenses/:id", post(expense_update))
        .route("/expenses/:id/edit", get(expense_edit_form))
        .route("/expenses/:id/delete", post(expense_delete))
}

#[derive(Clone)]
struct ExpenseRow {
    id: u64,
    category: String,
    amount: String,
    date: String,
    note: String,
    has_note: bool,
}

impl From<Expense> for ExpenseRow {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            has_note: expense.has_note(),
            category: expense.category,
            amount: format_money(expense.amount),
            date: expense.date,
            note: expense.note,
        }
    }
}

#[derive(Clone)]
struct GroupRow {
    trip_name: String,
    has_totals: bool,
    totals: TotalsRow,
    expenses: Vec<ExpenseRow>,
}

#[derive(Template)]
#[template(path = "expenses_list.html")]
struct ExpensesListTemplate {
    flash: FlashView,
    groups: Vec<GroupRow>,
}

async fn expenses_list(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, AppError> {
    let groups = state
        .ledger
        .expense_groups()
        .await?
        .into_iter()
        .map(|group| GroupRow {
            trip_name: group.trip_name,
            has_totals: group.totals.is_some(),
            totals: group.totals.unwrap_or_default().into(),
            expenses: group.expenses.into_iter().map(ExpenseRow::from).collect(),
        })
        .collect();
    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        AskamaTemplateResponse::into_response(ExpensesListTemplate { flash, groups }),
    )
        .into_response())
}

#[derive(Clone)]
struct TripOption {
    name: String,
    selected: bool,
}

fn trip_options(trips: Vec<Trip>, selected: &str) -> Vec<TripOption> {
    trips
        .into_iter()
        .map(|trip| TripOption {
            selected: trip.trip_name == selected,
            name: trip.trip_name,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "expense_new.html")]
struct ExpenseNewTemplate {
    flash: FlashView,
    trips: Vec<TripOption>,
}

async fn expense_new_form(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, AppError> {
    let trips = state.ledger.trips().await?;
    if trips.is_empty() {
        return Ok((
            flash::push(
                jar,
                FlashLevel::Warning,
                "Please add a trip first before adding expenses!",
            ),
            Redirect::to("/trips/new"),
        )
            .into_response());
    }

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        AskamaTemplateResponse::into_response(ExpenseNewTemplate {
            flash,
            trips: trip_options(trips, ""),
        }),
    )
        .into_response())
}

async fn expense_create(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, AppError> {
    let outcome = match form.parse() {
        Ok(draft) => state.ledger.create_expense(draft).await,
        Err(err) => Err(err.into()),
    };

    match outcome {
        Ok(_) => Ok(redirect_with(
            jar,
            FlashLevel::Success,
            "Expense added successfully!",
            "/expenses",
        )),
        Err(AppError::Validation(err)) => Ok(redirect_with(
            jar,
            FlashLevel::Danger,
            err.to_string(),
            "/expenses/new",
        )),
        Err(err) => Err(err),
    }
}

#[derive(Template)]
#[template(path = "expense_edit.html")]
struct ExpenseEditTemplate {
    flash: FlashView,
    id: u64,
    category: String,
    amount: String,
    date: String,
    note: String,
    trips: Vec<TripOption>,
    // Set when the expense's trip is gone from the trip list.
    has_missing_trip: bool,
    missing_trip: String,
}

async fn expense_edit_form(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(expense_id): Path<u64>,
) -> Result<Response, AppError> {
    let expense = match state.ledger.expense(expense_id).await {
        Ok(expense) => expense,
        Err(AppError::NotFound) => return Ok(not_found(jar)),
        Err(err) => return Err(err),
    };
    let trips = state.ledger.trips().await?;
    let has_missing_trip = !trips.iter().any(|t| t.trip_name == expense.trip_name);

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        AskamaTemplateResponse::into_response(ExpenseEditTemplate {
            flash,
            id: expense.id,
            trips: trip_options(trips, &expense.trip_name),
            has_missing_trip,
            missing_trip: expense.trip_name,
            category: expense.category,
            amount: expense.amount.to_string(),
            date: expense.date,
            note: expense.note,
        }),
    )
        .into_response())
}

async fn expense_update(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(expense_id): Path<u64>,
    Form(form): Form<ExpenseForm>,
) -> Result<Response, AppError> {
    let edit_path = format!("/expenses/{expense_id}/edit");
    let outcome = match form.parse() {
        Ok(draft) => state.ledger.update_expense(expense_id, draft).await,
        // An unknown id is reported before any problem with the submitted fields.
        Err(err) => match state.ledger.expense(expense_id).await {
            Ok(_) => Err(err.into()),
            Err(lookup) => Err(lookup),
        },
    };

    match outcome {
        Ok(_) => Ok(redirect_with(
            jar,
            FlashLevel::Success,
            "Expense updated successfully!",
            "/expenses",
        )),
        Err(AppError::NotFound) => Ok(not_found(jar)),
        Err(AppError::Validation(err)) => Ok(redirect_with(
            jar,
            FlashLevel::Danger,
            err.to_string(),
            &edit_path,
        )),
        Err(err) => Err(err),
    }
}

async fn expense_delete(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(expense_id): Path<u64>,
) -> Result<Response, AppError> {
    match state.ledger.delete_expense(expense_id).await {
        Ok(_) => Ok(redirect_with(
            jar,
            FlashLevel::Success,
            "Expense deleted successfully!",
            "/expenses",
        )),
        Err(AppError::NotFound) => Ok(not_found(jar)),
        Err(err) => Err(err),
    }
}

fn not_found(jar: PrivateCookieJar) -> Response {
    redirect_with(
        jar,
        FlashLevel::Danger,
        AppError::NotFound.to_string(),
        "/expenses",
    )
}

fn redirect_with(
    jar: PrivateCookieJar,
    level: FlashLevel,
    message: impl Into<String>,
    to: &str,
) -> Response {
    (flash::push(jar, level, message), Redirect::to(to)).into_response()
}
