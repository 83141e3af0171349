use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    error::AppError,
    flash::{self, FlashLevel, FlashView},
    forms::TripForm,
    state::AppState,
};

use super::TotalsRow;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/trips", post(trip_create))
        .route("/trips/new", get(trip_new_form))
}

#[derive(Clone)]
struct TripRow {
    trip_name: String,
    destination: String,
    start_date: String,
    end_date: String,
    travel_mode: String,
    totals: TotalsRow,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    flash: FlashView,
    trips: Vec<TripRow>,
}

async fn home(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, AppError> {
    let summaries = state.ledger.trip_summaries().await?;
    let trips = summaries
        .into_iter()
        .map(|summary| TripRow {
            trip_name: summary.trip.trip_name,
            destination: summary.trip.destination,
            start_date: summary.trip.start_date,
            end_date: summary.trip.end_date,
            travel_mode: summary.trip.travel_mode,
            totals: summary.totals.into(),
        })
        .collect();
    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        AskamaTemplateResponse::into_response(HomeTemplate { flash, trips }),
    )
        .into_response())
}

#[derive(Template)]
#[template(path = "trip_new.html")]
struct TripNewTemplate {
    flash: FlashView,
}

async fn trip_new_form(jar: PrivateCookieJar) -> Response {
    let (jar, flash) = flash::take(jar);
    (
        jar,
        AskamaTemplateResponse::into_response(TripNewTemplate { flash }),
    )
        .into_response()
}

async fn trip_create(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<TripForm>,
) -> Result<Response, AppError> {
    let outcome = match form.parse() {
        Ok(new_trip) => state.ledger.create_trip(new_trip).await,
        Err(err) => Err(err.into()),
    };

    match outcome {
        Ok(_) => Ok((
            flash::push(jar, FlashLevel::Success, "Trip added successfully!"),
            Redirect::to("/"),
        )
            .into_response()),
        Err(AppError::Validation(err)) => Ok((
            flash::push(jar, FlashLevel::Danger, err.to_string()),
            Redirect::to("/trips/new"),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}
