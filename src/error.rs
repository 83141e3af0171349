use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Expense not found!")]
    NotFound,
}

/// Rejections of user input. The display text is shown to the user as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required!")]
    MissingTripFields,
    #[error("Trip Name, Category, Amount, and Date are required!")]
    MissingExpenseFields,
    #[error("{field} must be a valid positive number!")]
    InvalidNumber { field: &'static str },
    #[error("Trip name already exists! Please choose a different name.")]
    DuplicateTripName(String),
    #[error("Selected trip does not exist!")]
    UnknownTrip(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Config(_) | AppError::Io(_) | AppError::Other(_) => {
                error!("request failed: {self:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}
