//! A web app for recording income and expenses and viewing where the money goes.
//!
//! Transactions are kept in memory for the lifetime of a browser session. The
//! dashboard shows the total income, total expenses and balance, a pie chart of
//! amounts per category, and a table of every transaction, newest first.
//!
//! This library provides the router that directly serves the HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;
mod session;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use session::{SessionId, SessionStore};
pub use transaction::{
    Amount, Category, Transaction, TransactionBuilder, TransactionStore, TransactionType,
};

use crate::{alert::Alert, html::format_currency, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The category of a transaction is not one of the categories offered for
    /// its type, e.g. "Salary" for an expense.
    #[error("{category} is not a valid category for {transaction_type} transactions")]
    InvalidCategory {
        /// The category that was submitted.
        category: Category,
        /// The type of the transaction the category was submitted with.
        transaction_type: TransactionType,
    },

    /// A negative number was used to create an [Amount].
    ///
    /// Amounts entered through the form are clamped to zero, so this error
    /// only occurs when an amount is constructed directly.
    #[error("{0} is negative, amounts must be zero or greater")]
    NegativeAmount(Decimal),

    /// An amount greater than [Amount::MAX] was entered.
    #[error("{0} is too large, amounts must be at most {max}", max = Amount::MAX)]
    AmountTooLarge(Decimal),

    /// The sum of a session's transactions does not fit in a decimal number.
    #[error("the transaction totals are too large to calculate")]
    TotalTooLarge,

    /// Could not acquire the lock on the session registry.
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::SessionLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidCategory {
                category,
                transaction_type,
            } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category".to_owned(),
                    details: format!(
                        "{category} cannot be used for {transaction_type} transactions. \
                        Pick one of the categories listed for {transaction_type}."
                    ),
                }
                .into_html(),
            )
                .into_response(),
            Error::AmountTooLarge(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Amount too large".to_owned(),
                    details: format!(
                        "Amounts can be at most {}.",
                        format_currency(Amount::MAX.as_decimal())
                    ),
                }
                .into_html(),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                }
                .into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    }
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}
