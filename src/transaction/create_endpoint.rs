//! Defines the endpoint for adding a new transaction.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState,
    alert::Alert,
    dashboard::dashboard_content,
    html::format_currency,
    session::{SessionId, SessionStore},
    timezone::get_local_date,
    transaction::{Amount, Category, Transaction, TransactionType},
};

/// The state needed to add a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The transactions of every active session.
    pub sessions: SessionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for adding a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// When the transaction happened, defaults to today.
    #[serde(default)]
    pub date: Option<Date>,
    /// Whether the transaction is income or an expense.
    pub type_: TransactionType,
    /// The category, which must be one of the categories for `type_`.
    pub category: Category,
    /// The amount in dollars, defaults to zero and negative values are clamped
    /// to zero. Must not be more than [Amount::MAX].
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Text detailing the transaction, defaults to an empty string.
    #[serde(default)]
    pub description: Option<String>,
}

/// A route handler for adding a new transaction to the session.
///
/// Responds with the refreshed dashboard content and an out-of-band success
/// alert. Invalid input is reported with an error alert, which leaves the
/// form untouched.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let date = match form.date {
        Some(date) => date,
        None => match get_local_date(&state.local_timezone) {
            Ok(today) => today,
            Err(error) => return error.into_alert_response(),
        },
    };

    let amount = match Amount::from_input(form.amount.unwrap_or_default()) {
        Ok(amount) => amount,
        Err(error) => {
            tracing::warn!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    };
    let transaction = Transaction::build(date, form.type_, form.category, amount)
        .description(form.description.as_deref().unwrap_or_default())
        .finalise();

    let transaction = match transaction {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::warn!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    };

    let details = format!(
        "Added {} {} of {}.",
        transaction.category(),
        transaction.transaction_type().form_value(),
        format_currency(transaction.amount().as_decimal())
    );

    let transactions = match state.sessions.append(session_id, transaction) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not add transaction to session {session_id}: {error}");
            return error.into_alert_response();
        }
    };

    tracing::debug!(
        "session {session_id} now has {} transactions",
        transactions.len()
    );

    let content = match dashboard_content(&transactions) {
        Ok(content) => content,
        Err(error) => {
            tracing::error!("could not render dashboard for session {session_id}: {error}");
            return error.into_alert_response();
        }
    };

    let alert = Alert::Success {
        message: "Transaction added successfully!".to_owned(),
        details,
    };

    html! {
        (content)
        (alert.into_oob_html())
    }
    .into_response()
}
