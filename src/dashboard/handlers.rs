//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - The view for the dashboard content, which is also returned after adding
//!   a transaction
//! - The state needed by the handler

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{Summary, sum_by_category},
        cards::summary_cards,
        charts::{category_breakdown_chart, chart_view},
        tables::recent_transactions_table,
    },
    html::{APP_NAME, HeadElement, METRIC_CARD_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles},
    session::{SessionId, SessionStore},
    timezone::get_local_date,
    transaction::{Transaction, TransactionFormDefaults, TransactionType, transaction_form},
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transactions of every active session.
    pub sessions: SessionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the page with the transaction form and an overview of the session's transactions.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get today's date: {error}"))?;

    let transactions = state
        .sessions
        .snapshot(session_id)
        .inspect_err(|error| tracing::error!("could not get transactions for {session_id}: {error}"))?;

    let form_defaults = TransactionFormDefaults {
        date: today,
        transaction_type: TransactionType::default(),
    };

    dashboard_view(&form_defaults, &transactions)
        .inspect_err(|error| tracing::error!("could not render dashboard for {session_id}: {error}"))
        .map(|view| view.into_response())
}

/// Renders the full dashboard page with the form in a sidebar.
fn dashboard_view(
    form_defaults: &TransactionFormDefaults,
    transactions: &[Transaction],
) -> Result<Markup, Error> {
    let form = transaction_form(form_defaults);
    let dashboard_markup = dashboard_content(transactions)?;

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            aside
                id="sidebar"
                class="w-full lg:w-80 shrink-0 p-5 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                (form)
            }

            main class="flex-1 min-w-0"
            {
                div class="title-animation mb-4"
                {
                    h1 class="text-3xl font-bold" { "💰 " (APP_NAME) }
                }

                div
                    id="dashboard-content"
                    class="grid grid-cols-1 xl:grid-cols-2 gap-6"
                {
                    (dashboard_markup)
                }
            }
        }
    );

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        dollar_input_styles(),
    ];

    Ok(base(APP_NAME, &head_elements, &content))
}

/// Renders the summary, category breakdown and transaction table.
///
/// This is the content of `#dashboard-content`. The summary figures and the
/// chart are only shown once there is at least one transaction.
///
/// # Errors
/// Returns [Error::TotalTooLarge] if the totals cannot be calculated.
pub(crate) fn dashboard_content(transactions: &[Transaction]) -> Result<Markup, Error> {
    let summary = if transactions.is_empty() {
        None
    } else {
        let chart = category_breakdown_chart(&sum_by_category(transactions)?);
        Some((Summary::from_transactions(transactions)?, chart))
    };

    Ok(html!(
        section id="transaction-summary" class=(METRIC_CARD_STYLE)
        {
            h2 class="text-xl font-bold mb-2" { "📊 Transaction Summary" }

            @if let Some((summary, chart)) = &summary {
                (summary_cards(summary))

                h3 class="text-lg font-bold mt-4" { "Category Breakdown" }

                (chart_view(chart))
            }
        }

        section id="recent-transactions" class=(METRIC_CARD_STYLE)
        {
            h2 class="text-xl font-bold mb-2" { "📝 Recent Transactions" }

            (recent_transactions_table(transactions))
        }
    ))
}
