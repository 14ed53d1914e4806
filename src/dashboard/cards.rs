//! Metric cards for the transaction summary.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    dashboard::aggregation::Summary,
    html::{METRIC_CARD_STYLE, format_currency},
};

const AMOUNT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const AMOUNT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring the balance (green unless it is negative).
fn balance_color_class(balance: Decimal) -> &'static str {
    if balance.is_sign_negative() && !balance.is_zero() {
        AMOUNT_RED_STYLE
    } else {
        AMOUNT_GREEN_STYLE
    }
}

/// Renders the total income, total expenses and balance as three cards.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    html! {
        div id="summary-cards"
        {
            (metric_card("total-income", "Total Income", summary.total_income, AMOUNT_GREEN_STYLE))
            (metric_card("total-expenses", "Total Expenses", summary.total_expenses, AMOUNT_RED_STYLE))
            (metric_card("balance", "Balance", summary.balance, balance_color_class(summary.balance)))
        }
    }
}

fn metric_card(id: &str, label: &str, amount: Decimal, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(METRIC_CARD_STYLE)
        {
            h3 class="text-lg font-semibold"
            {
                (label) ": "
                span class=(amount_style) { (format_currency(amount)) }
            }
        }
    }
}
