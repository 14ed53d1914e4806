//! The form for adding a transaction, shown in the dashboard sidebar.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::{Amount, Category, TransactionType, categories_for},
};

/// The values the form starts with.
pub struct TransactionFormDefaults {
    /// The date the date picker starts on, normally today.
    pub date: Date,
    /// The type that is selected initially.
    pub transaction_type: TransactionType,
}

/// Renders the form for adding a transaction.
///
/// Submitting the form replaces `#dashboard-content` with the refreshed
/// summary and table. Changing the type reloads the category options so that
/// only the categories for the selected type can be picked.
pub fn transaction_form(defaults: &TransactionFormDefaults) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let category_options_route = endpoints::CATEGORY_OPTIONS;
    let spinner = loading_spinner();

    html! {
        form
            id="transaction-form"
            hx-post=(create_transaction_route)
            hx-target="#dashboard-content"
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold" { "Add New Transaction" }

            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Date"
                }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(defaults.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="type_"
                    class=(FORM_LABEL_STYLE)
                {
                    "Type"
                }

                select
                    name="type_"
                    id="type_"
                    hx-get=(category_options_route)
                    hx-target="#category"
                    hx-swap="innerHTML"
                    hx-trigger="change"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                        option
                            value=(transaction_type.form_value())
                            selected[transaction_type == defaults.transaction_type]
                        {
                            (transaction_type.name())
                        }
                    }
                }
            }

            div
            {
                label
                    for="category"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category"
                }

                select
                    name="category"
                    id="category"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (category_options(defaults.transaction_type, None))
                }
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        min="0"
                        max=(Amount::MAX.as_decimal())
                        step="0.01"
                        value="0.00"
                        placeholder="0.00"
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Description"
                }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (spinner)
                }
                " Add Transaction"
            }
        }
    }
}

/// Renders the `<option>` elements for the categories of `transaction_type`.
///
/// `selected` is marked as selected if it belongs to `transaction_type`,
/// otherwise the first category is selected.
pub fn category_options(transaction_type: TransactionType, selected: Option<Category>) -> Markup {
    let categories = categories_for(transaction_type);
    let selected = selected
        .filter(|category| category.is_valid_for(transaction_type))
        .or_else(|| categories.first().copied());

    html! {
        @for category in categories {
            option
                value=(category.name())
                selected[Some(*category) == selected]
            {
                (category.name())
            }
        }
    }
}
