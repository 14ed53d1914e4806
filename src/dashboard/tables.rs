//! The table of recent transactions.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::newest_first,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::Transaction,
};

const TABLE_AMOUNT_CELL_STYLE: &str = "text-right whitespace-nowrap";

/// Text shown in place of the table before any transactions are added.
pub(super) const NO_TRANSACTIONS_TEXT: &str =
    "No transactions added yet. Use the sidebar to add transactions!";

/// Renders every transaction, most recent first, or a placeholder if there are none.
pub(super) fn recent_transactions_table(transactions: &[Transaction]) -> Markup {
    if transactions.is_empty() {
        return html! {
            p
                id="no-transactions"
                class="p-4 text-sm text-blue-800 rounded-lg bg-blue-50 dark:bg-gray-800 dark:text-blue-400"
            {
                (NO_TRANSACTIONS_TEXT)
            }
        };
    }

    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table
                id="transactions-table"
                class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    }
                }

                tbody
                {
                    @for transaction in newest_first(transactions) {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date()) }
                            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type()) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category()) }
                            td class={(TABLE_CELL_STYLE) " " (TABLE_AMOUNT_CELL_STYLE)}
                            {
                                (format_currency(transaction.amount().as_decimal()))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.description()) }
                        }
                    }
                }
            }
        }
    }
}
