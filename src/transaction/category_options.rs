//! Defines the endpoint that lists the categories for a transaction type.

use axum::extract::Query;
use maud::Markup;
use serde::Deserialize;

use crate::transaction::{TransactionType, form::category_options};

/// The query string sent by the type selector when it changes.
#[derive(Debug, Deserialize)]
pub struct CategoryOptionsQuery {
    /// The newly selected transaction type.
    pub type_: TransactionType,
}

/// A route handler that returns the category `<option>` elements for the
/// selected transaction type, with the first category selected.
pub async fn get_category_options(Query(query): Query<CategoryOptionsQuery>) -> Markup {
    category_options(query.type_, None)
}
