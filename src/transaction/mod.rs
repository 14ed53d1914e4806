//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The fixed category lists for income and expenses
//! - The per-session, append-only `TransactionStore`
//! - The form fields and endpoints for adding transactions

mod category;
mod category_options;
mod core;
mod create_endpoint;
mod form;
mod store;

pub use category::{Category, categories_for};
pub use category_options::get_category_options;
pub use core::{Amount, Transaction, TransactionBuilder, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use form::{TransactionFormDefaults, transaction_form};
pub use store::TransactionStore;
