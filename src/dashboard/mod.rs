//! Dashboard module
//!
//! Provides the page showing the transaction form, the income and expense
//! summary, the category breakdown chart and the table of transactions.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
pub(crate) use handlers::dashboard_content;
