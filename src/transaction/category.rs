//! The fixed lists of categories that income and expenses can be filed under.

use std::fmt::Display;

use serde::Deserialize;

use crate::transaction::core::TransactionType;

/// What a transaction was for.
///
/// The variants are declared with the income categories first, followed by
/// the expense categories, and each list is in the order it is offered to the
/// user. The derived ordering follows the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Category {
    /// Regular pay from an employer.
    Salary,
    /// Payment for contract or freelance work.
    Freelance,
    /// Dividends, interest and other investment returns.
    Investments,
    /// Income that does not fit the other income categories.
    #[serde(rename = "Other Income")]
    OtherIncome,
    /// Groceries and eating out.
    Food,
    /// Public transport, fuel and car costs.
    Transportation,
    /// Rent, mortgage and home costs.
    Housing,
    /// Power, water, internet and phone bills.
    Utilities,
    /// Movies, games, events and hobbies.
    Entertainment,
    /// Clothes, gadgets and other purchases.
    Shopping,
    /// Doctors, dentists and medicine.
    Healthcare,
    /// Expenses that do not fit the other expense categories.
    Other,
}

const INCOME_CATEGORIES: [Category; 4] = [
    Category::Salary,
    Category::Freelance,
    Category::Investments,
    Category::OtherIncome,
];

const EXPENSE_CATEGORIES: [Category; 8] = [
    Category::Food,
    Category::Transportation,
    Category::Housing,
    Category::Utilities,
    Category::Entertainment,
    Category::Shopping,
    Category::Healthcare,
    Category::Other,
];

/// The categories that can be used for `transaction_type`, in the order they
/// are offered to the user.
pub fn categories_for(transaction_type: TransactionType) -> &'static [Category] {
    match transaction_type {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

impl Category {
    /// The name of the category as shown to the user and sent in forms.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investments => "Investments",
            Category::OtherIncome => "Other Income",
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }

    /// Whether this category is offered for `transaction_type`.
    pub fn is_valid_for(&self, transaction_type: TransactionType) -> bool {
        categories_for(transaction_type).contains(self)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
