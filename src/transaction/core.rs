//! Defines the core data models for transactions.

use std::fmt::Display;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use time::Date;

use crate::{Error, transaction::category::Category};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was earned, e.g. a salary payment.
    #[default]
    Income,
    /// Money was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The value used for this type in HTML forms and query strings.
    pub fn form_value(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The human-readable name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An amount of money that is zero or greater.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// An amount of zero dollars.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest amount that can be recorded, one trillion dollars.
    pub const MAX: Amount = Amount(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    /// Create an amount from `value`.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if `value` is less than zero, or
    /// [Error::AmountTooLarge] if `value` is greater than [Amount::MAX].
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value < Decimal::ZERO {
            return Err(Error::NegativeAmount(value));
        }

        if value > Self::MAX.0 {
            return Err(Error::AmountTooLarge(value));
        }

        Ok(Self(value))
    }

    /// Create an amount from user input, clamping negative values to zero and
    /// rounding to whole cents.
    ///
    /// # Errors
    /// Returns [Error::AmountTooLarge] if the rounded value is greater than
    /// [Amount::MAX].
    pub fn from_input(value: Decimal) -> Result<Self, Error> {
        let value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if value <= Decimal::ZERO {
            Ok(Self::ZERO)
        } else {
            Self::new(value)
        }
    }

    /// The amount as a decimal number of dollars.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    date: Date,
    transaction_type: TransactionType,
    category: Category,
    amount: Amount,
    description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        date: Date,
        transaction_type: TransactionType,
        category: Category,
        amount: Amount,
    ) -> TransactionBuilder {
        TransactionBuilder {
            date,
            transaction_type,
            category,
            amount,
            description: String::new(),
        }
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Whether the transaction is income or an expense.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The category of the transaction, which always matches its type.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The amount of money earned or spent.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// A text description of what the transaction was for, may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A builder for creating [Transaction] instances.
///
/// The description defaults to an empty string. Call
/// [TransactionBuilder::finalise] to check the category and create the
/// [Transaction].
///
/// # Examples
///
/// ```ignore
/// use rust_decimal_macros::dec;
/// use time::macros::date;
///
/// let transaction = Transaction::build(
///         date!(2024 - 01 - 05),
///         TransactionType::Income,
///         Category::Salary,
///         Amount::new(dec!(3000.00)).unwrap(),
///     )
///     .description("Jan pay")
///     .finalise()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    date: Date,
    transaction_type: TransactionType,
    category: Category,
    amount: Amount,
    description: String,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }

    /// Create the transaction.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if the category is not one of the
    /// categories offered for the transaction type.
    pub fn finalise(self) -> Result<Transaction, Error> {
        if !self.category.is_valid_for(self.transaction_type) {
            return Err(Error::InvalidCategory {
                category: self.category,
                transaction_type: self.transaction_type,
            });
        }

        Ok(Transaction {
            date: self.date,
            transaction_type: self.transaction_type,
            category: self.category,
            amount: self.amount,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        transaction::{Amount, Category, Transaction, TransactionType},
    };

    #[test]
    fn amount_rejects_negative_values() {
        assert_eq!(
            Amount::new(dec!(-0.01)),
            Err(Error::NegativeAmount(dec!(-0.01)))
        );
    }

    #[test]
    fn amount_accepts_zero() {
        assert_eq!(Amount::new(dec!(0)), Ok(Amount::ZERO));
    }

    #[test]
    fn amount_max_is_one_trillion_dollars() {
        assert_eq!(Amount::MAX.as_decimal(), dec!(1000000000000));
        assert_eq!(Amount::new(dec!(1000000000000)), Ok(Amount::MAX));
    }

    #[test]
    fn amount_rejects_values_over_max() {
        assert_eq!(
            Amount::new(dec!(1000000000000.01)),
            Err(Error::AmountTooLarge(dec!(1000000000000.01)))
        );
    }

    #[test]
    fn amount_from_input_clamps_to_zero() {
        assert_eq!(Amount::from_input(dec!(-12.34)), Ok(Amount::ZERO));
        assert_eq!(Amount::from_input(dec!(-0.001)), Ok(Amount::ZERO));
    }

    #[test]
    fn amount_from_input_rounds_to_cents() {
        assert_eq!(
            Amount::from_input(dec!(45.499)).map(|amount| amount.as_decimal()),
            Ok(dec!(45.50))
        );
        assert_eq!(Amount::from_input(dec!(0.004)), Ok(Amount::ZERO));
    }

    #[test]
    fn amount_from_input_rejects_values_over_max() {
        assert_eq!(
            Amount::from_input(dec!(50000000000000000000000000000)),
            Err(Error::AmountTooLarge(dec!(50000000000000000000000000000)))
        );
        assert_eq!(Amount::from_input(dec!(1000000000000.004)), Ok(Amount::MAX));
    }

    #[test]
    fn amount_displays_two_decimal_places() {
        assert_eq!(Amount::new(dec!(0)).unwrap().to_string(), "0.00");
        assert_eq!(Amount::new(dec!(45.5)).unwrap().to_string(), "45.50");
    }

    #[test]
    fn builder_creates_transaction() {
        let transaction = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionType::Income,
            Category::Salary,
            Amount::new(dec!(3000.00)).unwrap(),
        )
        .description("Jan pay")
        .finalise()
        .unwrap();

        assert_eq!(transaction.date(), date!(2024 - 01 - 05));
        assert_eq!(transaction.transaction_type(), TransactionType::Income);
        assert_eq!(transaction.category(), Category::Salary);
        assert_eq!(transaction.amount().as_decimal(), dec!(3000));
        assert_eq!(transaction.description(), "Jan pay");
    }

    #[test]
    fn description_defaults_to_empty_string() {
        let transaction = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionType::Expense,
            Category::Other,
            Amount::ZERO,
        )
        .finalise()
        .unwrap();

        assert_eq!(transaction.description(), "");
    }

    #[test]
    fn builder_rejects_category_from_other_type() {
        let result = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionType::Expense,
            Category::Salary,
            Amount::ZERO,
        )
        .finalise();

        assert_eq!(
            result,
            Err(Error::InvalidCategory {
                category: Category::Salary,
                transaction_type: TransactionType::Expense
            })
        );
    }

    #[test]
    fn transaction_type_deserializes_from_form_value() {
        #[derive(serde::Deserialize)]
        struct Form {
            type_: TransactionType,
        }

        let form: Form = serde_html_form::from_str("type_=expense").unwrap();
        assert_eq!(form.type_, TransactionType::Expense);

        let form: Form = serde_html_form::from_str("type_=income").unwrap();
        assert_eq!(form.type_, TransactionType::Income);
    }
}
