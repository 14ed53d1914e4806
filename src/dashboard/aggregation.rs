//! Transaction data aggregation for the summary, chart and table.
//!
//! Everything here is recomputed from the full list of transactions on every
//! render, nothing is cached between requests.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    Error,
    transaction::{Category, Transaction, TransactionType},
};

/// Adds up `amounts` without overflowing.
///
/// # Errors
/// Returns [Error::TotalTooLarge] if the sum does not fit in a [Decimal].
fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, Error> {
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or(Error::TotalTooLarge)
    })
}

/// The sum of the amounts of all transactions of `transaction_type`.
///
/// Returns zero if there are no transactions of that type.
pub(super) fn total_by_type(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Result<Decimal, Error> {
    checked_sum(
        transactions
            .iter()
            .filter(|transaction| transaction.transaction_type() == transaction_type)
            .map(|transaction| transaction.amount().as_decimal()),
    )
}

/// Total income minus total expenses.
pub(super) fn balance(transactions: &[Transaction]) -> Result<Decimal, Error> {
    total_by_type(transactions, TransactionType::Income)?
        .checked_sub(total_by_type(transactions, TransactionType::Expense)?)
        .ok_or(Error::TotalTooLarge)
}

/// Sums amounts per category across both income and expenses.
///
/// Categories without any transactions are left out. The map is ordered by
/// category declaration order, so income categories come before expense
/// categories.
pub(super) fn sum_by_category(
    transactions: &[Transaction],
) -> Result<BTreeMap<Category, Decimal>, Error> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        let total = totals
            .entry(transaction.category())
            .or_insert(Decimal::ZERO);
        *total = checked_sum([*total, transaction.amount().as_decimal()])?;
    }

    Ok(totals)
}

/// The transactions ordered by date with the most recent first.
///
/// Transactions on the same date keep the order they were added in.
pub(super) fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}

/// The figures shown in the transaction summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub(super) fn from_transactions(transactions: &[Transaction]) -> Result<Self, Error> {
        Ok(Self {
            total_income: total_by_type(transactions, TransactionType::Income)?,
            total_expenses: total_by_type(transactions, TransactionType::Expense)?,
            balance: balance(transactions)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, macros::date};

    use crate::{
        Error,
        dashboard::aggregation::{
            Summary, balance, checked_sum, newest_first, sum_by_category, total_by_type,
        },
        transaction::{Amount, Category, Transaction, TransactionStore, TransactionType},
    };

    fn create_test_transaction(
        transaction_type: TransactionType,
        category: Category,
        amount: Decimal,
        date: Date,
        description: &str,
    ) -> Transaction {
        Transaction::build(date, transaction_type, category, Amount::new(amount).unwrap())
            .description(description)
            .finalise()
            .unwrap()
    }

    fn income(category: Category, amount: Decimal, date: Date) -> Transaction {
        create_test_transaction(TransactionType::Income, category, amount, date, "")
    }

    fn expense(category: Category, amount: Decimal, date: Date) -> Transaction {
        create_test_transaction(TransactionType::Expense, category, amount, date, "")
    }

    #[test]
    fn totals_are_zero_for_no_transactions() {
        let transactions = vec![];

        assert_eq!(
            total_by_type(&transactions, TransactionType::Income),
            Ok(Decimal::ZERO)
        );
        assert_eq!(
            total_by_type(&transactions, TransactionType::Expense),
            Ok(Decimal::ZERO)
        );
        assert_eq!(balance(&transactions), Ok(Decimal::ZERO));
        assert!(sum_by_category(&transactions).unwrap().is_empty());
    }

    #[test]
    fn total_by_type_only_sums_matching_type() {
        let transactions = vec![
            income(Category::Salary, dec!(3000), date!(2024 - 01 - 05)),
            income(Category::Freelance, dec!(250.25), date!(2024 - 01 - 06)),
            expense(Category::Food, dec!(45.50), date!(2024 - 01 - 03)),
        ];

        assert_eq!(
            total_by_type(&transactions, TransactionType::Income),
            Ok(dec!(3250.25))
        );
        assert_eq!(
            total_by_type(&transactions, TransactionType::Expense),
            Ok(dec!(45.50))
        );
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let amounts = [
            dec!(0),
            dec!(0.01),
            dec!(12.34),
            dec!(999.99),
            dec!(3000),
            dec!(45.5),
            dec!(100000.10),
        ];

        // Build up a store one transaction at a time, alternating types, and
        // check the identity after every append.
        let mut store = TransactionStore::new();
        for (i, amount) in amounts.iter().cycle().take(20).enumerate() {
            let transaction = if i % 3 == 0 {
                expense(Category::Housing, *amount, date!(2024 - 02 - 01))
            } else {
                income(Category::Investments, *amount, date!(2024 - 02 - 01))
            };
            store.append(transaction);

            let transactions = store.all();
            assert_eq!(
                total_by_type(transactions, TransactionType::Income).unwrap()
                    - total_by_type(transactions, TransactionType::Expense).unwrap(),
                balance(transactions).unwrap()
            );
        }
    }

    #[test]
    fn balance_can_be_negative() {
        let transactions = vec![
            income(Category::Salary, dec!(100), date!(2024 - 01 - 05)),
            expense(Category::Housing, dec!(400), date!(2024 - 01 - 05)),
        ];

        assert_eq!(balance(&transactions), Ok(dec!(-300)));
    }

    #[test]
    fn sum_by_category_groups_across_types() {
        let transactions = vec![
            expense(Category::Food, dec!(10), date!(2024 - 01 - 01)),
            income(Category::Salary, dec!(3000), date!(2024 - 01 - 05)),
            expense(Category::Food, dec!(35.50), date!(2024 - 01 - 03)),
            expense(Category::Utilities, dec!(80), date!(2024 - 01 - 03)),
        ];

        let totals = sum_by_category(&transactions).unwrap();

        assert_eq!(
            totals.into_iter().collect::<Vec<_>>(),
            vec![
                (Category::Salary, dec!(3000)),
                (Category::Food, dec!(45.50)),
                (Category::Utilities, dec!(80)),
            ]
        );
    }

    #[test]
    fn sum_by_category_includes_zero_amounts() {
        let transactions = vec![expense(Category::Other, dec!(0), date!(2024 - 01 - 01))];

        let totals = sum_by_category(&transactions).unwrap();

        assert_eq!(totals.get(&Category::Other), Some(&Decimal::ZERO));
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(
            checked_sum([Decimal::MAX, dec!(0.01), dec!(1)]),
            Err(Error::TotalTooLarge)
        );
        assert_eq!(checked_sum([Decimal::MAX, Decimal::ZERO]), Ok(Decimal::MAX));
    }

    #[test]
    fn totals_at_max_amount_do_not_overflow() {
        let transactions = vec![
            income(Category::Salary, Amount::MAX.as_decimal(), date!(2024 - 01 - 05)),
            income(Category::Salary, Amount::MAX.as_decimal(), date!(2024 - 01 - 06)),
            expense(Category::Housing, Amount::MAX.as_decimal(), date!(2024 - 01 - 07)),
        ];

        let summary = Summary::from_transactions(&transactions).unwrap();

        assert_eq!(summary.total_income, dec!(2000000000000));
        assert_eq!(summary.balance, dec!(1000000000000));
        assert_eq!(
            sum_by_category(&transactions).unwrap().get(&Category::Salary),
            Some(&dec!(2000000000000))
        );
    }

    #[test]
    fn newest_first_sorts_by_date_descending() {
        let transactions = vec![
            income(Category::Salary, dec!(3000), date!(2024 - 01 - 05)),
            expense(Category::Food, dec!(45.50), date!(2024 - 01 - 03)),
            expense(Category::Shopping, dec!(20), date!(2024 - 01 - 10)),
        ];

        let dates: Vec<_> = newest_first(&transactions)
            .iter()
            .map(|transaction| transaction.date())
            .collect();

        assert_eq!(
            dates,
            vec![
                date!(2024 - 01 - 10),
                date!(2024 - 01 - 05),
                date!(2024 - 01 - 03)
            ]
        );
    }

    #[test]
    fn newest_first_keeps_insertion_order_for_equal_dates() {
        let transactions = vec![
            create_test_transaction(
                TransactionType::Expense,
                Category::Food,
                dec!(1),
                date!(2024 - 01 - 05),
                "first",
            ),
            create_test_transaction(
                TransactionType::Expense,
                Category::Food,
                dec!(2),
                date!(2024 - 01 - 06),
                "newer",
            ),
            create_test_transaction(
                TransactionType::Expense,
                Category::Food,
                dec!(3),
                date!(2024 - 01 - 05),
                "second",
            ),
            create_test_transaction(
                TransactionType::Income,
                Category::Salary,
                dec!(4),
                date!(2024 - 01 - 05),
                "third",
            ),
        ];

        let descriptions: Vec<_> = newest_first(&transactions)
            .iter()
            .map(|transaction| transaction.description())
            .collect();

        assert_eq!(descriptions, vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn summary_for_example_transactions() {
        let transactions = vec![
            income(Category::Salary, dec!(3000.00), date!(2024 - 01 - 05)),
            expense(Category::Food, dec!(45.50), date!(2024 - 01 - 03)),
        ];

        let summary = Summary::from_transactions(&transactions).unwrap();

        assert_eq!(
            summary,
            Summary {
                total_income: dec!(3000.00),
                total_expenses: dec!(45.50),
                balance: dec!(2954.50),
            }
        );
    }
}
