//! Income, expense and net totals over a set of transactions.

use crate::{entry_type::EntryType, money::Amount, transaction::Transaction};

/// The totals shown in the summary cards of the transactions page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransactionSummary {
    /// The sum of the income transactions.
    pub total_income: Amount,
    /// The sum of the expense transactions.
    pub total_expenses: Amount,
    /// `total_income - total_expenses`
    pub net_amount: Amount,
}

impl TransactionSummary {
    /// Add up `transactions` by entry type.
    ///
    /// The result does not depend on the order of the transactions and an
    /// empty set of transactions gives zero for every total.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (total_income, total_expenses) = transactions.into_iter().fold(
            (Amount::ZERO, Amount::ZERO),
            |(income, expenses), transaction| match transaction.entry_type {
                EntryType::Income => (income + transaction.amount, expenses),
                EntryType::Expense => (income, expenses + transaction.amount),
            },
        );

        Self {
            total_income,
            total_expenses,
            net_amount: total_income - total_expenses,
        }
    }
}
