//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - The aggregation query and income/expense summary for the transactions page
//! - View handlers for transaction-related web pages

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod query;
mod summary;
mod transactions_page;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, count_transactions, create_transaction,
    create_transaction_table, delete_transaction, get_budget_period_transactions,
    get_transaction, map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use query::{LinkedBudgetItem, UserTransaction, UserTransactions, get_user_transactions};
pub use summary::TransactionSummary;
pub use transactions_page::get_transactions_page;
