//! EveryBudget is a web app for planning a monthly budget and tracking the
//! transactions made against it.
//!
//! Users sign in through an external identity provider. Each user plans
//! budget items per month under income and expense categories, records
//! transactions against those items and sees planned versus actual totals.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod budget_item;
mod category;
mod database_id;
mod db;
mod endpoints;
mod entry_type;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod money;
mod navigation;
mod not_found;
mod routing;
mod text;
mod timezone;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget_item::{
    BudgetItem, BudgetItemName, BudgetItemSummary, BudgetPeriod, BudgetSummary, CategorySummary,
    NewBudgetItem, create_budget_item, summarize_budget,
};
pub use category::{Category, CategoryName, create_category};
pub use db::{initialize as initialize_db, open as open_db, reset as reset_db};
pub use entry_type::EntryType;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use money::{Amount, format_currency};
pub use routing::build_router;
pub use transaction::{
    LinkedBudgetItem, Transaction, TransactionBuilder, TransactionSummary, UserTransaction,
    UserTransactions, count_transactions, create_transaction, get_transaction,
    get_user_transactions,
};
pub use user::{
    EMAIL_HEADER, ExternalIdentity, USER_ID_HEADER, User, UserId, count_users, sync_user,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
