//! Defines the route handler for the page that lists a user's transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    budget_item::{BudgetItem, BudgetPeriod, get_budget_items},
    endpoints::{self, format_endpoint},
    entry_type::EntryType,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, delete_button,
        dollar_input_styles, entry_type_text_style,
    },
    money::format_currency,
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        TransactionSummary, UserTransaction, UserTransactions,
        form::{TransactionFormDefaults, transaction_form_fields},
        get_user_transactions,
    },
    user::{User, UserId},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the signed in user's profile, totals and transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user_transactions = get_user_transactions(&user_id, &connection).inspect_err(|error| {
        tracing::error!("could not get transactions for {user_id}: {error}")
    })?;
    let budget_items = get_budget_items(&user_id, BudgetPeriod::containing(today), &connection)
        .inspect_err(|error| {
            tracing::error!("could not get budget items for {user_id}: {error}")
        })?;

    Ok(transactions_view(&user_transactions, &budget_items, today).into_response())
}

fn transactions_view(
    user_transactions: &UserTransactions,
    budget_items: &[BudgetItem],
    today: Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let summary = TransactionSummary::from_transactions(user_transactions.iter_transactions());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                (profile_view(&user_transactions.user))

                (summary_view(&summary))

                section class=(CARD_STYLE)
                {
                    h2 class="mb-4 text-lg font-semibold" { "Add Transaction" }

                    form
                        hx-post=(endpoints::TRANSACTIONS_API)
                        hx-target-error="#alert-container"
                        class="grid gap-4 md:grid-cols-2"
                    {
                        (transaction_form_fields(
                            &TransactionFormDefaults {
                                entry_type: EntryType::Expense,
                                date: today,
                                budget_item_id: None,
                            },
                            budget_items,
                        ))

                        div class="md:col-span-2"
                        {
                            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
                        }
                    }
                }

                (transaction_list_view(&user_transactions.transactions))
            }
        }
    );

    base("Transactions", &[dollar_input_styles()], &content)
}

fn profile_view(user: &User) -> Markup {
    html!(
        header id="profile"
        {
            h1 class="text-xl font-bold"
            {
                @if let Some(name) = &user.name {
                    (name)
                } @else {
                    (user.email)
                }
            }

            @if user.name.is_some() {
                p class="text-sm text-gray-500 dark:text-gray-400" { (user.email) }
            }
        }
    )
}

fn summary_view(summary: &TransactionSummary) -> Markup {
    let net_style = if summary.net_amount.is_negative() {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html!(
        section id="summary" class="grid gap-4 md:grid-cols-3"
        {
            div class=(CARD_STYLE)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Total Income" }
                p
                    class={ "text-lg font-semibold " (entry_type_text_style(EntryType::Income)) }
                    data-summary="income"
                {
                    (format_currency(summary.total_income))
                }
            }

            div class=(CARD_STYLE)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Total Expenses" }
                p
                    class={ "text-lg font-semibold " (entry_type_text_style(EntryType::Expense)) }
                    data-summary="expenses"
                {
                    (format_currency(summary.total_expenses))
                }
            }

            div class=(CARD_STYLE)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Net Amount" }
                p class={ "text-lg font-semibold " (net_style) } data-summary="net"
                {
                    (format_currency(summary.net_amount))
                }
            }
        }
    )
}

fn transaction_list_view(transactions: &[UserTransaction]) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 id="transactions-heading" class="mb-4 text-lg font-semibold"
            {
                "Recent Transactions (" (transactions.len()) ")"
            }

            @if transactions.is_empty() {
                p id="no-transactions" class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "No transactions yet. Add your first transaction above."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for user_transaction in transactions {
                        (transaction_row_view(user_transaction))
                    }
                }
            }
        }
    )
}

fn transaction_row_view(user_transaction: &UserTransaction) -> Markup {
    let transaction = &user_transaction.transaction;
    let sign = match transaction.entry_type {
        EntryType::Income => "+",
        EntryType::Expense => "-",
    };

    html!(
        li class="flex items-center justify-between gap-4 py-3" data-transaction-id=(transaction.id)
        {
            div
            {
                p class="font-medium" { (transaction.description) }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    time datetime=(transaction.date) { (transaction.date) }

                    @if let Some(budget_item) = &user_transaction.budget_item {
                        " · "
                        span data-budget-item
                        {
                            (budget_item.category_name) " → " (budget_item.name)
                        }
                    }
                }
            }

            div class="flex items-center gap-4"
            {
                span class={ "font-semibold " (entry_type_text_style(transaction.entry_type)) }
                {
                    (sign) (format_currency(transaction.amount))
                }

                (delete_button(
                    &format_endpoint(endpoints::TRANSACTION, transaction.id),
                    &format!(
                        "Are you sure you want to delete the transaction '{}'?",
                        transaction.description
                    ),
                    "closest li",
                ))
            }
        }
    )
}
