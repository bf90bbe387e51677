//! Defines the endpoint for deleting a budget item.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    budget_item::{BudgetItemId, delete_budget_item},
    user::UserId,
};

/// The state needed to delete a budget item.
#[derive(Debug, Clone)]
pub struct DeleteBudgetItemState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a budget item, responds with an alert.
///
/// Transactions linked to the item are kept.
pub async fn delete_budget_item_endpoint(
    State(state): State<DeleteBudgetItemState>,
    Extension(user_id): Extension<UserId>,
    Path(budget_item_id): Path<BudgetItemId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_budget_item(budget_item_id, &user_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the element.
        Ok(()) => Alert::Success {
            message: "Budget item deleted".to_owned(),
            details: "Its transactions are no longer linked to a budget item.".to_owned(),
        }
        .into_html()
        .into_response(),
        Err(error) => {
            tracing::error!("Could not delete budget item {budget_item_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_budget_item_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        budget_item::{
            BudgetItemName, BudgetPeriod, NewBudgetItem, create_budget_item,
            delete_budget_item_endpoint, delete_endpoint::DeleteBudgetItemState, get_budget_item,
        },
        category::{CategoryName, create_category},
        db::initialize,
        entry_type::EntryType,
        money::Amount,
        user::{ExternalIdentity, UserId, sync_user},
    };

    fn get_state() -> (DeleteBudgetItemState, UserId) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user_id = UserId::new("user_123");
        sync_user(
            &ExternalIdentity {
                id: user_id.clone(),
                email: Some("john@example.com".to_owned()),
                first_name: None,
                last_name: None,
            },
            &connection,
        )
        .unwrap();

        (
            DeleteBudgetItemState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user_id,
        )
    }

    #[tokio::test]
    async fn deletes_budget_item() {
        let (state, user_id) = get_state();
        let item = {
            let connection = state.db_connection.lock().unwrap();
            let category = create_category(
                &user_id,
                CategoryName::new_unchecked("Transportation"),
                EntryType::Expense,
                &connection,
            )
            .unwrap();

            create_budget_item(
                &user_id,
                NewBudgetItem {
                    category_id: category.id,
                    name: BudgetItemName::new_unchecked("Gas"),
                    planned_amount: Amount::ZERO,
                    period: BudgetPeriod::new(1, 2025).unwrap(),
                },
                &connection,
            )
            .unwrap()
        };

        let response = delete_budget_item_endpoint(
            State(state.clone()),
            Extension(user_id.clone()),
            Path(item.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_budget_item(item.id, &user_id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn missing_budget_item_is_not_found() {
        let (state, user_id) = get_state();

        let response =
            delete_budget_item_endpoint(State(state), Extension(user_id), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
