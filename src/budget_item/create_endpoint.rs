//! Defines the endpoint for adding a budget item to a month's budget.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget_item::{
        BudgetItemName, BudgetPeriod, NewBudgetItem, budget_page::period_url, create_budget_item,
    },
    category::CategoryId,
    money::Amount,
    user::UserId,
};

/// The state needed for creating a budget item.
#[derive(Debug, Clone)]
pub struct CreateBudgetItemState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateBudgetItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Form data for creating a budget item.
#[derive(Debug, Deserialize)]
pub struct BudgetItemForm {
    pub category_id: CategoryId,
    pub name: String,
    pub planned_amount: String,
    pub month: u8,
    pub year: i32,
}

impl BudgetItemForm {
    fn parse(&self) -> Result<NewBudgetItem, Error> {
        Ok(NewBudgetItem {
            category_id: self.category_id,
            name: BudgetItemName::new(&self.name)?,
            planned_amount: Amount::parse(&self.planned_amount)?,
            period: BudgetPeriod::new(self.month, self.year)?,
        })
    }
}

/// Handle budget item creation form submission.
///
/// Redirects to the budget page for the item's month on success, otherwise
/// responds with an alert.
pub async fn create_budget_item_endpoint(
    State(state): State<CreateBudgetItemState>,
    Extension(user_id): Extension<UserId>,
    Form(form): Form<BudgetItemForm>,
) -> Response {
    let new_item = match form.parse() {
        Ok(new_item) => new_item,
        Err(error) => return error.into_alert_response(),
    };
    let period = new_item.period;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_budget_item(&user_id, new_item, &connection) {
        Ok(item) => {
            tracing::debug!("Created budget item {} for {user_id} in {period}", item.id);

            (HxRedirect(period_url(period)), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create budget item: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_budget_item_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, Form, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use rust_decimal_macros::dec;

    use crate::{
        budget_item::{
            BudgetPeriod, create_budget_item_endpoint,
            create_endpoint::{BudgetItemForm, CreateBudgetItemState},
            get_budget_items,
        },
        category::{CategoryName, create_category},
        db::initialize,
        entry_type::EntryType,
        money::Amount,
        test_utils::assert_hx_redirect,
        user::{ExternalIdentity, UserId, sync_user},
    };

    fn get_state() -> (CreateBudgetItemState, UserId) {
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
            CreateBudgetItemState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user_id,
        )
    }

    fn form(category_id: i64, name: &str, planned_amount: &str) -> Form<BudgetItemForm> {
        Form(BudgetItemForm {
            category_id,
            name: name.to_owned(),
            planned_amount: planned_amount.to_owned(),
            month: 1,
            year: 2025,
        })
    }

    #[tokio::test]
    async fn creates_budget_item() {
        let (state, user_id) = get_state();
        let category = create_category(
            &user_id,
            CategoryName::new_unchecked("Housing"),
            EntryType::Expense,
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = create_budget_item_endpoint(
            State(state.clone()),
            Extension(user_id.clone()),
            form(category.id, "Rent", "1200"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/budget?month=1&year=2025");

        let items = get_budget_items(
            &user_id,
            BudgetPeriod::new(1, 2025).unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.as_ref(), "Rent");
        assert_eq!(items[0].planned_amount, Amount::new(dec!(1200.00)));
    }

    #[tokio::test]
    async fn rejects_invalid_amount() {
        let (state, user_id) = get_state();

        let response =
            create_budget_item_endpoint(State(state), Extension(user_id), form(1, "Rent", "abc"))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let (state, user_id) = get_state();
        let category = create_category(
            &user_id,
            CategoryName::new_unchecked("Housing"),
            EntryType::Expense,
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = create_budget_item_endpoint(
            State(state),
            Extension(user_id),
            form(category.id, "Rent", "-5"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_unknown_category() {
        let (state, user_id) = get_state();

        let response =
            create_budget_item_endpoint(State(state), Extension(user_id), form(42, "Rent", "10"))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
