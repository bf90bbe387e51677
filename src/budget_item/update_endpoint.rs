//! Defines the endpoint for changing a budget item's name and planned amount.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    budget_item::{BudgetItemId, BudgetItemName, update_budget_item},
    money::Amount,
    user::UserId,
};

/// The state needed to update a budget item.
#[derive(Debug, Clone)]
pub struct UpdateBudgetItemState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateBudgetItemState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Form data for updating a budget item.
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetItemForm {
    pub name: String,
    pub planned_amount: String,
}

/// A route handler for updating a budget item, responds with an alert.
pub async fn update_budget_item_endpoint(
    State(state): State<UpdateBudgetItemState>,
    Extension(user_id): Extension<UserId>,
    Path(budget_item_id): Path<BudgetItemId>,
    Form(form): Form<UpdateBudgetItemForm>,
) -> Response {
    let name = match BudgetItemName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };
    let planned_amount = match Amount::parse(&form.planned_amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_budget_item(budget_item_id, &user_id, &name, planned_amount, &connection) {
        Ok(()) => Alert::Success {
            message: "Budget item saved".to_owned(),
            details: format!("'{name}' is now planned at {planned_amount}."),
        }
        .into_html()
        .into_response(),
        Err(error) => {
            tracing::error!("Could not update budget item {budget_item_id}: {error}");
            error.into_alert_response()
        }
    }
}
