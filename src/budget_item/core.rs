//! Budget item model and database operations.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    budget_item::BudgetPeriod,
    category::{CategoryId, get_category},
    database_id::DatabaseId,
    db::timestamp_now,
    money::Amount,
    text::validate_text,
    user::UserId,
};

/// Database identifier for a budget item.
pub type BudgetItemId = DatabaseId;

/// The maximum number of characters in a budget item name.
pub const MAX_BUDGET_ITEM_NAME_LENGTH: usize = 255;

/// A validated, non-empty budget item name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct BudgetItemName(String);

impl BudgetItemName {
    /// Create a budget item name.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyName] if `name` is blank or [Error::TextTooLong]
    /// if it is too long.
    pub fn new(name: &str) -> Result<Self, Error> {
        validate_text(name, "Name", MAX_BUDGET_ITEM_NAME_LENGTH, Error::EmptyName).map(Self)
    }

    /// Create a budget item name without validation.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for BudgetItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for BudgetItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A planned amount for one line of a monthly budget, e.g. "Rent" in
/// January 2025.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetItem {
    /// The ID of the budget item.
    pub id: BudgetItemId,
    /// The user that planned the item.
    pub user_id: UserId,
    /// The category the item is grouped under.
    pub category_id: CategoryId,
    /// The name of the item, e.g. "Rent".
    pub name: BudgetItemName,
    /// How much the user expects to earn or spend, zero or more.
    pub planned_amount: Amount,
    /// The month the item is planned for.
    pub period: BudgetPeriod,
    /// When the item was created.
    pub created_at: OffsetDateTime,
    /// When the item was last changed.
    pub updated_at: OffsetDateTime,
}

/// The user supplied fields for a new budget item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudgetItem {
    /// The category to add the item to. Must belong to the same user.
    pub category_id: CategoryId,
    /// The name of the item.
    pub name: BudgetItemName,
    /// The planned amount, zero or more.
    pub planned_amount: Amount,
    /// The month to plan the item for.
    pub period: BudgetPeriod,
}

/// Create the budget items table and its indexes.
///
/// # Errors
///
/// Returns an error if the table could not be created.
pub fn create_budget_item_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget_items (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            planned_amount TEXT NOT NULL DEFAULT '0.00',
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
            year INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_budget_items_user_period
            ON budget_items(user_id, year, month);
        CREATE INDEX IF NOT EXISTS idx_budget_items_category_id ON budget_items(category_id);",
    )?;

    Ok(())
}

/// Create a budget item for `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NegativeAmount] if the planned amount is less than zero,
/// - [Error::InvalidCategory] if the category does not belong to `user_id`,
/// - [Error::SqlError] if some other SQL error occurred.
pub fn create_budget_item(
    user_id: &UserId,
    new_item: NewBudgetItem,
    connection: &Connection,
) -> Result<BudgetItem, Error> {
    if new_item.planned_amount.is_negative() {
        return Err(Error::NegativeAmount);
    }

    get_category(new_item.category_id, user_id, connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidCategory,
        error => error,
    })?;

    let now = timestamp_now();

    let id = connection.query_row(
        "INSERT INTO budget_items
            (user_id, category_id, name, planned_amount, month, year, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        RETURNING id",
        (
            user_id,
            new_item.category_id,
            new_item.name.as_ref(),
            new_item.planned_amount,
            new_item.period.month_number(),
            new_item.period.year(),
            now,
        ),
        |row| row.get(0),
    )?;

    Ok(BudgetItem {
        id,
        user_id: user_id.clone(),
        category_id: new_item.category_id,
        name: new_item.name,
        planned_amount: new_item.planned_amount,
        period: new_item.period,
        created_at: now,
        updated_at: now,
    })
}

const SELECT_BUDGET_ITEM: &str = "SELECT id, user_id, category_id, name, planned_amount, month, \
    year, created_at, updated_at FROM budget_items";

/// Get the budget item with `budget_item_id` that belongs to `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the budget item does not exist or belongs to
/// another user.
pub fn get_budget_item(
    budget_item_id: BudgetItemId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<BudgetItem, Error> {
    connection
        .prepare(&format!(
            "{SELECT_BUDGET_ITEM} WHERE id = :id AND user_id = :user_id"
        ))?
        .query_row(
            rusqlite::named_params! {":id": budget_item_id, ":user_id": user_id},
            map_budget_item_row,
        )
        .map_err(|error| error.into())
}

/// Get the budget items for `user_id` in `period`, in the order they were
/// created.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_budget_items(
    user_id: &UserId,
    period: BudgetPeriod,
    connection: &Connection,
) -> Result<Vec<BudgetItem>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_BUDGET_ITEM}
            WHERE user_id = :user_id AND year = :year AND month = :month
            ORDER BY id ASC"
        ))?
        .query_map(
            rusqlite::named_params! {
                ":user_id": user_id,
                ":year": period.year(),
                ":month": period.month_number(),
            },
            map_budget_item_row,
        )?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Change the name and planned amount of a budget item.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NegativeAmount] if `planned_amount` is less than zero,
/// - [Error::UpdateMissingBudgetItem] if no budget item with
///   `budget_item_id` belongs to `user_id`.
pub fn update_budget_item(
    budget_item_id: BudgetItemId,
    user_id: &UserId,
    name: &BudgetItemName,
    planned_amount: Amount,
    connection: &Connection,
) -> Result<(), Error> {
    if planned_amount.is_negative() {
        return Err(Error::NegativeAmount);
    }

    let rows_affected = connection.execute(
        "UPDATE budget_items SET name = ?1, planned_amount = ?2, updated_at = ?3
        WHERE id = ?4 AND user_id = ?5",
        (
            name.as_ref(),
            planned_amount,
            timestamp_now(),
            budget_item_id,
            user_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingBudgetItem);
    }

    Ok(())
}

/// Delete a budget item.
///
/// Linked transactions are kept with their budget item cleared.
///
/// # Errors
///
/// Returns [Error::DeleteMissingBudgetItem] if no budget item with
/// `budget_item_id` belongs to `user_id`.
pub fn delete_budget_item(
    budget_item_id: BudgetItemId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM budget_items WHERE id = ?1 AND user_id = ?2",
        (budget_item_id, user_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBudgetItem);
    }

    Ok(())
}

fn map_budget_item_row(row: &Row) -> Result<BudgetItem, rusqlite::Error> {
    let raw_name: String = row.get(3)?;
    let month: u8 = row.get(5)?;
    let year = row.get(6)?;
    let period = BudgetPeriod::new(month, year).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Integer, Box::new(error))
    })?;

    Ok(BudgetItem {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        name: BudgetItemName::new_unchecked(&raw_name),
        planned_amount: row.get(4)?,
        period,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
