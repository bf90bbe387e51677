//! Category model and database operations.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, database_id::DatabaseId, db::timestamp_now, entry_type::EntryType,
    text::validate_text, user::UserId,
};

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// The maximum number of characters in a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyName] if `name` is blank or [Error::TextTooLong]
    /// if it has more than [MAX_CATEGORY_NAME_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        validate_text(name, "Name", MAX_CATEGORY_NAME_LENGTH, Error::EmptyName).map(Self)
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user defined grouping of budget items, e.g. "Housing".
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The user that owns the category.
    pub user_id: UserId,
    /// The name of the category.
    pub name: CategoryName,
    /// Whether the category holds income or expenses.
    pub entry_type: EntryType,
    /// When the category was created.
    pub created_at: OffsetDateTime,
}

/// Create the categories table.
///
/// # Errors
///
/// Returns an error if the table could not be created.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_categories_user_id ON categories(user_id);",
    )?;

    Ok(())
}

/// Create a category for `user_id`.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if `user_id` does not refer to a user, or
/// [Error::SqlError] if some other SQL error occurred.
pub fn create_category(
    user_id: &UserId,
    name: CategoryName,
    entry_type: EntryType,
    connection: &Connection,
) -> Result<Category, Error> {
    let created_at = timestamp_now();

    let id = connection
        .query_row(
            "INSERT INTO categories (user_id, name, type, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id",
            (user_id, name.as_ref(), entry_type, created_at),
            |row| row.get(0),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Error::UserNotFound
            }
            error => error.into(),
        })?;

    Ok(Category {
        id,
        user_id: user_id.clone(),
        name,
        entry_type,
        created_at,
    })
}

/// Get the category with `category_id` that belongs to `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category does not exist or belongs to
/// another user.
pub fn get_category(
    category_id: CategoryId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, type, created_at FROM categories
            WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            rusqlite::named_params! {":id": category_id, ":user_id": user_id},
            map_category_row,
        )
        .map_err(|error| error.into())
}

/// Get all of the categories for `user_id`, income categories first and then
/// sorted by name.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_categories(user_id: &UserId, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, type, created_at FROM categories
            WHERE user_id = :user_id
            ORDER BY type DESC, name ASC, id ASC",
        )?
        .query_map(&[(":user_id", user_id)], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete a category and, through the foreign key, its budget items.
///
/// Transactions linked to those budget items are kept and become orphaned.
///
/// # Errors
///
/// Returns [Error::DeleteMissingCategory] if no category with `category_id`
/// belongs to `user_id`.
pub fn delete_category(
    category_id: CategoryId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM categories WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

pub(crate) fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let raw_name: String = row.get(2)?;

    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: CategoryName::new_unchecked(&raw_name),
        entry_type: row.get(3)?,
        created_at: row.get(4)?,
    })
}
