//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, entry_type::EntryType, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested user has no record in the database.
    ///
    /// This is distinct from a user that exists but has no transactions,
    /// which is not an error.
    #[error("the user could not be found")]
    UserNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Another user already has this email address.
    #[error("the email address is already used by another user")]
    DuplicateEmail,

    /// The category ID does not refer to a category owned by the user.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// The budget item ID does not refer to a budget item owned by the user.
    #[error("the budget item ID does not refer to a valid budget item")]
    InvalidBudgetItem,

    /// A transaction was linked to a budget item whose category has a different type.
    #[error("{transaction} transactions cannot be added to {category} budget items")]
    EntryTypeMismatch {
        /// The type of the transaction.
        transaction: EntryType,
        /// The type of the budget item's category.
        category: EntryType,
    },

    /// An empty string was used as a name.
    #[error("Name cannot be empty")]
    EmptyName,

    /// An empty string was used as a transaction description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// Text was longer than its column allows.
    #[error("{field} must be at most {max} characters long")]
    TextTooLong {
        /// The name of the field, for displaying to the user.
        field: &'static str,
        /// The maximum number of characters.
        max: usize,
    },

    /// The text could not be parsed as an amount of money.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A negative amount was given where only zero or positive amounts make sense.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// A month outside of 1-12 was given.
    #[error("{0} is not a valid month")]
    InvalidMonth(u8),

    /// A year outside of the supported range was given.
    #[error("{0} is not a supported year")]
    InvalidYear(i32),

    /// Text other than "income" or "expense" was used as an entry type.
    #[error("\"{0}\" is not a valid type, expected \"income\" or \"expense\"")]
    InvalidEntryType(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a budget item that does not exist
    #[error("tried to update a budget item that is not in the database")]
    UpdateMissingBudgetItem,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to delete a budget item that does not exist
    #[error("tried to delete a budget item that is not in the database")]
    DeleteMissingBudgetItem,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error, including an unreachable database.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && desc.ends_with("users.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UserNotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::EmptyName
            | Error::EmptyDescription
            | Error::TextTooLong { .. }
            | Error::InvalidAmount(_)
            | Error::NegativeAmount
            | Error::InvalidMonth(_)
            | Error::InvalidYear(_)
            | Error::InvalidEntryType(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: self.to_string(),
                },
            ),
            Error::EntryTypeMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Mismatched transaction type".to_owned(),
                    details: format!(
                        "{}. Choose a budget item from a matching category or change the type.",
                        capitalize(&self.to_string())
                    ),
                },
            ),
            Error::InvalidCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category".to_owned(),
                    details: "The category could not be found. \
                    Try refreshing the page to see if it has been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidBudgetItem => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid budget item".to_owned(),
                    details: "The budget item could not be found. \
                    Try refreshing the page to see if it has been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingBudgetItem => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update budget item".to_owned(),
                    details: "The budget item could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete category".to_owned(),
                    details: "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted."
                        .to_owned(),
                },
            ),
            Error::DeleteMissingBudgetItem => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete budget item".to_owned(),
                    details: "The budget item could not be found. \
                    Try refreshing the page to see if the budget item has already been deleted."
                        .to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{Error, entry_type::EntryType};

    #[test]
    fn maps_no_rows_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn maps_duplicate_email_to_constraint_violation() {
        let connection = rusqlite::Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "CREATE TABLE users (id TEXT PRIMARY KEY, email TEXT NOT NULL UNIQUE);
                INSERT INTO users (id, email) VALUES ('a', 'foo@example.com');",
            )
            .unwrap();

        let error = connection
            .execute(
                "INSERT INTO users (id, email) VALUES ('b', 'foo@example.com')",
                (),
            )
            .unwrap_err();

        assert_eq!(Error::from(error), Error::DuplicateEmail);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        for error in [Error::InvalidMonth(13), Error::InvalidYear(0)] {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn mismatch_message_reads_naturally() {
        let error = Error::EntryTypeMismatch {
            transaction: EntryType::Income,
            category: EntryType::Expense,
        };

        assert_eq!(
            error.to_string(),
            "income transactions cannot be added to expense budget items"
        );
    }
}
