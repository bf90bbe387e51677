//! The state shared by every request handler.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::get_local_offset};

/// Configuration and the database connection for the web server.
///
/// Handlers do not take the whole state. Each page or endpoint declares its
/// own state struct and implements `FromRef<AppState>` for it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The canonical name of the timezone used to work out the current
    /// budget period, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The URL of the identity provider's sign-in page.
    pub sign_in_url: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create the app state and make sure the database has every table.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
    /// canonical timezone name, or an SQL error if the database cannot be
    /// initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        sign_in_url: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            sign_in_url: sign_in_url.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
