//! Mirrors users from the external identity provider into the local database.

use rusqlite::Connection;

use crate::{Error, db::timestamp_now, user::UserId};

/// The domain used for placeholder email addresses.
///
/// `.invalid` is reserved and can never be a real mailbox.
const PLACEHOLDER_EMAIL_DOMAIN: &str = "identity.invalid";

/// The authenticated user as described by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    /// The stable user ID issued by the identity provider.
    pub id: UserId,
    /// The user's primary email address, if they have one.
    pub email: Option<String>,
    /// The user's given name.
    pub first_name: Option<String>,
    /// The user's family name.
    pub last_name: Option<String>,
}

impl ExternalIdentity {
    /// The name to store for the user.
    ///
    /// Joins the non-empty name parts with a space, e.g. "John Doe". Returns
    /// `None` if neither part is present.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// The email to store for the user.
    ///
    /// The users table requires an email, so identities without one get a
    /// placeholder derived from their ID.
    pub fn email_or_placeholder(&self) -> String {
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => email.to_owned(),
            _ => format!("{}@{PLACEHOLDER_EMAIL_DOMAIN}", self.id),
        }
    }
}

/// Make sure the user described by `identity` exists in the database.
///
/// Existing users are left untouched, their stored email and name are not
/// refreshed. The check and the insert happen in a single statement, so two
/// requests racing to sync the same new user both succeed and only one row is
/// created.
///
/// Returns `true` if a new user was created.
///
/// # Errors
///
/// This function will return a:
/// - [Error::DuplicateEmail] if a different user already has the email,
/// - [Error::SqlError] if there was some other SQL error.
pub fn sync_user(identity: &ExternalIdentity, connection: &Connection) -> Result<bool, Error> {
    let rows_inserted = connection.execute(
        "INSERT INTO users (id, email, name, created_at) VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT DO NOTHING",
        (
            &identity.id,
            identity.email_or_placeholder(),
            identity.display_name(),
            timestamp_now(),
        ),
    )?;

    if rows_inserted == 1 {
        tracing::info!("Created local record for user {}", identity.id);
        return Ok(true);
    }

    // Nothing was inserted: either the user already exists or another user
    // owns the email address.
    let user_exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        (&identity.id,),
        |row| row.get(0),
    )?;

    if user_exists {
        Ok(false)
    } else {
        tracing::warn!(
            "Could not sync user {}: email address belongs to another user",
            identity.id
        );
        Err(Error::DuplicateEmail)
    }
}
