use rusqlite::Connection;

use crate::{
    db::initialize,
    user::{ExternalIdentity, UserId, sync_user},
};

/// An initialized in-memory database with two users, "user_123" and "user_456".
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");

    for (id, email) in [("user_123", "john@example.com"), ("user_456", "jane@example.com")] {
        sync_user(
            &ExternalIdentity {
                id: UserId::new(id),
                email: Some(email.to_owned()),
                first_name: None,
                last_name: None,
            },
            &connection,
        )
        .expect("Could not create test user");
    }

    connection
}
