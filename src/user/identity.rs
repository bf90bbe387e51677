//! Reads the authenticated identity from the headers set by the identity proxy.

use axum::http::HeaderMap;

use crate::user::{ExternalIdentity, UserId};

/// The header holding the identity provider's user ID.
pub const USER_ID_HEADER: &str = "x-forwarded-user";
/// The header holding the user's primary email address.
pub const EMAIL_HEADER: &str = "x-forwarded-email";
/// The header holding the user's given name.
pub const GIVEN_NAME_HEADER: &str = "x-forwarded-given-name";
/// The header holding the user's family name.
pub const FAMILY_NAME_HEADER: &str = "x-forwarded-family-name";

/// All the headers that describe the authenticated user.
pub const IDENTITY_HEADERS: [&str; 4] = [
    USER_ID_HEADER,
    EMAIL_HEADER,
    GIVEN_NAME_HEADER,
    FAMILY_NAME_HEADER,
];

/// Build the external identity from the request headers.
///
/// Returns `None` if the user ID header is missing, empty or not valid
/// UTF-8, which means the request is not authenticated. The other headers
/// are optional.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<ExternalIdentity> {
    let id = header_text(headers, USER_ID_HEADER)?;

    Some(ExternalIdentity {
        id: UserId::new(id),
        email: header_text(headers, EMAIL_HEADER),
        first_name: header_text(headers, GIVEN_NAME_HEADER),
        last_name: header_text(headers, FAMILY_NAME_HEADER),
    })
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
