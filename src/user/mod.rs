//! Users are owned by an external identity provider and mirrored locally so
//! that categories, budget items and transactions can reference them.

mod core;
mod identity;
mod middleware;
mod redirect;
mod sign_in;
mod sync;

pub use core::{User, UserId, count_users, create_user_table, get_user_by_id};
pub use identity::{EMAIL_HEADER, IDENTITY_HEADERS, USER_ID_HEADER, identity_from_headers};
pub use middleware::{identity_guard, identity_guard_hx};
pub use sign_in::get_sign_in_page;
pub use sync::{ExternalIdentity, sync_user};
