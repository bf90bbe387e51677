//! Middleware that only lets requests with an authenticated identity through.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    user::{identity_from_headers, redirect::build_sign_in_redirect_url, sync_user},
};

/// The state needed for the identity guard.
#[derive(Debug, Clone)]
pub struct IdentityState {
    /// The database connection that users are synced into.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IdentityState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[inline]
async fn identity_guard_internal(
    state: IdentityState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
    on_error: impl Fn(Error) -> Response,
) -> Response {
    let Some(identity) = identity_from_headers(request.headers()) else {
        let sign_in_url = build_sign_in_redirect_url(&request);
        return get_redirect(&sign_in_url);
    };

    let sync_result = match state.db_connection.lock() {
        Ok(connection) => sync_user(&identity, &connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            Err(Error::DatabaseLockError)
        }
    };

    if let Err(error) = sync_result {
        tracing::error!("Could not sync user {}: {error}", identity.id);
        return on_error(error);
    }

    let (mut parts, body) = request.into_parts();
    parts.extensions.insert(identity.id);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

/// Middleware function that checks for an authenticated identity.
///
/// The user is synced into the database and their ID placed into the request
/// if the identity headers are present, otherwise a redirect to the sign-in
/// page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserId>` to receive the user ID.
pub async fn identity_guard(
    State(state): State<IdentityState>,
    request: Request,
    next: Next,
) -> Response {
    identity_guard_internal(
        state,
        request,
        next,
        |redirect_url| Redirect::to(redirect_url).into_response(),
        |error| error.into_response(),
    )
    .await
}

/// Middleware function that checks for an authenticated identity.
///
/// Same as [identity_guard], but responds with an HTMX redirect and renders
/// errors as alerts for use on `/api` routes.
pub async fn identity_guard_hx(
    State(state): State<IdentityState>,
    request: Request,
    next: Next,
) -> Response {
    identity_guard_internal(
        state,
        request,
        next,
        |redirect_url| (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response(),
        |error| error.into_alert_response(),
    )
    .await
}

#[cfg(test)]
mod identity_guard_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension, Router, middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        endpoints,
        user::{
            UserId, count_users, create_user_table, get_user_by_id,
            identity::{EMAIL_HEADER, FAMILY_NAME_HEADER, GIVEN_NAME_HEADER, USER_ID_HEADER},
            identity_guard, identity_guard_hx,
            middleware::IdentityState,
        },
    };

    async fn echo_user_id(Extension(user_id): Extension<UserId>) -> String {
        user_id.to_string()
    }

    const TEST_PROTECTED_ROUTE: &str = "/protected";
    const TEST_API_ROUTE: &str = "/api/protected";

    fn get_state() -> IdentityState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");

        IdentityState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn get_test_server(state: IdentityState) -> TestServer {
        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(echo_user_id))
            .route_layer(middleware::from_fn_with_state(state.clone(), identity_guard))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn get_test_server_hx(state: IdentityState) -> TestServer {
        let app = Router::new()
            .route(TEST_API_ROUTE, post(echo_user_id))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                identity_guard_hx,
            ))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn passes_user_id_to_handler() {
        let state = get_state();
        let server = get_test_server(state.clone());

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header(USER_ID_HEADER, "user_123")
            .add_header(EMAIL_HEADER, "john@example.com")
            .add_header(GIVEN_NAME_HEADER, "John")
            .add_header(FAMILY_NAME_HEADER, "Doe")
            .await;

        response.assert_status_ok();
        response.assert_text("user_123");
        let user = get_user_by_id(
            &UserId::new("user_123"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Want user to be synced");
        assert_eq!(user.name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn repeated_requests_sync_user_once() {
        let state = get_state();
        let server = get_test_server(state.clone());

        for _ in 0..3 {
            server
                .get(TEST_PROTECTED_ROUTE)
                .add_header(USER_ID_HEADER, "user_123")
                .add_header(EMAIL_HEADER, "john@example.com")
                .await
                .assert_status_ok();
        }

        assert_eq!(count_users(&state.db_connection.lock().unwrap()), Ok(1));
    }

    #[tokio::test]
    async fn missing_identity_redirects_to_sign_in() {
        let state = get_state();
        let server = get_test_server(state.clone());

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status_see_other();
        let expected_query =
            serde_urlencoded::to_string([("redirect_url", TEST_PROTECTED_ROUTE)]).unwrap();
        let expected_location = format!("{}?{}", endpoints::SIGN_IN_VIEW, expected_query);
        assert_eq!(response.header("location"), expected_location);
        assert_eq!(count_users(&state.db_connection.lock().unwrap()), Ok(0));
    }

    #[tokio::test]
    async fn email_conflict_renders_error_page() {
        let state = get_state();
        let server = get_test_server(state.clone());
        server
            .get(TEST_PROTECTED_ROUTE)
            .add_header(USER_ID_HEADER, "user_123")
            .add_header(EMAIL_HEADER, "john@example.com")
            .await
            .assert_status_ok();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header(USER_ID_HEADER, "user_456")
            .add_header(EMAIL_HEADER, "john@example.com")
            .await;

        response.assert_status_internal_server_error();
    }

    #[tokio::test]
    async fn api_route_uses_hx_current_url_for_redirect() {
        let server = get_test_server_hx(get_state());
        let current_url = "/budget?month=1&year=2025";

        let response = server
            .post(TEST_API_ROUTE)
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", current_url)
            .await;

        response.assert_status_ok();
        let expected_query = serde_urlencoded::to_string([("redirect_url", current_url)]).unwrap();
        let expected_location = format!("{}?{}", endpoints::SIGN_IN_VIEW, expected_query);
        assert_eq!(response.header("hx-redirect"), expected_location);
    }
}
