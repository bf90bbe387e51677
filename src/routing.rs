//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    budget_item::{
        create_budget_item_endpoint, delete_budget_item_endpoint, get_budget_page,
        update_budget_item_endpoint,
    },
    category::{create_category_endpoint, delete_category_endpoint, get_categories_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_page,
    },
    user::{get_sign_in_page, identity_guard, identity_guard_hx},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::SIGN_IN_VIEW, get(get_sign_in_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::BUDGET_VIEW, get(get_budget_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .layer(middleware::from_fn_with_state(state.clone(), identity_guard));

    // These routes need to use the HX-REDIRECT header for sign-in redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
            .route(endpoints::CATEGORY, delete(delete_category_endpoint))
            .route(
                endpoints::BUDGET_ITEMS_API,
                post(create_budget_item_endpoint),
            )
            .route(
                endpoints::BUDGET_ITEM,
                put(update_budget_item_endpoint).delete(delete_budget_item_endpoint),
            )
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                identity_guard_hx,
            )),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the budget page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::BUDGET_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_budget() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::BUDGET_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, build_router, endpoints,
        user::{EMAIL_HEADER, USER_ID_HEADER, count_users},
    };

    fn get_test_server() -> (TestServer, AppState) {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Etc/UTC",
            "https://auth.example.com/oauth2/start",
        )
        .unwrap();

        let server = TestServer::try_new(build_router(state.clone())).unwrap();

        (server, state)
    }

    #[tokio::test]
    async fn signed_out_user_is_redirected_to_sign_in() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        assert!(
            location
                .to_str()
                .unwrap()
                .starts_with(endpoints::SIGN_IN_VIEW),
            "got location {location:?}"
        );
    }

    #[tokio::test]
    async fn sign_in_page_does_not_need_identity() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::SIGN_IN_VIEW).await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn signed_in_user_is_synced_and_sees_pages() {
        let (server, state) = get_test_server();

        for path in [
            endpoints::BUDGET_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::CATEGORIES_VIEW,
        ] {
            let response = server
                .get(path)
                .add_header(USER_ID_HEADER, "user_123")
                .add_header(EMAIL_HEADER, "john@example.com")
                .await;

            response.assert_status_ok();
        }

        assert_eq!(count_users(&state.db_connection.lock().unwrap()), Ok(1));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _) = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status_not_found();
    }
}
