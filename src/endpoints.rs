//! The page and API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/categories/{category_id}', use [format_endpoint].

/// The root route which redirects to the budget page.
pub const ROOT: &str = "/";
/// The page for visitors that have not signed in.
pub const SIGN_IN_VIEW: &str = "/sign-in";
/// The landing page: the budget for one month.
pub const BUDGET_VIEW: &str = "/budget";
/// The page for displaying a user's transactions and their totals.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for listing and creating categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a category.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to delete a category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to create a budget item.
pub const BUDGET_ITEMS_API: &str = "/api/budget_items";
/// The route to update or delete a budget item.
pub const BUDGET_ITEM: &str = "/api/budget_items/{budget_item_id}";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/categories/{category_id}',
/// '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints::{self, format_endpoint};

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::SIGN_IN_VIEW,
            endpoints::BUDGET_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::CATEGORIES_VIEW,
            endpoints::INTERNAL_ERROR_VIEW,
            endpoints::STATIC,
            endpoints::CATEGORIES_API,
            endpoints::CATEGORY,
            endpoints::BUDGET_ITEMS_API,
            endpoints::BUDGET_ITEM,
            endpoints::TRANSACTIONS_API,
            endpoints::TRANSACTION,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::BUDGET_ITEM, 1);

        assert_eq!(formatted_path, "/api/budget_items/1");
        assert_endpoint_is_valid_uri(&formatted_path);
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 42);

        assert_eq!(formatted_path, "/hello/42/bye");
        assert_endpoint_is_valid_uri(&formatted_path);
    }
}
