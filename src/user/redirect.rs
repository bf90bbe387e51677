//! Builds the sign-in URLs that send users back to where they started.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

/// Only same-site paths may be used as a redirect target, and never the
/// sign-in page itself.
fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::SIGN_IN_VIEW
}

/// Strip any scheme and host from `raw_url` and check that the remaining path
/// is safe to redirect to.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// The sign-in page URL for an unauthenticated `request`.
///
/// Page requests return to the requested page. htmx requests to `/api`
/// return to the page that made the request (`HX-Current-URL`). Falls back to
/// the budget page when no safe target can be found.
pub fn build_sign_in_redirect_url(request: &Request) -> String {
    let redirect_target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)
    } else {
        request
            .uri()
            .path_and_query()
            .and_then(|path_and_query| normalize_redirect_url(path_and_query.as_str()))
    };

    let redirect_target = redirect_target.unwrap_or_else(|| {
        tracing::warn!("No valid redirect target in request. Falling back to budget page.");
        endpoints::BUDGET_VIEW.to_owned()
    });

    sign_in_url_with_target(endpoints::SIGN_IN_VIEW, "redirect_url", &redirect_target)
}

/// Append `redirect_target` to `sign_in_url` as the query parameter `param`.
///
/// Keeps any query string already on `sign_in_url`.
pub fn sign_in_url_with_target(sign_in_url: &str, param: &str, redirect_target: &str) -> String {
    match serde_urlencoded::to_string([(param, redirect_target)]) {
        Ok(query) => {
            let separator = if sign_in_url.contains('?') { '&' } else { '?' };
            format!("{sign_in_url}{separator}{query}")
        }
        Err(error) => {
            tracing::error!("Could not encode redirect URL {redirect_target}: {error}");
            sign_in_url.to_owned()
        }
    }
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let current_url = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())?;

    let redirect_url = normalize_redirect_url(current_url);
    if redirect_url.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}
