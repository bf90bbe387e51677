//! The page shown to visitors that have not signed in.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, endpoints,
    html::{BUTTON_PRIMARY_STYLE, base},
    user::redirect::{normalize_redirect_url, sign_in_url_with_target},
};

/// The query parameter the identity proxy reads the post sign-in target from.
const PROVIDER_REDIRECT_PARAM: &str = "rd";

/// The state needed for the sign-in page.
#[derive(Debug, Clone)]
pub struct SignInState {
    /// The identity provider's sign-in URL.
    pub sign_in_url: String,
}

impl FromRef<AppState> for SignInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sign_in_url: state.sign_in_url.clone(),
        }
    }
}

/// The query parameters for the sign-in page.
#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    /// Where to send the user after they sign in.
    pub redirect_url: Option<String>,
}

/// Render the sign-in page.
pub async fn get_sign_in_page(
    State(state): State<SignInState>,
    Query(query): Query<SignInQuery>,
) -> Response {
    let redirect_target = query
        .redirect_url
        .as_deref()
        .and_then(normalize_redirect_url)
        .unwrap_or_else(|| endpoints::BUDGET_VIEW.to_owned());
    let provider_url =
        sign_in_url_with_target(&state.sign_in_url, PROVIDER_REDIRECT_PARAM, &redirect_target);

    sign_in_view(&provider_url).into_response()
}

fn sign_in_view(provider_url: &str) -> Markup {
    let content = html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto min-h-screen"
        {
            a href="#" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                img class="w-8 h-8 mr-2" src="/static/favicon-128x128.png" alt="logo";
                "EveryBudget"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        "Welcome to EveryBudget"
                    }

                    p class="text-gray-600 dark:text-gray-300"
                    {
                        "Give every dollar a job. Sign in to plan your monthly budget and track your spending."
                    }

                    a
                        id="sign-in-link"
                        href=(provider_url)
                        class={"block text-center " (BUTTON_PRIMARY_STYLE)}
                    {
                        "Sign in"
                    }
                }
            }
        }
    };

    base("Sign In", &[], &content)
}
