//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element of the base page
//! by htmx when an API request fails.

use axum::response::Html;
use maud::{Markup, html};

/// An alert message with a title and some details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The request succeeded.
    Success { message: String, details: String },
    /// The request failed.
    Error { message: String, details: String },
}

impl Alert {
    fn view(&self) -> Markup {
        let (message, details, container_style, icon) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "text-green-800 border-green-300 bg-green-50 dark:bg-gray-800 \
                dark:text-green-400 dark:border-green-800",
                "✓",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800",
                "!",
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class={"flex items-start gap-3 p-4 mb-4 border rounded-lg " (container_style)}
                {
                    span class="font-bold" { (icon) }

                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto text-sm underline"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "Dismiss"
                    }
                }
            }
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.view().into_string())
    }
}
