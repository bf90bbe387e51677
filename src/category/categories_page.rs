//! Lists a user's categories and the form for creating new ones.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_categories},
    endpoints::{self, format_endpoint},
    entry_type::EntryType,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, delete_button, entry_type_radio_group,
    },
    navigation::NavBar,
    user::UserId,
};

/// The state needed for the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the user's categories grouped by type.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories(&user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories for {user_id}: {error}"))?;

    Ok(categories_view(&categories).into_response())
}

fn categories_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Categories" }

                div class="grid gap-6 md:grid-cols-2"
                {
                    @for entry_type in [EntryType::Income, EntryType::Expense] {
                        (category_list_view(entry_type, categories))
                    }
                }

                section class=(CARD_STYLE)
                {
                    h2 class="mb-4 text-lg font-semibold" { "Add Category" }
                    (new_category_form_view())
                }
            }
        }
    );

    base("Categories", &[], &content)
}

fn category_list_view(entry_type: EntryType, categories: &[Category]) -> Markup {
    let categories: Vec<&Category> = categories
        .iter()
        .filter(|category| category.entry_type == entry_type)
        .collect();

    html!(
        section class=(CARD_STYLE) data-entry-type=(entry_type.as_str())
        {
            h2 class="mb-2 text-lg font-semibold" { (entry_type.label()) }

            @if categories.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "No " (entry_type.as_str()) " categories yet."
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for category in categories {
                        li class="flex items-center justify-between py-2"
                        {
                            span { (category.name) }

                            (delete_button(
                                &format_endpoint(endpoints::CATEGORY, category.id),
                                &format!(
                                    "Are you sure you want to delete the category '{}'? \
                                    Its budget items will also be deleted.",
                                    category.name
                                ),
                                "closest li",
                            ))
                        }
                    }
                }
            }
        }
    )
}

fn new_category_form_view() -> Markup {
    html!(
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. Housing"
                    required
                    maxlength="100"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (entry_type_radio_group("new-category", EntryType::Expense))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Category" }
        }
    )
}
