//! The monthly budget page: planned and actual amounts per category.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget_item::{
        BudgetItemSummary, BudgetPeriod, BudgetPeriodQuery, BudgetSummary, CategorySummary,
        chart::{chart_head_elements, chart_view, planned_vs_actual_chart},
        get_budget_items, summarize_budget,
    },
    category::get_categories,
    endpoints::{self, format_endpoint},
    entry_type::EntryType,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, delete_button, dollar_input_styles, entry_type_text_style, link,
    },
    money::{Amount, format_currency},
    navigation::NavBar,
    timezone::local_today,
    transaction::get_budget_period_transactions,
    user::UserId,
};

/// The state needed for the budget page.
#[derive(Debug, Clone)]
pub struct BudgetPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the budget for the month in the query, or the current month.
///
/// A month outside 1-12 responds with the 404 page.
pub async fn get_budget_page(
    State(state): State<BudgetPageState>,
    Extension(user_id): Extension<UserId>,
    Query(query): Query<BudgetPeriodQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let period = query.resolve(today).map_err(|error| {
        tracing::debug!("Invalid budget period {query:?}: {error}");
        Error::NotFound
    })?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories(&user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories for {user_id}: {error}"))?;
    let items = get_budget_items(&user_id, period, &connection).inspect_err(|error| {
        tracing::error!("could not get budget items for {user_id} in {period}: {error}")
    })?;
    let transactions = get_budget_period_transactions(&user_id, period, &connection)
        .inspect_err(|error| {
            tracing::error!("could not get transactions for {user_id} in {period}: {error}")
        })?;

    let summary = summarize_budget(&categories, &items, &transactions);

    Ok(budget_view(period, &summary).into_response())
}

/// The URL of the budget page for `period`.
pub(super) fn period_url(period: BudgetPeriod) -> String {
    format!(
        "{}?month={}&year={}",
        endpoints::BUDGET_VIEW,
        period.month_number(),
        period.year()
    )
}

fn budget_view(period: BudgetPeriod, summary: &BudgetSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();
    let has_items = summary
        .categories
        .iter()
        .any(|category| !category.items.is_empty());
    let chart = planned_vs_actual_chart(summary);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                header class="flex items-center justify-between"
                {
                    a id="previous-period" href=(period_url(period.previous())) class=(LINK_STYLE)
                    {
                        "← " (period.previous())
                    }

                    h1 class="text-xl font-bold" { (period) }

                    a id="next-period" href=(period_url(period.next())) class=(LINK_STYLE)
                    {
                        (period.next()) " →"
                    }
                }

                (totals_view(summary))

                @if summary.categories.is_empty() {
                    section class=(CARD_STYLE)
                    {
                        p id="no-categories"
                        {
                            "You have no categories yet. "
                            (link(endpoints::CATEGORIES_VIEW, "Add a category"))
                            " to start planning your budget."
                        }
                    }
                } @else {
                    @if has_items {
                        section class=(CARD_STYLE) { (chart_view()) }
                    }

                    @for category in &summary.categories {
                        (category_view(category, period))
                    }
                }
            }
        }
    );

    let mut head_elements = vec![dollar_input_styles()];

    if has_items {
        head_elements.extend(chart_head_elements(&chart));
    }

    base(&period.to_string(), &head_elements, &content)
}

fn totals_view(summary: &BudgetSummary) -> Markup {
    let left_to_budget_style = if summary.left_to_budget.is_negative() {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html!(
        section id="budget-totals" class="grid gap-4 md:grid-cols-3"
        {
            div class=(CARD_STYLE)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Income" }
                p class="text-lg font-semibold" data-total="planned-income"
                {
                    (format_currency(summary.planned_income))
                }
                p class="text-sm" { "Received " (format_currency(summary.actual_income)) }
            }

            div class=(CARD_STYLE)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Expenses" }
                p class="text-lg font-semibold" data-total="planned-expenses"
                {
                    (format_currency(summary.planned_expenses))
                }
                p class="text-sm" { "Spent " (format_currency(summary.actual_expenses)) }
            }

            div class=(CARD_STYLE)
            {
                h2 class="text-sm text-gray-500 dark:text-gray-400" { "Left to Budget" }
                p
                    class={ "text-lg font-semibold " (left_to_budget_style) }
                    data-total="left-to-budget"
                {
                    (format_currency(summary.left_to_budget))
                }
            }
        }
    )
}

fn remaining_style(remaining: Amount) -> &'static str {
    if remaining.is_negative() {
        "text-red-600 dark:text-red-400"
    } else {
        ""
    }
}

fn category_view(category: &CategorySummary, period: BudgetPeriod) -> Markup {
    let entry_type = category.category.entry_type;
    let actual_header = match entry_type {
        EntryType::Income => "Received",
        EntryType::Expense => "Spent",
    };

    html!(
        section
            class=(CARD_STYLE)
            data-category-id=(category.category.id)
            data-entry-type=(entry_type.as_str())
        {
            div class="flex items-baseline justify-between mb-2"
            {
                h2 class={ "text-lg font-semibold " (entry_type_text_style(entry_type)) }
                {
                    (category.category.name)
                }

                span class="text-sm text-gray-500 dark:text-gray-400" { (entry_type.label()) }
            }

            table class="w-full text-sm text-left"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Item" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Planned" }
                        th scope="col" class=(TABLE_CELL_STYLE) { (actual_header) }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Remaining" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for item in &category.items {
                        (budget_item_row_view(item))
                    }

                    tr class="font-semibold" data-category-total
                    {
                        td class=(TABLE_CELL_STYLE) { "Total" }
                        td class=(TABLE_CELL_STYLE) { (format_currency(category.planned)) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(category.actual)) }
                        td class={ (TABLE_CELL_STYLE) " " (remaining_style(category.remaining)) }
                        {
                            (format_currency(category.remaining))
                        }
                        td class=(TABLE_CELL_STYLE) {}
                    }
                }
            }

            details class="mt-4"
            {
                summary class="cursor-pointer text-sm font-medium" { "Add Item" }
                (new_budget_item_form_view(category.category.id, period))
            }
        }
    )
}

fn budget_item_row_view(summary: &BudgetItemSummary) -> Markup {
    let item = &summary.item;
    let form_id = format!("budget-item-{}-form", item.id);
    let endpoint = format_endpoint(endpoints::BUDGET_ITEM, item.id);

    html!(
        tr class=(TABLE_ROW_STYLE) data-budget-item-id=(item.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                form
                    id=(form_id)
                    hx-put=(endpoint)
                    hx-swap="none"
                    hx-target-error="#alert-container"
                {}

                input
                    form=(form_id)
                    type="text"
                    name="name"
                    value=(item.name)
                    required
                    maxlength="255"
                    aria-label="Name"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="input-wrapper"
                {
                    input
                        form=(form_id)
                        type="number"
                        name="planned_amount"
                        value=(item.planned_amount)
                        min="0"
                        step="0.01"
                        required
                        aria-label="Planned amount"
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            td class=(TABLE_CELL_STYLE) { (format_currency(summary.actual)) }

            td class={ (TABLE_CELL_STYLE) " " (remaining_style(summary.remaining)) }
            {
                (format_currency(summary.remaining))
            }

            td class={ (TABLE_CELL_STYLE) " space-x-2 whitespace-nowrap" }
            {
                button type="submit" form=(form_id) class=(LINK_STYLE) { "Save" }

                (delete_button(
                    &endpoint,
                    &format!(
                        "Are you sure you want to delete the budget item '{}'? \
                        Its transactions will be kept without a budget item.",
                        item.name
                    ),
                    "closest tr",
                ))
            }
        }
    )
}

fn new_budget_item_form_view(category_id: i64, period: BudgetPeriod) -> Markup {
    let id_prefix = format!("new-item-{category_id}");

    html!(
        form
            hx-post=(endpoints::BUDGET_ITEMS_API)
            hx-target-error="#alert-container"
            class="grid gap-4 pt-4 md:grid-cols-3"
        {
            input type="hidden" name="category_id" value=(category_id);
            input type="hidden" name="month" value=(period.month_number());
            input type="hidden" name="year" value=(period.year());

            div
            {
                label for={ (id_prefix) "-name" } class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id={ (id_prefix) "-name" }
                    type="text"
                    name="name"
                    placeholder="e.g. Rent"
                    required
                    maxlength="255"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for={ (id_prefix) "-planned-amount" } class=(FORM_LABEL_STYLE) { "Planned" }

                div class="input-wrapper"
                {
                    input
                        id={ (id_prefix) "-planned-amount" }
                        type="number"
                        name="planned_amount"
                        placeholder="0.00"
                        min="0"
                        step="0.01"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div class="flex items-end"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Item" }
            }
        }
    )
}

#[cfg(test)]
mod budget_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        budget_item::{
            BudgetItemName, BudgetPeriod, BudgetPeriodQuery, NewBudgetItem,
            budget_page::BudgetPageState, create_budget_item, get_budget_page,
        },
        category::{CategoryName, create_category},
        db::initialize,
        endpoints,
        entry_type::EntryType,
        money::Amount,
        test_utils::{
            assert_form_input, assert_hx_endpoint, assert_valid_html, parse_html_document,
        },
        transaction::{Transaction, create_transaction},
        user::{ExternalIdentity, UserId, sync_user},
    };

    fn get_state() -> (BudgetPageState, UserId) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user_id = UserId::new("user_123");
        sync_user(
            &ExternalIdentity {
                id: user_id.clone(),
                email: Some("john@example.com".to_owned()),
                first_name: None,
                last_name: None,
            },
            &connection,
        )
        .unwrap();

        (
            BudgetPageState {
                db_connection: Arc::new(Mutex::new(connection)),
                local_timezone: "Etc/UTC".to_owned(),
            },
            user_id,
        )
    }

    fn january_query() -> Query<BudgetPeriodQuery> {
        Query(BudgetPeriodQuery {
            month: Some(1),
            year: Some(2025),
        })
    }

    fn select_text(html: &Html, selector: &str) -> String {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No element matching {selector:?}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn shows_empty_state_without_categories() {
        let (state, user_id) = get_state();

        let response = get_budget_page(State(state), Extension(user_id), january_query())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(select_text(&html, "h1"), "January 2025");
        assert!(select_text(&html, "#no-categories").contains("no categories"));
    }

    #[tokio::test]
    async fn shows_planned_actual_and_remaining() {
        let (state, user_id) = get_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let food = create_category(
                &user_id,
                CategoryName::new_unchecked("Food"),
                EntryType::Expense,
                &connection,
            )
            .unwrap();
            let groceries = create_budget_item(
                &user_id,
                NewBudgetItem {
                    category_id: food.id,
                    name: BudgetItemName::new_unchecked("Groceries"),
                    planned_amount: Amount::new(dec!(400.00)),
                    period: BudgetPeriod::new(1, 2025).unwrap(),
                },
                &connection,
            )
            .unwrap();
            create_transaction(
                &user_id,
                Transaction::build(
                    Amount::new(dec!(85.43)),
                    date!(2025 - 01 - 05),
                    "Whole Foods",
                    EntryType::Expense,
                )
                .budget_item_id(Some(groceries.id)),
                &connection,
            )
            .unwrap();
        }

        let response = get_budget_page(State(state), Extension(user_id), january_query())
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "[data-total=planned-expenses]"),
            "$400.00"
        );
        assert_eq!(select_text(&html, "[data-total=left-to-budget]"), "-$400.00");

        let row = Selector::parse("tr[data-budget-item-id] td").unwrap();
        let cells: Vec<String> = html
            .select(&row)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(cells[2], "$85.43");
        assert_eq!(cells[3], "$314.57");
        assert!(
            html.select(&Selector::parse("#planned-vs-actual-chart").unwrap())
                .next()
                .is_some(),
            "Chart container missing"
        );
    }

    #[tokio::test]
    async fn has_add_item_form_for_each_category() {
        let (state, user_id) = get_state();
        let category = create_category(
            &user_id,
            CategoryName::new_unchecked("Housing"),
            EntryType::Expense,
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = get_budget_page(State(state), Extension(user_id), january_query())
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let form_selector = Selector::parse("form[hx-post]").unwrap();
        let form = html
            .select(&form_selector)
            .next()
            .expect("No add item form found");
        assert_hx_endpoint(&form, endpoints::BUDGET_ITEMS_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "planned_amount", "number");

        let hidden = Selector::parse("input[type=hidden][name=category_id]").unwrap();
        let category_input = form.select(&hidden).next().expect("No category input");
        assert_eq!(
            category_input.value().attr("value"),
            Some(category.id.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn links_to_adjacent_months() {
        let (state, user_id) = get_state();

        let response = get_budget_page(State(state), Extension(user_id), january_query())
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let previous = Selector::parse("#previous-period").unwrap();
        let next = Selector::parse("#next-period").unwrap();
        assert_eq!(
            html.select(&previous).next().unwrap().value().attr("href"),
            Some("/budget?month=12&year=2024")
        );
        assert_eq!(
            html.select(&next).next().unwrap().value().attr("href"),
            Some("/budget?month=2&year=2025")
        );
    }

    #[tokio::test]
    async fn invalid_month_is_not_found() {
        let (state, user_id) = get_state();

        let result = get_budget_page(
            State(state),
            Extension(user_id),
            Query(BudgetPeriodQuery {
                month: Some(13),
                year: Some(2025),
            }),
        )
        .await;

        assert!(matches!(result, Err(crate::Error::NotFound)));
    }

    #[tokio::test]
    async fn out_of_range_years_are_not_found() {
        for year in [i32::MIN, 0, 10_000, i32::MAX] {
            let (state, user_id) = get_state();

            let result = get_budget_page(
                State(state),
                Extension(user_id),
                Query(BudgetPeriodQuery {
                    month: Some(1),
                    year: Some(year),
                }),
            )
            .await;

            assert!(
                matches!(result, Err(crate::Error::NotFound)),
                "want year {year} to be not found"
            );
        }
    }
}
