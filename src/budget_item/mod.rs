//! Budget items are the lines of a monthly budget, e.g. "Rent" planned at
//! $1,200.00 for January 2025. Transactions are recorded against them to track
//! the actual amount spent or earned.

mod budget_page;
mod chart;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod period;
mod summary;
mod update_endpoint;

pub use budget_page::get_budget_page;
pub use core::{
    BudgetItem, BudgetItemId, BudgetItemName, NewBudgetItem, create_budget_item,
    create_budget_item_table, delete_budget_item, get_budget_item, get_budget_items,
    update_budget_item,
};
pub use create_endpoint::create_budget_item_endpoint;
pub use delete_endpoint::delete_budget_item_endpoint;
pub use period::{BudgetPeriod, BudgetPeriodQuery};
pub use summary::{BudgetItemSummary, BudgetSummary, CategorySummary, summarize_budget};
pub use update_endpoint::update_budget_item_endpoint;
