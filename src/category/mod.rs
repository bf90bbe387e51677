//! Categories group a user's budget items by what the money is for, e.g.
//! "Housing" or "Salary". Every category is either income or expense.

mod categories_page;
mod core;
mod create_endpoint;
mod delete_endpoint;

pub use categories_page::get_categories_page;
pub use core::{
    Category, CategoryId, CategoryName, create_category, create_category_table, delete_category,
    get_categories, get_category,
};
pub use create_endpoint::create_category_endpoint;
pub use delete_endpoint::delete_category_endpoint;
