//! Planned versus actual totals for a budget period.

use std::collections::HashMap;

use crate::{
    budget_item::{BudgetItem, BudgetItemId},
    category::{Category, CategoryId},
    entry_type::EntryType,
    money::Amount,
    transaction::Transaction,
};

/// A budget item with the money actually spent or earned against it.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetItemSummary {
    /// The planned budget item.
    pub item: BudgetItem,
    /// The sum of the transactions linked to the item.
    pub actual: Amount,
    /// `planned - actual`, negative when the item is overspent.
    pub remaining: Amount,
}

/// The budget items for one category and their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// The category the items belong to.
    pub category: Category,
    /// The category's budget items for the period.
    pub items: Vec<BudgetItemSummary>,
    /// The sum of the items' planned amounts.
    pub planned: Amount,
    /// The sum of the items' actual amounts.
    pub actual: Amount,
    /// `planned - actual`
    pub remaining: Amount,
}

/// The planned and actual totals for a whole budget period.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    /// One entry per category, in the order the categories were given.
    pub categories: Vec<CategorySummary>,
    /// Planned amounts summed over the income categories.
    pub planned_income: Amount,
    /// Planned amounts summed over the expense categories.
    pub planned_expenses: Amount,
    /// Linked transactions summed over the income categories.
    pub actual_income: Amount,
    /// Linked transactions summed over the expense categories.
    pub actual_expenses: Amount,
    /// Planned income that has not been assigned to an expense yet.
    pub left_to_budget: Amount,
}

/// Group `items` by category and add up the `transactions` linked to each
/// item.
///
/// Items whose category is not in `categories` and transactions that are not
/// linked to one of `items` are ignored.
pub fn summarize_budget(
    categories: &[Category],
    items: &[BudgetItem],
    transactions: &[Transaction],
) -> BudgetSummary {
    let mut actual_by_item: HashMap<BudgetItemId, Amount> = HashMap::new();

    for transaction in transactions {
        if let Some(budget_item_id) = transaction.budget_item_id {
            let actual = actual_by_item.entry(budget_item_id).or_insert(Amount::ZERO);
            *actual = *actual + transaction.amount;
        }
    }

    let mut items_by_category: HashMap<CategoryId, Vec<BudgetItemSummary>> = HashMap::new();

    for item in items {
        let actual = actual_by_item
            .get(&item.id)
            .copied()
            .unwrap_or(Amount::ZERO);

        items_by_category
            .entry(item.category_id)
            .or_default()
            .push(BudgetItemSummary {
                item: item.clone(),
                actual,
                remaining: item.planned_amount - actual,
            });
    }

    let category_summaries: Vec<CategorySummary> = categories
        .iter()
        .map(|category| {
            let items = items_by_category.remove(&category.id).unwrap_or_default();
            let planned: Amount = items.iter().map(|summary| summary.item.planned_amount).sum();
            let actual: Amount = items.iter().map(|summary| summary.actual).sum();

            CategorySummary {
                category: category.clone(),
                items,
                planned,
                actual,
                remaining: planned - actual,
            }
        })
        .collect();

    let total = |entry_type: EntryType, pick: fn(&CategorySummary) -> Amount| -> Amount {
        category_summaries
            .iter()
            .filter(|summary| summary.category.entry_type == entry_type)
            .map(pick)
            .sum()
    };

    let planned_income = total(EntryType::Income, |summary| summary.planned);
    let planned_expenses = total(EntryType::Expense, |summary| summary.planned);
    let actual_income = total(EntryType::Income, |summary| summary.actual);
    let actual_expenses = total(EntryType::Expense, |summary| summary.actual);

    BudgetSummary {
        planned_income,
        planned_expenses,
        actual_income,
        actual_expenses,
        left_to_budget: planned_income - planned_expenses,
        categories: category_summaries,
    }
}
