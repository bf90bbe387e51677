use maud::{Markup, html};
use time::Date;

use crate::{
    budget_item::{BudgetItem, BudgetItemId},
    entry_type::EntryType,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, entry_type_radio_group},
};

/// The initial values of the new transaction form.
pub struct TransactionFormDefaults {
    pub entry_type: EntryType,
    pub date: Date,
    pub budget_item_id: Option<BudgetItemId>,
}

/// The input fields of the new transaction form.
///
/// `budget_items` are offered in a select box, the empty option leaves the
/// transaction without a budget item.
pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults,
    budget_items: &[BudgetItem],
) -> Markup {
    html! {
        (entry_type_radio_group("transaction-type", defaults.entry_type))

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    min="0"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="e.g. Whole Foods"
                required
                maxlength="255"
                class=(FORM_TEXT_INPUT_STYLE);
        }

        @if !budget_items.is_empty() {
            div
            {
                label
                    for="budget_item_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Budget item"
                }

                select
                    name="budget_item_id"
                    id="budget_item_id"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "None" }

                    @for item in budget_items {
                        option
                            value=(item.id)
                            selected[Some(item.id) == defaults.budget_item_id]
                        {
                            (item.name) " (" (item.period) ")"
                        }
                    }
                }
            }
        }
    }
}
