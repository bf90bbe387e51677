//! Database query for a user's profile together with all of their transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    budget_item::{BudgetItemId, BudgetItemName},
    category::CategoryName,
    transaction::{Transaction, map_transaction_row},
    user::{User, UserId, get_user_by_id},
};

/// The budget item a transaction is linked to and the name of the item's category.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedBudgetItem {
    /// The ID of the budget item.
    pub id: BudgetItemId,
    /// The name of the budget item.
    pub name: BudgetItemName,
    /// The name of the category the budget item belongs to.
    pub category_name: CategoryName,
}

/// A transaction and, unless it has been orphaned, its budget item.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTransaction {
    /// The transaction.
    pub transaction: Transaction,
    /// `None` if the transaction was never linked or its item was deleted.
    pub budget_item: Option<LinkedBudgetItem>,
}

/// A user's profile and every one of their transactions, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTransactions {
    /// The user's profile.
    pub user: User,
    /// Ordered by date, newest first, then by ID.
    pub transactions: Vec<UserTransaction>,
}

impl UserTransactions {
    /// Iterate over the transactions without their budget items.
    pub fn iter_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .map(|user_transaction| &user_transaction.transaction)
    }
}

/// Get the user with `user_id` and all of their transactions.
///
/// Transactions are ordered by date, newest first, and then by ID, highest
/// first.
///
/// # Errors
/// This function will return a:
/// - [Error::UserNotFound] if there is no user with `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_user_transactions(
    user_id: &UserId,
    connection: &Connection,
) -> Result<UserTransactions, Error> {
    let user = get_user_by_id(user_id, connection)?;

    let transactions = connection
        .prepare(
            "SELECT t.id, t.user_id, t.budget_item_id, t.amount, t.description, t.date, t.type,
                t.created_at, b.id, b.name, c.name
            FROM transactions t
            LEFT JOIN budget_items b ON b.id = t.budget_item_id
            LEFT JOIN categories c ON c.id = b.category_id
            WHERE t.user_id = :user_id
            ORDER BY t.date DESC, t.id DESC",
        )?
        .query_map(
            rusqlite::named_params! {":user_id": user_id},
            map_user_transaction_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UserTransactions { user, transactions })
}

fn map_user_transaction_row(row: &Row) -> Result<UserTransaction, rusqlite::Error> {
    let transaction = map_transaction_row(row)?;

    let budget_item_id: Option<BudgetItemId> = row.get(8)?;
    let budget_item_name: Option<String> = row.get(9)?;
    let category_name: Option<String> = row.get(10)?;

    let budget_item = match (budget_item_id, budget_item_name, category_name) {
        (Some(id), Some(name), Some(category_name)) => Some(LinkedBudgetItem {
            id,
            name: BudgetItemName::new_unchecked(&name),
            category_name: CategoryName::new_unchecked(&category_name),
        }),
        _ => None,
    };

    Ok(UserTransaction {
        transaction,
        budget_item,
    })
}

#[cfg(test)]
mod get_user_transactions_tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        budget_item::{
            BudgetItemName, BudgetPeriod, NewBudgetItem, create_budget_item, delete_budget_item,
        },
        category::{CategoryName, create_category},
        db::initialize,
        entry_type::EntryType,
        money::Amount,
        transaction::{Transaction, create_transaction, get_user_transactions},
        user::{ExternalIdentity, UserId, sync_user},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        sync_user(
            &ExternalIdentity {
                id: UserId::new("user_123"),
                email: Some("john@example.com".to_owned()),
                first_name: Some("John".to_owned()),
                last_name: Some("Doe".to_owned()),
            },
            &connection,
        )
        .unwrap();

        connection
    }

    #[test]
    fn unknown_user_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(
            get_user_transactions(&UserId::new("user_999"), &connection),
            Err(Error::UserNotFound)
        );
    }

    #[test]
    fn user_without_transactions_has_empty_list() {
        let connection = get_test_connection();

        let result = get_user_transactions(&UserId::new("user_123"), &connection).unwrap();

        assert_eq!(result.user.email, "john@example.com");
        assert_eq!(result.user.name.as_deref(), Some("John Doe"));
        assert!(result.transactions.is_empty());
    }

    #[test]
    fn includes_budget_item_and_category_names() {
        let connection = get_test_connection();
        let user_id = UserId::new("user_123");
        let housing = create_category(
            &user_id,
            CategoryName::new_unchecked("Housing"),
            EntryType::Expense,
            &connection,
        )
        .unwrap();
        let rent = create_budget_item(
            &user_id,
            NewBudgetItem {
                category_id: housing.id,
                name: BudgetItemName::new_unchecked("Rent"),
                planned_amount: Amount::new(dec!(1200.00)),
                period: BudgetPeriod::new(1, 2025).unwrap(),
            },
            &connection,
        )
        .unwrap();
        create_transaction(
            &user_id,
            Transaction::build(
                Amount::new(dec!(1200.00)),
                date!(2025 - 01 - 01),
                "January Rent Payment",
                EntryType::Expense,
            )
            .budget_item_id(Some(rent.id)),
            &connection,
        )
        .unwrap();

        let result = get_user_transactions(&user_id, &connection).unwrap();

        let linked = result.transactions[0]
            .budget_item
            .as_ref()
            .expect("Transaction should be linked to a budget item");
        assert_eq!(linked.id, rent.id);
        assert_eq!(linked.name.as_ref(), "Rent");
        assert_eq!(linked.category_name.as_ref(), "Housing");
    }

    #[test]
    fn orders_by_date_then_id_descending() {
        let connection = get_test_connection();
        let user_id = UserId::new("user_123");
        let create = |description: &str, date| {
            create_transaction(
                &user_id,
                Transaction::build(
                    Amount::new(dec!(10.00)),
                    date,
                    description,
                    EntryType::Expense,
                ),
                &connection,
            )
            .unwrap()
        };
        let first = create("Older", date!(2025 - 01 - 01));
        let second = create("Newer", date!(2025 - 01 - 10));
        let third = create("Same day, created later", date!(2025 - 01 - 10));

        let result = get_user_transactions(&user_id, &connection).unwrap();

        let ids: Vec<i64> = result
            .transactions
            .iter()
            .map(|user_transaction| user_transaction.transaction.id)
            .collect();
        assert_eq!(ids, [third.id, second.id, first.id]);
    }

    #[test]
    fn orphaned_transaction_has_no_budget_item() {
        let connection = get_test_connection();
        let user_id = UserId::new("user_123");
        let food = create_category(
            &user_id,
            CategoryName::new_unchecked("Food"),
            EntryType::Expense,
            &connection,
        )
        .unwrap();
        let dining_out = create_budget_item(
            &user_id,
            NewBudgetItem {
                category_id: food.id,
                name: BudgetItemName::new_unchecked("Dining Out"),
                planned_amount: Amount::new(dec!(200.00)),
                period: BudgetPeriod::new(1, 2025).unwrap(),
            },
            &connection,
        )
        .unwrap();
        create_transaction(
            &user_id,
            Transaction::build(
                Amount::new(dec!(42.50)),
                date!(2025 - 01 - 10),
                "Pizza Night",
                EntryType::Expense,
            )
            .budget_item_id(Some(dining_out.id)),
            &connection,
        )
        .unwrap();
        delete_budget_item(dining_out.id, &user_id, &connection).unwrap();

        let result = get_user_transactions(&user_id, &connection).unwrap();

        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].budget_item, None);
        assert_eq!(result.transactions[0].transaction.budget_item_id, None);
    }

    #[test]
    fn excludes_other_users_transactions() {
        let connection = get_test_connection();
        sync_user(
            &ExternalIdentity {
                id: UserId::new("user_456"),
                email: Some("jane@example.com".to_owned()),
                first_name: None,
                last_name: None,
            },
            &connection,
        )
        .unwrap();
        create_transaction(
            &UserId::new("user_456"),
            Transaction::build(
                Amount::new(dec!(10.00)),
                date!(2025 - 01 - 01),
                "Jane's coffee",
                EntryType::Expense,
            ),
            &connection,
        )
        .unwrap();

        let result = get_user_transactions(&UserId::new("user_123"), &connection).unwrap();

        assert!(result.transactions.is_empty());
    }
}
