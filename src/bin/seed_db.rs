use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rust_decimal_macros::dec;
use time::macros::date;

use everybudget_rs::{
    Amount, BudgetItemName, BudgetPeriod, CategoryName, EntryType, ExternalIdentity,
    NewBudgetItem, Transaction, UserId, create_budget_item, create_category, create_transaction,
    initialize_db, open_db, sync_user,
};

/// A utility for creating a database with demo data for the everybudget_rs server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long)]
    db_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);

    match db_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if db_path.is_file() {
        eprintln!("File already exists at {db_path:#?}!");
        exit(1);
    }

    println!("Creating database at {db_path:#?}");
    let connection = open_db(db_path)?;
    initialize_db(&connection)?;

    println!("Creating demo user...");
    let user_id = UserId::new("user_123");
    sync_user(
        &ExternalIdentity {
            id: user_id.clone(),
            email: Some("john@example.com".to_owned()),
            first_name: Some("John".to_owned()),
            last_name: Some("Doe".to_owned()),
        },
        &connection,
    )?;

    println!("Creating categories and budget items for January 2025...");
    let january = BudgetPeriod::new(1, 2025)?;
    let plan = [
        (
            "Salary",
            EntryType::Income,
            vec![("Monthly Salary", dec!(5000.00))],
        ),
        (
            "Side Hustle",
            EntryType::Income,
            vec![("Freelance Work", dec!(800.00))],
        ),
        (
            "Housing",
            EntryType::Expense,
            vec![("Rent", dec!(1200.00)), ("Utilities", dec!(150.00))],
        ),
        (
            "Food",
            EntryType::Expense,
            vec![("Groceries", dec!(400.00)), ("Dining Out", dec!(200.00))],
        ),
        (
            "Transportation",
            EntryType::Expense,
            vec![("Gas", dec!(120.00))],
        ),
        (
            "Entertainment",
            EntryType::Expense,
            vec![("Streaming Services", dec!(45.00))],
        ),
    ];

    let mut budget_item_ids = Vec::new();

    for (category_name, entry_type, items) in plan {
        let category = create_category(
            &user_id,
            CategoryName::new(category_name)?,
            entry_type,
            &connection,
        )?;

        for (item_name, planned_amount) in items {
            let item = create_budget_item(
                &user_id,
                NewBudgetItem {
                    category_id: category.id,
                    name: BudgetItemName::new(item_name)?,
                    planned_amount: Amount::new(planned_amount),
                    period: january,
                },
                &connection,
            )?;

            budget_item_ids.push((item_name, item.id));
        }
    }

    let budget_item_id = |name: &str| {
        budget_item_ids
            .iter()
            .find(|(item_name, _)| *item_name == name)
            .map(|(_, id)| *id)
    };

    println!("Creating transactions...");
    let transactions = [
        (
            dec!(5000.00),
            "January Salary Deposit",
            date!(2025 - 01 - 01),
            EntryType::Income,
            "Monthly Salary",
        ),
        (
            dec!(400.00),
            "Website Project Payment",
            date!(2025 - 01 - 15),
            EntryType::Income,
            "Freelance Work",
        ),
        (
            dec!(1200.00),
            "January Rent Payment",
            date!(2025 - 01 - 01),
            EntryType::Expense,
            "Rent",
        ),
        (
            dec!(85.43),
            "Whole Foods",
            date!(2025 - 01 - 05),
            EntryType::Expense,
            "Groceries",
        ),
        (
            dec!(67.89),
            "Target Groceries",
            date!(2025 - 01 - 12),
            EntryType::Expense,
            "Groceries",
        ),
        (
            dec!(42.50),
            "Pizza Night",
            date!(2025 - 01 - 10),
            EntryType::Expense,
            "Dining Out",
        ),
        (
            dec!(55.00),
            "Shell Gas Station",
            date!(2025 - 01 - 08),
            EntryType::Expense,
            "Gas",
        ),
    ];

    for (amount, description, date, entry_type, item_name) in transactions {
        create_transaction(
            &user_id,
            Transaction::build(Amount::new(amount), date, description, entry_type)
                .budget_item_id(budget_item_id(item_name)),
            &connection,
        )?;
    }

    println!("Success!");

    Ok(())
}
