use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use everybudget_rs::{open_db, reset_db};

/// A utility for dropping every table in an everybudget_rs database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database to reset.
    #[arg(long)]
    db_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);

    if !db_path.is_file() {
        eprintln!("Could not find a database at {db_path:#?}");
        exit(1);
    }

    let connection = open_db(db_path)?;
    reset_db(&connection)?;

    println!("Dropped all tables in {db_path:#?}");

    Ok(())
}
