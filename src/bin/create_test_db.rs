use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use fintrack_rs::{
    PasswordHash, Transaction, Username, ValidatedPassword, create_budget_entry,
    create_transaction, create_user, initialize_db, parse_email,
};

/// A utility for creating a test database for the fintrack_rs web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_TRANSACTIONS: [(&str, f64, &str, &str, &str); 8] = [
    ("test", 54.20, "Weekly groceries", "Groceries", "Visa"),
    ("test", 12.50, "Lunch with friends", "Eating out", "Visa"),
    ("alex", 89.99, "Power bill", "Utilities", "Mastercard"),
    ("test", 4.80, "Coffee", "Eating out", "Debit"),
    ("alex", 35.00, "Petrol", "Transport", "Mastercard"),
    ("test", 120.00, "New shoes", "Clothing", "Visa"),
    ("alex", 23.40, "Takeaways", "Eating out", "Debit"),
    ("test", -15.00, "Refund for returned shirt", "Clothing", "Visa"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test users...");

    for (username, email) in [("test", "test@example.com"), ("alex", "alex@example.com")] {
        let password_hash = PasswordHash::new(
            ValidatedPassword::new_unchecked("test"),
            PasswordHash::DEFAULT_COST,
        )?;

        create_user(
            Username::new(username)?,
            parse_email(email)?,
            password_hash,
            &conn,
        )?;
    }

    println!("Adding budget entries and transactions...");

    let today = OffsetDateTime::now_utc().date();

    create_budget_entry(500.0, today - Duration::days(30), &conn)?;
    create_budget_entry(250.0, today - Duration::days(14), &conn)?;

    for (index, (owner, amount, description, category, card_name)) in
        SAMPLE_TRANSACTIONS.into_iter().enumerate()
    {
        let days_ago = (SAMPLE_TRANSACTIONS.len() - index) as i64;
        create_transaction(
            owner,
            Transaction::build(amount, today - Duration::days(days_ago), description)
                .category(category)
                .card_name(card_name),
            &conn,
        )?;
    }

    println!("Success! Log in with test@example.com or alex@example.com and the password 'test'.");

    Ok(())
}
