//! Stockbook inventory command-line front end.
//!
//! Provides the `stockbook` binary with subcommands for managing the product
//! catalog, recording sales and printing reports. All business rules live in
//! `stockbook_ledger`; this binary only parses text input, checks
//! credentials and renders results.
//!
//! Exit codes: 0 = success, 1 = rejected by a business rule,
//! 2 = invalid input or failed login, 3 = storage error.

mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stockbook_core::{parse_quantity, CoreError, Product};
use stockbook_ledger::{CredentialStore, LedgerError, Stockbook, StockbookConfig};
use stockbook_storage::JsonFileStore;

const EXIT_REJECTED: i32 = 1;
const EXIT_INVALID: i32 = 2;
const EXIT_STORAGE: i32 = 3;

/// Inventory and point-of-sale ledger.
#[derive(Parser)]
#[command(name = "stockbook", about = "Inventory and point-of-sale ledger")]
struct Cli {
    /// Directory holding inventory.json, sales.json and users.json
    /// (default: $STOCKBOOK_DATA_DIR or ".").
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Username to log in with.
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Password to log in with.
    #[arg(short, long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog.
    List,

    /// Add a new product.
    Add {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = stockbook_core::DEFAULT_CATEGORY)]
        category: String,
    },

    /// Replace an existing product's fields.
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        category: String,
    },

    /// Delete a product.
    Delete { id: String },

    /// Record a sale.
    Sell { id: String, quantity: String },

    /// Show products below a stock threshold.
    LowStock {
        /// Report products with fewer units than this
        /// (default: $STOCKBOOK_LOW_STOCK_THRESHOLD or 5).
        #[arg(short, long)]
        threshold: Option<u32>,
    },

    /// Show transaction count, revenue and the largest sales.
    Summary {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create a new login.
    Register { username: String, password: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    process::exit(run(cli));
}

/// Checks the login, then opens the ledger and dispatches the subcommand.
///
/// Only the credential snapshot is touched before a successful login. The
/// catalog is seeded and migrated once the caller is authenticated.
fn run(cli: Cli) -> i32 {
    let mut config = StockbookConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");

    let store = match JsonFileStore::new(&config.data_dir) {
        Ok(store) => store,
        Err(e) => return open_failed(&config, &LedgerError::from(e)),
    };
    let mut credentials = CredentialStore::new(store.clone());
    if let Err(e) = credentials.seed_default() {
        return open_failed(&config, &e);
    }

    if let Commands::Register { username, password } = &cli.command {
        return run_register(&mut credentials, username, password);
    }

    if let Err(code) = login(&credentials, cli.user.as_deref(), cli.password.as_deref()) {
        return code;
    }

    let mut book = match Stockbook::with_store(store) {
        Ok(book) => book,
        Err(e) => return open_failed(&config, &e),
    };

    match cli.command {
        Commands::List => {
            println!("{}", render::catalog_table(book.ledger.catalog()));
            0
        }
        Commands::Add {
            id,
            name,
            price,
            quantity,
            category,
        } => run_add(&mut book, &id, &name, &price, &quantity, &category),
        Commands::Update {
            id,
            name,
            price,
            quantity,
            category,
        } => {
            let product = match Product::parse(&name, &price, &quantity, &category) {
                Ok(product) => product,
                Err(e) => return invalid_input(&e),
            };
            report(book.ledger.update(&id, product), || {
                println!("Updated {}.", id);
            })
        }
        Commands::Delete { id } => report(book.ledger.delete(&id), || {
            println!("Deleted {}.", id);
        }),
        Commands::Sell { id, quantity } => run_sell(&mut book, &id, &quantity),
        Commands::LowStock { threshold } => {
            let threshold = threshold.unwrap_or(config.low_stock_threshold);
            let low = book.ledger.low_stock(threshold);
            println!("{}", render::low_stock_report(&low));
            0
        }
        Commands::Summary { json } => {
            let summary = book.ledger.sales_summary();
            if json {
                let out = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
                    format!("{{\"error\": \"failed to serialize summary: {}\"}}", e)
                });
                println!("{}", out);
            } else {
                println!("{}", render::summary_report(&summary));
            }
            0
        }
        Commands::Register { .. } => 0,
    }
}

fn open_failed(config: &StockbookConfig, err: &LedgerError) -> i32 {
    eprintln!(
        "Error: failed to open data directory '{}': {}",
        config.data_dir.display(),
        err
    );
    EXIT_STORAGE
}

/// Checks the supplied credentials. Returns the exit code on failure.
fn login(
    credentials: &CredentialStore<JsonFileStore>,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<(), i32> {
    let (Some(user), Some(password)) = (user, password) else {
        eprintln!("Error: --user and --password are required");
        return Err(EXIT_INVALID);
    };
    let user = user.trim();
    match credentials.authenticate(user, password.trim()) {
        Ok(true) => {
            tracing::info!(user, "logged in");
            Ok(())
        }
        Ok(false) => {
            eprintln!("Login failed: invalid credentials");
            Err(EXIT_INVALID)
        }
        Err(e) => Err(failure(&e)),
    }
}

/// Registers a login. Input is trimmed the same way `login` trims it.
fn run_register(
    credentials: &mut CredentialStore<JsonFileStore>,
    username: &str,
    password: &str,
) -> i32 {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() {
        return invalid_input(&CoreError::EmptyField { field: "username" });
    }
    if password.is_empty() {
        return invalid_input(&CoreError::EmptyField { field: "password" });
    }
    report(credentials.register(username, password), || {
        println!("Registered '{}'. You can now log in.", username);
    })
}

fn run_add(
    book: &mut Stockbook<JsonFileStore>,
    id: &str,
    name: &str,
    price: &str,
    quantity: &str,
    category: &str,
) -> i32 {
    let id = id.trim();
    if id.is_empty() {
        return invalid_input(&CoreError::EmptyField { field: "id" });
    }
    let product = match Product::parse(name, price, quantity, category) {
        Ok(product) => product,
        Err(e) => return invalid_input(&e),
    };
    report(book.ledger.add(id, product), || {
        println!("Added {}.", id);
    })
}

fn run_sell(book: &mut Stockbook<JsonFileStore>, id: &str, quantity: &str) -> i32 {
    let quantity = match parse_quantity(quantity) {
        Ok(quantity) => quantity,
        Err(e) => return invalid_input(&e),
    };
    match book.ledger.sell(id, quantity) {
        Ok(sale) => {
            let remaining = book
                .ledger
                .product(id)
                .map_or(0, |product| product.quantity);
            println!(
                "Sold {} x {} for {} ({} left).",
                sale.quantity,
                sale.name,
                render::money(sale.total),
                remaining
            );
            0
        }
        Err(e) => failure(&e),
    }
}

/// Runs `on_success` for `Ok`, otherwise prints the error and maps it to an
/// exit code.
fn report(result: Result<(), LedgerError>, on_success: impl FnOnce()) -> i32 {
    match result {
        Ok(()) => {
            on_success();
            0
        }
        Err(e) => failure(&e),
    }
}

fn invalid_input(err: &CoreError) -> i32 {
    eprintln!("Invalid input: {}", err);
    EXIT_INVALID
}

fn failure(err: &LedgerError) -> i32 {
    match err {
        LedgerError::Validation(e) => invalid_input(e),
        LedgerError::Storage(e) => {
            eprintln!("Storage error: {}", e);
            EXIT_STORAGE
        }
        other => {
            eprintln!("Error: {}", other);
            EXIT_REJECTED
        }
    }
}
