//! Lavka CLI - drive the shopping session from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Seed the demo identity (admin / admin123)
//! lavka seed
//!
//! # Browse and shop as a guest
//! lavka catalog
//! lavka cart add 1 --quantity 2
//! lavka cart show
//!
//! # Log in; the guest cart follows you
//! lavka login -u admin -p admin123
//! lavka checkout
//! ```
//!
//! State lives in the sled database under `LAVKA_DATA_DIR` (default
//! `./lavka-data`), so it survives between invocations. All user-facing
//! formatting happens here; the storefront library only surfaces typed
//! errors.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use lavka_storefront::config::StorefrontConfig;
use lavka_storefront::state::ShopSession;
use lavka_storefront::storage::{SledStorage, Storage};

mod commands;

#[derive(Parser)]
#[command(name = "lavka")]
#[command(author, version, about = "Lavka shop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the demo identity (admin / admin123)
    Seed,
    /// Register a new identity and log it in
    Register {
        /// Username (unique, case-sensitive)
        #[arg(short, long)]
        username: String,

        /// Email address (unique, case-sensitive)
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log in; the guest cart follows you
    Login {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the active identity
    Whoami,
    /// List registered identities
    Users,
    /// List catalog products
    Catalog,
    /// Work with the current cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Report the cart total and empty it
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a catalog product to the cart
    Add {
        /// Catalog product ID
        product_id: i32,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product's line from the cart
    Remove {
        /// Catalog product ID
        product_id: i32,
    },
    /// Set a line's quantity (0 removes the line)
    Set {
        /// Catalog product ID
        product_id: i32,

        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let storage: Arc<dyn Storage> = Arc::new(SledStorage::open(&config.data_dir)?);
    let session = ShopSession::new(storage)?;

    match cli.command {
        Commands::Seed => commands::seed::demo_identity(&session)?,
        Commands::Register {
            username,
            email,
            password,
        } => commands::account::register(&session, &username, &email, &password)?,
        Commands::Login { username, password } => {
            commands::account::login(&session, &username, &password)?;
        }
        Commands::Logout => commands::account::logout(&session)?,
        Commands::Whoami => commands::account::whoami(&session)?,
        Commands::Users => commands::account::users(&session),
        Commands::Catalog => commands::catalog::list(),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session)?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&session, product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&session, product_id)?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(&session, product_id, quantity)?,
            CartAction::Clear => commands::cart::clear(&session)?,
        },
        Commands::Checkout => commands::cart::checkout(&session)?,
    }
    Ok(())
}
