//! Plateful CLI - terminal front end for the food-ordering service.
//!
//! # Usage
//!
//! ```bash
//! # Log in and export the printed token
//! plateful login customer -u alice -p secret
//! export PLATEFUL_API_TOKEN=...
//!
//! # Browse and order
//! plateful restaurants list
//! plateful restaurants menu 1
//! plateful cart add 100
//! plateful cart show
//! plateful checkout 1
//!
//! # Restaurant side
//! plateful orders set-status 42 preparing
//! plateful menu add --name "Ramen" --price 9.99 --category "Main Course"
//! ```
//!
//! Configuration comes from the environment (or a `.env` file):
//! `PLATEFUL_API_URL`, `PLATEFUL_API_TOKEN`, `PLATEFUL_HTTP_TIMEOUT_SECS`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "plateful")]
#[command(author, version, about = "Plateful food-ordering CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print an API token
    Login {
        #[command(subcommand)]
        account: commands::auth::LoginAccount,
    },
    /// Register a new account
    Signup {
        #[command(subcommand)]
        account: commands::auth::SignupAccount,
    },
    /// Browse restaurants and menus
    Restaurants {
        #[command(subcommand)]
        action: commands::browse::RestaurantAction,
    },
    /// Manage favorite restaurants
    Favorites {
        #[command(subcommand)]
        action: commands::browse::FavoriteAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Place an order from one restaurant's cart group
    Checkout {
        /// Restaurant whose cart group to submit
        restaurant_id: i32,

        /// Delivery address id (defaults to the account's default address)
        #[arg(short, long)]
        address_id: Option<i32>,
    },
    /// View and manage orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Manage delivery addresses
    Addresses {
        #[command(subcommand)]
        action: commands::addresses::AddressAction,
    },
    /// Manage a restaurant's menu (restaurant accounts)
    Menu {
        #[command(subcommand)]
        action: commands::menu::MenuAction,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {}", commands::render_error(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Login { account } => commands::auth::login(account).await?,
        Commands::Signup { account } => commands::auth::signup(account).await?,
        Commands::Restaurants { action } => commands::browse::restaurants(action).await?,
        Commands::Favorites { action } => commands::browse::favorites(action).await?,
        Commands::Cart { action } => commands::cart::run(action).await?,
        Commands::Checkout {
            restaurant_id,
            address_id,
        } => commands::orders::checkout(restaurant_id, address_id).await?,
        Commands::Orders { action } => commands::orders::run(action).await?,
        Commands::Addresses { action } => commands::addresses::run(action).await?,
        Commands::Menu { action } => commands::menu::run(action).await?,
    }
    Ok(())
}
