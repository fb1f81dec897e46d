//! Login and signup commands.
//!
//! Both sides of the marketplace authenticate with a username and password
//! and receive an API token. The token is printed for the user to export as
//! `PLATEFUL_API_TOKEN`; every other command picks it up from the
//! environment.

use clap::Subcommand;
use secrecy::ExposeSecret;

use plateful_client::session::{Credentials, Session};

use super::{CliError, connect};

#[derive(Subcommand)]
pub enum LoginAccount {
    /// Log in as a customer
    Customer {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log in as a restaurant
    Restaurant {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum SignupAccount {
    /// Register a customer account
    Customer {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        email: String,
    },
    /// Register a restaurant account
    Restaurant {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        email: String,

        /// Restaurant display name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },
}

pub async fn login(account: LoginAccount) -> Result<(), CliError> {
    let store = connect()?;
    let session = match account {
        LoginAccount::Customer { username, password } => {
            let credentials = Credentials {
                username,
                password: password.into(),
            };
            store.login_customer(&credentials).await?
        }
        LoginAccount::Restaurant { username, password } => {
            let credentials = Credentials {
                username,
                password: password.into(),
            };
            store.login_restaurant(&credentials).await?
        }
    };
    print_session(&session);
    Ok(())
}

pub async fn signup(account: SignupAccount) -> Result<(), CliError> {
    let store = connect()?;
    let session = match account {
        SignupAccount::Customer {
            username,
            password,
            email,
        } => {
            let credentials = Credentials {
                username,
                password: password.into(),
            };
            store.signup_customer(&credentials, &email).await?
        }
        SignupAccount::Restaurant {
            username,
            password,
            email,
            name,
            address,
            phone,
        } => {
            let credentials = Credentials {
                username,
                password: password.into(),
            };
            store
                .signup_restaurant(&credentials, &email, &name, &address, &phone)
                .await?
        }
    };
    print_session(&session);
    Ok(())
}

fn print_session(session: &Session) {
    println!("Logged in ({:?} account).", session.kind());
    println!();
    println!("export PLATEFUL_API_TOKEN={}", session.token().expose_secret());
}
