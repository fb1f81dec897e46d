//! Plateful client library.
//!
//! This crate is everything between the terminal front end and the remote
//! food-ordering service:
//!
//! - [`store`] - the remote store contract ([`store::RemoteStore`]) and its
//!   REST implementation ([`store::RestStore`])
//! - [`cart`] - the cart aggregator: a server-reconciled view of the cart
//!   grouped by restaurant, with derived totals
//! - [`order`] - the order assembler and per-group checkout state machine
//! - [`session`] - explicit authentication state passed to the store
//! - [`config`] - environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use plateful_client::config::ClientConfig;
//! use plateful_client::store::RestStore;
//! use plateful_client::cart::CartAggregator;
//!
//! let config = ClientConfig::from_env()?;
//! let store = RestStore::new(&config)?;
//! let session = store.login_customer(&credentials).await?;
//! let store = store.with_session(session);
//!
//! let mut cart = CartAggregator::new(store);
//! cart.load().await?;
//! println!("{} items in cart", cart.count());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod order;
pub mod session;
pub mod store;

pub use error::ClientError;
