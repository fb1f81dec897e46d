//! Authentication session state.
//!
//! The session is an explicit value returned by login/signup and handed to
//! the store, never an ambient global. Logging out is dropping the value;
//! the backend issues long-lived tokens and keeps no session state of its
//! own to tear down.

use secrecy::SecretString;

use plateful_core::{AccountKind, CustomerId, RestaurantId};

/// Login credentials for either side of the marketplace.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An authenticated session: the issued token plus who it belongs to.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    kind: AccountKind,
    customer_id: Option<CustomerId>,
    restaurant_id: Option<RestaurantId>,
}

impl Session {
    /// Session for a customer account.
    #[must_use]
    pub const fn customer(token: SecretString, customer_id: Option<CustomerId>) -> Self {
        Self {
            token,
            kind: AccountKind::Customer,
            customer_id,
            restaurant_id: None,
        }
    }

    /// Session for a restaurant account.
    #[must_use]
    pub const fn restaurant(token: SecretString, restaurant_id: RestaurantId) -> Self {
        Self {
            token,
            kind: AccountKind::Restaurant,
            customer_id: None,
            restaurant_id: Some(restaurant_id),
        }
    }

    /// Session from a pre-issued token (e.g., `PLATEFUL_API_TOKEN`).
    #[must_use]
    pub const fn from_token(token: SecretString, kind: AccountKind) -> Self {
        Self {
            token,
            kind,
            customer_id: None,
            restaurant_id: None,
        }
    }

    /// The auth token sent with every request.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Which side of the marketplace this session belongs to.
    #[must_use]
    pub const fn kind(&self) -> AccountKind {
        self.kind
    }

    #[must_use]
    pub const fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    #[must_use]
    pub const fn restaurant_id(&self) -> Option<RestaurantId> {
        self.restaurant_id
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("kind", &self.kind)
            .field("customer_id", &self.customer_id)
            .field("restaurant_id", &self.restaurant_id)
            .finish()
    }
}
