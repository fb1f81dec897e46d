//! Client-level error taxonomy.
//!
//! Every failure a caller can see is one of three kinds: a conflict the user
//! must resolve, invalid checkout input, or a remote failure surfaced
//! unmodified from the store layer. No failure mutates local cart state.

use thiserror::Error;

use plateful_core::RestaurantId;

use crate::store::StoreError;

/// Checkout input validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No delivery address was selected.
    #[error("a delivery address must be selected")]
    MissingDeliveryAddress,
    /// The restaurant group has no items to order.
    #[error("the cart group is empty")]
    EmptyGroup,
}

/// Errors surfaced by the cart aggregator and order assembler.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The cart already holds items from another restaurant; the caller must
    /// confirm starting a new order before the add is retried as forced.
    #[error("cart already contains items from {restaurant_name}")]
    ConflictingRestaurant {
        restaurant_id: RestaurantId,
        /// Resolved display name, or the fallback label if the lookup failed.
        restaurant_name: String,
    },

    /// Checkout input was rejected before any network call.
    #[error("invalid order: {0}")]
    Validation(#[from] ValidationError),

    /// A remote call failed; retryable by re-invoking the same operation.
    #[error(transparent)]
    Remote(#[from] StoreError),
}
