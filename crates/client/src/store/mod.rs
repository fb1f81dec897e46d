//! Remote store contract and its REST implementation.
//!
//! # Architecture
//!
//! - The backend is the source of truth - every cart mutation is followed by
//!   a full reload, never an optimistic local edit
//! - [`RemoteStore`] is the seam the aggregator and assembler consume; the
//!   production implementation is [`RestStore`] (REST + JSON over `reqwest`)
//! - Failures carry both the transport-level kind and the operation that
//!   failed, and are propagated unmodified

mod rest;
pub mod types;

pub use rest::RestStore;

use async_trait::async_trait;
use thiserror::Error;

use plateful_core::{CartItemId, DishId, OrderId, OrderStatus, RestaurantId};

use types::{
    CartLineItem, DeliveryAddress, Dish, DishChanges, FavoriteRestaurant, FavoriteToggle,
    NewDeliveryAddress, NewDish, Order, OrderReceipt, OrderSubmission, Restaurant,
};

/// The remote operation a [`StoreError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Login,
    Signup,
    ListCartItems,
    CreateCartItem,
    UpdateCartItem,
    DeleteCartItem,
    GetRestaurant,
    ListRestaurants,
    ListDishes,
    GetDish,
    ListDeliveryAddresses,
    CreateDeliveryAddress,
    CreateOrder,
    ListOrders,
    GetOrder,
    ListFavorites,
    ToggleFavorite,
    UpdateOrderStatus,
    CreateDish,
    UpdateDish,
}

impl StoreOp {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::ListCartItems => "list cart items",
            Self::CreateCartItem => "create cart item",
            Self::UpdateCartItem => "update cart item",
            Self::DeleteCartItem => "delete cart item",
            Self::GetRestaurant => "get restaurant",
            Self::ListRestaurants => "list restaurants",
            Self::ListDishes => "list dishes",
            Self::GetDish => "get dish",
            Self::ListDeliveryAddresses => "list delivery addresses",
            Self::CreateDeliveryAddress => "create delivery address",
            Self::CreateOrder => "create order",
            Self::ListOrders => "list orders",
            Self::GetOrder => "get order",
            Self::ListFavorites => "list favorites",
            Self::ToggleFavorite => "toggle favorite",
            Self::UpdateOrderStatus => "update order status",
            Self::CreateDish => "create dish",
            Self::UpdateDish => "update dish",
        }
    }
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Transport-level failure kind.
#[derive(Debug, Clone, Error)]
pub enum StoreErrorKind {
    /// Missing, expired, or wrong-side credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// The entity does not exist on the server.
    #[error("not found")]
    NotFound,

    /// Connection, DNS, timeout, or malformed-response failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server reported a failure.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// A failed remote call, tagged with the operation that failed.
///
/// The kind is surfaced unmodified so callers can decide how to render or
/// retry it.
#[derive(Debug, Clone, Error)]
#[error("{op} failed: {kind}")]
pub struct StoreError {
    pub op: StoreOp,
    pub kind: StoreErrorKind,
}

impl StoreError {
    #[must_use]
    pub const fn new(op: StoreOp, kind: StoreErrorKind) -> Self {
        Self { op, kind }
    }

    /// Whether retrying the same call could plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::Network(_) | StoreErrorKind::Server { .. }
        )
    }
}

/// The remote food-ordering store consumed by the cart aggregator, order
/// assembler, and CLI.
///
/// All calls operate on behalf of the authenticated session the
/// implementation was constructed with.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    // Cart
    async fn list_cart_items(&self) -> Result<Vec<CartLineItem>, StoreError>;
    async fn create_cart_item(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
        quantity: u32,
    ) -> Result<CartLineItem, StoreError>;
    async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<CartLineItem, StoreError>;
    async fn delete_cart_item(&self, id: CartItemId) -> Result<(), StoreError>;

    // Restaurants and dishes
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant, StoreError>;
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;
    async fn list_dishes(&self, restaurant_id: RestaurantId) -> Result<Vec<Dish>, StoreError>;
    async fn get_dish(&self, id: DishId) -> Result<Dish, StoreError>;

    // Delivery addresses
    async fn list_delivery_addresses(&self) -> Result<Vec<DeliveryAddress>, StoreError>;
    async fn create_delivery_address(
        &self,
        new: &NewDeliveryAddress,
    ) -> Result<DeliveryAddress, StoreError>;

    // Orders
    async fn create_order(&self, submission: &OrderSubmission) -> Result<OrderReceipt, StoreError>;
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
    async fn get_order(&self, id: OrderId) -> Result<Order, StoreError>;

    // Favorites
    async fn list_favorites(&self) -> Result<Vec<FavoriteRestaurant>, StoreError>;
    async fn toggle_favorite(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<FavoriteToggle, StoreError>;

    // Restaurant-side management
    async fn update_order_status(&self, id: OrderId, status: OrderStatus)
    -> Result<(), StoreError>;
    async fn create_dish(&self, new: &NewDish) -> Result<Dish, StoreError>;
    async fn update_dish(&self, id: DishId, changes: &DishChanges) -> Result<Dish, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_operation() {
        let err = StoreError::new(StoreOp::ListCartItems, StoreErrorKind::NotFound);
        assert_eq!(err.to_string(), "list cart items failed: not found");
    }

    #[test]
    fn test_server_error_display() {
        let err = StoreError::new(
            StoreOp::CreateOrder,
            StoreErrorKind::Server {
                status: 500,
                message: "boom".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "create order failed: server error (500): boom"
        );
    }

    #[test]
    fn test_retryable_kinds() {
        let network = StoreError::new(StoreOp::ListOrders, StoreErrorKind::Network("down".into()));
        assert!(network.is_retryable());
        let unauthorized = StoreError::new(StoreOp::ListOrders, StoreErrorKind::Unauthorized);
        assert!(!unauthorized.is_retryable());
    }
}
