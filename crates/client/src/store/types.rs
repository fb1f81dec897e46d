//! Domain types for the food-ordering API.
//!
//! These types mirror the backend's JSON representations. Currency fields
//! arrive as decimal strings and deserialize into [`Money`]; entity
//! references use the newtype IDs from `plateful-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plateful_core::{
    AddressId, CartItemId, CustomerId, DishCategory, DishId, Money, OrderId, OrderStatus,
    RestaurantId,
};

// =============================================================================
// Restaurant and Dish
// =============================================================================

/// A restaurant in the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Opening time as "HH:MM:SS".
    #[serde(default)]
    pub opening_time: Option<String>,
    /// Closing time as "HH:MM:SS".
    #[serde(default)]
    pub closing_time: Option<String>,
}

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    /// The owning restaurant. Authoritative for cart grouping.
    pub restaurant: RestaurantId,
    pub name: String,
    /// Unit price.
    pub price: Money,
    #[serde(default)]
    pub category: Option<DishCategory>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
}

/// Payload for creating a dish (restaurant side).
#[derive(Debug, Clone, Serialize)]
pub struct NewDish {
    pub name: String,
    pub price: Money,
    pub category: DishCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

/// Partial update for a dish (restaurant side). Unset fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DishChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DishCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

// =============================================================================
// Cart
// =============================================================================

/// One row of the cart: a dish and a quantity.
///
/// Quantity is at least 1; the aggregator clamps edits below that instead of
/// removing the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: CartItemId,
    pub dish: Dish,
    pub quantity: u32,
    /// Denormalized copy of the owning restaurant kept by the backend.
    /// Grouping uses `dish.restaurant` instead; this field is informational.
    #[serde(default)]
    pub restaurant: Option<RestaurantId>,
}

impl CartLineItem {
    /// Line subtotal at full precision (`unit price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.dish.price.times(self.quantity)
    }
}

// =============================================================================
// Delivery addresses
// =============================================================================

/// A saved delivery address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub id: AddressId,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    /// At most one address per customer is flagged, enforced server-side.
    #[serde(default)]
    pub is_default: bool,
}

/// Payload for creating a delivery address.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeliveryAddress {
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

// =============================================================================
// Orders
// =============================================================================

/// One `{dish, quantity}` pair within an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub dish_id: DishId,
    pub quantity: u32,
}

/// The payload sent to create an order from one restaurant group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub restaurant_id: RestaurantId,
    pub delivery_address_id: AddressId,
    /// Items in group order.
    pub items: Vec<OrderItemInput>,
}

/// The server's acknowledgment of a created order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReceipt {
    #[serde(rename = "id")]
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// A line within a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub dish: Dish,
    pub quantity: u32,
}

/// A placed order as returned by the order-history endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub customer: Option<CustomerId>,
    #[serde(default)]
    pub restaurant: Option<Restaurant>,
    #[serde(default)]
    pub items: Vec<OrderLineItem>,
}

// =============================================================================
// Favorites
// =============================================================================

/// A favorites-list row: the link id plus the nested restaurant.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteRestaurant {
    pub id: i32,
    pub restaurant: Restaurant,
}

/// Result of toggling a favorite restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteToggle {
    Added,
    Removed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dish_json() -> &'static str {
        r#"{
            "id": 3,
            "restaurant": 7,
            "name": "Pad Thai",
            "price": "12.50",
            "category": "Main Course",
            "description": "Rice noodles",
            "is_vegetarian": true
        }"#
    }

    #[test]
    fn test_dish_deserializes_string_price() {
        let dish: Dish = serde_json::from_str(sample_dish_json()).expect("parse dish");
        assert_eq!(dish.price, Money::from_cents(1250));
        assert_eq!(dish.restaurant, RestaurantId::new(7));
        assert_eq!(dish.category, Some(DishCategory::MainCourse));
        assert!(!dish.is_vegan);
    }

    #[test]
    fn test_cart_line_item_line_total() {
        let json = format!(
            r#"{{"id": 1, "dish": {}, "quantity": 3}}"#,
            sample_dish_json()
        );
        let item: CartLineItem = serde_json::from_str(&json).expect("parse item");
        assert_eq!(item.line_total(), Money::from_cents(3750));
        assert_eq!(item.restaurant, None);
    }

    #[test]
    fn test_order_receipt_renames_id() {
        let receipt: OrderReceipt =
            serde_json::from_str(r#"{"id": 9, "status": "new"}"#).expect("parse receipt");
        assert_eq!(receipt.order_id, OrderId::new(9));
        assert_eq!(receipt.status, OrderStatus::New);
    }

    #[test]
    fn test_dish_changes_skips_unset_fields() {
        let changes = DishChanges {
            price: Some(Money::from_cents(999)),
            ..DishChanges::default()
        };
        let json = serde_json::to_value(&changes).expect("serialize changes");
        assert_eq!(json, serde_json::json!({"price": "9.99"}));
    }
}
