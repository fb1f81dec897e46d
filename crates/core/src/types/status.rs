//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Values match the backend's wire vocabulary exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Preparing,
    OnTheWay,
    Delivered,
    Cancelled,
    PickupReady,
    PickedUp,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Preparing => "Preparing",
            Self::OnTheWay => "On the Way",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::PickupReady => "Pick up Ready",
            Self::PickedUp => "Picked Up",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "preparing" => Ok(Self::Preparing),
            "on_the_way" => Ok(Self::OnTheWay),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "pickup_ready" => Ok(Self::PickupReady),
            "picked_up" => Ok(Self::PickedUp),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Menu category for a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishCategory {
    Appetizer,
    Salad,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Beverage,
}

impl DishCategory {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Appetizer => "Appetizer",
            Self::Salad => "Salad",
            Self::MainCourse => "Main Course",
            Self::Dessert => "Dessert",
            Self::Beverage => "Beverage",
        }
    }
}

impl std::fmt::Display for DishCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DishCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Appetizer" => Ok(Self::Appetizer),
            "Salad" => Ok(Self::Salad),
            "Main Course" => Ok(Self::MainCourse),
            "Dessert" => Ok(Self::Dessert),
            "Beverage" => Ok(Self::Beverage),
            _ => Err(format!("invalid dish category: {s}")),
        }
    }
}

/// Which side of the marketplace an authenticated account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Customer,
    Restaurant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OnTheWay).expect("serialize"),
            "\"on_the_way\""
        );
        let s: OrderStatus = serde_json::from_str("\"pickup_ready\"").expect("parse");
        assert_eq!(s, OrderStatus::PickupReady);
    }

    #[test]
    fn test_dish_category_wire_values() {
        assert_eq!(
            serde_json::to_string(&DishCategory::MainCourse).expect("serialize"),
            "\"Main Course\""
        );
    }

    #[test]
    fn test_order_status_label() {
        assert_eq!(OrderStatus::PickedUp.to_string(), "Picked Up");
    }

    #[test]
    fn test_order_status_parse() {
        let status: OrderStatus = "on_the_way".parse().expect("parse");
        assert_eq!(status, OrderStatus::OnTheWay);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_dish_category_parse() {
        let category: DishCategory = "Main Course".parse().expect("parse");
        assert_eq!(category, DishCategory::MainCourse);
    }
}
