//! Cart aggregator: a server-reconciled view of the cart grouped by
//! restaurant.
//!
//! The backend is the source of truth. Every mutation round-trips through
//! the store and then re-derives the whole grouping from a fresh
//! [`RemoteStore::list_cart_items`] response - never an optimistic local
//! edit. Restaurant display names are resolved lazily through a `moka`
//! cache keyed by restaurant id.
//!
//! Operations take `&mut self`, so a second mutation cannot start while one
//! is pending. Dropping a pending future (e.g., when the caller navigates
//! away) discards its result without touching the aggregator's state.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument, warn};

use plateful_core::{CartItemId, DishId, Money, RestaurantId};

use crate::error::ClientError;
use crate::store::RemoteStore;
use crate::store::types::CartLineItem;

const NAME_CACHE_CAPACITY: u64 = 100;
const NAME_CACHE_TTL: Duration = Duration::from_secs(300);

/// The line items belonging to one restaurant within the cart.
#[derive(Debug, Clone)]
pub struct RestaurantCartGroup {
    pub restaurant_id: RestaurantId,
    /// Display name, if the lazy lookup has succeeded.
    pub restaurant_name: Option<String>,
    /// Line items in fetch order.
    pub items: Vec<CartLineItem>,
}

impl RestaurantCartGroup {
    /// Display name, falling back to an id-based label when the name lookup
    /// failed. A failed lookup never fails the cart render.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.restaurant_name
            .clone()
            .unwrap_or_else(|| format!("Restaurant {}", self.restaurant_id))
    }

    /// Group total: sum of `unit price * quantity` over all items, rounded
    /// half-up to cents as a single final step.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .sum::<Money>()
            .rounded()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The whole cart: restaurant groups in first-seen fetch order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    groups: Vec<RestaurantCartGroup>,
}

impl Cart {
    #[must_use]
    pub fn groups(&self) -> &[RestaurantCartGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, restaurant_id: RestaurantId) -> Option<&RestaurantCartGroup> {
        self.groups
            .iter()
            .find(|g| g.restaurant_id == restaurant_id)
    }

    /// Whether the cart has no items at all. An empty cart is a distinct
    /// state for callers to render, not a zero-total grouping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(RestaurantCartGroup::is_empty)
    }

    /// Number of distinct line items across all groups - NOT the sum of
    /// quantities. This is the number shown on the navigation badge.
    #[must_use]
    pub fn count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Grand total across all groups.
    #[must_use]
    pub fn total(&self) -> Money {
        self.groups
            .iter()
            .map(RestaurantCartGroup::total)
            .sum::<Money>()
            .rounded()
    }

    fn find_item(&self, dish_id: DishId, restaurant_id: RestaurantId) -> Option<&CartLineItem> {
        self.group(restaurant_id)
            .and_then(|g| g.items.iter().find(|i| i.dish.id == dish_id))
    }

    /// The first non-empty group belonging to a different restaurant, if any.
    fn conflicting_group(&self, restaurant_id: RestaurantId) -> Option<&RestaurantCartGroup> {
        self.groups
            .iter()
            .find(|g| g.restaurant_id != restaurant_id && !g.is_empty())
    }
}

/// Owns the reconciled [`Cart`] plus the restaurant-name cache.
pub struct CartAggregator<S> {
    store: S,
    names: Cache<RestaurantId, String>,
    cart: Cart,
}

impl<S: RemoteStore> CartAggregator<S> {
    /// Create an aggregator with an empty cart.
    #[must_use]
    pub fn new(store: S) -> Self {
        let names = Cache::builder()
            .max_capacity(NAME_CACHE_CAPACITY)
            .time_to_live(NAME_CACHE_TTL)
            .build();
        Self {
            store,
            names,
            cart: Cart::default(),
        }
    }

    /// The current reconciled cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Navigation-badge item count. See [`Cart::count`].
    #[must_use]
    pub fn count(&self) -> usize {
        self.cart.count()
    }

    /// Access to the underlying store, for operations outside the cart.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch all line items and re-derive the grouping.
    ///
    /// Items are grouped by `dish.restaurant` - the dish's own restaurant
    /// reference is authoritative, not the denormalized copy on the line
    /// item. Newly-seen restaurants get a name lookup through the cache;
    /// a failed lookup leaves the group keyed by id with a fallback label.
    ///
    /// # Errors
    ///
    /// On a store failure the previous cart state is left untouched and the
    /// error is returned for the caller to render and retry.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&Cart, ClientError> {
        let items = self.store.list_cart_items().await?;
        debug!(count = items.len(), "Fetched cart items");

        let mut groups: Vec<RestaurantCartGroup> = Vec::new();
        for item in items {
            let restaurant_id = item.dish.restaurant;
            if let Some(group) = groups.iter_mut().find(|g| g.restaurant_id == restaurant_id) {
                group.items.push(item);
            } else {
                let restaurant_name = self.resolve_name(restaurant_id).await;
                groups.push(RestaurantCartGroup {
                    restaurant_id,
                    restaurant_name,
                    items: vec![item],
                });
            }
        }

        self.cart = Cart { groups };
        Ok(&self.cart)
    }

    /// Resolve a restaurant's display name through the cache. Lookup
    /// failures degrade to `None` and are not negatively cached, so a later
    /// load retries.
    async fn resolve_name(&self, restaurant_id: RestaurantId) -> Option<String> {
        let lookup = async {
            self.store
                .get_restaurant(restaurant_id)
                .await
                .map(|r| r.name)
        };
        match self.names.try_get_with(restaurant_id, lookup).await {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(%restaurant_id, error = %e, "Failed to resolve restaurant name");
                None
            }
        }
    }

    /// Add one unit of a dish to the cart.
    ///
    /// If a non-empty group for a different restaurant exists, nothing is
    /// mutated and [`ClientError::ConflictingRestaurant`] is returned with
    /// that restaurant's resolved name; the caller must confirm and retry
    /// via [`Self::add_dish_confirmed`]. Otherwise an existing line for the
    /// same dish is incremented by one, or a new line is created with
    /// quantity one, followed by a full reload.
    ///
    /// The conflict check and the mutation are not atomic with respect to
    /// other sessions; last-writer-wins at the store is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingRestaurant` or a remote failure.
    #[instrument(skip(self), fields(dish_id = %dish_id, restaurant_id = %restaurant_id))]
    pub async fn add_dish(
        &mut self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<&Cart, ClientError> {
        if let Some(group) = self.cart.conflicting_group(restaurant_id) {
            return Err(ClientError::ConflictingRestaurant {
                restaurant_id: group.restaurant_id,
                restaurant_name: group.display_name(),
            });
        }
        self.add_dish_confirmed(dish_id, restaurant_id).await
    }

    /// Forced add: skips the conflicting-restaurant check. Call only after
    /// the user explicitly confirmed starting an order with a new
    /// restaurant. Existing groups are left as they are.
    ///
    /// # Errors
    ///
    /// Returns a remote failure if the mutation or the reload fails.
    #[instrument(skip(self), fields(dish_id = %dish_id, restaurant_id = %restaurant_id))]
    pub async fn add_dish_confirmed(
        &mut self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
    ) -> Result<&Cart, ClientError> {
        let existing = self
            .cart
            .find_item(dish_id, restaurant_id)
            .map(|item| (item.id, item.quantity));

        match existing {
            Some((line_id, quantity)) => {
                self.store.update_cart_item(line_id, quantity + 1).await?;
            }
            None => {
                self.store.create_cart_item(dish_id, restaurant_id, 1).await?;
            }
        }
        self.load().await
    }

    /// Set a line item's quantity, clamped to a minimum of 1. Quantity
    /// edits never delete a line; removal is always explicit.
    ///
    /// # Errors
    ///
    /// Returns a remote failure if the update or the reload fails.
    #[instrument(skip(self), fields(line_item_id = %line_item_id, quantity = quantity))]
    pub async fn update_quantity(
        &mut self,
        line_item_id: CartItemId,
        quantity: u32,
    ) -> Result<&Cart, ClientError> {
        let quantity = quantity.max(1);
        self.store.update_cart_item(line_item_id, quantity).await?;
        self.load().await
    }

    /// Remove a line item from the cart.
    ///
    /// # Errors
    ///
    /// Returns a remote failure if the delete or the reload fails.
    #[instrument(skip(self), fields(line_item_id = %line_item_id))]
    pub async fn remove_item(&mut self, line_item_id: CartItemId) -> Result<&Cart, ClientError> {
        self.store.delete_cart_item(line_item_id).await?;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{Dish, Restaurant};
    use crate::store::{StoreError, StoreErrorKind, StoreOp};
    use plateful_core::Money;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

    fn dish(id: i32, restaurant: i32, cents: i64) -> Dish {
        Dish {
            id: DishId::new(id),
            restaurant: RestaurantId::new(restaurant),
            name: format!("Dish {id}"),
            price: Money::from_cents(cents),
            category: None,
            description: None,
            ingredients: None,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
        }
    }

    fn line(id: i32, dish: Dish, quantity: u32) -> CartLineItem {
        let restaurant = Some(dish.restaurant);
        CartLineItem {
            id: CartItemId::new(id),
            dish,
            quantity,
            restaurant,
        }
    }

    /// In-memory store covering the cart surface of the contract.
    #[derive(Default)]
    struct MockStore {
        items: Mutex<Vec<CartLineItem>>,
        restaurants: HashMap<RestaurantId, Restaurant>,
        dishes: HashMap<DishId, Dish>,
        next_line_id: AtomicI32,
        calls: Mutex<Vec<&'static str>>,
        fail_listing: AtomicBool,
    }

    impl MockStore {
        fn with_restaurant(mut self, id: i32, name: &str) -> Self {
            self.restaurants.insert(
                RestaurantId::new(id),
                Restaurant {
                    id: RestaurantId::new(id),
                    name: name.to_string(),
                    description: None,
                    address: None,
                    phone_number: None,
                    opening_time: None,
                    closing_time: None,
                },
            );
            self
        }

        fn with_dish(mut self, dish: Dish) -> Self {
            self.dishes.insert(dish.id, dish);
            self
        }

        fn with_items(self, items: Vec<CartLineItem>) -> Self {
            let max_id = items.iter().map(|i| i.id.as_i32()).max().unwrap_or(0);
            self.next_line_id.store(max_id + 1, Ordering::SeqCst);
            *self.items.lock().expect("lock") = items;
            self
        }

        fn recorded_calls(&self) -> Vec<&'static str> {
            self.calls.lock().expect("lock").clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().expect("lock").push(call);
        }
    }

    #[async_trait::async_trait]
    impl RemoteStore for MockStore {
        async fn list_cart_items(&self) -> Result<Vec<CartLineItem>, StoreError> {
            self.record("list_cart_items");
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(StoreError::new(
                    StoreOp::ListCartItems,
                    StoreErrorKind::Network("connection refused".into()),
                ));
            }
            Ok(self.items.lock().expect("lock").clone())
        }

        async fn create_cart_item(
            &self,
            dish_id: DishId,
            restaurant_id: RestaurantId,
            quantity: u32,
        ) -> Result<CartLineItem, StoreError> {
            self.record("create_cart_item");
            let dish = self
                .dishes
                .get(&dish_id)
                .cloned()
                .ok_or_else(|| StoreError::new(StoreOp::CreateCartItem, StoreErrorKind::NotFound))?;
            assert_eq!(dish.restaurant, restaurant_id);
            let id = self.next_line_id.fetch_add(1, Ordering::SeqCst);
            let item = line(id, dish, quantity);
            self.items.lock().expect("lock").push(item.clone());
            Ok(item)
        }

        async fn update_cart_item(
            &self,
            id: CartItemId,
            quantity: u32,
        ) -> Result<CartLineItem, StoreError> {
            self.record("update_cart_item");
            let mut items = self.items.lock().expect("lock");
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::new(StoreOp::UpdateCartItem, StoreErrorKind::NotFound))?;
            item.quantity = quantity;
            Ok(item.clone())
        }

        async fn delete_cart_item(&self, id: CartItemId) -> Result<(), StoreError> {
            self.record("delete_cart_item");
            self.items.lock().expect("lock").retain(|i| i.id != id);
            Ok(())
        }

        async fn get_restaurant(
            &self,
            id: RestaurantId,
        ) -> Result<Restaurant, StoreError> {
            self.record("get_restaurant");
            self.restaurants
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::new(StoreOp::GetRestaurant, StoreErrorKind::NotFound))
        }

        async fn list_restaurants(
            &self,
        ) -> Result<Vec<Restaurant>, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn list_dishes(
            &self,
            _restaurant_id: RestaurantId,
        ) -> Result<Vec<Dish>, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn get_dish(&self, _id: DishId) -> Result<Dish, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn list_delivery_addresses(
            &self,
        ) -> Result<Vec<crate::store::types::DeliveryAddress>, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn create_delivery_address(
            &self,
            _new: &crate::store::types::NewDeliveryAddress,
        ) -> Result<crate::store::types::DeliveryAddress, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn create_order(
            &self,
            _submission: &crate::store::types::OrderSubmission,
        ) -> Result<crate::store::types::OrderReceipt, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn list_orders(&self) -> Result<Vec<crate::store::types::Order>, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn get_order(
            &self,
            _id: plateful_core::OrderId,
        ) -> Result<crate::store::types::Order, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn list_favorites(
            &self,
        ) -> Result<Vec<crate::store::types::FavoriteRestaurant>, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn toggle_favorite(
            &self,
            _restaurant_id: RestaurantId,
        ) -> Result<crate::store::types::FavoriteToggle, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn update_order_status(
            &self,
            _id: plateful_core::OrderId,
            _status: plateful_core::OrderStatus,
        ) -> Result<(), StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn create_dish(
            &self,
            _new: &crate::store::types::NewDish,
        ) -> Result<Dish, StoreError> {
            panic!("not exercised by cart tests")
        }

        async fn update_dish(
            &self,
            _id: DishId,
            _changes: &crate::store::types::DishChanges,
        ) -> Result<Dish, StoreError> {
            panic!("not exercised by cart tests")
        }
    }

    #[tokio::test]
    async fn test_load_groups_by_dish_restaurant() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_restaurant(2, "Thai Garden")
            .with_items(vec![
                line(10, dish(100, 1, 999), 2),
                line(11, dish(101, 2, 350), 1),
                line(12, dish(102, 1, 500), 1),
            ]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        let groups = cart.cart().groups();
        assert_eq!(groups.len(), 2);
        let first = groups.first().expect("first group");
        assert_eq!(first.restaurant_id, RestaurantId::new(1));
        assert_eq!(first.display_name(), "Noodle House");
        assert_eq!(first.items.len(), 2);
        let second = groups.get(1).expect("second group");
        assert_eq!(second.display_name(), "Thai Garden");
    }

    #[tokio::test]
    async fn test_count_is_distinct_line_items_not_quantity_sum() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_items(vec![
                line(10, dish(100, 1, 999), 5),
                line(11, dish(101, 1, 350), 3),
            ]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");
        assert_eq!(cart.count(), 2);
    }

    #[tokio::test]
    async fn test_group_total_rounds_once() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_items(vec![
                line(10, dish(100, 1, 999), 2),
                line(11, dish(101, 1, 350), 1),
            ]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");
        let group = cart.cart().groups().first().expect("group");
        assert_eq!(group.total(), Money::from_cents(2348));
    }

    #[tokio::test]
    async fn test_empty_cart_is_distinct_state() {
        let store = MockStore::default();
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");
        assert!(cart.cart().is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[tokio::test]
    async fn test_add_dish_conflict_reports_existing_name_without_mutation() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_dish(dish(200, 2, 800))
            .with_items(vec![line(10, dish(100, 1, 999), 1)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        let err = cart
            .add_dish(DishId::new(200), RestaurantId::new(2))
            .await
            .expect_err("conflict expected");
        match err {
            ClientError::ConflictingRestaurant {
                restaurant_id,
                restaurant_name,
            } => {
                assert_eq!(restaurant_id, RestaurantId::new(1));
                assert_eq!(restaurant_name, "Noodle House");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let calls = cart.store().recorded_calls();
        assert!(!calls.contains(&"create_cart_item"));
        assert!(!calls.contains(&"update_cart_item"));
        assert_eq!(cart.count(), 1);
    }

    #[tokio::test]
    async fn test_add_dish_confirmed_creates_second_group() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_restaurant(2, "Thai Garden")
            .with_dish(dish(200, 2, 800))
            .with_items(vec![line(10, dish(100, 1, 999), 1)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        cart.add_dish_confirmed(DishId::new(200), RestaurantId::new(2))
            .await
            .expect("forced add");
        assert_eq!(cart.cart().groups().len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[tokio::test]
    async fn test_add_existing_dish_increments_instead_of_duplicating() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_dish(dish(100, 1, 999))
            .with_items(vec![line(10, dish(100, 1, 999), 2)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        cart.add_dish(DishId::new(100), RestaurantId::new(1))
            .await
            .expect("add");
        assert_eq!(cart.count(), 1);
        let group = cart.cart().groups().first().expect("group");
        let item = group.items.first().expect("item");
        assert_eq!(item.quantity, 3);

        let calls = cart.store().recorded_calls();
        assert!(calls.contains(&"update_cart_item"));
        assert!(!calls.contains(&"create_cart_item"));
    }

    #[tokio::test]
    async fn test_update_quantity_zero_clamps_to_one() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_items(vec![line(10, dish(100, 1, 999), 2)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        cart.update_quantity(CartItemId::new(10), 0)
            .await
            .expect("update");
        let item = cart
            .cart()
            .groups()
            .first()
            .and_then(|g| g.items.first())
            .expect("item");
        assert_eq!(item.quantity, 1);
        assert_eq!(cart.count(), 1);
    }

    #[tokio::test]
    async fn test_remove_item_then_reload() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_items(vec![
                line(10, dish(100, 1, 999), 1),
                line(11, dish(101, 1, 350), 1),
            ]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        cart.remove_item(CartItemId::new(10)).await.expect("remove");
        assert_eq!(cart.count(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_previous_cart_untouched() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_items(vec![line(10, dish(100, 1, 999), 1)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");
        assert_eq!(cart.count(), 1);

        cart.store().fail_listing.store(true, Ordering::SeqCst);
        let err = cart.load().await.expect_err("listing failure");
        assert!(matches!(err, ClientError::Remote(_)));
        assert_eq!(cart.count(), 1, "previous cart must survive the failure");
    }

    #[tokio::test]
    async fn test_unresolvable_restaurant_gets_fallback_label() {
        // Restaurant 9 is not registered, so the name lookup fails
        let store = MockStore::default().with_items(vec![line(10, dish(100, 9, 999), 1)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("load");

        let group = cart.cart().groups().first().expect("group");
        assert_eq!(group.restaurant_name, None);
        assert_eq!(group.display_name(), "Restaurant 9");
    }

    #[tokio::test]
    async fn test_restaurant_name_is_cached_across_loads() {
        let store = MockStore::default()
            .with_restaurant(1, "Noodle House")
            .with_items(vec![line(10, dish(100, 1, 999), 1)]);
        let mut cart = CartAggregator::new(store);
        cart.load().await.expect("first load");
        cart.load().await.expect("second load");

        let lookups = cart
            .store()
            .recorded_calls()
            .iter()
            .filter(|&&c| c == "get_restaurant")
            .count();
        assert_eq!(lookups, 1);
    }
}
