//! REST implementation of the remote store.
//!
//! Plain REST + JSON over `reqwest`. Authenticated calls send the issued
//! token as `Authorization: Token <key>`; decimals travel as strings and are
//! handled by the serde attributes on the wire types.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use plateful_core::{
    AccountKind, CartItemId, CustomerId, DishId, OrderId, OrderStatus, RestaurantId,
};

use crate::config::{ClientConfig, ConfigError};
use crate::session::{Credentials, Session};

use super::types::{
    CartLineItem, DeliveryAddress, Dish, DishChanges, FavoriteRestaurant, FavoriteToggle,
    NewDeliveryAddress, NewDish, Order, OrderReceipt, OrderSubmission, Restaurant,
};
use super::{RemoteStore, StoreError, StoreErrorKind, StoreOp};

const ERROR_BODY_PREVIEW: usize = 200;

/// REST client for the food-ordering API.
///
/// Cheaply cloneable; all state lives behind an `Arc`. The session is fixed
/// at construction - [`RestStore::with_session`] produces an authenticated
/// handle after login.
#[derive(Clone)]
pub struct RestStore {
    inner: Arc<RestStoreInner>,
}

struct RestStoreInner {
    http: reqwest::Client,
    base: Url,
    session: Option<Session>,
}

// Wire-only response envelopes.

#[derive(Deserialize)]
struct CustomerLoginResponse {
    token: String,
    #[serde(default)]
    user: Option<CustomerProfile>,
}

#[derive(Deserialize)]
struct CustomerProfile {
    id: CustomerId,
}

#[derive(Deserialize)]
struct RestaurantLoginResponse {
    token: String,
    restaurant_id: RestaurantId,
}

#[derive(Deserialize)]
struct ToggleFavoriteResponse {
    status: FavoriteToggle,
}

impl RestStore {
    /// Create an unauthenticated client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let session = config
            .api_token
            .clone()
            .map(|token| Session::from_token(token, AccountKind::Customer));

        Ok(Self {
            inner: Arc::new(RestStoreInner {
                http,
                base: config.api_url.clone(),
                session,
            }),
        })
    }

    /// A handle bound to the given session.
    #[must_use]
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            inner: Arc::new(RestStoreInner {
                http: self.inner.http.clone(),
                base: self.inner.base.clone(),
                session: Some(session),
            }),
        }
    }

    /// The session this handle authenticates as, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.inner.session.as_ref()
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in a customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login_customer(&self, credentials: &Credentials) -> Result<Session, StoreError> {
        let body = serde_json::json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });
        let response: CustomerLoginResponse = self
            .post_json(StoreOp::Login, "customers/login/", &body)
            .await?;
        Ok(Session::customer(
            response.token.into(),
            response.user.map(|u| u.id),
        ))
    }

    /// Log in a restaurant account.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, the account has no
    /// restaurant, or the request fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login_restaurant(&self, credentials: &Credentials) -> Result<Session, StoreError> {
        let body = serde_json::json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });
        let response: RestaurantLoginResponse = self
            .post_json(StoreOp::Login, "restaurants/login/", &body)
            .await?;
        Ok(Session::restaurant(
            response.token.into(),
            response.restaurant_id,
        ))
    }

    /// Register a customer account; the backend logs the account in and
    /// returns a token immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or email is taken or the request
    /// fails.
    #[instrument(skip(self, credentials, email), fields(username = %credentials.username))]
    pub async fn signup_customer(
        &self,
        credentials: &Credentials,
        email: &str,
    ) -> Result<Session, StoreError> {
        let body = serde_json::json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
            "email": email,
        });
        let response: CustomerLoginResponse = self
            .post_json(StoreOp::Signup, "customers/signup/", &body)
            .await?;
        Ok(Session::customer(
            response.token.into(),
            response.user.map(|u| u.id),
        ))
    }

    /// Register a restaurant account.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is rejected or the request fails.
    #[instrument(skip_all, fields(username = %credentials.username, restaurant_name = %restaurant_name))]
    pub async fn signup_restaurant(
        &self,
        credentials: &Credentials,
        email: &str,
        restaurant_name: &str,
        address: &str,
        phone_number: &str,
    ) -> Result<Session, StoreError> {
        let body = serde_json::json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
            "email": email,
            "restaurant_name": restaurant_name,
            "address": address,
            "phone_number": phone_number,
        });
        let response: RestaurantLoginResponse = self
            .post_json(StoreOp::Signup, "restaurants/signup/", &body)
            .await?;
        Ok(Session::restaurant(
            response.token.into(),
            response.restaurant_id,
        ))
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn endpoint(&self, op: StoreOp, path: &str) -> Result<Url, StoreError> {
        self.inner.base.join(path).map_err(|e| {
            StoreError::new(op, StoreErrorKind::Network(format!("invalid url: {e}")))
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.session {
            Some(session) => request.header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", session.token().expose_secret()),
            ),
            None => request,
        }
    }

    async fn send(
        &self,
        op: StoreOp,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::new(op, StoreErrorKind::Network(e.to_string())))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let kind = match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                StoreErrorKind::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => StoreErrorKind::NotFound,
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_default()
                    .chars()
                    .take(ERROR_BODY_PREVIEW)
                    .collect::<String>();
                tracing::error!(%op, status = %status, body = %message, "API returned non-success status");
                StoreErrorKind::Server {
                    status: status.as_u16(),
                    message,
                }
            }
        };
        Err(StoreError::new(op, kind))
    }

    async fn decode<T: DeserializeOwned>(
        op: StoreOp,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!(%op, error = %e, "Failed to parse API response");
            StoreError::new(
                op,
                StoreErrorKind::Network(format!("invalid response body: {e}")),
            )
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, op: StoreOp, path: &str) -> Result<T, StoreError> {
        let url = self.endpoint(op, path)?;
        let response = self.send(op, self.inner.http.get(url)).await?;
        Self::decode(op, response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        op: StoreOp,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(op, path)?;
        let response = self.send(op, self.inner.http.post(url).json(body)).await?;
        Self::decode(op, response).await
    }

    async fn patch_json<T: DeserializeOwned>(
        &self,
        op: StoreOp,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(op, path)?;
        let response = self.send(op, self.inner.http.patch(url).json(body)).await?;
        Self::decode(op, response).await
    }

    async fn put_json<T: DeserializeOwned>(
        &self,
        op: StoreOp,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, StoreError> {
        let url = self.endpoint(op, path)?;
        let response = self.send(op, self.inner.http.put(url).json(body)).await?;
        Self::decode(op, response).await
    }
}

#[async_trait::async_trait]
impl RemoteStore for RestStore {
    #[instrument(skip(self))]
    async fn list_cart_items(&self) -> Result<Vec<CartLineItem>, StoreError> {
        self.get_json(StoreOp::ListCartItems, "cart-items/").await
    }

    #[instrument(skip(self), fields(dish_id = %dish_id, restaurant_id = %restaurant_id))]
    async fn create_cart_item(
        &self,
        dish_id: DishId,
        restaurant_id: RestaurantId,
        quantity: u32,
    ) -> Result<CartLineItem, StoreError> {
        let body = serde_json::json!({
            "dish_id": dish_id,
            "restaurant_id": restaurant_id,
            "quantity": quantity,
        });
        self.post_json(StoreOp::CreateCartItem, "cart-items/add_to_cart/", &body)
            .await
    }

    #[instrument(skip(self), fields(id = %id, quantity = quantity))]
    async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<CartLineItem, StoreError> {
        let body = serde_json::json!({ "quantity": quantity });
        self.patch_json(StoreOp::UpdateCartItem, &format!("cart-items/{id}/"), &body)
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_cart_item(&self, id: CartItemId) -> Result<(), StoreError> {
        let op = StoreOp::DeleteCartItem;
        let url = self.endpoint(op, &format!("cart-items/{id}/"))?;
        self.send(op, self.inner.http.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant, StoreError> {
        self.get_json(StoreOp::GetRestaurant, &format!("restaurants/{id}/"))
            .await
    }

    #[instrument(skip(self))]
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.get_json(StoreOp::ListRestaurants, "restaurants/")
            .await
    }

    #[instrument(skip(self), fields(restaurant_id = %restaurant_id))]
    async fn list_dishes(&self, restaurant_id: RestaurantId) -> Result<Vec<Dish>, StoreError> {
        self.get_json(
            StoreOp::ListDishes,
            &format!("restaurants/{restaurant_id}/dishes/"),
        )
        .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_dish(&self, id: DishId) -> Result<Dish, StoreError> {
        // The dish endpoint answers with a single-element array
        let dishes: Vec<Dish> = self
            .get_json(StoreOp::GetDish, &format!("dishes/getDish?dishId={id}"))
            .await?;
        dishes
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::new(StoreOp::GetDish, StoreErrorKind::NotFound))
    }

    #[instrument(skip(self))]
    async fn list_delivery_addresses(&self) -> Result<Vec<DeliveryAddress>, StoreError> {
        self.get_json(StoreOp::ListDeliveryAddresses, "delivery-addresses/")
            .await
    }

    #[instrument(skip(self, new))]
    async fn create_delivery_address(
        &self,
        new: &NewDeliveryAddress,
    ) -> Result<DeliveryAddress, StoreError> {
        self.post_json(StoreOp::CreateDeliveryAddress, "delivery-addresses/", new)
            .await
    }

    #[instrument(skip(self, submission), fields(restaurant_id = %submission.restaurant_id))]
    async fn create_order(&self, submission: &OrderSubmission) -> Result<OrderReceipt, StoreError> {
        self.post_json(StoreOp::CreateOrder, "orders/place_order/", submission)
            .await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.get_json(StoreOp::ListOrders, "orders/").await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_order(&self, id: OrderId) -> Result<Order, StoreError> {
        self.get_json(StoreOp::GetOrder, &format!("orders/getOrderDetail?orderId={id}"))
            .await
    }

    #[instrument(skip(self))]
    async fn list_favorites(&self) -> Result<Vec<FavoriteRestaurant>, StoreError> {
        self.get_json(StoreOp::ListFavorites, "favorite-restaurants/")
            .await
    }

    #[instrument(skip(self), fields(restaurant_id = %restaurant_id))]
    async fn toggle_favorite(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<FavoriteToggle, StoreError> {
        let body = serde_json::json!({ "restaurant_id": restaurant_id });
        let response: ToggleFavoriteResponse = self
            .post_json(
                StoreOp::ToggleFavorite,
                "favorite-restaurants/toggle_favorite/",
                &body,
            )
            .await?;
        Ok(response.status)
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let op = StoreOp::UpdateOrderStatus;
        let body = serde_json::json!({ "orderId": id, "status": status });
        let url = self.endpoint(op, "orders/updateOrderStatus/")?;
        self.send(op, self.inner.http.post(url).json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    async fn create_dish(&self, new: &NewDish) -> Result<Dish, StoreError> {
        self.post_json(StoreOp::CreateDish, "dishes/createDish/", new)
            .await
    }

    #[instrument(skip(self, changes), fields(id = %id))]
    async fn update_dish(&self, id: DishId, changes: &DishChanges) -> Result<Dish, StoreError> {
        self.put_json(
            StoreOp::UpdateDish,
            &format!("dishes/editDish/?dishId={id}"),
            changes,
        )
        .await
    }
}
