//! Order assembler: turns one restaurant's cart group into a submitted
//! order.
//!
//! [`build_submission`] is pure validation and mapping; [`Checkout`] wraps
//! it in the per-group state machine the front end renders. A failed
//! submission never touches cart state, so a retry resubmits exactly what
//! the user saw.

use tracing::{info, instrument};

use plateful_core::AddressId;

use crate::cart::RestaurantCartGroup;
use crate::error::{ClientError, ValidationError};
use crate::store::RemoteStore;
use crate::store::types::{DeliveryAddress, OrderItemInput, OrderReceipt, OrderSubmission};

/// Where a checkout stands. One machine per restaurant group:
///
/// `BrowsingCart -> AddressSelected -> Submitting -> {Submitted | SubmitFailed}`
///
/// `SubmitFailed` goes back to `AddressSelected` through [`Checkout::retry`];
/// there is no automatic retry. `Submitted` is terminal - start a new
/// [`Checkout`] for the next order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    BrowsingCart,
    AddressSelected,
    Submitting,
    Submitted,
    SubmitFailed,
}

/// Build the order payload for one group.
///
/// Line items map to `{dish_id, quantity}` in group order.
///
/// # Errors
///
/// [`ValidationError::MissingDeliveryAddress`] when no address is selected,
/// [`ValidationError::EmptyGroup`] when the group has no items. Neither
/// issues a network call.
pub fn build_submission(
    group: &RestaurantCartGroup,
    delivery_address_id: Option<AddressId>,
) -> Result<OrderSubmission, ValidationError> {
    let delivery_address_id = delivery_address_id.ok_or(ValidationError::MissingDeliveryAddress)?;
    if group.is_empty() {
        return Err(ValidationError::EmptyGroup);
    }
    let items = group
        .items
        .iter()
        .map(|item| OrderItemInput {
            dish_id: item.dish.id,
            quantity: item.quantity,
        })
        .collect();
    Ok(OrderSubmission {
        restaurant_id: group.restaurant_id,
        delivery_address_id,
        items,
    })
}

/// Drives one group from address selection through submission.
///
/// The checkout never mutates the cart. On success the caller clears the
/// group (typically via a cart reload after the backend consumed it) and
/// renders the receipt; on failure the pre-submission group is intact and
/// [`Checkout::retry`] re-arms the machine.
pub struct Checkout<S> {
    store: S,
    state: CheckoutState,
    delivery_address_id: Option<AddressId>,
    receipt: Option<OrderReceipt>,
}

impl<S: RemoteStore> Checkout<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            state: CheckoutState::BrowsingCart,
            delivery_address_id: None,
            receipt: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    #[must_use]
    pub const fn delivery_address_id(&self) -> Option<AddressId> {
        self.delivery_address_id
    }

    /// The receipt of a completed submission, if any.
    #[must_use]
    pub const fn receipt(&self) -> Option<&OrderReceipt> {
        self.receipt.as_ref()
    }

    /// Select the delivery address for this order.
    pub fn select_address(&mut self, delivery_address_id: AddressId) {
        self.delivery_address_id = Some(delivery_address_id);
        self.state = CheckoutState::AddressSelected;
    }

    /// Select the account's default delivery address: the one flagged
    /// `is_default`, else the first on file. Returns the chosen address, or
    /// `None` when the account has none (the state is then unchanged).
    ///
    /// # Errors
    ///
    /// Returns a remote failure if the address listing fails.
    #[instrument(skip(self))]
    pub async fn select_default_address(
        &mut self,
    ) -> Result<Option<DeliveryAddress>, ClientError> {
        let addresses = self.store.list_delivery_addresses().await?;
        let chosen = addresses
            .iter()
            .position(|a| a.is_default)
            .unwrap_or(0);
        let Some(address) = addresses.into_iter().nth(chosen) else {
            return Ok(None);
        };
        self.select_address(address.id);
        Ok(Some(address))
    }

    /// User-initiated retry after a failed submission. A no-op in any other
    /// state.
    pub fn retry(&mut self) {
        if self.state == CheckoutState::SubmitFailed {
            self.state = CheckoutState::AddressSelected;
        }
    }

    /// Validate the group against the selected address and post the order.
    ///
    /// # Errors
    ///
    /// Validation failures leave the state where it was; a remote failure
    /// moves to [`CheckoutState::SubmitFailed`] and is retryable. Neither
    /// path mutates the cart.
    #[instrument(skip(self, group), fields(restaurant_id = %group.restaurant_id))]
    pub async fn submit(
        &mut self,
        group: &RestaurantCartGroup,
    ) -> Result<OrderReceipt, ClientError> {
        let submission = build_submission(group, self.delivery_address_id)?;
        self.state = CheckoutState::Submitting;
        match self.store.create_order(&submission).await {
            Ok(receipt) => {
                info!(order_id = %receipt.order_id, status = ?receipt.status, "Order placed");
                self.state = CheckoutState::Submitted;
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                self.state = CheckoutState::SubmitFailed;
                Err(e.into())
            }
        }
    }
}
