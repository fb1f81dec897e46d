//! Checkout and order history, plus restaurant-side status updates.

use clap::Subcommand;

use plateful_client::cart::CartAggregator;
use plateful_client::order::Checkout;
use plateful_client::store::RemoteStore;
use plateful_core::{AddressId, OrderId, OrderStatus, RestaurantId};

use super::{CliError, connect};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List past orders
    List,
    /// Show one order in detail
    Show {
        /// Order id
        id: i32,
    },
    /// Update an order's status (restaurant accounts)
    SetStatus {
        /// Order id
        id: i32,

        /// One of: new, preparing, on_the_way, delivered, cancelled,
        /// pickup_ready, picked_up
        status: String,
    },
}

pub async fn checkout(restaurant_id: i32, address_id: Option<i32>) -> Result<(), CliError> {
    let store = connect()?;
    let restaurant_id = RestaurantId::new(restaurant_id);

    let mut cart = CartAggregator::new(store.clone());
    cart.load().await?;
    let Some(group) = cart.cart().group(restaurant_id) else {
        return Err(CliError::Usage(format!(
            "no cart items for restaurant {restaurant_id}"
        )));
    };

    let mut checkout = Checkout::new(store);
    match address_id {
        Some(id) => checkout.select_address(AddressId::new(id)),
        None => {
            let chosen = checkout.select_default_address().await?;
            match chosen {
                Some(address) => {
                    println!("Delivering to {}, {}", address.address_line1, address.city);
                }
                None => {
                    return Err(CliError::Usage(
                        "no delivery address on file; add one with `plateful addresses add`"
                            .to_string(),
                    ));
                }
            }
        }
    }

    let receipt = checkout.submit(group).await?;
    println!(
        "Order {} placed ({}). Total was {}.",
        receipt.order_id,
        receipt.status,
        group.total()
    );
    Ok(())
}

pub async fn run(action: OrderAction) -> Result<(), CliError> {
    let store = connect()?;
    match action {
        OrderAction::List => {
            let orders = store.list_orders().await?;
            if orders.is_empty() {
                println!("No orders yet.");
                return Ok(());
            }
            for order in orders {
                let restaurant = order
                    .restaurant
                    .map(|r| r.name)
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>5}  {:<24} {:>8}  {:<14} {}",
                    order.id,
                    restaurant,
                    order.total_price,
                    order.status,
                    order.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        OrderAction::Show { id } => {
            let order = store.get_order(OrderId::new(id)).await?;
            println!("Order {}", order.id);
            if let Some(restaurant) = &order.restaurant {
                println!("  from:   {}", restaurant.name);
            }
            println!("  status: {}", order.status);
            println!("  placed: {}", order.created_at.format("%Y-%m-%d %H:%M"));
            for item in &order.items {
                println!(
                    "    {:<30} x{:<3} {:>8}",
                    item.dish.name,
                    item.quantity,
                    item.dish.price.times(item.quantity)
                );
            }
            println!("  total:  {}", order.total_price);
        }
        OrderAction::SetStatus { id, status } => {
            let status: OrderStatus = status
                .parse()
                .map_err(CliError::Usage)?;
            store.update_order_status(OrderId::new(id), status).await?;
            println!("Order {id} is now: {status}");
        }
    }
    Ok(())
}
