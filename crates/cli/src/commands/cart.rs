//! Cart commands: show, add, set-quantity, remove.
//!
//! Every mutation goes through the [`CartAggregator`], so what gets printed
//! afterwards is always the server-reconciled cart.

use clap::Subcommand;

use plateful_client::ClientError;
use plateful_client::cart::{Cart, CartAggregator};
use plateful_client::store::RemoteStore;
use plateful_core::{CartItemId, DishId};

use super::{CliError, connect};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart, grouped by restaurant
    Show,
    /// Add one unit of a dish
    Add {
        /// Dish id
        dish_id: i32,

        /// Start an order with a new restaurant even if the cart already
        /// has items from another one
        #[arg(long)]
        force: bool,
    },
    /// Set a line item's quantity (minimum 1)
    SetQuantity {
        /// Cart line item id
        item_id: i32,
        quantity: u32,
    },
    /// Remove a line item
    Remove {
        /// Cart line item id
        item_id: i32,
    },
}

pub async fn run(action: CartAction) -> Result<(), CliError> {
    let store = connect()?;
    let mut cart = CartAggregator::new(store);
    cart.load().await?;

    match action {
        CartAction::Show => {}
        CartAction::Add { dish_id, force } => {
            let dish = cart.store().get_dish(DishId::new(dish_id)).await?;
            let result = if force {
                cart.add_dish_confirmed(dish.id, dish.restaurant).await
            } else {
                cart.add_dish(dish.id, dish.restaurant).await
            };
            match result {
                Ok(_) => println!("Added {}.", dish.name),
                Err(ClientError::ConflictingRestaurant {
                    restaurant_name, ..
                }) => {
                    return Err(CliError::Usage(format!(
                        "your cart already has items from {restaurant_name}; \
                         pass --force to start a new order with this restaurant"
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }
        CartAction::SetQuantity { item_id, quantity } => {
            cart.update_quantity(CartItemId::new(item_id), quantity)
                .await?;
        }
        CartAction::Remove { item_id } => {
            cart.remove_item(CartItemId::new(item_id)).await?;
        }
    }

    print_cart(cart.cart());
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for group in cart.groups() {
        println!("{}", group.display_name());
        for item in &group.items {
            println!(
                "{:>5}  {:<30} x{:<3} {:>8}",
                item.id,
                item.dish.name,
                item.quantity,
                item.line_total()
            );
        }
        println!("       group total: {}", group.total());
    }
    println!();
    println!("{} item(s) in cart", cart.count());
}
