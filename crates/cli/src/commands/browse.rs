//! Restaurant browsing and favorites.

use clap::Subcommand;

use plateful_client::store::RemoteStore;
use plateful_client::store::types::FavoriteToggle;
use plateful_core::RestaurantId;

use super::{CliError, connect};

#[derive(Subcommand)]
pub enum RestaurantAction {
    /// List all restaurants
    List,
    /// Show a restaurant's menu
    Menu {
        /// Restaurant id
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// List favorite restaurants
    List,
    /// Add or remove a restaurant from favorites
    Toggle {
        /// Restaurant id
        id: i32,
    },
}

pub async fn restaurants(action: RestaurantAction) -> Result<(), CliError> {
    let store = connect()?;
    match action {
        RestaurantAction::List => {
            let restaurants = store.list_restaurants().await?;
            if restaurants.is_empty() {
                println!("No restaurants found.");
                return Ok(());
            }
            for r in restaurants {
                let hours = match (&r.opening_time, &r.closing_time) {
                    (Some(open), Some(close)) => format!("  ({open} - {close})"),
                    _ => String::new(),
                };
                println!("{:>5}  {}{hours}", r.id, r.name);
                if let Some(description) = &r.description {
                    println!("       {description}");
                }
            }
        }
        RestaurantAction::Menu { id } => {
            let restaurant_id = RestaurantId::new(id);
            let restaurant = store.get_restaurant(restaurant_id).await?;
            let dishes = store.list_dishes(restaurant_id).await?;
            println!("{} - menu", restaurant.name);
            if dishes.is_empty() {
                println!("  (no dishes)");
                return Ok(());
            }
            for dish in dishes {
                let category = dish
                    .category
                    .map(|c| format!("  [{c}]"))
                    .unwrap_or_default();
                println!("{:>5}  {:<30} {:>8}{category}", dish.id, dish.name, dish.price);
            }
        }
    }
    Ok(())
}

pub async fn favorites(action: FavoriteAction) -> Result<(), CliError> {
    let store = connect()?;
    match action {
        FavoriteAction::List => {
            let favorites = store.list_favorites().await?;
            if favorites.is_empty() {
                println!("No favorite restaurants.");
                return Ok(());
            }
            for favorite in favorites {
                println!("{:>5}  {}", favorite.restaurant.id, favorite.restaurant.name);
            }
        }
        FavoriteAction::Toggle { id } => {
            match store.toggle_favorite(RestaurantId::new(id)).await? {
                FavoriteToggle::Added => println!("Added restaurant {id} to favorites."),
                FavoriteToggle::Removed => println!("Removed restaurant {id} from favorites."),
            }
        }
    }
    Ok(())
}
