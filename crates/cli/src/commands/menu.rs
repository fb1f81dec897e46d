//! Restaurant-side menu management.

use clap::Subcommand;

use plateful_client::store::RemoteStore;
use plateful_client::store::types::{DishChanges, NewDish};
use plateful_core::{DishCategory, DishId, Money};

use super::{CliError, connect};

#[derive(Subcommand)]
pub enum MenuAction {
    /// Add a dish to the menu
    Add {
        #[arg(long)]
        name: String,

        /// Price in dollars, e.g. 9.99
        #[arg(long)]
        price: String,

        /// One of: Appetizer, Salad, "Main Course", Dessert, Beverage
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        ingredients: Option<String>,
    },
    /// Update fields on an existing dish
    Update {
        /// Dish id
        id: i32,

        #[arg(long)]
        name: Option<String>,

        /// Price in dollars, e.g. 9.99
        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        ingredients: Option<String>,
    },
}

fn parse_price(s: &str) -> Result<Money, CliError> {
    s.parse()
        .map_err(|_| CliError::Usage(format!("invalid price: {s}")))
}

fn parse_category(s: &str) -> Result<DishCategory, CliError> {
    s.parse().map_err(CliError::Usage)
}

pub async fn run(action: MenuAction) -> Result<(), CliError> {
    let store = connect()?;
    match action {
        MenuAction::Add {
            name,
            price,
            category,
            description,
            ingredients,
        } => {
            let dish = store
                .create_dish(&NewDish {
                    name,
                    price: parse_price(&price)?,
                    category: parse_category(&category)?,
                    description,
                    ingredients,
                })
                .await?;
            println!("Added dish {}: {} ({})", dish.id, dish.name, dish.price);
        }
        MenuAction::Update {
            id,
            name,
            price,
            category,
            description,
            ingredients,
        } => {
            let changes = DishChanges {
                name,
                price: price.as_deref().map(parse_price).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                description,
                ingredients,
            };
            let dish = store.update_dish(DishId::new(id), &changes).await?;
            println!("Updated dish {}: {} ({})", dish.id, dish.name, dish.price);
        }
    }
    Ok(())
}
