//! Delivery address management.

use clap::Subcommand;

use plateful_client::store::RemoteStore;
use plateful_client::store::types::NewDeliveryAddress;

use super::{CliError, connect};

#[derive(Subcommand)]
pub enum AddressAction {
    /// List delivery addresses
    List,
    /// Add a delivery address
    Add {
        #[arg(long)]
        line1: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        state: String,

        #[arg(long)]
        postal_code: String,

        #[arg(long, default_value = "USA")]
        country: String,

        /// Make this the default address for checkout
        #[arg(long)]
        default: bool,
    },
}

pub async fn run(action: AddressAction) -> Result<(), CliError> {
    let store = connect()?;
    match action {
        AddressAction::List => {
            let addresses = store.list_delivery_addresses().await?;
            if addresses.is_empty() {
                println!("No delivery addresses on file.");
                return Ok(());
            }
            for address in addresses {
                let marker = if address.is_default { " (default)" } else { "" };
                println!(
                    "{:>5}  {}, {}, {} {}{marker}",
                    address.id,
                    address.address_line1,
                    address.city,
                    address.state,
                    address.postal_code
                );
            }
        }
        AddressAction::Add {
            line1,
            city,
            state,
            postal_code,
            country,
            default,
        } => {
            let created = store
                .create_delivery_address(&NewDeliveryAddress {
                    address_line1: line1,
                    city,
                    state,
                    postal_code,
                    country,
                    is_default: default,
                })
                .await?;
            println!("Added address {}.", created.id);
        }
    }
    Ok(())
}
