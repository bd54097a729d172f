//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Product id (e.g. `cake-1`).
    pub product: String,

    /// Display name of the product.
    #[arg(short, long)]
    pub title: String,

    /// Unit price in minor currency units.
    #[arg(short, long)]
    pub price: i64,

    /// Selected variant, e.g. a flavor.
    #[arg(long)]
    pub variant: Option<String>,

    /// Quantity to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Image reference.
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the update command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Line item id (e.g. `cake-1-vanilla`).
    pub id: String,

    /// New quantity; zero or less removes the item.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the remove command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Line item id.
    pub id: String,
}

/// Arguments for the clear command.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the draft without clearing the cart.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default bakery.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
