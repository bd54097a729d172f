//! Bakery CLI - Command line front end for the persisted shopping cart.
//!
//! Commands:
//! - `bakery add` - Add a product (optionally a variant) to the cart
//! - `bakery update` - Set the quantity of a line item
//! - `bakery remove` - Remove a line item
//! - `bakery clear` - Empty the cart
//! - `bakery show` - Show the cart and its totals
//! - `bakery checkout` - Turn the cart into an order draft
//! - `bakery config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// Bakery CLI - Manage the storefront shopping cart
#[derive(Parser)]
#[command(name = "bakery")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Use this customer's cart instead of the anonymous one
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Set the quantity of a line item
    Update(UpdateArgs),

    /// Remove a line item
    Remove(RemoveArgs),

    /// Remove every line item
    Clear(ClearArgs),

    /// Show cart contents and totals
    Show,

    /// Build an order draft and empty the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.user, output)?;

    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Update(args) => commands::cart::update(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_negative_quantity() {
        let cli = Cli::try_parse_from(["bakery", "update", "cake-1-vanilla", "-1"]).unwrap();
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.id, "cake-1-vanilla");
                assert_eq!(args.quantity, -1);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_parse_add_with_global_user() {
        let cli = Cli::try_parse_from([
            "bakery", "add", "cake-1", "--title", "Cake", "--price", "1000", "--variant",
            "vanilla", "--user", "alice",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.quantity, 1);
                assert_eq!(args.variant.as_deref(), Some("vanilla"));
            }
            _ => panic!("expected add"),
        }
    }
}
