use std::io;

use cartwheel::{cart::Cart, summary};
use cartwheel_app::{config::AppConfig, context::AppContext, observability};
use clap::{Parser, Subcommand};

mod cart;
mod demo;
mod products;
mod user;

#[derive(Debug, Parser)]
#[command(name = "cartwheel", about = "Cartwheel shopping cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(products::ProductsArgs),

    /// Manage user records
    User(user::UserCommand),

    /// Inspect and change a user's cart
    Cart(cart::CartCommand),

    /// Walk a sample cart through add, increment, decrement and totals
    Demo(demo::DemoArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging).map_err(|error| error.to_string())?;

        let ctx = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to initialise: {error}"))?;

        match self.command {
            Commands::Products(args) => products::run(&ctx, args).await,
            Commands::User(command) => user::run(&ctx, command).await,
            Commands::Cart(command) => cart::run(&ctx, command).await,
            Commands::Demo(args) => demo::run(&ctx, args).await,
        }
    }
}

pub(crate) fn print_cart(cart: &Cart) -> Result<(), String> {
    summary::write_to(cart, io::stdout().lock())
        .map_err(|error| format!("failed to print cart: {error}"))
}
