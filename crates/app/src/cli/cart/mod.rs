use cartwheel_app::{context::AppContext, domain::users::models::UserId, session::Session};
use clap::{Args, Subcommand};

mod add;
mod change;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its total
    Show(UserArgs),

    /// Add a catalog product to the cart
    Add(add::AddArgs),

    /// Add one unit of a product already in the cart
    Increment(change::ProductArgs),

    /// Remove one unit of a product, dropping the line at zero
    Decrement(change::ProductArgs),

    /// Remove a product's line
    Remove(change::ProductArgs),

    /// Empty the cart
    Clear(UserArgs),
}

#[derive(Debug, Args)]
pub(crate) struct UserArgs {
    /// User whose cart to use
    #[arg(long)]
    user: String,
}

impl UserArgs {
    pub(crate) fn session(&self, ctx: &AppContext) -> Session {
        Session::new(UserId::new(self.user.clone()), ctx.carts.clone())
    }
}

pub(crate) async fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show(ctx, args).await,
        CartSubcommand::Add(args) => add::run(ctx, args).await,
        CartSubcommand::Increment(args) => change::increment(ctx, args).await,
        CartSubcommand::Decrement(args) => change::decrement(ctx, args).await,
        CartSubcommand::Remove(args) => change::remove(ctx, args).await,
        CartSubcommand::Clear(args) => clear(ctx, args).await,
    }
}

async fn show(ctx: &AppContext, args: UserArgs) -> Result<(), String> {
    let mut session = args.session(ctx);

    let cart = session
        .cart()
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    super::print_cart(cart)
}

async fn clear(ctx: &AppContext, args: UserArgs) -> Result<(), String> {
    let mut session = args.session(ctx);

    let cart = session
        .clear()
        .await
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    super::print_cart(cart)
}
