use cartwheel::{cart::Cart, items::ProductId};
use cartwheel_app::{context::AppContext, domain::carts::CartsServiceError};
use clap::Args;

use super::UserArgs;

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    #[command(flatten)]
    user: UserArgs,

    /// Product id of the cart line
    #[arg(long)]
    product: u64,
}

fn report(result: Result<&Cart, CartsServiceError>) -> Result<(), String> {
    let cart = result.map_err(|error| format!("failed to update cart: {error}"))?;

    crate::cli::print_cart(cart)
}

pub(crate) async fn increment(ctx: &AppContext, args: ProductArgs) -> Result<(), String> {
    let mut session = args.user.session(ctx);

    report(session.increment(ProductId::new(args.product)).await)
}

pub(crate) async fn decrement(ctx: &AppContext, args: ProductArgs) -> Result<(), String> {
    let mut session = args.user.session(ctx);

    report(session.decrement(ProductId::new(args.product)).await)
}

pub(crate) async fn remove(ctx: &AppContext, args: ProductArgs) -> Result<(), String> {
    let mut session = args.user.session(ctx);

    report(session.remove(ProductId::new(args.product)).await)
}
