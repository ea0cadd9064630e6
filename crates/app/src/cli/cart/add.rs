use cartwheel::items::ProductId;
use cartwheel_app::{catalog::CatalogService, context::AppContext};
use clap::Args;
use tracing::info;

use super::UserArgs;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[command(flatten)]
    user: UserArgs,

    /// Catalog product id
    #[arg(long)]
    product: u64,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

pub(crate) async fn run(ctx: &AppContext, args: AddArgs) -> Result<(), String> {
    let product = ctx
        .catalog
        .get_product(ProductId::new(args.product))
        .await
        .map_err(|error| format!("failed to fetch product: {error}"))?;

    info!(product = %product.id, title = %product.title, "adding product");

    let mut session = args.user.session(ctx);

    let cart = session
        .add(product.to_line_item().with_quantity(args.quantity))
        .await
        .map_err(|error| format!("failed to add product: {error}"))?;

    crate::cli::print_cart(cart)
}
