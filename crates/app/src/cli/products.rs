use cartwheel::{items::ProductId, products::Product, summary::to_money};
use cartwheel_app::{catalog::CatalogService, context::AppContext};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Show a single product instead of the whole list
    #[arg(long)]
    id: Option<u64>,
}

pub(crate) async fn run(ctx: &AppContext, args: ProductsArgs) -> Result<(), String> {
    let products = match args.id {
        Some(id) => vec![
            ctx.catalog
                .get_product(ProductId::new(id))
                .await
                .map_err(|error| format!("failed to fetch product: {error}"))?,
        ],
        None => ctx
            .catalog
            .list_products()
            .await
            .map_err(|error| format!("failed to list products: {error}"))?,
    };

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in &products {
        print_product(ctx, product)?;
    }

    Ok(())
}

fn print_product(ctx: &AppContext, product: &Product) -> Result<(), String> {
    let price = to_money(product.price, ctx.settings.currency)
        .map_err(|error| format!("failed to format price: {error}"))?;

    println!("{:>4}  {price}  {}", product.id, product.title);

    Ok(())
}
