use cartwheel::items::{NewLineItem, ProductId};
use cartwheel_app::{
    context::AppContext,
    domain::{
        carts::CartsServiceError,
        users::models::{Identity, IdentityProvider, UserId},
    },
    session::Session,
};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct DemoArgs {
    /// User id to run the walkthrough as
    #[arg(long, default_value = "demo-user")]
    user: String,
}

fn step(label: &str, total: Decimal) {
    println!("{label:<32} total {total}");
}

pub(crate) async fn run(ctx: &AppContext, args: DemoArgs) -> Result<(), String> {
    let identity = Identity {
        user_id: UserId::new(args.user),
        email: None,
        provider: IdentityProvider::Password,
    };

    let mut session = Session::sign_in(&identity, ctx.users.as_ref(), ctx.carts.clone())
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    let first = ProductId::new(1);
    let fail = |error: CartsServiceError| format!("demo step failed: {error}");

    session.clear().await.map_err(fail)?;

    let cart = session
        .add(NewLineItem::new(first, Decimal::from(100)).with_title("Notebook"))
        .await
        .map_err(fail)?;
    step("add notebook at 100", cart.total());

    let cart = session.increment(first).await.map_err(fail)?;
    step("increment notebook", cart.total());

    session.decrement(first).await.map_err(fail)?;
    let cart = session.decrement(first).await.map_err(fail)?;
    step("decrement notebook twice", cart.total());

    session
        .add(NewLineItem::new(2, Decimal::from(50)).with_title("Pen set"))
        .await
        .map_err(fail)?;
    let cart = session
        .add(NewLineItem::new(3, Decimal::new(755, 1)).with_title("Desk lamp"))
        .await
        .map_err(fail)?;
    step("add pen set and desk lamp", cart.total());

    println!();

    let cart = session.refresh().await.map_err(fail)?;
    crate::cli::print_cart(cart)?;

    session.logout();

    Ok(())
}
