use cartwheel_app::{
    context::AppContext,
    domain::users::models::{Identity, IdentityProvider, UserId},
    session::Session,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// User id handed over by the identity provider
    #[arg(long)]
    user: String,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Identity provider
    #[arg(long, value_enum, default_value_t = IdentityProvider::Google)]
    provider: IdentityProvider,
}

pub(crate) async fn run(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let identity = Identity {
        user_id: UserId::new(args.user),
        email: args.email,
        provider: args.provider,
    };

    let mut session = Session::sign_in(&identity, ctx.users.as_ref(), ctx.carts.clone())
        .await
        .map_err(|error| format!("failed to sign in: {error}"))?;

    let lines = session
        .cart()
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?
        .len();

    println!("user_id: {}", session.user());
    println!("session: {}", session.uuid());
    println!("cart_lines: {lines}");

    session.logout();

    Ok(())
}
