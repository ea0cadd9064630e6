use cartwheel_app::{
    context::AppContext,
    domain::users::{
        UsersService,
        models::{IdentityProvider, NewUser, UserId},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// User id
    #[arg(long)]
    user: String,

    /// Contact email
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(ctx: &AppContext, args: CreateUserArgs) -> Result<(), String> {
    let user = ctx
        .users
        .create_user(NewUser {
            id: UserId::new(args.user),
            email: Some(args.email),
            provider: IdentityProvider::Password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("email: {}", user.email.as_deref().unwrap_or("none"));

    Ok(())
}
