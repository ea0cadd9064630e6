use cartwheel_app::context::AppContext;
use clap::{Args, Subcommand};

mod create;
mod login;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Sign up a user with an empty cart
    Create(create::CreateUserArgs),

    /// Sign in, creating the user record on first use
    Login(login::LoginArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(ctx, args).await,
        UserSubcommand::Login(args) => login::run(ctx, args).await,
    }
}
