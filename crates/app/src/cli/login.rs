use clap::Args;
use larder_app::{auth::Credentials, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Email address or mobile number
    identifier: String,

    #[arg(env = "LARDER_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let session = ctx
        .auth
        .login(Credentials::new(args.identifier, args.password))
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    session
        .save_to(&ctx.store)
        .map_err(|error| format!("failed to save session: {error}"))?;

    println!("Signed in as {}.", session.identifier);

    Ok(())
}
