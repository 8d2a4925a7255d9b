use clap::Args;
use larder_app::{auth::SignupForm, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct SignupArgs {
    /// Full name
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    /// Mobile number
    #[arg(long)]
    mobile: String,

    #[arg(long, env = "LARDER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Repeat the password
    #[arg(long, env = "LARDER_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: String,

    /// Agree to the terms and conditions
    #[arg(long)]
    agree_terms: bool,
}

pub(crate) async fn run(ctx: &AppContext, args: SignupArgs) -> Result<(), String> {
    let form = SignupForm {
        full_name: args.name,
        email: args.email,
        mobile: args.mobile,
        password: args.password,
        confirm_password: args.confirm_password,
        agree_terms: args.agree_terms,
    };

    let session = ctx
        .auth
        .signup(form)
        .await
        .map_err(|error| format!("signup failed: {error}"))?;

    session
        .save_to(&ctx.store)
        .map_err(|error| format!("failed to save session: {error}"))?;

    println!("Signup successful. Signed in as {}.", session.identifier);

    Ok(())
}
