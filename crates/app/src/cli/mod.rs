use clap::{Parser, Subcommand};
use larder_app::{config::AppConfig, context::AppContext, observability};

mod address;
mod cart;
mod login;
mod order;
mod render;
mod search;
mod signup;
mod voucher;

#[derive(Debug, Parser)]
#[command(name = "larder", about = "Larder storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog
    Search(search::SearchArgs),
    /// Change or show the cart
    Cart(cart::CartCommand),
    /// Redeem a voucher code
    Voucher(voucher::VoucherArgs),
    /// Fill in the shipping address
    Address(address::AddressCommand),
    /// Place the order for the current cart
    Order,
    /// Sign in
    Login(login::LoginArgs),
    /// Create an account and sign in
    Signup(signup::SignupArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| error.to_string())?;

        let ctx = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Search(args) => search::run(&ctx, args).await,
            Commands::Cart(command) => cart::run(&ctx, command).await,
            Commands::Voucher(args) => voucher::run(&ctx, &args),
            Commands::Address(command) => address::run(&ctx, command),
            Commands::Order => order::run(&ctx),
            Commands::Login(args) => login::run(&ctx, args).await,
            Commands::Signup(args) => signup::run(&ctx, args).await,
        }
    }
}
