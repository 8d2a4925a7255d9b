use clap::{Args, Subcommand, ValueEnum};
use larder::checkout::AddressField;
use larder_app::context::AppContext;

use super::render;

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// Set one address field
    Set(SetArgs),
    /// Remember the address for next time, or forget it
    Remember(RememberArgs),
    /// Show the address and whether an order can be placed
    Show,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// street, city, state, pincode or phone
    field: AddressField,

    value: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Debug, Args)]
struct RememberArgs {
    #[arg(value_enum)]
    toggle: Toggle,
}

pub(crate) fn run(ctx: &AppContext, command: AddressCommand) -> Result<(), String> {
    let mut storefront = ctx.storefront().map_err(|error| error.to_string())?;

    match command.command {
        AddressSubcommand::Set(args) => storefront
            .update_address_field(args.field, args.value)
            .map_err(|error| format!("failed to update address: {error}"))?,
        AddressSubcommand::Remember(args) => storefront
            .toggle_remember(matches!(args.toggle, Toggle::On))
            .map_err(|error| format!("failed to update address: {error}"))?,
        AddressSubcommand::Show => {}
    }

    let rendered = render::address(storefront.checkout()).map_err(|error| error.to_string())?;

    print!("{rendered}");

    Ok(())
}
