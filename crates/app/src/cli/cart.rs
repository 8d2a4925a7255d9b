use clap::{Args, Subcommand};
use larder::{
    products::ProductId,
    stock::{PLACEHOLDER_STOCK_LEVEL, QuantitySelector},
};
use larder_app::{
    catalog::{find_by_id, first_match},
    context::AppContext,
};

use super::render;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product found by searching the catalog
    Add(AddArgs),
    /// Step a line's quantity up or down
    Quantity(QuantityArgs),
    /// Remove a line
    Remove(RemoveArgs),
    /// Show the cart and its pricing
    Show,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Catalog search query
    query: String,

    /// Pick this product id from the results instead of the first match
    #[arg(long)]
    id: Option<String>,

    /// Units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct QuantityArgs {
    /// Product id of the line
    id: String,

    /// Signed step, e.g. 1 or -1
    #[arg(allow_hyphen_values = true)]
    delta: i32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product id of the line
    id: String,
}

pub(crate) async fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add(args) => add(ctx, args).await,
        CartSubcommand::Quantity(args) => change_quantity(ctx, &args),
        CartSubcommand::Remove(args) => remove(ctx, &args),
        CartSubcommand::Show => show(ctx),
    }
}

async fn add(ctx: &AppContext, args: AddArgs) -> Result<(), String> {
    let product = match args.id.as_deref() {
        Some(id) => find_by_id(ctx.catalog.as_ref(), &args.query, id).await,
        None => first_match(ctx.catalog.as_ref(), &args.query).await,
    }
    .map_err(|error| format!("failed to find product: {error}"))?;

    let quantity = selected_quantity(args.quantity)?;
    let name = product.name.clone();

    let mut storefront = ctx.storefront().map_err(|error| error.to_string())?;

    storefront
        .add_item(product, quantity)
        .map_err(|error| format!("failed to add to cart: {error}"))?;

    println!("Added {quantity} x {name}.");

    Ok(())
}

/// Run the requested quantity through the product page picker.
fn selected_quantity(requested: u32) -> Result<i32, String> {
    let mut selector = QuantitySelector::new(PLACEHOLDER_STOCK_LEVEL);

    let delta = i32::try_from(requested)
        .map_err(|_err| format!("quantity {requested} is too large"))?
        - 1;

    if delta != 0 && !selector.step(delta) {
        return Err(format!(
            "quantity must be between 1 and {PLACEHOLDER_STOCK_LEVEL}"
        ));
    }

    let quantity = selector
        .to_add()
        .ok_or_else(|| format!("{}", selector.status()))?;

    i32::try_from(quantity).map_err(|_err| format!("quantity {quantity} is too large"))
}

fn change_quantity(ctx: &AppContext, args: &QuantityArgs) -> Result<(), String> {
    let mut storefront = ctx.storefront().map_err(|error| error.to_string())?;

    let changed = storefront
        .change_quantity(&ProductId::new(args.id.as_str()), args.delta)
        .map_err(|error| format!("failed to update cart: {error}"))?;

    if !changed {
        println!("Nothing changed.");
    }

    let rendered = render::cart(&storefront).map_err(|error| error.to_string())?;

    print!("{rendered}");

    Ok(())
}

fn remove(ctx: &AppContext, args: &RemoveArgs) -> Result<(), String> {
    let mut storefront = ctx.storefront().map_err(|error| error.to_string())?;

    let removed = storefront
        .remove_item(&ProductId::new(args.id.as_str()))
        .map_err(|error| format!("failed to update cart: {error}"))?;

    if !removed {
        return Err(format!("no cart line for product {}", args.id));
    }

    let rendered = render::cart(&storefront).map_err(|error| error.to_string())?;

    print!("{rendered}");

    Ok(())
}

fn show(ctx: &AppContext) -> Result<(), String> {
    let storefront = ctx.storefront().map_err(|error| error.to_string())?;

    let rendered = render::cart(&storefront).map_err(|error| error.to_string())?;

    print!("{rendered}");

    Ok(())
}
