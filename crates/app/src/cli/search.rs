use clap::Args;
use larder::stock::{PLACEHOLDER_STOCK_LEVEL, StockStatus};
use larder_app::context::AppContext;

use super::render;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Product name to search for; empty lists the default selection
    #[arg(default_value = "")]
    query: String,
}

pub(crate) async fn run(ctx: &AppContext, args: SearchArgs) -> Result<(), String> {
    let products = ctx
        .catalog
        .search(&args.query)
        .await
        .map_err(|error| format!("search failed: {error}"))?;

    if products.is_empty() {
        println!("No products match \"{}\".", args.query);
        return Ok(());
    }

    let status = StockStatus::from_level(PLACEHOLDER_STOCK_LEVEL);

    println!("{}", render::product_table(&products, status));

    Ok(())
}
