use larder_app::{auth::Session, context::AppContext};

use super::render;

pub(crate) fn run(ctx: &AppContext) -> Result<(), String> {
    let mut storefront = ctx.storefront().map_err(|error| error.to_string())?;

    let shopper = Session::restore_from(&ctx.store)
        .map_err(|error| error.to_string())?
        .map(|session| session.identifier);

    let confirmation = storefront
        .place_order()
        .map_err(|error| format!("failed to place order: {error}"))?;

    let rendered = render::confirmation(confirmation, shopper.as_deref())
        .map_err(|error| error.to_string())?;

    print!("{rendered}");

    Ok(())
}
