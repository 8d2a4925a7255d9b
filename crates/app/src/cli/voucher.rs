use clap::Args;
use larder::discounts::Redemption;
use larder_app::context::AppContext;

use super::render;

#[derive(Debug, Args)]
pub(crate) struct VoucherArgs {
    /// Voucher code, e.g. DISCOUNT10
    code: String,
}

pub(crate) fn run(ctx: &AppContext, args: &VoucherArgs) -> Result<(), String> {
    let mut storefront = ctx.storefront().map_err(|error| error.to_string())?;

    let redemption = storefront
        .redeem_voucher(&args.code)
        .map_err(|error| format!("failed to redeem voucher: {error}"))?;

    match redemption {
        Redemption::Accepted { code, percent_off } => {
            println!("Voucher {code} applied: {percent_off}% off.");
        }
        Redemption::Rejected { reason } => println!("Voucher not applied: {reason}."),
    }

    let rendered = render::summary(&storefront.pricing()).map_err(|error| error.to_string())?;

    print!("{rendered}");

    Ok(())
}
