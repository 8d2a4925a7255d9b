//! Console rendering for cart, pricing, address and order output.

use std::fmt::{self, Write};

use larder::{
    checkout::{AddressField, CheckoutSession, CheckoutState},
    orders::Confirmation,
    pricing::PricingSnapshot,
    products::Product,
    stock::StockStatus,
    storage::KeyValueStore,
    storefront::Storefront,
};
use rusty_money::iso::{self, Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

const CURRENCY: &Currency = iso::INR;

pub(crate) fn product_table(products: &[Product], status: StockStatus) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Price", "Availability"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.unit_price(CURRENCY).to_string(),
            status.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    table.to_string()
}

pub(crate) fn cart<S: KeyValueStore>(storefront: &Storefront<S>) -> Result<String, fmt::Error> {
    let mut out = String::new();

    if storefront.lines().is_empty() {
        out.push_str("Your cart is empty.\n");
        return Ok(out);
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Qty", "Unit Price", "Line Total"]);

    for line in storefront.lines() {
        builder.push_record([
            line.product_id().to_string(),
            line.product().name.clone(),
            line.quantity().to_string(),
            line.product().unit_price(CURRENCY).to_string(),
            line.line_total(CURRENCY).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;

    if let Some(code) = storefront.discount().code() {
        writeln!(out, "Voucher: {code}")?;
    }

    out.push_str(&summary(&storefront.pricing())?);

    Ok(out)
}

pub(crate) fn summary(pricing: &PricingSnapshot) -> Result<String, fmt::Error> {
    let shipping = if pricing.shipping_minor == 0 {
        "Free".to_string()
    } else {
        pricing.shipping(CURRENCY).to_string()
    };

    let rows = [
        ("Subtotal:".to_string(), pricing.subtotal(CURRENCY).to_string()),
        (
            format!("Discount ({}%):", pricing.discount_percent),
            format!("-{}", pricing.discount_amount(CURRENCY)),
        ),
        ("Shipping:".to_string(), shipping),
        ("Total:".to_string(), pricing.total(CURRENCY).to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

    let mut out = String::new();

    for (label, value) in &rows {
        writeln!(out, " {label:<label_width$} {value:>value_width$}")?;
    }

    if pricing.has_unpriced_lines() {
        let ids: Vec<_> = pricing.unpriced.iter().map(ToString::to_string).collect();
        writeln!(out, " No price for: {}", ids.join(", "))?;
    }

    Ok(out)
}

pub(crate) fn address<S: KeyValueStore>(session: &CheckoutSession<S>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let draft = session.draft();

    for field in AddressField::ALL {
        let value = draft.get(field);
        let shown = if value.trim().is_empty() { "(missing)" } else { value };

        writeln!(out, " {:<8} {shown}", format!("{field}:"))?;
    }

    let state = match session.state() {
        CheckoutState::Empty => "empty",
        CheckoutState::Editing => "incomplete",
        CheckoutState::Valid => "ready to order",
        CheckoutState::Submitted => "submitted",
    };

    writeln!(out, " Address is {state}.")?;
    writeln!(
        out,
        " Remember address: {}",
        if session.remembers_address() { "on" } else { "off" }
    )?;

    Ok(out)
}

pub(crate) fn confirmation(confirmation: &Confirmation, shopper: Option<&str>) -> Result<String, fmt::Error> {
    let order = &confirmation.order;
    let mut out = String::new();

    writeln!(out, "Order placed. Thank you!")?;
    writeln!(out, " Order:  {}", order.id())?;
    writeln!(out, " Placed: {}", order.placed_at())?;

    if let Some(shopper) = shopper {
        writeln!(out, " Shopper: {shopper}")?;
    }

    for line in order.lines() {
        writeln!(out, " {} x {}", line.quantity, line.product.name)?;
    }

    writeln!(out, " Total:  {}", order.pricing().total(CURRENCY))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use larder::{
        discounts::VoucherTable,
        products::ProductId,
        storage::MemoryStore,
    };
    use testresult::TestResult;

    use super::*;

    fn roll() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Sushi Roll".to_string(),
            thumbnail_url: String::new(),
            description: String::new(),
            unit_price_minor: 150,
        }
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let storefront = Storefront::open(MemoryStore::new(), VoucherTable::default())?;

        assert_eq!(cart(&storefront)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn cart_lists_lines_and_totals() -> TestResult {
        let mut storefront = Storefront::open(MemoryStore::new(), VoucherTable::default())?;

        storefront.add_item(roll(), 2)?;
        storefront.redeem_voucher("DISCOUNT10")?;

        let rendered = cart(&storefront)?;

        assert!(rendered.contains("Sushi Roll"));
        assert!(rendered.contains("Voucher: DISCOUNT10"));
        assert!(rendered.contains("Discount (10%):"));
        assert!(rendered.contains("Free"));

        Ok(())
    }

    #[test]
    fn summary_flags_unpriced_lines() -> TestResult {
        let pricing = PricingSnapshot {
            unpriced: [ProductId::new("ghost")].into_iter().collect(),
            ..PricingSnapshot::default()
        };

        assert!(summary(&pricing)?.contains("No price for: ghost"));

        Ok(())
    }

    #[test]
    fn address_marks_missing_fields() -> TestResult {
        let mut session = CheckoutSession::start(MemoryStore::new())?;

        session.update_field(AddressField::City, "Bengaluru")?;

        let rendered = address(&session)?;

        assert!(rendered.contains("Bengaluru"));
        assert!(rendered.contains("(missing)"));
        assert!(rendered.contains("incomplete"));

        Ok(())
    }
}
