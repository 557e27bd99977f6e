//! Checkout command.

use anyhow::Result;
use chrono::Local;
use teeshack_commerce::checkout::{place_order, CardDetails, CheckoutDetails, Order};
use teeshack_commerce::CommerceError;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    let policy = ctx.pricing_policy()?;
    if store.is_empty() {
        return Err(CommerceError::EmptyCart.into());
    }

    let auth = ctx.auth()?;
    let base = match auth.current_user() {
        Some(user) => {
            ctx.output.debug(&format!("Prefilling contact details for {}", user.email));
            CheckoutDetails::prefilled(user.email.clone(), &user.name)
        }
        None => CheckoutDetails::default(),
    };
    let details = fill_details(base, args);
    details.validate()?;

    let spinner = ctx.output.spinner("Processing payment...");
    tokio::time::sleep(ctx.config.simulation.payment_latency()).await;
    let placed = place_order(&mut store, &details, &policy);
    spinner.finish_and_clear();

    let order = placed?;
    print_confirmation(&order, ctx);
    Ok(())
}

/// Overlay command line values on the prefilled form.
fn fill_details(base: CheckoutDetails, args: CheckoutArgs) -> CheckoutDetails {
    CheckoutDetails {
        email: args.email.unwrap_or(base.email),
        first_name: args.first_name.unwrap_or(base.first_name),
        last_name: args.last_name.unwrap_or(base.last_name),
        address: args.address,
        city: args.city,
        postal_code: args.postal_code,
        country: args.country.unwrap_or(base.country),
        phone: args.phone,
        card: CardDetails {
            number: args.card_number,
            expiry: args.card_expiry,
            cvv: args.card_cvv,
        },
        accept_terms: args.accept_terms,
    }
}

fn print_confirmation(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.success("Order confirmed!");
    ctx.output.header(&format!("Order {}", order.number));
    ctx.output.kv(
        "placed",
        &order.placed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    );
    ctx.output.kv("estimated delivery", &order.estimated_delivery.format("%A %-d %B %Y").to_string());
    ctx.output.kv("confirmation sent to", &order.email);
    ctx.output.kv("ship to", &order.ship_to);
    ctx.output.kv("paid with", &format!("card ending {}", order.card_last_four));

    ctx.output.header("Items");
    ctx.output.line_items(&order.items);
    ctx.output.header("Summary");
    ctx.output.summary(&order.pricing);
}
