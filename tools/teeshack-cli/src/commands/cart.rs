//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use teeshack_commerce::cart::{CartStore, VariantKey};
use teeshack_commerce::catalog::Product;
use teeshack_commerce::ids::ProductId;
use teeshack_commerce::money::{Currency, Money};

use super::{CartArgs, CartCommand, LineArgs};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(&store, ctx),
        CartCommand::Add {
            line,
            name,
            price,
            image,
        } => add(&mut store, line, name, price, image, ctx),
        CartCommand::Update { line, quantity } => update(&mut store, line, quantity, ctx),
        CartCommand::Remove { line } => remove(&mut store, line, ctx),
        CartCommand::Clear { yes } => clear(&mut store, yes, ctx),
        CartCommand::Open => {
            store.set_open(true);
            drawer(&store, ctx)
        }
        CartCommand::Close => {
            store.set_open(false);
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "open": store.is_open() }));
            } else {
                ctx.output.info("Cart closed");
            }
            Ok(())
        }
    }
}

fn show(store: &CartStore, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": store.items(),
            "totalItems": store.total_items(),
            "totalPrice": store.total_price(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.line_items(store.items());
    ctx.output.kv("lines", &store.line_count().to_string());
    ctx.output.kv("items", &store.total_items().to_string());
    ctx.output.kv("total", &store.total_price().display());
    Ok(())
}

fn drawer(store: &CartStore, ctx: &Context) -> Result<()> {
    let pricing = store.pricing(&ctx.pricing_policy()?);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "open": store.is_open(),
            "items": store.items(),
            "pricing": pricing,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", store.total_items()));
    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output.line_items(store.items());
    ctx.output.header("Order summary");
    ctx.output.summary(&pricing);
    if !pricing.free_shipping_remaining.is_zero() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            pricing.free_shipping_remaining.display()
        ));
    }
    Ok(())
}

fn add(
    store: &mut CartStore,
    line: LineArgs,
    name: String,
    price: f64,
    image: String,
    ctx: &Context,
) -> Result<()> {
    let currency = ctx.config.pricing.currency()?;
    let (product, variant) = cart_line(line, name, unit_price(price, currency)?, image);

    store.add_product(&product, variant.clone());

    let quantity = store
        .get(&product.id, &variant.size, &variant.color)
        .map_or(0, |item| item.quantity);
    report_line(store, &product.id, &variant.to_string(), quantity, ctx);
    ctx.output
        .success(&format!("Added {} ({}), now {} in cart", product.name, variant, quantity));
    Ok(())
}

/// The product and variant described by `cart add` arguments.
fn cart_line(line: LineArgs, name: String, price: Money, image: String) -> (Product, VariantKey) {
    let product = Product::new(line.product_id, name, price)
        .with_images((!image.is_empty()).then_some(image))
        .with_sizes([line.size.as_str()])
        .with_colors([line.color.as_str()]);
    (product, VariantKey::new(line.size, line.color))
}

/// Price given on the command line, in major units.
fn unit_price(price: f64, currency: Currency) -> Result<Money> {
    if !price.is_finite() || price <= 0.0 {
        bail!("Price must be a positive amount, got {}", price);
    }
    let money = Money::from_decimal(price, currency);
    if money.amount_cents <= 0 || money.amount_cents == i64::MAX {
        bail!("Price {} cannot be represented in {}", price, currency);
    }
    Ok(money)
}

/// What `cart update` did to a line.
#[derive(Debug, PartialEq, Eq)]
enum UpdateOutcome {
    /// The line was not in the cart; nothing changed.
    Missing,
    Removed,
    Set(i64),
}

impl UpdateOutcome {
    fn of(existed: bool, quantity_after: i64) -> Self {
        match (existed, quantity_after) {
            (false, _) => UpdateOutcome::Missing,
            (true, 0) => UpdateOutcome::Removed,
            (true, quantity) => UpdateOutcome::Set(quantity),
        }
    }
}

fn update(store: &mut CartStore, line: LineArgs, quantity: i64, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(line.product_id);
    let existed = store.get(&product_id, &line.size, &line.color).is_some();

    store.update_quantity(&product_id, &line.size, &line.color, quantity);

    let now = store
        .get(&product_id, &line.size, &line.color)
        .map_or(0, |item| item.quantity);
    let variant = format!("{} / {}", line.size, line.color);
    report_line(store, &product_id, &variant, now, ctx);
    match UpdateOutcome::of(existed, now) {
        UpdateOutcome::Missing => {
            ctx.output.warn(&format!("{} ({}) is not in the cart", product_id, variant))
        }
        UpdateOutcome::Removed => {
            ctx.output.success(&format!("Removed {} ({})", product_id, variant))
        }
        UpdateOutcome::Set(quantity) => ctx
            .output
            .success(&format!("{} ({}) quantity is now {}", product_id, variant, quantity)),
    }
    Ok(())
}

fn remove(store: &mut CartStore, line: LineArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(line.product_id);
    let existed = store.get(&product_id, &line.size, &line.color).is_some();

    store.remove_item(&product_id, &line.size, &line.color);

    let variant = format!("{} / {}", line.size, line.color);
    report_line(store, &product_id, &variant, 0, ctx);
    if existed {
        ctx.output.success(&format!("Removed {} ({})", product_id, variant));
    } else {
        ctx.output.warn(&format!("{} ({}) was not in the cart", product_id, variant));
    }
    Ok(())
}

fn clear(store: &mut CartStore, yes: bool, ctx: &Context) -> Result<()> {
    if store.is_empty() {
        ctx.output.info("Cart is already empty");
    } else if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", store.total_items()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    store.clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "totalItems": store.total_items() }));
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

fn report_line(store: &CartStore, product_id: &ProductId, variant: &str, quantity: i64, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "productId": product_id,
            "variant": variant,
            "quantity": quantity,
            "totalItems": store.total_items(),
            "totalPrice": store.total_price(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_accepts_positive_amounts() {
        let price = unit_price(19.99, Currency::EUR).unwrap();
        assert_eq!(price, Money::new(1999, Currency::EUR));
    }

    #[test]
    fn test_unit_price_rejects_bad_amounts() {
        for bad in [0.0, -1.0, -1e17, f64::NAN, f64::INFINITY, 0.001, 1e300] {
            assert!(unit_price(bad, Currency::EUR).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_cart_line_adds_the_given_variant() {
        let line = LineArgs {
            product_id: "7".to_string(),
            size: "XL".to_string(),
            color: "Navy".to_string(),
        };
        let (product, variant) =
            cart_line(line, "Hoodie".to_string(), Money::new(4500, Currency::EUR), String::new());

        let mut store = CartStore::new(Currency::EUR);
        store.add_product(&product, variant);

        let item = &store.items()[0];
        assert_eq!(item.variant, VariantKey::new("XL", "Navy"));
        assert_eq!(item.image_url, "");
        assert_eq!(store.total_price(), Money::new(4500, Currency::EUR));
    }

    #[test]
    fn test_update_outcome() {
        assert_eq!(UpdateOutcome::of(false, 0), UpdateOutcome::Missing);
        assert_eq!(UpdateOutcome::of(true, 0), UpdateOutcome::Removed);
        assert_eq!(UpdateOutcome::of(true, 4), UpdateOutcome::Set(4));
    }
}
