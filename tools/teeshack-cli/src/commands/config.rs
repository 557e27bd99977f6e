//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &config.storage.dir);
    ctx.output.kv("resolved", &ctx.storage_dir().display().to_string());

    ctx.output.info("[pricing]");
    ctx.output.kv("currency", &config.pricing.currency);
    ctx.output.kv(
        "free_shipping_threshold",
        &config.pricing.free_shipping_threshold.to_string(),
    );
    ctx.output.kv("shipping_fee", &config.pricing.shipping_fee.to_string());
    ctx.output.kv("tax_rate", &config.pricing.tax_rate.to_string());

    ctx.output.info("[simulation]");
    ctx.output.kv("auth_latency_ms", &config.simulation.auth_latency_ms.to_string());
    ctx.output
        .kv("payment_latency_ms", &config.simulation.payment_latency_ms.to_string());

    if let Err(e) = config.pricing.policy() {
        ctx.output.warn(&format!("Pricing is invalid: {:#}", e));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("teeshack.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
