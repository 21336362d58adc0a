//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

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

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[inventory]");
    ctx.output.kv("path", &ctx.config.inventory.path);
    ctx.output.kv("resolved", &ctx.inventory_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[lookup]");
    ctx.output.kv("base_url", &ctx.config.lookup.base_url);
    ctx.output.kv(
        "request_interval_ms",
        &ctx.config.lookup.request_interval_ms.to_string(),
    );
    ctx.output.kv("timeout_ms", &ctx.config.lookup.timeout_ms.to_string());
    ctx.output.kv("user_agent", &ctx.config.lookup.user_agent);

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("exchange_rate", &ctx.config.pricing.exchange_rate.to_string());

    if ctx.config_path.is_none() {
        ctx.output.info("");
        ctx.output.info("Searched for:");
        for name in &CONFIG_NAMES {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

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
