//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.header("[store]");
    let feed = ctx
        .feed_override
        .as_deref()
        .or(ctx.config.store.feed.as_deref())
        .unwrap_or("(bundled sample)");
    ctx.output.kv("feed", feed);
    ctx.output.kv("tax_rate", &ctx.config.store.tax_rate.to_string());

    ctx.output.header("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    let format = format!("{:?}", ctx.config.logging.format).to_lowercase();
    ctx.output.kv("format", &format);

    ctx.output.header("Searched for:");
    for name in &CONFIG_NAMES {
        ctx.output.list_item(name);
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
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

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors = ctx.config.validate();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push("No config file found, using defaults".to_string());
    }

    // The feed must parse and seed a catalog.
    if errors.is_empty() {
        match ctx.storefront() {
            Ok(store) => {
                ctx.output
                    .debug(&format!("Feed seeds {} products", store.products().len()));
                if store.products().is_empty() {
                    warnings.push("Feed has no products".to_string());
                }
            }
            Err(e) => errors.push(format!("{:#}", e)),
        }
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
