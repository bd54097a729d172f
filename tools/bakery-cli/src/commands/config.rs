//! Config command.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { force } => init(force, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "path": ctx.config_path.as_ref().map(|p| p.display().to_string()),
            "config": ctx.config,
            "slot": ctx.slot(),
        }));
        return Ok(());
    }

    ctx.output.header("Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("storage.dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("storage.slot", &ctx.slot());
    ctx.output.kv("cart.currency", ctx.config.cart.currency.code());
    ctx.output.kv("logging.level", &ctx.config.logging.level.to_string());
    Ok(())
}

fn init(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("bakery.toml");
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
