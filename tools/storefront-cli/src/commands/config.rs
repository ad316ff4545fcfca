//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, BASE_URL_ENV, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
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
        None => ctx.output.kv("file", "(defaults)"),
    }
    if std::env::var(BASE_URL_ENV).is_ok() {
        ctx.output
            .kv("override", &format!("api.base_url from {}", BASE_URL_ENV));
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("user_agent", &ctx.config.api.user_agent);

    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output.kv(
        "default_user",
        ctx.config.session.default_user.as_deref().unwrap_or("-"),
    );

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value.as_deref().unwrap_or("null"));
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = find_config_file(ctx)?;
    let path = config_path.to_string_lossy().to_string();

    // Re-read the file so environment overrides are not written back.
    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;

    let errors = config.validate();
    if !errors.is_empty() {
        bail!("Refusing to save invalid config: {}", errors.join("; "));
    }
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

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

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len());
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<Option<String>> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(Some(config.api.base_url.clone())),
        ["api", "user_agent"] => Ok(Some(config.api.user_agent.clone())),
        ["session", "default_user"] => Ok(config.session.default_user.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => config.api.base_url = value.trim().to_string(),
        ["api", "user_agent"] => config.api.user_agent = value.to_string(),
        ["session", "default_user"] => {
            config.session.default_user = Some(value.trim().to_string()).filter(|v| !v.is_empty())
        }
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn find_config_file(ctx: &Context) -> Result<PathBuf> {
    if let Some(path) = &ctx.config_path {
        return Ok(path.clone());
    }
    bail!("No config file found. Run `storefront config init` to create one.")
}
