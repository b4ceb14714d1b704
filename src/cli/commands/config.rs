//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{AgrowError, AgrowResult};
use crate::ui::{self, UiContext};

/// Keys accepted by `config set`
const VALID_KEYS: [&str; 8] = [
    "general.verbose",
    "general.log_format",
    "general.audit_log",
    "api.base_url",
    "api.timeout_secs",
    "account.default_country_code",
    "profile.geocoder_url",
    "profile.geocoder_user_agent",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> AgrowResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut updated = config.clone();
            set_value(&mut updated, &key, &value)?;
            manager.save(&updated).await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> AgrowResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> AgrowResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok(&ctx, &format!("Configuration initialized at {}", path.display()));
    Ok(())
}

/// Apply one dot-separated `key = value` assignment
fn set_value(config: &mut Config, key: &str, value: &str) -> AgrowResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => {
            if !matches!(value, "text" | "json") {
                return Err(AgrowError::User(format!(
                    "Invalid log format: {}. Use text or json",
                    value
                )));
            }
            config.general.log_format = value.to_string();
        }
        ["general", "audit_log"] => config.general.audit_log = parse_bool(value)?,

        ["api", "base_url"] => config.api.base_url = value.trim_end_matches('/').to_string(),
        ["api", "timeout_secs"] => {
            config.api.timeout_secs = match value {
                "" | "none" => None,
                n => Some(parse_u64(n)?),
            }
        }

        ["account", "default_country_code"] => {
            if !value.starts_with('+') || value.len() < 2 {
                return Err(AgrowError::User(format!(
                    "Invalid country code: {}. Use a form like +91",
                    value
                )));
            }
            config.account.default_country_code = value.to_string();
        }

        ["profile", "geocoder_url"] => {
            config.profile.geocoder_url = value.trim_end_matches('/').to_string()
        }
        ["profile", "geocoder_user_agent"] => {
            config.profile.geocoder_user_agent = value.to_string()
        }

        _ => {
            return Err(AgrowError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> AgrowResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AgrowError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u64(value: &str) -> AgrowResult<u64> {
    value
        .parse()
        .map_err(|_| AgrowError::User(format!("Invalid number: {}", value)))
}
