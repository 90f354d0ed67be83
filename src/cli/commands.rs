//! Subcommand handlers for run, convert and config actions.

use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use crate::ascii::{self, ConvertError};
use crate::bot::{self, Bot};
use crate::config::{self, Config, ConfigError, DEFAULT_CONFIG_TEMPLATE};
use crate::telegram::{TelegramError, BOT_TOKEN_ENV};

/// Errors surfaced by CLI subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Telegram(#[from] TelegramError),

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write config file '{}': {source}", path.display())]
    WriteConfig {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Start the bot and poll until Ctrl-C.
pub async fn run_bot(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = Config::load(config_path)?;
    let settings = config.resolve(std::env::var(BOT_TOKEN_ENV).ok())?;

    log::info!("Bot is starting...");
    log::debug!("Downloading photos into {}", settings.temp_dir.display());

    let bot = Bot::new(settings)?;
    bot.run().await?;
    Ok(())
}

/// Convert a local image file, optionally fenced for pasting into chat.
pub fn convert_image(image: &Path, width: u32, fenced: bool) -> Result<String, CliError> {
    let art = ascii::convert_file(image, width)?;
    Ok(if fenced { bot::fenced(&art) } else { art })
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(config::default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&path))?;
            print!("{}", describe_config(&config, &path, std::env::var(BOT_TOKEN_ENV).ok()));
            Ok(())
        }
        ConfigAction::Init => {
            init_config(&path)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Write the default config template, refusing to overwrite.
pub fn init_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }

    let write = |path: &Path| -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
    };

    write(path).map_err(|e| CliError::WriteConfig {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Human-readable summary of the effective configuration.
pub fn describe_config(config: &Config, path: &Path, env_token: Option<String>) -> String {
    let env_token = env_token.filter(|t| !t.trim().is_empty());
    let token = match (&env_token, &config.telegram.token) {
        (Some(t), _) => format!("{} (from {})", mask_token(t), BOT_TOKEN_ENV),
        (None, Some(t)) if !t.trim().is_empty() => format!("{} (from config file)", mask_token(t)),
        _ => "not set".to_string(),
    };

    let mut out = String::new();
    out.push_str("Current configuration:\n");
    out.push_str(&format!("  Token: {}\n", token));
    out.push_str(&format!(
        "  API base URL: {}\n",
        config
            .telegram
            .api_base_url
            .as_deref()
            .unwrap_or(crate::telegram::TELEGRAM_API_BASE_URL)
    ));
    out.push_str(&format!(
        "  Poll timeout: {}s\n",
        config.telegram.poll_timeout_secs
    ));
    out.push_str(&format!(
        "  Temp dir: {}\n",
        config
            .storage
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .display()
    ));
    out.push_str(&format!("  Width: {} (fixed)\n\n", ascii::DEFAULT_WIDTH));

    if path.exists() {
        out.push_str(&format!("Config file: {} (exists)\n", path.display()));
    } else {
        out.push_str(&format!("Config file: {} (not found)\n", path.display()));
    }
    out
}

/// Show only the bot id part of a token.
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{}:****", id),
        None => "****".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("123456:ABC-DEF"), "123456:****");
        assert_eq!(mask_token("garbage"), "****");
    }

    #[test]
    fn test_describe_config_masks_env_token() {
        let config = Config::parse("[telegram]\ntoken = \"1:file\"").unwrap();
        let text = describe_config(
            &config,
            Path::new("/nonexistent/config.toml"),
            Some("42:secret".to_string()),
        );
        assert!(text.contains("Token: 42:**** (from BOT_TOKEN)"));
        assert!(!text.contains("secret"));
        assert!(text.contains("(not found)"));
    }

    #[test]
    fn test_describe_config_without_token() {
        let text = describe_config(&Config::default(), Path::new("/nonexistent/c.toml"), None);
        assert!(text.contains("Token: not set"));
        assert!(text.contains("Poll timeout: 30s"));
        assert!(text.contains("Width: 100 (fixed)"));
    }

    #[test]
    fn test_init_config_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG_TEMPLATE);

        assert!(matches!(init_config(&path), Err(CliError::ConfigExists(_))));
    }

    #[test]
    fn test_convert_image_missing_file() {
        let result = convert_image(Path::new("/nonexistent/cat.png"), 10, false);
        assert!(matches!(
            result,
            Err(CliError::Convert(ConvertError::Io { .. }))
        ));
    }
}
