//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ascii::DEFAULT_WIDTH;

/// Telegram bot that converts photos into ASCII art
#[derive(Parser, Debug)]
#[command(name = "photo-ascii-bot")]
#[command(version, about = "Telegram bot that converts photos into ASCII art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the bot (default)
    Run,
    /// Convert a local image and print the result
    Convert {
        /// Image file (PNG, JPEG, GIF, WebP, BMP)
        image: PathBuf,

        /// Output width in characters
        #[arg(long, short, default_value_t = DEFAULT_WIDTH, value_parser = parse_width)]
        width: u32,

        /// Wrap the output in a fenced code block
        #[arg(long)]
        fenced: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate output width (must be positive)
fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if width == 0 {
        return Err("Width must be at least 1".to_string());
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["photo-ascii-bot"]);
        assert!(args.command.is_none());
        assert!(args.config.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_run_command() {
        let args = Args::parse_from(["photo-ascii-bot", "run"]);
        assert!(matches!(args.command, Some(Command::Run)));
    }

    #[test]
    fn test_args_convert_defaults() {
        let args = Args::parse_from(["photo-ascii-bot", "convert", "cat.jpg"]);
        match args.command {
            Some(Command::Convert {
                image,
                width,
                fenced,
            }) => {
                assert_eq!(image, PathBuf::from("cat.jpg"));
                assert_eq!(width, 100);
                assert!(!fenced);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_convert_width_and_fenced() {
        let args = Args::parse_from([
            "photo-ascii-bot",
            "convert",
            "cat.jpg",
            "-w",
            "40",
            "--fenced",
        ]);
        match args.command {
            Some(Command::Convert { width, fenced, .. }) => {
                assert_eq!(width, 40);
                assert!(fenced);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_convert_rejects_zero_width() {
        let result = Args::try_parse_from(["photo-ascii-bot", "convert", "cat.jpg", "--width", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_convert_rejects_negative_width() {
        let result =
            Args::try_parse_from(["photo-ascii-bot", "convert", "cat.jpg", "--width=-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["photo-ascii-bot", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["photo-ascii-bot", "run", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_config_actions() {
        let args = Args::parse_from(["photo-ascii-bot", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["photo-ascii-bot", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width("1"), Ok(1));
        assert!(parse_width("0").is_err());
        assert!(parse_width("wide").is_err());
    }
}
