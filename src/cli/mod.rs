//! CLI module for newplaces
//!
//! Provides commands:
//! - `serve`: run the canvas server (default)
//! - `reset`: provision the durable canvas with a solid color

use clap::{Parser, Subcommand};

pub mod reset;

/// newplaces canvas server CLI
#[derive(Parser, Debug)]
#[command(name = "newplaces")]
#[command(about = "Shared persistent pixel canvas with live updates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve {
        /// Use an in-memory canvas instead of Redis (nothing is persisted)
        #[arg(long)]
        memory: bool,
    },
    /// Reset the durable canvas to a single color
    Reset {
        /// Palette color as RGBA hex, e.g. FFFFFFFF or 0xE50000FF
        #[arg(long, default_value = "FFFFFFFF", value_parser = parse_color)]
        color: u32,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::server::load_config()?;

    match cli.command {
        Some(Commands::Reset { color }) => reset::run(&config, color).await,
        Some(Commands::Serve { memory }) => crate::server::run(config, memory).await,
        None => crate::server::run(config, false).await,
    }
}

/// Parse an RGBA color written as hex, with optional `0x` or `#` prefix
fn parse_color(raw: &str) -> Result<u32, String> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .or_else(|| raw.strip_prefix('#'))
        .unwrap_or(raw);

    if digits.len() != 8 {
        return Err(format!("expected 8 hex digits (RRGGBBAA), got '{raw}'"));
    }
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid color '{raw}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("FFFFFFFF"), Ok(0xFFFFFFFF));
        assert_eq!(parse_color("0xE50000FF"), Ok(0xE50000FF));
        assert_eq!(parse_color("#0083c7ff"), Ok(0x0083C7FF));
        assert!(parse_color("FFF").is_err());
        assert!(parse_color("GGGGGGGG").is_err());
    }

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::try_parse_from(["newplaces"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["newplaces", "serve", "--memory"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { memory: true })));
    }

    #[test]
    fn test_reset_color_argument() {
        let cli = Cli::try_parse_from(["newplaces", "reset"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Reset { color: 0xFFFFFFFF })));

        let cli = Cli::try_parse_from(["newplaces", "reset", "--color", "0x222222FF"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Reset { color: 0x222222FF })));

        assert!(Cli::try_parse_from(["newplaces", "reset", "--color", "red"]).is_err());
    }
}
