//! # dms-cli
//!
//! Command-line front end for the dynamic mapping system.
//!
//! Runs the demonstration walk-through, maps JSON documents between
//! registered aliases, and lists the aliases a profile makes available.

#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

mod codec;
mod config;
mod demo;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dms_core::MapHandlerBuilder;
use tracing_subscriber::EnvFilter;

use crate::codec::JsonCodecs;
use crate::config::{CliConfig, ProfileKind};

#[derive(Parser)]
#[command(name = "dms")]
#[command(about = "Dynamic Mapping System CLI")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Room mapping profile, overrides the configuration file
    /// (default: enhanced for `demo`, standard otherwise)
    #[arg(short, long, global = true, value_enum)]
    profile: Option<ProfileKind>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the mapping demonstration
    Demo,

    /// Map a JSON document from one alias to another
    Map {
        /// Input JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Source alias (e.g., Model.Reservation)
        #[arg(long)]
        from: String,

        /// Target alias (e.g., Google.Reservation)
        #[arg(long)]
        to: String,

        /// Output JSON file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List registered type aliases
    Aliases,
}

impl Commands {
    /// Profile used when neither the flag nor the configuration names one
    fn default_profile(&self) -> ProfileKind {
        match self {
            Self::Demo => ProfileKind::Enhanced,
            Self::Map { .. } | Self::Aliases => ProfileKind::Standard,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    let profile = cli
        .profile
        .unwrap_or_else(|| config.profile_or(cli.command.default_profile()));
    init_tracing(&config.log_level);
    tracing::debug!(?profile, "Configuration loaded");

    let builder = config
        .handler_builder(profile)
        .context("Failed to configure mapping profile")?;

    match cli.command {
        Commands::Demo => {
            let handler = builder.build();
            let stdout = io::stdout();
            demo::run(&handler, &mut stdout.lock())?;
        }
        Commands::Map {
            input,
            from,
            to,
            output,
        } => map_file(builder, &input, &from, &to, output.as_deref())?,
        Commands::Aliases => list_aliases(&builder)?,
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn map_file(
    builder: MapHandlerBuilder,
    input: &Path,
    from: &str,
    to: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    tracing::info!("Mapping {} ({} -> {})", input.display(), from, to);

    let codecs = JsonCodecs::reservations();
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file '{}'", input.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Input file '{}' is not valid JSON", input.display()))?;
    let source = codecs
        .decode(from, document)
        .with_context(|| format!("Failed to decode input as '{from}'"))?;

    let handler = builder.build();
    let mapped = handler
        .map(Some(&*source), from, to)
        .with_context(|| format!("Failed to map '{from}' to '{to}'"))?;

    let encoded = codecs
        .encode(to, mapped.as_mappable())
        .with_context(|| format!("Failed to encode result as '{to}'"))?;
    let rendered = serde_json::to_string_pretty(&encoded)?;

    match output {
        Some(path) => {
            fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn list_aliases(builder: &MapHandlerBuilder) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for (alias, type_key) in builder.resolver().aliases() {
        writeln!(out, "{alias}\t{type_key}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_map_command() {
        let cli = Cli::try_parse_from([
            "dms",
            "--profile",
            "enhanced",
            "map",
            "--input",
            "reservation.json",
            "--from",
            "Model.Reservation",
            "--to",
            "Google.Reservation",
        ])
        .unwrap();

        assert_eq!(cli.profile, Some(ProfileKind::Enhanced));
        match cli.command {
            Commands::Map {
                input, from, to, output,
            } => {
                assert_eq!(input, PathBuf::from("reservation.json"));
                assert_eq!(from, "Model.Reservation");
                assert_eq!(to, "Google.Reservation");
                assert!(output.is_none());
            }
            _ => panic!("expected map command"),
        }
    }

    #[test]
    fn test_default_profile_per_command() {
        let demo = Cli::try_parse_from(["dms", "demo"]).unwrap();
        assert!(demo.profile.is_none());
        assert_eq!(demo.command.default_profile(), ProfileKind::Enhanced);

        let aliases = Cli::try_parse_from(["dms", "aliases"]).unwrap();
        assert_eq!(aliases.command.default_profile(), ProfileKind::Standard);
    }

    #[test]
    fn test_cli_rejects_unknown_profile() {
        assert!(Cli::try_parse_from(["dms", "--profile", "premium", "demo"]).is_err());
    }
}
