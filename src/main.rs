//! rtps-guid - Inspect and allocate RTPS entity identifiers

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rtps_guid::config::{self, Config};
use rtps_guid::{EntityId, Guid, GuidPrefix};

/// rtps-guid - RTPS entity identifier tool
#[derive(Parser)]
#[command(name = "rtps-guid")]
#[command(version)]
#[command(about = "Allocate, encode and decode RTPS GUIDs", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate participant prefixes for this host and process
    Generate {
        /// Number of prefixes to allocate (ignored when the configuration
        /// sets a fixed prefix)
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u16,
    },

    /// Print the 16 byte wire form of a GUID
    Encode {
        /// Participant prefix as hex (12 bytes)
        #[arg(short, long)]
        prefix: String,

        /// Entity id as a number (decimal or 0x-prefixed hex)
        #[arg(short, long, value_parser = parse_entity_number)]
        entity: u32,
    },

    /// Decode a GUID from its 16 byte wire form in hex
    Decode {
        /// GUID bytes as hex
        guid: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_entity_number(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid entity id '{}': {}", s, e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default().unwrap_or_default()
    };

    // Initialize logging
    let filter = if cli.verbose || config.logging.verbose {
        EnvFilter::new("debug")
    } else if let Some(directive) = &config.logging.filter {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Generate { count } => {
            run_generate(&config, count)?;
        }
        Commands::Encode { prefix, entity } => {
            let prefix: GuidPrefix = prefix.parse().context("invalid participant prefix")?;
            let guid = Guid::from_prefix_and_number(prefix, entity);
            println!("{}", hex::encode(guid.to_bytes()));
        }
        Commands::Decode { guid, json } => {
            let guid: Guid = guid.parse().context("invalid GUID")?;
            print_guid(&guid, json)?;
        }
        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config()?;
                if let Some(path) = output {
                    std::fs::write(&path, &sample)?;
                    println!("Configuration written to: {}", path.display());
                } else {
                    println!("{}", sample);
                }
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

/// Allocate and print participant GUIDs
fn run_generate(config: &Config, count: u16) -> anyhow::Result<()> {
    if let Some(prefix) = config.fixed_prefix()? {
        if count > 1 {
            tracing::warn!(
                "Configuration sets a fixed participant prefix, ignoring --count {}",
                count
            );
        }
        tracing::info!("Using fixed participant prefix from configuration");
        println!("{}", Guid::participant(prefix));
        return Ok(());
    }

    let generator = config.prefix_generator();
    tracing::info!(
        "Allocating {} prefix(es): vendor={:#06x} host={:#010x} pid={}",
        count,
        generator.vendor_id(),
        generator.host_id(),
        generator.process_id()
    );

    for _ in 0..count {
        println!("{}", generator.next_participant());
    }
    Ok(())
}

fn print_guid(guid: &Guid, json: bool) -> anyhow::Result<()> {
    if json {
        let value = serde_json::json!({
            "prefix": guid.prefix().to_string(),
            "entity_id": guid.entity_id().to_number(),
            "entity_kind": format!("{:?}", guid.entity_id().kind()),
            "builtin": guid.entity_id().is_builtin(),
            "unknown": guid.is_unknown(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("GUID:      {}", guid);
    println!("Prefix:    {}", guid.prefix());
    println!(
        "Entity id: {} ({:#010x})",
        guid.entity_id(),
        guid.entity_id().to_number()
    );
    println!("Kind:      {:?}", guid.entity_id().kind());
    println!("Builtin:   {}", guid.entity_id().is_builtin());
    println!("Unknown:   {}", guid.is_unknown());
    if guid.entity_id() == EntityId::PARTICIPANT {
        println!("(participant entity)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["rtps-guid", "generate", "-n", "3"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_encode_args() {
        let cli = Cli::try_parse_from([
            "rtps-guid",
            "encode",
            "--prefix",
            "0102030405060708090a0b0c",
            "--entity",
            "0x1c1",
        ])
        .unwrap();
        match cli.command {
            Commands::Encode { entity, .. } => assert_eq!(entity, 0x1C1),
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_generate_with_fixed_prefix() {
        let mut config = Config::default();
        config.participant.prefix = Some("0102030405060708090a0b0c".to_string());
        assert!(run_generate(&config, 3).is_ok());

        config.participant.prefix = Some("0102".to_string());
        assert!(run_generate(&config, 1).is_err());
    }

    #[test]
    fn test_parse_entity_number() {
        assert_eq!(parse_entity_number("42"), Ok(42));
        assert_eq!(parse_entity_number("0xFFFFFFFF"), Ok(u32::MAX));
        assert!(parse_entity_number("0x1_0000_0000").is_err());
        assert!(parse_entity_number("abc").is_err());
    }
}
