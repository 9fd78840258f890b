#![deny(unsafe_code)]
//! CLI binary for swatch, the named-color palette generator.
//!
//! Subcommands:
//! - `generate -s <0-100> -l <0-100>`: sweep all hues, print one swatch per name
//! - `name <hex>`: resolve a single color through dictionary, cache, and remote lookup
//! - `rgb <hex>`: decode a hex color
//! - `build-dictionary <input> <output>`: flatten a `[hex, name]` table into a dictionary artifact

mod error;

use clap::{Parser, Subcommand};
use env_logger::Env;
use error::CliError;
use std::path::PathBuf;
use std::process;
use swatch_core::{
    hex_to_rgb, CancelToken, Config, HexColor, NameDictionary, PaletteGenerator, SwatchParams,
};

#[derive(Parser)]
#[command(name = "swatch", about = "Named color palette generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// JSON config file; the flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Remote name lookup endpoint.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Remote lookup timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Name cache file.
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Dictionary artifact to use instead of the built-in one.
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sweep hues 0-359 and print one swatch per distinct color name.
    Generate {
        /// Saturation percentage (0-100).
        #[arg(short, long, default_value_t = 100)]
        saturation: u32,

        /// Lightness percentage (0-100).
        #[arg(short, long, default_value_t = 50)]
        lightness: u32,
    },
    /// Resolve the name of a single hex color.
    Name {
        /// Hex color, 3 or 6 digits, optional leading '#'.
        hex: String,
    },
    /// Decode a hex color to rgb(r, g, b).
    Rgb {
        /// Hex color, 3 or 6 digits, optional leading '#'.
        hex: String,
    },
    /// Build a dictionary artifact from a JSON array of [hex, name] pairs.
    BuildDictionary {
        /// Input name table.
        input: PathBuf,

        /// Output dictionary path.
        output: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(cache) = &cli.cache {
        config.cache_path = cache.clone();
    }
    if let Some(dictionary) = &cli.dictionary {
        config.dictionary_path = Some(dictionary.clone());
    }
    log::debug!("effective config: {config:?}");
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Generate {
            saturation,
            lightness,
        } => {
            let params = SwatchParams::new(*saturation, *lightness)?;
            let generator = PaletteGenerator::from_config(&load_config(&cli)?)?;
            // Per-hue failures are reported through the log as they happen.
            let outcome = generator.generate(params, &CancelToken::new(), |_| {});

            if cli.json {
                let info = serde_json::json!({
                    "saturation": params.saturation(),
                    "lightness": params.lightness(),
                    "state": outcome.state,
                    "palette": outcome.palette,
                    "failures": outcome.failures,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for swatch in &outcome.palette {
                    println!("{:<28} {:<20} #{}", swatch.name, swatch.rgb, swatch.hex);
                }
                eprintln!(
                    "{} swatches at saturation {}%, lightness {}% ({} hues failed)",
                    outcome.palette.len(),
                    params.saturation(),
                    params.lightness(),
                    outcome.failures.len()
                );
            }
        }
        Command::Name { hex } => {
            let hex = HexColor::parse(hex)?;
            let generator = PaletteGenerator::from_config(&load_config(&cli)?)?;
            let lookup = generator.lookup(hex)?;
            if cli.json {
                let info = serde_json::json!({
                    "hex": hex,
                    "name": lookup.name,
                    "rgb": lookup.rgb,
                    "source": lookup.source,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}\t{}\t#{hex}", lookup.name, lookup.rgb);
            }
        }
        Command::Rgb { hex } => {
            let rgb = hex_to_rgb(hex)?;
            if cli.json {
                let info = serde_json::json!({"r": rgb.r, "g": rgb.g, "b": rgb.b});
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{rgb}");
            }
        }
        Command::BuildDictionary { input, output } => {
            let text = std::fs::read_to_string(input)
                .map_err(|e| CliError::Io(format!("{}: {e}", input.display())))?;
            let table: Vec<(String, String)> = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid name table: {e}")))?;
            let dictionary = NameDictionary::from_name_table(table)?;
            std::fs::write(output, dictionary.to_json_pretty()?)
                .map_err(|e| CliError::Io(format!("{}: {e}", output.display())))?;

            if cli.json {
                let info = serde_json::json!({
                    "names": dictionary.len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "wrote {} names -> {}",
                    dictionary.len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
