//! plcudt - Universal PLC UDT transfer tool
//!
//! Converts controller user-defined types between Rockwell, Siemens, CODESYS
//! and Beckhoff text dialects through a vendor-neutral YAML format.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use plcudt::model::BuiltinType;
use plcudt::settings::UserSettings;
use plcudt::vendors::{VendorAdapter, VendorKind};
use plcudt::{codec, converter, registry, validate};

#[derive(Parser)]
#[command(name = "plcudt")]
#[command(about = "Translate PLC user-defined types between vendor dialects", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a UDT from one vendor dialect to another
    Convert {
        /// Input file in the source dialect
        file: PathBuf,

        /// Source vendor (defaults to settings, then the file extension)
        #[arg(long)]
        from: Option<String>,

        /// Target vendor (defaults to settings)
        #[arg(long)]
        to: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a vendor file into the universal format
    Import {
        vendor: String,
        file: PathBuf,

        /// Output file or directory (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a universal file to a vendor dialect
    Export {
        vendor: String,
        file: PathBuf,

        /// Output file or directory (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a PackML state machine for an equipment instance
    GenerateSm {
        instance: String,
        vendor: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a built-in UDT in the universal format
    Add {
        /// Built-in key (identifier, status, valve, analog-in, ...)
        builtin: String,

        /// Rename the generated type
        #[arg(long)]
        name: Option<String>,

        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Check a universal file for structural errors
    Validate { file: PathBuf },

    /// List supported vendors and their capabilities
    Vendors,

    /// Show or update saved defaults
    Config {
        /// Default source vendor for `convert`
        #[arg(long)]
        source: Option<VendorKind>,

        /// Default target vendor for `convert`
        #[arg(long)]
        target: Option<VendorKind>,

        /// Extension for universal files written by `import -o <dir>`
        #[arg(long)]
        extension: Option<String>,
    },
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

/// Explicit flag, then the configured default, then the file extension
fn source_vendor(flag: Option<String>, settings: &UserSettings, file: &Path) -> Result<String> {
    if let Some(vendor) = flag {
        return Ok(vendor);
    }
    if let Some(kind) = settings.default_source {
        return Ok(kind.to_string());
    }

    let ext = file.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let candidates = registry::find_vendors_by_extension(ext);
    match candidates.as_slice() {
        [kind] => Ok(kind.to_string()),
        _ => bail!(
            "Cannot infer source vendor from '{}'; pass --from",
            file.display()
        ),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = UserSettings::load();

    match cli.command {
        Commands::Convert {
            file,
            from,
            to,
            output,
        } => {
            let source = source_vendor(from, &settings, &file)?;
            let target = match to.or_else(|| settings.default_target.map(|k| k.to_string())) {
                Some(target) => target,
                None => bail!("No target vendor given; pass --to"),
            };
            let text = read(&file)?;
            let converted = converter::convert(&text, &source, &target)?;
            emit(output.as_deref(), &converted)?;
        }

        Commands::Import {
            vendor,
            file,
            output,
        } => {
            let udt = converter::to_definition(&read(&file)?, &vendor)?;
            let universal = codec::to_universal_text(&udt)?;
            let output = match output {
                Some(dir) if dir.is_dir() => Some(dir.join(settings.universal_file_name(udt.name()))),
                other => other,
            };
            emit(output.as_deref(), &universal)?;
        }

        Commands::Export {
            vendor,
            file,
            output,
        } => {
            let udt = codec::from_universal_text(&read(&file)?)?;
            let text = converter::from_definition(&udt, &vendor)?;
            let output = match output {
                Some(dir) if dir.is_dir() => {
                    let kind = VendorKind::from_str(vendor.trim())?;
                    Some(dir.join(registry::export_file_name(&udt, kind)))
                }
                other => other,
            };
            emit(output.as_deref(), &text)?;
        }

        Commands::GenerateSm {
            instance,
            vendor,
            output,
        } => {
            let code = converter::generate_state_machine(&instance, &vendor)?;
            emit(output.as_deref(), &code)?;
        }

        Commands::Add {
            builtin,
            name,
            json,
        } => {
            let Ok(builtin) = BuiltinType::from_str(&builtin) else {
                bail!(
                    "Unknown built-in type '{}'. Available: {}",
                    builtin,
                    BuiltinType::keys()
                );
            };
            let mut udt = builtin.build();
            if let Some(name) = name {
                udt = udt.renamed(name);
            }
            let text = if json {
                codec::to_json(&udt)? + "\n"
            } else {
                codec::to_universal_text(&udt)?
            };
            emit(None, &text)?;
        }

        Commands::Validate { file } => {
            let report = validate::validate_str(&read(&file)?);
            if report.valid {
                println!("{} is valid", file.display());
            } else {
                for error in &report.errors {
                    eprintln!("  - {}", error);
                }
                bail!("{} has {} error(s)", file.display(), report.errors.len());
            }
        }

        Commands::Vendors => {
            for kind in registry::get_vendors() {
                let adapter = kind.adapter();
                println!(
                    "{:<10} {:<9} .{:<6} import: {:<3} export: {}",
                    kind.as_ref(),
                    kind.name(),
                    adapter.file_extension(),
                    if adapter.supports_import() { "yes" } else { "no" },
                    if adapter.supports_export() { "yes" } else { "no" },
                );
            }
        }

        Commands::Config {
            source,
            target,
            extension,
        } => {
            let mut settings = settings;
            let changed = source.is_some() || target.is_some() || extension.is_some();
            if let Some(kind) = source {
                settings.default_source = Some(kind);
            }
            if let Some(kind) = target {
                settings.default_target = Some(kind);
            }
            if let Some(extension) = extension {
                settings.universal_extension = extension;
            }
            if changed {
                settings.save().map_err(anyhow::Error::msg)?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
