//! Blocks Validator CLI
//!
//! Validates blocks documents on disk and exports the grammar.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blocks_validator::{BlocksError, BlocksValidator, GrammarSchema, ValidatorConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "blocks-validator")]
#[command(about = "Validate rich-text blocks documents")]
struct Cli {
    /// Explicit config file (layered over blocks.toml and BLOCKS__* env)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate JSON files or directories of JSON files
    Check {
        /// Files or directories to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Inputs are bare block arrays rather than documents
        #[arg(long)]
        bare: bool,
        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Write a JSON report of validation results
    Report {
        /// Files or directories to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output file (JSON); stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Inputs are bare block arrays rather than documents
        #[arg(long)]
        bare: bool,
        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Export the grammar as a JSON Schema bundle
    Schema {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Describe a bare block array instead of a document
        #[arg(long)]
        bare: bool,
    },

    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        #[arg(short, long, default_value = "blocks.toml")]
        path: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every input was accepted
fn run(cli: Cli) -> Result<bool> {
    let config = ValidatorConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Check { paths, bare, recursive } => {
            let validator = config.validator();
            let files = collect_json_files(&paths, recursive)?;
            if files.is_empty() {
                anyhow::bail!("no JSON files found");
            }

            let mut rejected = 0;
            for file in &files {
                match check_file(&validator, file, bare) {
                    Ok(()) => {
                        if config.output.show_accepted {
                            println!("✅ {}", file.display());
                        }
                    }
                    Err(e) => {
                        rejected += 1;
                        println!("❌ {}", file.display());
                        println!("   └─ {}", e);
                    }
                }
            }

            println!();
            if rejected == 0 {
                println!("✅ {} file(s) valid", files.len());
            } else {
                println!("❌ {} of {} file(s) rejected", rejected, files.len());
            }
            Ok(rejected == 0)
        }

        Commands::Report { paths, output, bare, recursive } => {
            let validator = config.validator();
            let files = collect_json_files(&paths, recursive)?;

            let mut entries = Vec::with_capacity(files.len());
            let mut rejected = 0;
            for file in &files {
                let entry = match check_file(&validator, file, bare) {
                    Ok(()) => serde_json::json!({ "path": file, "valid": true }),
                    Err(BlocksError::Validation(err)) => {
                        rejected += 1;
                        serde_json::json!({ "path": file, "valid": false, "error": err })
                    }
                    Err(other) => {
                        rejected += 1;
                        serde_json::json!({ "path": file, "valid": false, "error": { "message": other.to_string() } })
                    }
                };
                entries.push(entry);
            }

            let report = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "mode": if bare { "blocks" } else { "document" },
                "limits": config.limits,
                "total": files.len(),
                "accepted": files.len() - rejected,
                "rejected": rejected,
                "files": entries,
            });

            let report_json = config.output.render(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &report_json).with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ Report written to {:?}", path);
                }
                None => println!("{}", report_json),
            }
            Ok(rejected == 0)
        }

        Commands::Schema { output, bare } => {
            let grammar = GrammarSchema::build()?;
            let schema = if bare {
                grammar.blocks_schema()?
            } else {
                grammar.document_schema()?
            };
            let rendered = config.output.render(&schema)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered).with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ Schema written to {:?}", path);
                }
                None => println!("{}", rendered),
            }
            Ok(true)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigAction::Init { path, force } => {
                    if Path::new(&path).exists() && !force {
                        anyhow::bail!("{} already exists (use --force to overwrite)", path);
                    }
                    ValidatorConfig::default()
                        .save(&path)
                        .with_context(|| format!("writing {}", path))?;
                    println!("✅ Wrote default configuration to {}", path);
                }
            }
            Ok(true)
        }
    }
}

fn check_file(validator: &BlocksValidator, path: &Path, bare: bool) -> blocks_validator::Result<()> {
    let content = std::fs::read_to_string(path)?;
    if bare {
        validator.parse_blocks(&content)?;
    } else {
        validator.parse_document(&content)?;
    }
    Ok(())
}

/// Expand directories into the `*.json` files they contain, sorted
fn collect_json_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
                .collect();
            found.sort();
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            anyhow::bail!("{} does not exist", path.display());
        }
    }
    Ok(files)
}
