use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use argbind_schema::{DefinitionSchema, bound_to_json, raw_to_json};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// Exit status for arguments that fail to bind.
const BIND_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "argbind")]
#[command(version, about = "Inspect argbind tokenization and binding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw name/value map for ARGS as JSON
    Tokenize(TokenizeArgs),

    /// Bind ARGS against a definition schema and print the typed values as JSON
    Bind(BindArgs),

    /// Validate a definition schema and print its normalized form
    Schema(SchemaArgs),
}

#[derive(Parser)]
struct TokenizeArgs {
    /// Arguments after the program name (pass them after `--`)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Parser)]
struct BindArgs {
    /// Path to a definition schema JSON file
    #[arg(short, long, value_name = "FILE")]
    schema: PathBuf,

    /// Arguments after the program name (pass them after `--`)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Parser)]
struct SchemaArgs {
    /// Path to a definition schema JSON file
    #[arg(value_name = "FILE")]
    path: PathBuf,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize(args) => tokenize(args),
        Commands::Bind(args) => bind(args),
        Commands::Schema(args) => schema(args),
    }
}

fn tokenize(args: TokenizeArgs) -> Result<ExitCode> {
    let raw = argbind::tokenize(&args.args);
    tracing::debug!(names = raw.len(), "tokenized arguments");
    print_json(&raw_to_json(&raw))?;
    Ok(ExitCode::SUCCESS)
}

fn bind(args: BindArgs) -> Result<ExitCode> {
    let def = load_schema(&args.schema)?
        .to_definition()
        .with_context(|| format!("invalid definition schema: {}", args.schema.display()))?;
    tracing::debug!(args = def.args().len(), "loaded definition");

    match argbind::bind(&args.args, &def) {
        Ok(bound) => {
            print_json(&bound_to_json(&bound))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(?err, "bind failed");
            eprintln!("error: {err}");
            Ok(ExitCode::from(BIND_FAILURE))
        }
    }
}

fn schema(args: SchemaArgs) -> Result<ExitCode> {
    let def = load_schema(&args.path)?
        .to_definition()
        .with_context(|| format!("invalid definition schema: {}", args.path.display()))?;

    let normalized = DefinitionSchema::from_definition(&def);
    println!("{}", normalized.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}

fn load_schema(path: &Path) -> Result<DefinitionSchema> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    DefinitionSchema::from_json(&raw)
        .with_context(|| format!("failed to load definition schema: {}", path.display()))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
