//! Tessera CLI entry point.

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rhizome_tessera_ir::Value;
use rhizome_tessera_syntax_typescript::extract_source;
use rhizome_tessera_target_rhai::{Stringifier, StringifyError, StringifyOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Extract signature values from snippets and render them as Rhai literals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the value of a function signature or object literal as JSON
    Extract {
        /// Input snippet file (or - for stdin)
        file: String,
    },

    /// Render a JSON document as a Rhai literal
    Render {
        /// Input JSON file (or - for stdin)
        file: String,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Extract a snippet and render its value as a Rhai literal
    Bridge {
        /// Input snippet file (or - for stdin)
        file: String,

        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Args)]
struct FormatArgs {
    /// TOML file with stringify options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Quote object keys
    #[arg(long)]
    quotes: bool,

    /// Token written for null values
    #[arg(long)]
    none: Option<String>,

    /// Text appended after the literal
    #[arg(long)]
    suffix: Option<String>,
}

impl FormatArgs {
    /// Options from the config file, then the flags on top.
    fn options(&self) -> Result<StringifyOptions, StringifyError> {
        let mut options = match &self.config {
            Some(path) => StringifyOptions::from_toml_file(path)?,
            None => StringifyOptions::default(),
        };
        if self.quotes {
            options.quotes = true;
        }
        if let Some(none) = &self.none {
            options.none = none.clone();
        }
        if let Some(suffix) = &self.suffix {
            options.suffix = suffix.clone();
        }
        Ok(options)
    }
}

fn read_input(file: &str) -> std::io::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
    }
}

fn extract_file(file: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let source = read_input(file)?;
    let value = extract_source(&source)?
        .ok_or_else(|| format!("{}: snippet not recognized", file))?;
    debug!(file, "extracted");
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rhizome_tessera=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { file } => {
            let value = extract_file(&file)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Render { file, format } => {
            let input = read_input(&file)?;
            let value: Value = serde_json::from_str(&input)?;
            let options = format.options()?;
            info!(quotes = options.quotes, "rendering {}", file);

            println!("{}", Stringifier::new(options).stringify(&value)?);
        }

        Commands::Bridge { file, format } => {
            let value = extract_file(&file)?;
            let options = format.options()?;

            println!("{}", Stringifier::new(options).stringify(&value)?);
        }
    }

    Ok(())
}
