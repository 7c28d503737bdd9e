mod generate;
mod output;
mod schema;
mod validate;

use chanscope_runtime::EngineSource;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chanscope",
    version,
    about = "Generate AsyncAPI documents from declared listeners and producers",
    long_about = "Chanscope scans the message listeners recorded in a manifest and the producers \
                  declared in a docket, and assembles an AsyncAPI 2.0 document describing their \
                  channels, operations and payload schemas."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Inputs shared by every command that runs the scanners.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Docket file (info, servers, producers, properties)
    #[arg(long, value_name = "FILE")]
    pub docket: PathBuf,

    /// Manifest of candidate units and payload schemas
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Placeholder property override, may be repeated
    #[arg(long = "property", short = 'p', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Resolve placeholders missing from the properties from environment variables
    #[arg(long)]
    pub env: bool,
}

impl SourceArgs {
    fn load_engine(&self) -> chanscope_core::Result<chanscope_core::ChanscopeEngine> {
        chanscope_runtime::load_engine(&EngineSource {
            docket: &self.docket,
            manifest: self.manifest.as_deref(),
            overrides: self.properties.iter().map(String::as_str).collect(),
            use_environment: self.env,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the AsyncAPI document as JSON
    #[command(
        long_about = "Runs every listener scanner and the producer scanner, aggregates their \
                            channels and writes the assembled document. Nothing is written if \
                            any scanner fails."
    )]
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file. Defaults to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Run the scanners and report what would be documented
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the JSON schema of the docket file format
    Schema {
        /// Output file. Defaults to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Validate reports on stderr; the others keep stdout for JSON
    let to_stderr = matches!(cli.command, Commands::Validate { .. });
    let _guard = chanscope_runtime::init_logging("cli", to_stderr);

    match cli.command {
        Commands::Generate {
            source,
            output,
            pretty,
        } => generate::run(&source, output.as_deref(), pretty),
        Commands::Validate { source } => validate::run(&source),
        Commands::Schema { output } => schema::run(output.as_deref()),
    }
}
