//! flowrun — command-line client for the mini workflow runner service.
//!
//! Submits a two-node workflow spec, triggers execution, and renders
//! the live execution log as it streams in.

mod commands;

use clap::{Parser, Subcommand};

/// flowrun CLI — submit workflows and watch their live execution log
#[derive(Parser)]
#[command(name = "flowrun", version, about = "flowrun CLI — submit workflows and watch their live execution log")]
pub struct Cli {
    /// Base URL of the workflow runner service
    #[arg(long, env = "FLOWRUN_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow from a JSON spec file and stream its log
    Run {
        /// Path to the workflow spec JSON file
        file: String,
        /// Input text substituted for {{input}} in the prompt template
        #[arg(long, short = 'i', default_value = "Hello, world!")]
        input: String,
        /// Ask the execution service to inject an LLM timeout
        /// (exercises the failure/retry path; forwarded verbatim)
        #[arg(long)]
        force_llm_timeout: bool,
    },

    /// Validate a workflow spec JSON file without submitting it
    Validate {
        /// Path to the workflow spec JSON file
        file: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowrun_core=warn,flowrun_cli=info".into()),
        )
        .init();

    let result = match cli.command {
        Commands::Run {
            file,
            input,
            force_llm_timeout,
        } => commands::run::run(&cli.base_url, &file, &input, force_llm_timeout).await,
        Commands::Validate { file } => commands::validate::run(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
