//! SDR agent tool harness
//!
//! Stands in for the conversational orchestrator: loads settings, wires the
//! persistence layer into the tool registry, and executes tool calls from
//! the command line.

use clap::{Parser, Subcommand};

use sdr_agent_config::{load_settings, Settings, SystemPrompt};
use sdr_agent_persistence::{init, DataPaths, LeadStore, PersistenceLayer};
use sdr_agent_tools::create_registry;

#[derive(Parser)]
#[command(name = "sdr-agent", about = "Sales-qualification agent tool harness")]
struct Cli {
    /// Configuration environment (loads config/{env}.yaml over the defaults)
    #[arg(long)]
    env: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered tools and their schemas
    Tools,
    /// Execute a tool by name with JSON arguments
    Call {
        name: String,
        /// JSON object of tool arguments
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Query the FAQ store
    Faq {
        #[arg(default_value = "all")]
        query: String,
    },
    /// Summarize the latest call
    Summary,
    /// List captured leads
    Leads,
    /// Print the rendered system prompt
    Prompt,
}

#[tokio::main]
async fn main() -> sdr_agent_core::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.env.as_deref())
        .map_err(|e| sdr_agent_core::Error::config(e.to_string()))?;
    init_tracing(&settings);

    tracing::info!("Starting SDR agent harness v{}", env!("CARGO_PKG_VERSION"));

    let persistence = init(DataPaths {
        faq: settings.data.faq_path(),
        leads: settings.data.leads_path(),
        call_summaries: settings.data.call_summaries_path(),
        summary: settings.data.summary_path(),
    });

    run(cli.command, &settings, &persistence).await
}

async fn run(
    command: Command,
    settings: &Settings,
    persistence: &PersistenceLayer,
) -> sdr_agent_core::Result<()> {
    let registry = create_registry(persistence);

    match command {
        Command::Tools => {
            let schemas = registry.schemas();
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        }
        Command::Call { name, args } => {
            let input: serde_json::Value = serde_json::from_str(&args)
                .map_err(|e| sdr_agent_core::Error::other(format!("Invalid --args JSON: {}", e)))?;

            let output = registry.execute(&name, input).await;
            if output.is_error {
                tracing::warn!(tool = %name, "Tool returned an error output");
            }
            println!("{}", output.text_content());
        }
        Command::Faq { query } => {
            println!("{}", persistence.faq.lookup(&query));
        }
        Command::Summary => {
            println!("{}", persistence.summaries.summarize().await);
        }
        Command::Leads => {
            let leads = persistence.leads.all().await?;
            tracing::info!(count = leads.len(), "Loaded lead collection");
            println!("{}", serde_json::to_string_pretty(&leads)?);
        }
        Command::Prompt => {
            println!("{}", SystemPrompt::from_agent_config(&settings.agent).render());
        }
    }

    Ok(())
}

/// Initialize tracing from observability settings
fn init_tracing(settings: &Settings) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("sdr_agent={}", settings.observability.log_level).into());

    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
