//! vitals CLI — ask a local model for a short system health report.
//!
//! Runs the two-turn tool-calling conversation once and prints the
//! formatted reply on stdout. Diagnostics go to stderr.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use vitals_core::agent::{HealthAgent, Outcome};
use vitals_core::config::{Overrides, Settings, VitalsConfig};
use vitals_core::report::health_report_schema;
use vitals_hub::providers::OllamaProvider;
use vitals_hub::tools::{MEMORY_TOOL, STORAGE_TOOL, probe_registry};

// ─── CLI Definition ────────────────────────────────────────

/// vitals — one-shot system health report from a local model
#[derive(Parser)]
#[command(name = "vitals", version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Config file (default: <config dir>/vitals/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    report: ReportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ReportArgs {
    /// Model to use
    #[arg(short, long, env = "ENV_MODEL_NAME")]
    model: Option<String>,

    /// Seed prompt sent on the first turn
    #[arg(short, long, env = "ENV_PROMPT")]
    prompt: Option<String>,

    /// Chat server address
    #[arg(long, env = "OLLAMA_HOST")]
    host: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Send the first assistant turn back along with the tool results
    #[arg(long)]
    keep_assistant_turn: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON schema the report is constrained to
    Schema,

    /// Run one host probe and print its raw output
    Probe {
        #[arg(value_enum)]
        which: ProbeKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProbeKind {
    Storage,
    Memory,
}

impl ProbeKind {
    fn tool_name(self) -> &'static str {
        match self {
            Self::Storage => STORAGE_TOOL,
            Self::Memory => MEMORY_TOOL,
        }
    }
}

// ─── Helpers ───────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,vitals_core=info,vitals_hub=info",
        _ => "info,vitals_core=debug,vitals_hub=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<VitalsConfig> {
    let path = match path {
        Some(path) if !path.exists() => bail!("config file not found: {}", path.display()),
        Some(path) => path,
        None => VitalsConfig::default_path(),
    };
    VitalsConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

// ─── Commands ──────────────────────────────────────────────

async fn run_report(file: VitalsConfig, args: ReportArgs) -> anyhow::Result<()> {
    let overrides = Overrides {
        model: args.model,
        prompt: args.prompt,
        host: args.host,
        timeout_secs: args.timeout,
        keep_assistant_turn: args.keep_assistant_turn,
    };
    let settings = Settings::resolve(file, overrides)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let provider = OllamaProvider::new(settings.provider.clone())?;
    let agent = HealthAgent::new(settings.agent, probe_registry(&settings.probes)?);

    let outcome = tokio::select! {
        res = agent.run(&provider) => res?,
        _ = tokio::signal::ctrl_c() => bail!("interrupted"),
    };

    if let Outcome::Report(content) = outcome {
        println!("{}", content);
    }

    Ok(())
}

async fn run_probe(file: VitalsConfig, which: ProbeKind) -> anyhow::Result<()> {
    let registry = probe_registry(&file.probes)?;
    let output = registry
        .execute(which.tool_name(), serde_json::json!({}))
        .await?;
    print!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = load_config(cli.config)?;

    match cli.command {
        None => run_report(file, cli.report).await?,

        Some(Commands::Schema) => {
            println!("{}", serde_json::to_string_pretty(&health_report_schema())?);
        }

        Some(Commands::Probe { which }) => run_probe(file, which).await?,
    }

    Ok(())
}
