mod config;
mod generate_cmd;
mod list_cmds;
#[cfg(test)]
mod test_util;

use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use config::VidplanConfig;

#[derive(Parser)]
#[command(
    name = "vidplan",
    about = "Plan short-form Hindi videos from a brief"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a content plan from a brief file and/or flags
    Generate {
        /// TOML brief file (see `vidplan brief`)
        #[arg(long)]
        brief: Option<String>,
        #[command(flatten)]
        fields: BriefFlags,
        /// Output format (overrides VIDPLAN_FORMAT and the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the sample brief as TOML
    Brief,
    /// List supported tones
    Tones,
    /// List supported durations
    Durations,
    /// Write a vidplan config file with default brief values
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Brief fields that can be given directly on the command line.
///
/// Each flag overrides the same field from `--brief` and the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct BriefFlags {
    /// Video topic
    #[arg(long)]
    pub topic: Option<String>,
    /// Target audience
    #[arg(long)]
    pub persona: Option<String>,
    /// informative, inspirational, entertaining or sales
    #[arg(long)]
    pub tone: Option<String>,
    /// Length in seconds: 30, 60 or 120
    #[arg(long)]
    pub duration: Option<String>,
    /// Call to action, in Hindi or English
    #[arg(long)]
    pub cta: Option<String>,
    /// Comma-separated keywords, e.g. "AI Video, Hindi Content"
    #[arg(long)]
    pub keywords: Option<String>,
}

/// How a generated plan is printed.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Toml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => anyhow::bail!("unknown output format {other:?} (expected text, json or toml)"),
        }
    }
}

fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::starter();
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    if let Some(tone) = &cfg.defaults.tone {
        println!("  defaults.tone = {tone}");
    }
    if let Some(duration) = cfg.defaults.duration {
        println!("  defaults.duration = {duration}");
    }
    println!();
    println!("Next: run `vidplan generate --topic \"...\"` to plan a video.");

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            brief,
            fields,
            format,
        } => {
            let resolved = VidplanConfig::resolve(format)?;
            generate_cmd::run_generate(&resolved, brief.as_deref(), &fields)?;
        }
        Commands::Brief => {
            generate_cmd::run_print_brief()?;
        }
        Commands::Tones => {
            list_cmds::run_tones();
        }
        Commands::Durations => {
            list_cmds::run_durations();
        }
        Commands::Init { force } => {
            cmd_init(force)?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
