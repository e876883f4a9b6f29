mod client;
mod config;
mod derive_cmd;
mod generate_cmd;
mod render;
mod roast_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use roadmap_core::prompt::{Language, RoastContext, RoastLevel};

use config::{CliOverrides, RoadmapConfig};
use generate_cmd::ProfileArgs;
use render::OutputFormat;

#[derive(Parser)]
#[command(name = "roadmap", about = "Turn a goal into a validated day-by-day roadmap")]
struct Cli {
    /// Chat-completion base URL (overrides ROADMAP_BASE_URL env var)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name (overrides ROADMAP_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    /// API key (overrides ROADMAP_API_KEY env var)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Per-request timeout in seconds (overrides ROADMAP_TIMEOUT_SECS env var)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a roadmap config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Derive a plan from a saved model response (file or stdin)
    Derive {
        /// The goal the response was generated for
        #[arg(long)]
        goal: String,
        /// Preferred plan length in days, used if the response is unusable
        #[arg(long, allow_negative_numbers = true)]
        duration_hint: Option<i64>,
        /// Response file (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Ask the model for a roadmap and derive a plan from its answer
    Generate {
        /// The goal to plan for
        #[arg(long)]
        goal: String,
        /// Preferred plan length in days, used if the answer is unusable
        #[arg(long, allow_negative_numbers = true)]
        duration_hint: Option<i64>,
        /// Completion provider: openai-compatible or fixture
        #[arg(long)]
        provider: Option<String>,
        /// Answer every prompt with the contents of this file
        #[arg(long)]
        fixture: Option<PathBuf>,
        #[command(flatten)]
        profile: ProfileFlags,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Get a short roast about an unfinished task
    Roast {
        /// Title of the unfinished task
        #[arg(long)]
        task: String,
        /// Age of the user
        #[arg(long, default_value_t = 25)]
        age: u32,
        /// english or hindi (Hinglish)
        #[arg(long, default_value = "english")]
        language: Language,
        /// mild, spicy or extra_spicy
        #[arg(long, default_value = "spicy")]
        level: RoastLevel,
        /// Completion provider: openai-compatible or fixture
        #[arg(long)]
        provider: Option<String>,
        /// Answer every prompt with the contents of this file
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct ProfileFlags {
    /// Your name, for a personalized prompt
    #[arg(long)]
    name: Option<String>,
    /// Your age
    #[arg(long)]
    age: Option<u32>,
    /// Your gender
    #[arg(long)]
    gender: Option<String>,
    /// Your country
    #[arg(long)]
    country: Option<String>,
    /// english or hindi
    #[arg(long, default_value = "english")]
    language: Language,
}

impl From<ProfileFlags> for ProfileArgs {
    fn from(flags: ProfileFlags) -> Self {
        Self {
            name: flags.name,
            age: flags.age,
            gender: flags.gender,
            country: flags.country,
            language: flags.language,
        }
    }
}

/// Execute the `roadmap init` command: write config file.
fn cmd_init(cli: &CliOverrides, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut section = config::ApiSection::default();
    if let Some(url) = &cli.base_url {
        section.base_url = url.clone();
    }
    if let Some(model) = &cli.model {
        section.model = model.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        section.timeout_secs = secs;
    }
    section.api_key = cli.api_key.clone();

    let cfg = config::ConfigFile { api: section };
    let path = config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  api.base_url = {}", cfg.api.base_url);
    println!("  api.model = {}", cfg.api.model);
    println!("  api.timeout_secs = {}", cfg.api.timeout_secs);
    match &cfg.api.api_key {
        Some(key) => println!("  api.api_key = {}", config::mask_secret(key)),
        None => {
            println!();
            println!("No API key stored. Set ROADMAP_API_KEY or rerun with --api-key.");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = cli.overrides();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(&overrides, force)?;
        }
        Commands::Derive {
            goal,
            duration_hint,
            input,
            format,
        } => {
            derive_cmd::run_derive(&goal, duration_hint, input.as_deref(), format)?;
        }
        Commands::Generate {
            goal,
            duration_hint,
            provider,
            fixture,
            profile,
            format,
        } => {
            let resolved = RoadmapConfig::resolve(&overrides)?;
            let registry = client::build_registry(&resolved, fixture.as_deref());
            let client =
                client::select_client(&registry, provider.as_deref(), fixture.as_deref())?;
            let service = client::build_service(&resolved, client);
            generate_cmd::run_generate(&service, &goal, duration_hint, profile.into(), format)
                .await?;
        }
        Commands::Roast {
            task,
            age,
            language,
            level,
            provider,
            fixture,
        } => {
            let resolved = RoadmapConfig::resolve(&overrides)?;
            let registry = client::build_registry(&resolved, fixture.as_deref());
            let client =
                client::select_client(&registry, provider.as_deref(), fixture.as_deref())?;
            let service = client::build_service(&resolved, client);
            let ctx = RoastContext {
                task_title: task,
                age,
                language,
                level,
            };
            roast_cmd::run_roast(&service, ctx).await?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "roadmap", &mut std::io::stdout());
        }
    }

    Ok(())
}
