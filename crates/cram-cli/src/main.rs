mod config;
mod generate_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use config::CramConfig;

#[derive(Parser)]
#[command(name = "cram", about = "Study session planner backed by an LLM")]
struct Cli {
    /// Upstream API key (overrides CRAM_OPENAI_API_KEY env var)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a cram config file
    Init {
        /// API key to store (falls back to CRAM_OPENAI_API_KEY / OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Model identifier to store
        #[arg(long)]
        model: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Serve the session plan endpoint over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },
    /// Generate one plan from a material file and print it as JSON
    Generate {
        /// Path to the study material text file
        file: String,
        /// Session duration in minutes
        #[arg(long)]
        duration: f64,
        /// Energy level on a 1-5 scale
        #[arg(long)]
        energy: f64,
        /// Study type (e.g. "reading", "flashcards")
        #[arg(long)]
        study_type: String,
    },
}

/// Execute the `cram init` command: write config file.
fn cmd_init(api_key: Option<&str>, model: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let api_key = match api_key {
        Some(key) => key.to_string(),
        None => std::env::var("CRAM_OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                anyhow::anyhow!(
                    "no API key given; pass --api-key or set CRAM_OPENAI_API_KEY"
                )
            })?,
    };

    let cfg = config::ConfigFile {
        openai: config::OpenAiSection {
            api_key: api_key.clone(),
            model: model.map(str::to_string),
            base_url: None,
        },
    };

    config::save_config(&cfg)?;

    let visible = api_key.len().min(7);
    println!("Config written to {}", path.display());
    println!("  openai.api_key = {}...", &api_key[..visible]);
    if let Some(m) = model {
        println!("  openai.model = {m}");
    }
    println!();
    println!("Next: run `cram serve` to start the plan endpoint.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            api_key,
            model,
            force,
        } => {
            let key = api_key.as_deref().or(cli.api_key.as_deref());
            cmd_init(key, model.as_deref(), force)?;
        }
        Commands::Serve { bind, port } => {
            let resolved = CramConfig::resolve(cli.api_key.as_deref())?;
            let client = resolved.build_client()?;
            serve_cmd::run_serve(client, &bind, port).await?;
        }
        Commands::Generate {
            file,
            duration,
            energy,
            study_type,
        } => {
            let resolved = CramConfig::resolve(cli.api_key.as_deref())?;
            let client = resolved.build_client()?;
            generate_cmd::run_generate(&client, &file, duration, energy, &study_type).await?;
        }
    }

    Ok(())
}
