use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use query_transform::config::AppConfig;
use query_transform::core::logging;
use query_transform::core::transform::{LogSink, QueryTransform, QueryTransformer, TransformKind};

#[derive(Parser)]
#[command(name = "qxform")]
#[command(about = "Rewrite and expand search queries with CSV rule tables")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ~/.config/qxform/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured transform pipeline over a query
    Run {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Apply a single transform from a rules file
    Apply {
        /// Transform type: rewrite, synonym or bag
        #[arg(short = 't', long = "type")]
        kind: String,

        /// CSV rules file
        #[arg(short, long)]
        rules: PathBuf,

        /// Name used in diagnostics
        #[arg(short, long, default_value = "cli")]
        name: String,

        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Print the parsed rule table as JSON
    Rules {
        /// Transform type: rewrite, synonym or bag
        #[arg(short = 't', long = "type")]
        kind: String,

        /// CSV rules file
        #[arg(short, long)]
        rules: PathBuf,

        /// Name used in diagnostics
        #[arg(short, long, default_value = "cli")]
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    logging::init(&logging::level_for(cli.verbose, config.log.level.as_deref()));
    log::debug!("{} v{} starting", query_transform::NAME, query_transform::VERSION);

    if let Err(e) = execute(cli.command, cli.config.as_deref(), &config) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

fn execute(command: Commands, config_path: Option<&Path>, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Run { query } => {
            let base_dir = match config_path {
                Some(path) => path.parent().map(Path::to_path_buf),
                None => AppConfig::config_path().parent().map(Path::to_path_buf),
            };
            let pipeline = config
                .pipeline(base_dir.as_deref())
                .context("building transform pipeline")?;
            if pipeline.is_empty() {
                log::warn!("No transforms configured; query passes through unchanged");
            }
            println!("{}", pipeline.run(&query.join(" ")));
        }
        Commands::Apply { kind, rules, name, query } => {
            let transform = build_transform(config, &kind, &rules, &name, query.join(" "))?;
            println!("{}", transform.process());
        }
        Commands::Rules { kind, rules, name } => {
            let transform = build_transform(config, &kind, &rules, &name, String::new())?;
            let patterns = transform.replace_patterns();
            println!("{}", serde_json::to_string_pretty(&patterns)?);
        }
    }
    Ok(())
}

fn build_transform(
    config: &AppConfig,
    kind: &str,
    rules: &Path,
    name: &str,
    query: String,
) -> anyhow::Result<QueryTransform> {
    let kind: TransformKind = kind.parse()?;
    let text = std::fs::read_to_string(rules)
        .with_context(|| format!("reading rules {}", rules.display()))?;
    Ok(config.factory(Arc::new(LogSink)).build(kind, query, name, text))
}
