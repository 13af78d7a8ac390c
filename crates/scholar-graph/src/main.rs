//! scholar-graph CLI - Entry point
//!
//! Runs batch graph builds over pre-collected records, drives the HTTP
//! profile source directly, and prints the category taxonomy.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_graph::models::{CoPublicationCounts, CoPublicationEntry, RawProfileRecord};
use scholar_graph::{
    CancelFlag, Config, GraphFilter, GraphResult, HttpProfileSource, IngestionPipeline,
    config::taxonomy, formatters,
};

#[derive(Parser, Debug)]
#[command(name = "scholar-graph")]
#[command(about = "Researcher-profile normalization and collaboration-graph pipeline")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a graph from pre-collected records
    Batch {
        /// JSON file with raw profile records
        #[arg(long)]
        records: PathBuf,

        /// JSON file with pairwise co-publication counts
        #[arg(long)]
        co_publications: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Keep only researchers with at least this many citations
        #[arg(long)]
        min_citations: Option<i64>,

        /// Drop edges weaker than this strength
        #[arg(long)]
        min_strength: Option<f64>,

        /// Keep only the top N researchers by rank score
        #[arg(long)]
        max_nodes: Option<usize>,
    },

    /// Search the profile source by keyword and build a graph
    Search {
        /// Search keyword (repeatable)
        #[arg(long = "keyword", required = true)]
        keywords: Vec<String>,

        /// Profile-source API key (optional, raises rate limits)
        #[arg(long, env = "SCHOLAR_PROFILE_API_KEY")]
        api_key: Option<String>,

        /// Profile-source base URL override
        #[arg(long, env = "SCHOLAR_PROFILE_BASE_URL")]
        base_url: Option<String>,

        /// Minimum citations for a candidate to enter the batch
        #[arg(long)]
        min_citations: Option<i64>,

        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// List the research-category taxonomy
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Full graph as JSON
    Json,
    /// Compact JSON projection
    Compact,
    /// Human-readable Markdown summary
    Markdown,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting scholar-graph");

    match cli.command {
        Commands::Batch {
            records,
            co_publications,
            output,
            format,
            min_citations,
            min_strength,
            max_nodes,
        } => {
            let raw: Vec<RawProfileRecord> = read_json(&records)
                .with_context(|| format!("reading records from {}", records.display()))?;

            let counts = match co_publications {
                Some(ref path) => {
                    let entries: Vec<CoPublicationEntry> = read_json(path).with_context(|| {
                        format!("reading co-publication counts from {}", path.display())
                    })?;
                    CoPublicationCounts::from_entries(entries)
                }
                None => CoPublicationCounts::new(),
            };

            let pipeline = IngestionPipeline::new(Config::default());
            let graph = if min_citations.is_some() || min_strength.is_some() || max_nodes.is_some()
            {
                let filter = GraphFilter {
                    min_citations,
                    min_strength,
                    max_nodes,
                    ..Default::default()
                };
                pipeline
                    .run_batch_filtered(raw, &counts, &filter)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?
            } else {
                pipeline
                    .run_batch(raw, &counts)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?
            };

            write_output(output.as_deref(), &render(&graph, format)?)?;
        }

        Commands::Search { keywords, api_key, base_url, min_citations, output, format } => {
            let mut config = Config::new(api_key);
            if let Some(url) = base_url {
                config.source.base_url = url;
            }
            if let Some(min) = min_citations {
                config.min_citations = min;
            }

            let source = HttpProfileSource::new(config.source.clone())?;
            let pipeline = IngestionPipeline::new(config);
            let cancel = CancelFlag::new();

            let graph = pipeline
                .run_search(&source, &keywords, &cancel)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            write_output(output.as_deref(), &render(&graph, format)?)?;
        }

        Commands::Categories => {
            println!("Research categories ({}):", taxonomy::CATEGORIES.len());
            for (key, phrases) in taxonomy::CATEGORIES {
                println!("  {key}: {}", phrases.join(", "));
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn render(graph: &GraphResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(graph)?,
        OutputFormat::Compact => serde_json::to_string(&formatters::compact_graph(graph))?,
        OutputFormat::Markdown => formatters::format_graph_markdown(graph),
    })
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing output to {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}
