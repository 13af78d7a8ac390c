//! Researcher-profile normalization and collaboration-graph derivation.
//!
//! Ingests raw academic-profile records, normalizes them into a canonical
//! schema (affiliation parsing, category classification, composite rank
//! scoring), deduplicates across search passes, and derives a directed,
//! weighted co-authorship graph.
//!
//! # Features
//!
//! - **Pure core**: location, category, rank, dedup and edge inference are
//!   synchronous, deterministic and side-effect free
//! - **Async orchestration**: bounded concurrent enrichment over Tokio
//! - **Injected boundary**: the profile source is a rate-limited, retried
//!   collaborator behind a trait, never ambient state
//!
//! # Example
//!
//! ```no_run
//! use scholar_graph::{Config, IngestionPipeline};
//! use scholar_graph::models::CoPublicationCounts;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = IngestionPipeline::new(Config::default());
//!     let graph = pipeline.run_batch(Vec::new(), &CoPublicationCounts::new()).await?;
//!     println!("{} nodes", graph.nodes.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod text;

pub use config::Config;
pub use error::{PipelineError, SourceError};
pub use models::{GraphFilter, GraphResult};
pub use pipeline::{CancelFlag, IngestionPipeline};
pub use source::{HttpProfileSource, ProfileSource};
