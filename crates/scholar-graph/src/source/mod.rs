//! Profile-source boundary.
//!
//! The pipeline's algorithmic core never touches network or disk; everything
//! external comes through [`ProfileSource`]. Rate limiting and retry are the
//! source implementation's concern, injected via configuration rather than
//! held as ambient global state.

mod http;

use std::collections::HashMap;

use futures::stream::BoxStream;

pub use http::{CandidatePage, HttpProfileSource};

use crate::error::SourceResult;
use crate::models::RawProfileRecord;

/// An external academic-profile source.
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    /// Stream candidate researcher profiles matching a search keyword,
    /// lazily paged from the source.
    fn fetch_candidates<'a>(
        &'a self,
        keyword: &'a str,
    ) -> BoxStream<'a, SourceResult<RawProfileRecord>>;

    /// Fetch the co-publication census for one researcher: co-author display
    /// name to shared-publication count.
    async fn fetch_co_publications(
        &self,
        researcher_id: &str,
    ) -> SourceResult<HashMap<String, i64>>;
}
