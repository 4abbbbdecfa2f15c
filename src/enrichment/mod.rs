pub mod batch;
pub mod enricher;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod resolver;
pub mod types;

pub use batch::run_batches;
pub use enricher::Enricher;
pub use error::EnrichError;
pub use types::{BusinessRecord, EnrichedRecord, FetchConfig, ResolvedRecord, RunCounters};
