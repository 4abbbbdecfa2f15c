use thiserror::Error;

/// Everything that can sink a single record on its way through the
/// pipeline. None of these abort a batch or a run; the orchestrator logs
/// them and moves on.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not parse {context}: {reason}")]
    Parse { context: String, reason: String },

    #[error("rendered session for {url} failed: {reason}")]
    Render { url: String, reason: String },

    #[error("no usable website candidate for '{business}'")]
    Resolution { business: String },
}
