use thiserror::Error;

/// Why an analysis fell back to the default estimate.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analyzer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode analyzer response: {0}")]
    Decode(String),

    #[error("API key missing: set the {0} environment variable")]
    MissingApiKey(String),
}
