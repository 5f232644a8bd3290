use thiserror::Error;

/// Errors that can occur while exchanging a pipeline with the external
/// analyzer. Every variant is recoverable: the pipeline state is left
/// untouched and the caller may retry the submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Failed to exchange the pipeline with the analyzer: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Analyzer rejected the submission with status {0}")]
    Status(reqwest::StatusCode),
}
