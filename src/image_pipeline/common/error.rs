use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("bad geometry: {0}")]
    BadGeometry(String),

    #[error("malformed thermal table: expected {expected} bytes, got {actual}")]
    MalformedTable { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
