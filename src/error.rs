use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown cost metric: {0}")]
    UnknownMetric(String),
    #[error("Unknown city: {0}")]
    UnknownCity(String),
    #[error("No route found from {start} to {end}")]
    SearchExhausted { start: String, end: String },
    #[error("Search gave up after {expansions} expansions")]
    BudgetExceeded { expansions: usize },
    #[error("Invalid data in {source_name} line {line}: {reason}")]
    InvalidData {
        source_name: String,
        line: usize,
        reason: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
