// Load failures surfaced to a panel
use thiserror::Error;

/// Why a panel load did not produce chart data.
///
/// An empty but well-formed payload is not an error; it yields an empty
/// `ChartData` and takes the "no data" presentation path instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The endpoint answered with a non-2xx status.
    #[error("{}", http_error_text(.status, .message))]
    Http { status: u16, message: Option<String> },

    /// The request never completed or the body was not JSON.
    #[error("{0}")]
    Transport(String),

    /// The body was JSON but not the shape the panel expects.
    #[error("unexpected payload: {0}")]
    Payload(String),
}

fn http_error_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP error! status: {}", status),
    }
}

impl LoadError {
    pub fn http(status: u16, message: Option<String>) -> Self {
        LoadError::Http { status, message }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Http { .. } => "http",
            LoadError::Transport(_) => "transport",
            LoadError::Payload(_) => "payload",
        }
    }
}
