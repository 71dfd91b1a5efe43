use axum::http::header::InvalidHeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgIconsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised by the icon scanner; carried to the host untouched.
    #[error("Scan error in {}: {message}", .root.display())]
    Scan { root: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("{0}")]
    Other(String),
}

impl SvgIconsError {
    /// Create a scan error for the given root directory
    pub fn scan(root: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Scan {
            root: root.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Format error for terminal output
    pub fn format_detailed(&self) -> String {
        match self {
            SvgIconsError::Scan { root, message } => {
                format!("❌ Scan Error: {}\n📁 Directory: {}", message, root.display())
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SvgIconsError>;

impl From<anyhow::Error> for SvgIconsError {
    fn from(err: anyhow::Error) -> Self {
        SvgIconsError::Other(err.to_string())
    }
}

// The dev server turns a failed request into a 500 for that request only.
impl IntoResponse for SvgIconsError {
    fn into_response(self) -> Response {
        tracing::error!("❌ {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
