//! Allocation request files (JSON or TOML).

use std::fs;
use std::path::Path;

use rebalancer_portfolio::AllocationRequest;
use tracing::info;

use crate::error::{FileError, FileResult};

/// Serialization format of a request file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl RequestFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> FileResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(FileError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Decodes a request from text.
pub fn parse_request(text: &str, format: RequestFormat) -> Result<AllocationRequest, String> {
    match format {
        RequestFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        RequestFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    }
}

/// Encodes a request as text.
pub fn render_request(request: &AllocationRequest, format: RequestFormat) -> Result<String, String> {
    match format {
        RequestFormat::Json => serde_json::to_string_pretty(request).map_err(|e| e.to_string()),
        RequestFormat::Toml => toml::to_string_pretty(request).map_err(|e| e.to_string()),
    }
}

/// Loads a request file, choosing the decoder by extension.
pub fn load_request(path: impl AsRef<Path>) -> FileResult<AllocationRequest> {
    let path = path.as_ref();
    let format = RequestFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    let request = parse_request(&text, format).map_err(|msg| FileError::request(path, msg))?;

    info!(
        path = %path.display(),
        classes = request.asset_classes.len(),
        securities = request.securities.values().map(|s| s.len()).sum::<usize>(),
        "loaded allocation request"
    );
    Ok(request)
}

/// Writes a request file, choosing the encoder by extension.
pub fn write_request(path: impl AsRef<Path>, request: &AllocationRequest) -> FileResult<()> {
    let path = path.as_ref();
    let format = RequestFormat::from_path(path)?;
    let text = render_request(request, format).map_err(|msg| FileError::request(path, msg))?;
    fs::write(path, text).map_err(|e| FileError::io(path, e))?;

    info!(path = %path.display(), "wrote allocation request");
    Ok(())
}
