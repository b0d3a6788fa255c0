use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use url::Url;

/// Fallback page title: the last non-empty path segment, or the host
pub fn title_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(|s| s.to_string())
        .or_else(|| url.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Writes UTF-8 text to `path`, replacing any existing file
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
