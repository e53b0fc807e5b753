// Default dictionary source - HTTP fetch with a cache-backed fallback
//
// A successful fetch is cached on disk, so later loads (and offline starts)
// can reuse it. Every failure mode collapses to an empty mapping: the store
// then runs in pass-through mode instead of surfacing an error.

use crate::{debug, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;

use super::format;

pub const APP_DIR_NAME: &str = "wordswap";
pub const CACHE_FILE_NAME: &str = "default-dictionary.json";

/// Error types for default-source operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// App data directory not found
    #[error("App data directory not found")]
    DataDirNotFound,
    /// Network error during fetch
    #[error("Network error: {0}")]
    Network(String),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(String),
    /// Fetched body is not a JSON object with string values
    #[error("Malformed dictionary body: {0}")]
    Malformed(String),
}

/// Fetches the seed mapping from a configured URL, caching it locally
pub struct DictionarySource {
    url: String,
    cache_path: PathBuf,
}

impl DictionarySource {
    /// Create a source with an explicit cache location
    pub fn new(url: impl Into<String>, cache_path: PathBuf) -> Self {
        Self {
            url: url.into(),
            cache_path,
        }
    }

    /// Create a source caching under {app_data_dir}/wordswap/
    pub fn with_default_cache_path(url: impl Into<String>) -> Result<Self, SourceError> {
        let data_dir = dirs::data_dir().ok_or(SourceError::DataDirNotFound)?;
        let cache_path = data_dir.join(APP_DIR_NAME).join(CACHE_FILE_NAME);
        Ok(Self::new(url, cache_path))
    }

    /// URL this source fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Obtain the default mapping: fetch, else cache, else empty
    ///
    /// Never fails; a fetch problem downgrades to the cached copy, and a
    /// missing cache downgrades to the empty mapping (pass-through mode).
    pub async fn load_mapping(&self) -> HashMap<String, String> {
        match self.fetch_and_cache().await {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!("Default dictionary fetch failed: {}", e);
                match self.load_cached() {
                    Ok(mapping) => {
                        info!(
                            "Using cached default dictionary ({} entries) from {:?}",
                            mapping.len(),
                            self.cache_path
                        );
                        mapping
                    }
                    Err(cache_err) => {
                        debug!("No usable dictionary cache: {}", cache_err);
                        info!("Starting with an empty dictionary (pass-through mode)");
                        HashMap::new()
                    }
                }
            }
        }
    }

    /// Fetch the mapping from the URL and atomically refresh the cache file
    async fn fetch_and_cache(&self) -> Result<HashMap<String, String>, SourceError> {
        use futures_util::StreamExt;
        use tokio::io::AsyncWriteExt;
        use uuid::Uuid;

        debug!("Fetching default dictionary from {}", self.url);

        let response = reqwest::get(&self.url)
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Network(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let cache_dir = match self.cache_path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => return Err(SourceError::DataDirNotFound),
        };
        std::fs::create_dir_all(&cache_dir).map_err(|e| SourceError::Io(e.to_string()))?;

        // Stream the body to a uniquely named temp file next to the cache
        let temp_path = cache_dir.join(format!(".{}-{}", CACHE_FILE_NAME, Uuid::new_v4()));
        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| SourceError::Io(e.to_string()))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    let _ = std::fs::remove_file(&temp_path);
                    return Err(SourceError::Network(e.to_string()));
                }
            };
            if let Err(e) = file.write_all(&chunk).await {
                let _ = std::fs::remove_file(&temp_path);
                return Err(SourceError::Io(e.to_string()));
            }
        }
        if let Err(e) = file.flush().await {
            let _ = std::fs::remove_file(&temp_path);
            return Err(SourceError::Io(e.to_string()));
        }
        drop(file);

        // Validate the body before promoting it to the cache
        let content = match std::fs::read_to_string(&temp_path) {
            Ok(content) => content,
            Err(e) => {
                let _ = std::fs::remove_file(&temp_path);
                return Err(SourceError::Io(e.to_string()));
            }
        };
        let mapping = match format::parse_json_mapping(&content) {
            Ok(mapping) => mapping,
            Err(e) => {
                let _ = std::fs::remove_file(&temp_path);
                return Err(SourceError::Malformed(e.to_string()));
            }
        };

        if let Err(e) = std::fs::rename(&temp_path, &self.cache_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(SourceError::Io(e.to_string()));
        }

        info!(
            "Fetched default dictionary ({} entries), cached at {:?}",
            mapping.len(),
            self.cache_path
        );
        Ok(mapping)
    }

    /// Read and parse the cached copy of the default dictionary
    fn load_cached(&self) -> Result<HashMap<String, String>, SourceError> {
        if !self.cache_path.exists() {
            return Err(SourceError::Io("cache file does not exist".to_string()));
        }
        let content = std::fs::read_to_string(&self.cache_path)
            .map_err(|e| SourceError::Io(e.to_string()))?;
        format::parse_json_mapping(&content).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
