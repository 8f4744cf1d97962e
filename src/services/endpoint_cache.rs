use std::fs;
use std::path::PathBuf;

/// Last-known-working LLM endpoint
///
/// Keeps the endpoint in memory for the session and optionally mirrors it
/// to a small text file so later runs skip the probing pass. File IO is
/// best-effort: a missing or unwritable cache file is logged, never an
/// error.
#[derive(Debug, Default)]
pub struct EndpointCache {
    current: Option<String>,
    path: Option<PathBuf>,
}

impl EndpointCache {
    /// Memory-only cache, nothing survives the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Cache backed by a text file; loads a previously persisted endpoint
    /// if one exists.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(contents) => {
                let endpoint = contents.trim();
                if endpoint.is_empty() {
                    None
                } else {
                    tracing::debug!(endpoint, "loaded cached LLM endpoint");
                    Some(endpoint.to_string())
                }
            }
            Err(_) => None,
        };

        Self {
            current,
            path: Some(path),
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Remember a working endpoint, persisting it when a file is configured.
    pub fn store(&mut self, endpoint: &str) {
        self.current = Some(endpoint.to_string());

        if let Some(path) = &self.path {
            if let Err(e) = fs::write(path, endpoint) {
                tracing::warn!(error = %e, path = %path.display(), "failed to persist LLM endpoint");
            }
        }
    }

    /// Forget the endpoint after a failed call so the next judgment
    /// re-probes.
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}
