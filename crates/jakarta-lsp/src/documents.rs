use std::collections::HashMap;
use std::sync::RwLock;

use lsp_types::Uri;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("`{0}` is not a file URI")]
    NotAFileUri(String),
    #[error("no document for `{0}`")]
    NotFound(String),
    #[error("failed to read `{uri}`: {source}")]
    Io {
        uri: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the text of a URI comes from.
pub trait DocumentSource: Send + Sync {
    fn read(&self, uri: &Uri) -> Result<String, DocumentError>;
}

/// Open editor buffers keyed by URI string.
#[derive(Debug, Default)]
pub struct InMemoryDocuments {
    documents: RwLock<HashMap<String, String>>,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: &Uri, text: impl Into<String>) {
        self.documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(uri.as_str().to_owned(), text.into());
    }

    pub fn close(&self, uri: &Uri) -> Option<String> {
        self.documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(uri.as_str())
    }
}

impl DocumentSource for InMemoryDocuments {
    fn read(&self, uri: &Uri) -> Result<String, DocumentError> {
        self.documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(uri.as_str())
            .cloned()
            .ok_or_else(|| DocumentError::NotFound(uri.to_string()))
    }
}

/// Reads `file://` URIs from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemDocuments;

impl DocumentSource for FileSystemDocuments {
    fn read(&self, uri: &Uri) -> Result<String, DocumentError> {
        let path = url::Url::parse(uri.as_str())
            .ok()
            .filter(|url| url.scheme() == "file")
            .and_then(|url| url.to_file_path().ok())
            .ok_or_else(|| DocumentError::NotAFileUri(uri.to_string()))?;
        std::fs::read_to_string(&path).map_err(|source| DocumentError::Io {
            uri: uri.to_string(),
            source,
        })
    }
}
