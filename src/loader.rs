//! Document snapshot loading from files, strings, and HTTP URLs.
//!
//! A snapshot is the JSON form of an already-parsed document: root channels
//! keyed by name, and operations naming the channels they use.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::model::{Binding, Channel, Document, Operation};
use crate::types::Action;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    channels: BTreeMap<String, RawChannel>,
    #[serde(default)]
    operations: Vec<RawOperation>,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    publish: bool,
    #[serde(default)]
    subscribe: bool,
    #[serde(default)]
    bindings: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawOperation {
    id: String,
    action: Action,
    #[serde(default)]
    channels: Vec<String>,
}

impl RawChannel {
    fn into_channel(self, name: &str) -> Channel {
        let mut channel = Channel::new(name)
            .publish(self.publish)
            .subscribe(self.subscribe);
        if let Some(address) = self.address {
            channel = channel.with_address(address);
        }
        for (protocol, config) in self.bindings {
            channel = channel.with_binding(Binding::new(protocol).with_config(config));
        }
        channel
    }
}

fn build_document(raw: RawDocument) -> Result<Document, LoadError> {
    let mut doc = Document::new();
    for (name, raw_channel) in raw.channels {
        doc = doc.with_channel(raw_channel.into_channel(&name));
    }

    let mut operations = Vec::with_capacity(raw.operations.len());
    for raw_op in raw.operations {
        let mut op = Operation::new(raw_op.id.clone(), raw_op.action);
        for name in &raw_op.channels {
            let channel = doc.channel(name).ok_or_else(|| LoadError::UnknownChannel {
                operation: raw_op.id.clone(),
                channel: name.clone(),
            })?;
            op = op.with_channel(channel.clone());
        }
        operations.push(op);
    }

    debug!(operations = operations.len(), "loaded document snapshot");
    Ok(operations.into_iter().fold(doc, Document::with_operation))
}

/// Load a document snapshot from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::InvalidJson` if it isn't a valid snapshot, or
/// `LoadError::UnknownChannel` if an operation names an undeclared channel.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_document_str(&content)
}

/// Load a document snapshot from a JSON string.
pub fn load_document_str(content: &str) -> Result<Document, LoadError> {
    let raw: RawDocument =
        serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })?;
    build_document(raw)
}

/// Load a document snapshot from an already-decoded JSON value.
pub fn load_document_value(value: Value) -> Result<Document, LoadError> {
    let raw: RawDocument =
        serde_json::from_value(value).map_err(|source| LoadError::InvalidJson { source })?;
    build_document(raw)
}

/// Load a document snapshot from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
#[cfg(feature = "remote")]
pub fn load_document_url(url: &str) -> Result<Document, LoadError> {
    let network_error = |source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    let body: Value = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json())
        .map_err(network_error)?;

    load_document_value(body)
}

/// Load from a URL when `source` looks like one, otherwise from a file path.
pub fn load_document_auto(source: &str) -> Result<Document, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_document_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_document(Path::new(source))
    }
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
