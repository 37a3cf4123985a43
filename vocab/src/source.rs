//! Source loading: the BODS schema documents and codelists, read from a local
//! cache directory or fetched from the published standard.
//!
//! The cache mirrors the remote layout: schema files sit at the cache root,
//! codelists under `codelists/`. A file that is present in the cache is never
//! fetched unless overwriting was requested, so a warm cache builds offline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::codelist::{CodelistError, Codelists};
use crate::schema::SchemaRegistry;

/// Base URL of the published v0.4 schema directory.
pub const REMOTE_BASE: &str =
    "https://raw.githubusercontent.com/openownership/data-standard/refs/heads/main/schema/";

/// Schema documents, in registration order.
pub const SCHEMA_FILES: [&str; 5] = [
    "components.json",
    "entity-record.json",
    "person-record.json",
    "relationship-record.json",
    "statement.json",
];

/// Codelist files, relative to the `codelists/` directory.
pub const CODELIST_FILES: [&str; 13] = [
    "addressType.csv",
    "annotationMotivation.csv",
    "directOrIndirect.csv",
    "entitySubtype.csv",
    "entityType.csv",
    "interestType.csv",
    "nameType.csv",
    "personType.csv",
    "recordStatus.csv",
    "recordType.csv",
    "securitiesIdentifierSchemes.csv",
    "sourceType.csv",
    "unspecifiedReason.csv",
];

const CODELIST_DIR: &str = "codelists";

/// A failure to obtain one source file. Every variant names the file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading from or writing to the cache failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Cache path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP request failed before a response was received.
    #[error("fetching {url}: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("fetching {url}: HTTP status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },
    /// A schema file is not valid JSON.
    #[error("{file}: invalid JSON: {source}")]
    Json {
        /// Schema file name.
        file: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A codelist file is not a valid codelist.
    #[error(transparent)]
    Codelist(#[from] CodelistError),
}

/// The raw text of every source file, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct SourceFiles {
    /// Schema documents as `(file name, JSON text)`, in registration order.
    pub schemas: Vec<(String, String)>,
    /// Codelists as `(file name, CSV text)`.
    pub codelists: Vec<(String, String)>,
}

impl SourceFiles {
    /// Parses the schema documents into a registry, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] naming the first file that does not parse.
    pub fn registry(&self) -> Result<SchemaRegistry, SourceError> {
        let mut registry = SchemaRegistry::new();
        for (file, text) in &self.schemas {
            let document: Value =
                serde_json::from_str(text).map_err(|source| SourceError::Json {
                    file: file.clone(),
                    source,
                })?;
            registry.register(document);
        }
        Ok(registry)
    }

    /// Parses the codelists.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Codelist`] for the first invalid codelist.
    pub fn codelists(&self) -> Result<Codelists, SourceError> {
        Ok(Codelists::parse(
            self.codelists
                .iter()
                .map(|(name, text)| (name.as_str(), text.as_str())),
        )?)
    }
}

/// A cache directory backed by a remote schema directory.
#[derive(Debug, Clone)]
pub struct SourceCache {
    dir: PathBuf,
    remote: String,
    overwrite: bool,
}

impl SourceCache {
    /// A cache at `dir` backed by [`REMOTE_BASE`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            remote: REMOTE_BASE.to_string(),
            overwrite: false,
        }
    }

    /// Re-fetch every file even when it is cached.
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Uses a different remote base URL. A trailing `/` is added if missing.
    #[must_use]
    pub fn remote(mut self, base: &str) -> Self {
        self.remote = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        self
    }

    /// The cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads every schema and codelist file, fetching those that are missing.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceError`]; a single missing file aborts the load.
    pub fn load(&self) -> Result<SourceFiles, SourceError> {
        let client = http_client(&self.remote)?;
        let mut files = SourceFiles::default();
        for file in SCHEMA_FILES {
            let text = self.obtain(&client, file)?;
            files.schemas.push((file.to_string(), text));
        }
        for file in CODELIST_FILES {
            let text = self.obtain(&client, &format!("{CODELIST_DIR}/{file}"))?;
            files.codelists.push((file.to_string(), text));
        }
        Ok(files)
    }

    fn obtain(
        &self,
        client: &reqwest::blocking::Client,
        relative: &str,
    ) -> Result<String, SourceError> {
        let path = self.dir.join(relative);
        if path.is_file() && !self.overwrite {
            debug!(path = %path.display(), "cached");
            return fs::read_to_string(&path)
                .map_err(|source| SourceError::Io { path, source });
        }

        let url = format!("{}{relative}", self.remote);
        let response = client.get(&url).send().map_err(|source| SourceError::Http {
            url: url.clone(),
            source,
        })?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                url,
                status: response.status().as_u16(),
            });
        }
        let body = response.text().map_err(|source| SourceError::Http {
            url: url.clone(),
            source,
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SourceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &body).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        info!(%url, path = %path.display(), bytes = body.len(), "fetched");
        Ok(body)
    }
}

fn http_client(url: &str) -> Result<reqwest::blocking::Client, SourceError> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("bods-vocab/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })
}

/// Loads every source file through the cache at `cache_dir`.
///
/// # Errors
///
/// See [`SourceCache::load`].
pub fn fetch_sources(cache_dir: &Path, overwrite: bool) -> Result<SourceFiles, SourceError> {
    SourceCache::new(cache_dir).overwrite(overwrite).load()
}
