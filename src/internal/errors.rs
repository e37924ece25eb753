use std::fmt;

use thiserror::Error;

use crate::internal::providers::ProviderKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceLinkError {
    #[error("'{0}' is not a valid host name: expected 'host[:port]' without scheme, user or path")]
    InvalidHost(String),
    #[error("content url '{url}' declared for host '{host}' is not a valid absolute url")]
    InvalidContentUrl { host: String, url: String },
    #[error("host '{host}' of provider {provider} is missing the required '{attribute}' attribute")]
    MissingHostAttribute {
        provider: ProviderKind,
        host: String,
        attribute: &'static str,
    },
    #[error("version '{version}' declared for host '{host}' is not a valid version")]
    InvalidVersion { host: String, version: String },
    #[error("source root '{0}' does not have a repository url")]
    MissingRepositoryUrl(String),
    #[error("repository url '{0}' is not a valid absolute url")]
    InvalidRepositoryUrl(String),
    #[error("repository url '{url}' does not match the {provider} repository url format")]
    UnrecognizedRepositoryPath { provider: ProviderKind, url: String },
    #[error("source root '{0}' does not have a revision id")]
    MissingRevisionId(String),
    #[error("revision id '{0}' is not a valid git commit hash (expected 40 hexadecimal digits)")]
    InvalidRevisionId(String),
    #[error("{provider} does not support {scheme} urls, only ssh clone urls can be used: {url}")]
    UnsupportedTransport {
        provider: ProviderKind,
        scheme: String,
        url: String,
    },
    #[error("local path '{0}' of a source root must end with a directory separator")]
    InvalidLocalPath(String),
    #[error("source link url '{0}' must contain exactly one wildcard '*'")]
    InvalidWildcard(String),
}

/// Errors collected over a batch of source roots, so that every problem is
/// reported at once instead of one at a time.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchError {
    pub errors: Vec<(String, SourceLinkError)>,
}

impl BatchError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, context: impl Into<String>, error: SourceLinkError) {
        self.errors.push((context.into(), error));
    }

    pub fn extend(&mut self, other: BatchError) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, BatchError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) encountered", self.errors.len())?;
        for (context, error) in &self.errors {
            write!(f, "\n  {}: {}", context, error)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid source roots in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no provider configured")]
    NoProvider,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    SourceLink(#[from] SourceLinkError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
