use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::internal::errors::ConfigError;
use crate::internal::mapping::HostMapping;
use crate::internal::providers::ProviderKind;
use crate::internal::source_root::RepositoryRoot;

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// ```yaml
/// repository_url: git@github.com:org/repo.git
/// providers:
///   - kind: github
///     hosts:
///       - host: github.contoso.com
///   - kind: azure-devops-server
///     default_hosts: false
///     hosts:
///       - host: tfs.contoso.com:8080
///         virtual_directory: tfs
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceLinkConfig {
    /// The project repository, source of the implicit host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<HostMapping>,
    /// Whether the provider's well-known hosts are added.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub default_hosts: bool,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            hosts: vec![],
            default_hosts: true,
        }
    }

    pub fn with_host(mut self, host: HostMapping) -> Self {
        self.hosts.push(host);
        self
    }

    /// The declared hosts, followed by the well-known hosts that were not
    /// declared again.
    pub fn hosts_with_defaults(&self) -> Vec<HostMapping> {
        let mut hosts = self.hosts.clone();
        if !self.default_hosts {
            return hosts;
        }

        for default in self.kind.provider().default_hosts() {
            let declared = self
                .hosts
                .iter()
                .any(|host| host.host.trim().eq_ignore_ascii_case(&default.host));
            if !declared {
                hosts.push(default);
            }
        }

        hosts
    }
}

impl SourceLinkConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&contents, &path.display().to_string())
    }

    pub fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
            path: origin.to_string(),
            source,
        })?;

        if config.providers.is_empty() {
            return Err(ConfigError::NoProvider);
        }

        Ok(config)
    }

    /// The implicit host only applies when exactly one provider is in use.
    pub fn is_single_provider(&self) -> bool {
        self.providers.len() == 1
    }
}

pub fn load_source_roots(path: impl AsRef<Path>) -> Result<Vec<RepositoryRoot>, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
