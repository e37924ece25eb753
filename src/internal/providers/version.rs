use lazy_static::lazy_static;
use regex::Regex;
use semver::Version;

use crate::internal::errors::SourceLinkError;
use crate::internal::mapping::HostMapping;

lazy_static! {
    static ref MAJOR_MINOR_PATCH_REGEX: Regex = Regex::new(
        r"^[vV]?(?P<major>\d+)(?:\.(?P<minor>\d+)(?:\.(?P<patch>\d+))?)?(?P<suffix>[-+].*)?$"
    )
    .expect("version regex is valid");
}

/// A server version as declared on a host, e.g. `4.7` or `12.0.1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerVersion(Version);

impl ServerVersion {
    pub fn parse(value: &str) -> Option<Self> {
        let captures = MAJOR_MINOR_PATCH_REGEX.captures(value.trim())?;

        // Complete partial versions, `4.7` is `4.7.0`
        let completed = format!(
            "{}.{}.{}{}",
            captures.name("major").map_or("0", |m| m.as_str()),
            captures.name("minor").map_or("0", |m| m.as_str()),
            captures.name("patch").map_or("0", |m| m.as_str()),
            captures.name("suffix").map_or("", |m| m.as_str()),
        );

        Version::parse(&completed).ok().map(Self)
    }

    /// Compares major and minor only, so that pre-releases of a version
    /// already have its features.
    pub fn at_least(&self, major: u64, minor: u64) -> bool {
        (self.0.major, self.0.minor) >= (major, minor)
    }
}

impl std::fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The version declared on the matched host, if any.
pub fn declared_version(
    declaration: Option<&HostMapping>,
) -> Result<Option<ServerVersion>, SourceLinkError> {
    let Some(declaration) = declaration else {
        return Ok(None);
    };

    match declaration.version.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => ServerVersion::parse(value)
            .map(Some)
            .ok_or_else(|| SourceLinkError::InvalidVersion {
                host: declaration.host.clone(),
                version: value.to_string(),
            }),
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
