//! Declarative repository path grammar shared by the Azure DevOps style
//! providers.
//!
//! A path shape describes what comes before the repository tail, and the
//! marker literal that separates `{project}[/{team}]` from the repository
//! name:
//!
//! ```text
//! [{prefix}/]{project}[/{team}]/{marker}/[_full|_optimized/]{repositoryName}
//! ```

use itertools::Itertools;

pub const GIT_MARKER: &str = "_git";
pub const SSH_MARKER: &str = "_ssh";

const KNOWN_MARKERS: &[&str] = &[GIT_MARKER, SSH_MARKER];
const VIEW_SEGMENTS: &[&str] = &["_full", "_optimized"];

/// Components extracted from a repository path. Providers without structure
/// store the whole repository path in `repository_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRepositoryPath {
    pub base_path: Vec<String>,
    pub account: Option<String>,
    pub collection: Option<String>,
    pub project: Option<String>,
    pub team: Option<String>,
    pub repository_name: String,
}

impl ParsedRepositoryPath {
    pub fn repository(name: impl Into<String>) -> Self {
        Self {
            repository_name: name.into(),
            ..Default::default()
        }
    }

    /// The project, which Azure DevOps defaults to the repository name when
    /// the url does not carry one.
    pub fn project_or_repository(&self) -> &str {
        self.project.as_deref().unwrap_or(&self.repository_name)
    }

    /// `{project}[/{team}]`, as written in the original url.
    pub fn project_and_team(&self) -> Option<String> {
        let project = self.project.as_deref()?;
        Some(match self.team.as_deref() {
            Some(team) => format!("{}/{}", project, team),
            None => project.to_string(),
        })
    }

    pub fn base_path(&self) -> String {
        self.base_path.iter().join("/")
    }
}

/// Leading segments consumed before the repository tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPrefix<'a> {
    None,
    /// A literal that may appear first and is then kept as the collection
    /// (hosted `DefaultCollection`).
    OptionalCollection(&'a str),
    /// The first segment is the account (`dev.azure.com/{account}`).
    Account,
    /// A required literal followed by the account (`v3/{account}`).
    MarkedAccount(&'a str),
    /// The virtual directory segments followed by a mandatory collection.
    VirtualDirectory(&'a [&'a str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathShape<'a> {
    pub prefix: SegmentPrefix<'a>,
    pub marker: Option<&'a str>,
}

impl<'a> PathShape<'a> {
    pub fn new(prefix: SegmentPrefix<'a>, marker: Option<&'a str>) -> Self {
        Self { prefix, marker }
    }

    pub fn parse(&self, segments: &[&str]) -> Option<ParsedRepositoryPath> {
        let mut parsed = ParsedRepositoryPath::default();

        let rest = match self.prefix {
            SegmentPrefix::None => segments,
            SegmentPrefix::OptionalCollection(literal) => match segments.split_first() {
                Some((first, rest)) if first.eq_ignore_ascii_case(literal) => {
                    parsed.collection = Some(first.to_string());
                    rest
                }
                _ => segments,
            },
            SegmentPrefix::Account => {
                let (account, rest) = segments.split_first()?;
                parsed.account = Some(account.to_string());
                rest
            }
            SegmentPrefix::MarkedAccount(literal) => {
                let (marker, rest) = segments.split_first()?;
                if !marker.eq_ignore_ascii_case(literal) {
                    return None;
                }
                let (account, rest) = rest.split_first()?;
                parsed.account = Some(account.to_string());
                rest
            }
            SegmentPrefix::VirtualDirectory(virtual_directory) => {
                if segments.len() < virtual_directory.len()
                    || !segments
                        .iter()
                        .zip(virtual_directory.iter())
                        .all(|(segment, expected)| segment.eq_ignore_ascii_case(expected))
                {
                    return None;
                }
                let rest = &segments[virtual_directory.len()..];
                let (collection, rest) = rest.split_first()?;
                parsed.base_path = segments[..virtual_directory.len()]
                    .iter()
                    .map(|segment| segment.to_string())
                    .collect();
                parsed.collection = Some(collection.to_string());
                rest
            }
        };

        let (leading, repository_name) = split_repository_tail(rest, self.marker)?;
        match leading {
            [] => {}
            [project] => parsed.project = Some(project.to_string()),
            [project, team] => {
                parsed.project = Some(project.to_string());
                parsed.team = Some(team.to_string());
            }
            _ => return None,
        }

        parsed.repository_name = repository_name.to_string();
        Some(parsed)
    }
}

/// Splits `segments` into what precedes the repository tail and the
/// repository name. With a marker, the segment before the repository (or
/// before `_full`/`_optimized`) must be that marker; without one, it must
/// not be any known marker.
pub fn split_repository_tail<'s, 'v>(
    segments: &'s [&'v str],
    marker: Option<&str>,
) -> Option<(&'s [&'v str], &'v str)> {
    let (repository_name, mut rest) = segments.split_last()?;
    if repository_name.is_empty() {
        return None;
    }

    if let Some((last, head)) = rest.split_last() {
        if VIEW_SEGMENTS.iter().any(|view| last.eq_ignore_ascii_case(view)) {
            rest = head;
        }
    }

    match marker {
        Some(marker) => {
            let (last, head) = rest.split_last()?;
            if !last.eq_ignore_ascii_case(marker) {
                return None;
            }
            rest = head;
        }
        None => {
            if rest
                .last()
                .is_some_and(|last| KNOWN_MARKERS.iter().any(|m| last.eq_ignore_ascii_case(m)))
            {
                return None;
            }
        }
    }

    Some((rest, repository_name))
}

#[cfg(test)]
#[path = "grammar_test.rs"]
mod tests;
