use serde::ser::SerializeMap;
use serde::ser::SerializeStruct;
use serde::Serialize;
use serde::Serializer;

use crate::internal::errors::BatchError;
use crate::internal::errors::SourceLinkError;
use crate::internal::source_root::ends_with_separator;
use crate::internal::source_root::RepositoryRoot;
use crate::sourcelink_warning;

/// The document map handed to debuggers: local path prefixes, each ending
/// with `*`, to the content url template serving them. Entries keep the
/// order of the source roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLinkManifest {
    documents: Vec<(String, String)>,
}

impl SourceLinkManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, url: impl Into<String>) {
        self.documents.push((path.into(), url.into()));
    }

    pub fn documents(&self) -> &[(String, String)] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

struct Documents<'a>(&'a [(String, String)]);

impl Serialize for Documents<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, url) in self.0 {
            map.serialize_entry(path, url)?;
        }
        map.end()
    }
}

impl Serialize for SourceLinkManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SourceLinkManifest", 1)?;
        state.serialize_field("documents", &Documents(&self.documents))?;
        state.end()
    }
}

/// Builds the manifest from the roots carrying a source link url. Every
/// invalid root is reported, not only the first.
pub fn generate_manifest(roots: &[RepositoryRoot]) -> Result<SourceLinkManifest, BatchError> {
    let mut manifest = SourceLinkManifest::new();
    let mut errors = BatchError::new();

    for root in roots {
        let Some(url) = root.applicable_source_link_url() else {
            continue;
        };

        let path = root.document_path();
        if !ends_with_separator(path) {
            errors.push(path, SourceLinkError::InvalidLocalPath(path.to_string()));
            continue;
        }

        if url.matches('*').count() != 1 {
            errors.push(path, SourceLinkError::InvalidWildcard(url.to_string()));
            continue;
        }

        manifest.push(format!("{}*", path), url);
    }

    let manifest = errors.into_result(manifest)?;
    if manifest.is_empty() {
        sourcelink_warning!("source link is empty: no source root has a source link url");
    }

    Ok(manifest)
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
