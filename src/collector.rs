//! Version collection
//!
//! Reads each configured file and pulls the version out with the spec's
//! pattern. Anything that goes wrong on the input side degrades to
//! [`ComponentVersion::NotAvailable`] for that component only.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, info};

use crate::config::{PLACEHOLDER, VersionSpec};

/// Version found for a single component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentVersion {
    /// Captured version text, without the `v` prefix
    Found(String),
    /// File missing, unreadable, or pattern did not match
    NotAvailable,
}

impl fmt::Display for ComponentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentVersion::Found(version) => write!(f, "v{}", version),
            ComponentVersion::NotAvailable => f.write_str(PLACEHOLDER),
        }
    }
}

/// Collected versions keyed by label, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedVersions {
    entries: IndexMap<String, ComponentVersion>,
}

impl CollectedVersions {
    pub fn get(&self, label: &str) -> Option<&ComponentVersion> {
        self.entries.get(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentVersion)> {
        self.entries.iter().map(|(label, version)| (label.as_str(), version))
    }

    fn insert(&mut self, label: String, version: ComponentVersion) {
        self.entries.insert(label, version);
    }
}

/// Return group 1 of the leftmost match of `pattern` in `content`.
pub fn extract_version(content: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Collect a version for every spec, reading files relative to `input_dir`.
pub fn collect(specs: &[VersionSpec], input_dir: &Path) -> CollectedVersions {
    let mut collected = CollectedVersions::default();

    for spec in specs {
        let path = input_dir.join(&spec.file_path);

        let version = match std::fs::read_to_string(&path) {
            Ok(content) => match extract_version(&content, &spec.pattern) {
                Some(version) => ComponentVersion::Found(version),
                None => {
                    debug!("No version match for {} in {:?}", spec.label, path);
                    ComponentVersion::NotAvailable
                }
            },
            Err(e) => {
                debug!("Skipping {}: cannot read {:?}: {}", spec.label, path, e);
                ComponentVersion::NotAvailable
            }
        };

        collected.insert(spec.label.clone(), version);
    }

    info!("Collected versions for {} components", collected.len());
    collected
}
