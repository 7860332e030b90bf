//! Build manifest: the requirements file the installer consumes.
//!
//! The file is handed to pip verbatim; parsing here exists to reject
//! malformed entries before any subprocess runs and to report what is about
//! to be installed. Supported syntax:
//!
//! - blank lines and `#` comments (whole line, or after whitespace)
//! - `\` at end of line joins the next line
//! - lines starting with `-` are pip options and pass through untouched
//! - `name[extras] <op><version>, ... ; marker` and `name @ url`

mod requirement;

pub use requirement::{Comparison, Requirement, VersionConstraint, VersionSpecifier};

use crate::bundler::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One meaningful manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    Requirement(Requirement),
    /// pip option line such as `--index-url ...` or `-r other.txt`.
    Option(String),
}

/// Parsed requirements file, entries in file order.
#[derive(Debug, Clone)]
pub struct BuildManifest {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl BuildManifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestUnreadable`] if the file cannot be read
    /// - [`Error::InvalidRequirement`] for the first malformed entry
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| Error::ManifestUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "{} is not UTF-8; undecodable bytes are replaced when checking it",
                    path.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Self::parse(path, &content)
    }

    /// Parses manifest text. `path` is only used in diagnostics.
    ///
    /// A leading byte order mark is ignored, as pip does.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (line, text) in logical_lines(content) {
            let text = strip_comment(&text).trim();
            if text.is_empty() {
                continue;
            }

            if text.starts_with('-') {
                entries.push(ManifestEntry::Option(text.to_string()));
                continue;
            }

            let requirement =
                Requirement::parse(text, line).map_err(|reason| Error::InvalidRequirement {
                    path: path.to_path_buf(),
                    line,
                    content: text.to_string(),
                    reason,
                })?;

            if !seen.insert(requirement.normalized_name()) {
                log::warn!(
                    "{}:{}: `{}` is listed more than once; pip will combine the constraints",
                    path.display(),
                    line,
                    requirement.name
                );
            }
            entries.push(ManifestEntry::Requirement(requirement));
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Manifest location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Requirement entries in file order.
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter().filter_map(|entry| match entry {
            ManifestEntry::Requirement(req) => Some(req),
            ManifestEntry::Option(_) => None,
        })
    }

    /// True when the manifest lists no packages.
    pub fn is_empty(&self) -> bool {
        self.requirements().next().is_none()
    }
}

/// Joins `\` continuations, yielding `(first line number, text)`.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let (start, mut text) = pending.take().unwrap_or((idx + 1, String::new()));
        match raw.strip_suffix('\\') {
            Some(head) => {
                text.push_str(head);
                pending = Some((start, text));
            }
            None => {
                text.push_str(raw);
                out.push((start, text));
            }
        }
    }
    if let Some(last) = pending {
        out.push(last);
    }
    out
}

/// Drops a `#` comment that starts the line or follows whitespace.
fn strip_comment(line: &str) -> &str {
    let mut prev_ws = true;
    for (idx, c) in line.char_indices() {
        if c == '#' && prev_ws {
            return &line[..idx];
        }
        prev_ws = c.is_whitespace();
    }
    line
}
