//! git-repo XML manifest parser and reducer
//!
//! Parses Google's `repo` tool XML manifest format (`default.xml`) and
//! reduces it to a minimal manifest: one `project` element per source
//! project carrying only `name`, `path` (when present), and an optional
//! injected `remote` reference. All other manifest elements (`remote`,
//! `default`, `extend-project`, nested sub-projects, ...) are dropped.

use quick_xml::de::from_str;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from parsing or serializing manifests
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read XML file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse XML: {0}")]
    XmlParseError(String),

    #[error("Failed to write XML: {0}")]
    XmlWriteError(String),

    #[error("Serialized XML is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

// ── XML types ──────────────────────────────────────────────────────────────

/// A source manifest, keeping only the direct `project` children.
///
/// Every other element of the document is ignored during deserialization,
/// which is exactly the reduction filter: anything that is not a top-level
/// `project` does not survive.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename = "manifest")]
pub struct XmlManifest {
    #[serde(rename = "project", default)]
    pub projects: Vec<XmlProject>,
}

/// A source `project` entry.
///
/// `name` is required; a project without one fails deserialization rather
/// than being silently skipped or defaulted.
#[derive(Debug, Deserialize, Clone)]
pub struct XmlProject {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@path", default)]
    pub path: Option<String>,
}

// ── Output types ───────────────────────────────────────────────────────────

/// A named fetch-URL prefix to inject into the reduced manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSpec {
    pub name: String,
    pub fetch: String,
}

/// One `project` entry of the reduced manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedProject {
    pub name: String,
    pub path: Option<String>,
    pub remote: Option<String>,
}

/// The reduced manifest: an optional `remote` declaration followed by the
/// surviving `project` entries in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedManifest {
    pub remote: Option<RemoteSpec>,
    pub projects: Vec<ReducedProject>,
}

// ── Implementation ─────────────────────────────────────────────────────────

impl XmlManifest {
    /// Parse from an XML string
    pub fn parse(xml: &str) -> Result<Self, ManifestError> {
        from_str(xml).map_err(|e| ManifestError::XmlParseError(e.to_string()))
    }

    /// Parse from a local file
    pub fn parse_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Reduce to the minimal output manifest.
    ///
    /// When a remote is supplied it becomes the first child of the output
    /// root and every project gets a `remote` attribute referencing it.
    pub fn reduce(&self, remote: Option<&RemoteSpec>) -> ReducedManifest {
        let projects = self
            .projects
            .iter()
            .map(|project| ReducedProject {
                name: project.name.clone(),
                path: project.path.clone(),
                remote: remote.map(|r| r.name.clone()),
            })
            .collect();

        ReducedManifest {
            remote: remote.cloned(),
            projects,
        }
    }
}

impl ReducedManifest {
    /// Serialize to a pretty-printed UTF-8 XML string.
    ///
    /// Two-space indentation, XML declaration, self-closing elements,
    /// trailing newline.
    pub fn to_xml_string(&self) -> Result<String, ManifestError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let mut write = |event: Event| {
            writer
                .write_event(event)
                .map_err(|e| ManifestError::XmlWriteError(e.to_string()))
        };

        write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write(Event::Start(BytesStart::new("manifest")))?;

        if let Some(remote) = &self.remote {
            let mut el = BytesStart::new("remote");
            el.push_attribute(("name", remote.name.as_str()));
            el.push_attribute(("fetch", remote.fetch.as_str()));
            write(Event::Empty(el))?;
        }

        for project in &self.projects {
            let mut el = BytesStart::new("project");
            el.push_attribute(("name", project.name.as_str()));
            if let Some(path) = &project.path {
                el.push_attribute(("path", path.as_str()));
            }
            if let Some(remote) = &project.remote {
                el.push_attribute(("remote", remote.as_str()));
            }
            write(Event::Empty(el))?;
        }

        write(Event::End(BytesEnd::new("manifest")))?;

        let mut xml = String::from_utf8(writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }
}
