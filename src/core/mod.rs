//! Core manifest model and transformation

pub mod manifest;

pub use manifest::{ManifestError, ReducedManifest, RemoteSpec, XmlManifest};
