//! Application metadata document synthesis.
//!
//! The metadata document (an AppStream-style metainfo file) is authored by
//! the user as a template; this module reads it through the
//! [`ContentReader`] boundary, rejects blank templates, and expands it.

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::expand::MacroExpander;
use crate::kind::PackageKind;
use crate::layout::ContentReader;

/// Synthesizes the metadata document.
///
/// Applies only to Linux formats and only when the configuration names a
/// template. The template content arrives trimmed and line-ending
/// normalized from the reader.
///
/// # Errors
///
/// [`Error::EmptyTemplate`] when the configured template is blank after
/// trimming; reader I/O failures; macro expansion failures.
pub fn generate_metainfo(
    kind: PackageKind,
    config: &Configuration,
    reader: &dyn ContentReader,
    expander: &MacroExpander,
) -> Result<Option<String>> {
    if !kind.is_linux() {
        return Ok(None);
    }
    let Some(path) = &config.metainfo_template else {
        return Ok(None);
    };

    log::debug!("reading metadata template {}", path.display());
    let content = reader.read_text(path)?;
    if content.is_empty() {
        return Err(Error::EmptyTemplate { path: path.clone() });
    }

    expander.expand(&content).map(Some)
}
