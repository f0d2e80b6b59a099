//! Build-layout boundary.
//!
//! The file-copy and template-reading collaborators live outside this crate;
//! what crosses the boundary is specified here. [`ContentReader`] hands the
//! synthesizers trimmed, line-ending-normalized template text, and
//! [`BuildLayout`] names the directories everything else is computed from:
//! the pre-built bundle tree, the themed-icon root and the per-application
//! install directory.

use crate::error::{Error, ErrorExt, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads template text for the synthesizers.
///
/// Implementations must return trimmed text with `\r\n`/`\r` line endings
/// normalized to `\n` — [`normalize_text`] does exactly that.
pub trait ContentReader {
    /// Returns the normalized text of the file at `path`.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// [`ContentReader`] over the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsContentReader;

impl ContentReader for FsContentReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let raw = fs::read_to_string(path).fs_context("reading template", path)?;
        Ok(normalize_text(&raw))
    }
}

/// Trims surrounding whitespace and normalizes line endings to `\n`.
pub fn normalize_text(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

/// Fails unless `path` is an existing directory.
///
/// # Errors
///
/// [`Error::DirectoryLayout`] naming the missing directory.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryLayout {
            path: path.to_path_buf(),
        })
    }
}

/// Fails unless `path` is an existing file.
///
/// # Errors
///
/// [`Error::MissingRequiredFile`] naming the missing file.
pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::MissingRequiredFile {
            path: path.to_path_buf(),
        })
    }
}

/// Directory layout for one build.
///
/// # Examples
///
/// ```
/// use bundlegen::BuildLayout;
///
/// let layout = BuildLayout::new(
///     "deploy/AppDir",
///     "usr/share/icons/hicolor",
///     "/opt/example-notes",
/// );
/// assert_eq!(
///     layout.install_exec("ExampleNotes"),
///     std::path::PathBuf::from("/opt/example-notes/ExampleNotes"),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct BuildLayout {
    bundle_root: PathBuf,
    icon_theme_root: PathBuf,
    install_dir: PathBuf,
}

impl BuildLayout {
    /// Creates a layout from the three root directories.
    pub fn new(
        bundle_root: impl Into<PathBuf>,
        icon_theme_root: impl Into<PathBuf>,
        install_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bundle_root: bundle_root.into(),
            icon_theme_root: icon_theme_root.into(),
            install_dir: install_dir.into(),
        }
    }

    /// Root of the pre-built application bundle (an opaque input tree).
    pub fn bundle_root(&self) -> &Path {
        &self.bundle_root
    }

    /// The bundle's executable tree.
    pub fn bin_dir(&self) -> PathBuf {
        self.bundle_root.join("bin")
    }

    /// The bundle's shared-data tree.
    pub fn share_dir(&self) -> PathBuf {
        self.bundle_root.join("share")
    }

    /// Destination root for themed icons.
    pub fn icon_theme_root(&self) -> &Path {
        &self.icon_theme_root
    }

    /// Per-application install directory.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Installed executable path for the given base name.
    pub fn install_exec(&self, app_base_name: &str) -> PathBuf {
        self.install_dir.join(app_base_name)
    }
}
