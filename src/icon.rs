//! Icon resolution.
//!
//! Candidate icons arrive as plain file paths; everything this module knows
//! about them is inferred from the file name. Raster candidates must encode
//! their pixel size in the name (`app.48.png` or `app.48x48.png`), vector
//! (`.svg`) and installer (`.ico`) candidates carry no size.
//!
//! Selection is per format:
//!
//! - `Setup` takes the first `.ico` candidate, by extension alone.
//! - `AppImage` takes the first `.svg`, or failing that the largest raster —
//!   here a malformed raster name is fatal, because the size has to be read
//!   to compare.
//! - `Flatpak`/`Deb`/`Rpm` map every eligible candidate into a themed icon
//!   tree (`<root>/<S>x<S>/apps/<app-id>.png`, `scalable/apps` for vectors);
//!   ineligible names are skipped in this pass, not errored.
//! - `Zip` takes no icon at all.

use crate::error::{Error, Result};
use crate::kind::PackageKind;
use indexmap::IndexMap;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Pixel sizes a raster icon file name may declare.
pub const ALLOWED_ICON_SIZES: [u32; 8] = [16, 24, 32, 48, 64, 96, 128, 256];

/// Inferred kind of one icon candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IconKind {
    /// Scalable vector icon (`.svg`).
    Vector,
    /// Raster icon (`.png`) with its file-name-declared pixel size.
    Raster(u32),
    /// Windows installer icon (`.ico`).
    Installer,
}

/// Resolved icon output for one build.
///
/// `Single` carries the one selected source file (`Setup`, `AppImage`);
/// `Theme` maps each eligible source to its destination inside the themed
/// icon tree (`Flatpak`, `Deb`, `Rpm`). `None` means the format takes no
/// icon or no candidate was eligible.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum IconPlan {
    /// No icon applies.
    None,
    /// Exactly one selected source file.
    Single(PathBuf),
    /// Source path → destination path, insertion-ordered.
    Theme(IndexMap<PathBuf, PathBuf>),
}

impl IconPlan {
    /// True when no icon was selected.
    pub fn is_none(&self) -> bool {
        matches!(self, IconPlan::None)
    }

    /// The selected source file, for single-icon formats.
    pub fn single(&self) -> Option<&Path> {
        match self {
            IconPlan::Single(path) => Some(path),
            _ => None,
        }
    }

    /// The source → destination mapping, for themed formats.
    pub fn theme(&self) -> Option<&IndexMap<PathBuf, PathBuf>> {
        match self {
            IconPlan::Theme(map) => Some(map),
            _ => None,
        }
    }
}

fn has_ext(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Extracts the declared pixel size from a raster icon file name.
///
/// The name must end `.<SIZE>.png` or `.<SIZE>x<SIZE>.png` (extension
/// case-insensitive) with SIZE drawn from [`ALLOWED_ICON_SIZES`].
///
/// # Errors
///
/// [`Error::InvalidIconName`] when the size token is missing, malformed,
/// non-square, or outside the allowed set.
pub fn png_size(path: &Path) -> Result<u32> {
    let invalid = || Error::InvalidIconName {
        path: path.to_path_buf(),
    };

    let name = path
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(invalid)?;
    let stem = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name);

    // The size token is the last dot-separated segment of the stem.
    let token = stem
        .rsplit('.')
        .next()
        .unwrap_or(stem)
        .to_ascii_lowercase();

    let size = match token.split_once('x') {
        Some((w, h)) => {
            let w: u32 = w.parse().map_err(|_| invalid())?;
            let h: u32 = h.parse().map_err(|_| invalid())?;
            if w != h {
                return Err(invalid());
            }
            w
        }
        None => token.parse().map_err(|_| invalid())?,
    };

    if !ALLOWED_ICON_SIZES.contains(&size) {
        return Err(invalid());
    }
    Ok(size)
}

/// Classifies one candidate by file name.
///
/// Returns `Ok(None)` for extensions this crate does not recognize as icons
/// at all — no size parse is attempted on those.
///
/// # Errors
///
/// [`Error::InvalidIconName`] for a `.png` whose name declares no valid
/// size.
pub fn classify(path: &Path) -> Result<Option<IconKind>> {
    if has_ext(path, "svg") {
        Ok(Some(IconKind::Vector))
    } else if has_ext(path, "ico") {
        Ok(Some(IconKind::Installer))
    } else if has_ext(path, "png") {
        png_size(path).map(|size| Some(IconKind::Raster(size)))
    } else {
        Ok(None)
    }
}

/// Selects and lays out icons for the target format.
///
/// `theme_root` is the themed-tree destination root (only used by the
/// themed formats); `app_id` names the destination files.
///
/// # Errors
///
/// [`Error::InvalidIconName`] from the `AppImage` raster comparison; the
/// other formats never fail here.
pub fn resolve_icons(
    kind: PackageKind,
    candidates: &[PathBuf],
    app_id: &str,
    theme_root: &Path,
) -> Result<IconPlan> {
    let plan = match kind {
        PackageKind::Zip => IconPlan::None,
        PackageKind::Setup => match installer_icon(candidates) {
            Some(path) => IconPlan::Single(path),
            None => IconPlan::None,
        },
        PackageKind::AppImage => match portable_icon(candidates)? {
            Some(path) => IconPlan::Single(path),
            None => IconPlan::None,
        },
        PackageKind::Flatpak | PackageKind::Deb | PackageKind::Rpm => {
            let map = theme_map(candidates, app_id, theme_root);
            if map.is_empty() {
                IconPlan::None
            } else {
                IconPlan::Theme(map)
            }
        }
    };

    match &plan {
        IconPlan::Single(path) => log::debug!("selected icon {} for {}", path.display(), kind),
        IconPlan::Theme(map) => log::debug!("mapped {} themed icons for {}", map.len(), kind),
        IconPlan::None => log::debug!("no icon for {}", kind),
    }
    Ok(plan)
}

/// First `.ico` wins; raster names are never size-parsed on this path.
fn installer_icon(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| has_ext(p, "ico")).cloned()
}

/// First `.svg` wins; otherwise the largest raster, first-seen on ties.
fn portable_icon(candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    if let Some(svg) = candidates.iter().find(|p| has_ext(p, "svg")) {
        return Ok(Some(svg.clone()));
    }

    let mut best: Option<(u32, &PathBuf)> = None;
    for path in candidates.iter().filter(|p| has_ext(p, "png")) {
        let size = png_size(path)?;
        if best.is_none_or(|(best_size, _)| size > best_size) {
            best = Some((size, path));
        }
    }
    Ok(best.map(|(_, path)| path.clone()))
}

/// Maps eligible candidates into the themed tree; ineligible names are
/// skipped, and a destination already claimed keeps its first source.
fn theme_map(candidates: &[PathBuf], app_id: &str, theme_root: &Path) -> IndexMap<PathBuf, PathBuf> {
    let mut map: IndexMap<PathBuf, PathBuf> = IndexMap::new();

    for path in candidates {
        let dest = if has_ext(path, "svg") {
            theme_root
                .join("scalable")
                .join("apps")
                .join(format!("{app_id}.svg"))
        } else if has_ext(path, "png") {
            match png_size(path) {
                Ok(size) => theme_root
                    .join(format!("{size}x{size}"))
                    .join("apps")
                    .join(format!("{app_id}.png")),
                Err(_) => {
                    log::debug!("skipping {}: no usable size in name", path.display());
                    continue;
                }
            }
        } else {
            continue;
        };

        if map.values().any(|existing| existing == &dest) {
            continue;
        }
        map.insert(path.clone(), dest);
    }

    map
}
