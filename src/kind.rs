//! Target package formats.
//!
//! Every per-format decision in the crate — which artifacts are synthesized,
//! how icons are selected, which architecture token is emitted — branches on
//! [`PackageKind`]. Exactly one kind is in effect per build.
//!
//! # Supported Formats
//!
//! | Kind | Output | Consumed by |
//! |------|--------|-------------|
//! | `Zip` | portable archive | archive tool |
//! | `AppImage` | portable Linux executable | appimagetool / linuxdeploy |
//! | `Flatpak` | sandboxed application | flatpak-builder |
//! | `Deb` | Debian binary package | dpkg-deb |
//! | `Rpm` | RPM binary package | rpmbuild |
//! | `Setup` | Windows installer | installer compiler |

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported package formats.
///
/// A closed set: each build invocation targets exactly one variant, and all
/// conditional behavior is expressed as matches over it rather than runtime
/// type inspection.
///
/// # Examples
///
/// ```
/// use bundlegen::PackageKind;
///
/// for kind in PackageKind::all() {
///     println!("{}", kind.short_name());
/// }
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Self-contained portable archive (.zip).
    Zip,

    /// Portable Linux executable bundle (.AppImage).
    AppImage,

    /// Sandboxed Linux application (.flatpak).
    Flatpak,

    /// Debian binary package (.deb).
    Deb,

    /// RPM binary package (.rpm).
    Rpm,

    /// Windows installer executable.
    Setup,
}

impl PackageKind {
    /// Returns the short name for this package kind.
    ///
    /// This is the lowercase identifier used in log output, file names and
    /// the `PACKAGE_KIND` macro.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageKind::Zip => "zip",
            PackageKind::AppImage => "appimage",
            PackageKind::Flatpak => "flatpak",
            PackageKind::Deb => "deb",
            PackageKind::Rpm => "rpm",
            PackageKind::Setup => "setup",
        }
    }

    /// Returns true for Linux desktop-integration formats.
    ///
    /// These are the kinds that receive a desktop entry and (when a template
    /// is configured) a metadata document.
    pub fn is_linux(&self) -> bool {
        matches!(
            self,
            PackageKind::AppImage | PackageKind::Flatpak | PackageKind::Deb | PackageKind::Rpm
        )
    }

    /// Returns true for the Windows installer format.
    pub fn is_windows(&self) -> bool {
        matches!(self, PackageKind::Setup)
    }

    /// Returns true for kinds whose icons are laid out as a themed icon tree.
    ///
    /// AppImage is a Linux kind but takes a single icon instead (the bundle
    /// carries one image at its root), so it is excluded here.
    pub fn uses_icon_theme(&self) -> bool {
        matches!(
            self,
            PackageKind::Flatpak | PackageKind::Deb | PackageKind::Rpm
        )
    }

    /// Returns all package kinds.
    pub fn all() -> &'static [PackageKind] {
        &[
            PackageKind::Zip,
            PackageKind::AppImage,
            PackageKind::Flatpak,
            PackageKind::Deb,
            PackageKind::Rpm,
            PackageKind::Setup,
        ]
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for PackageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zip" => Ok(PackageKind::Zip),
            "appimage" => Ok(PackageKind::AppImage),
            "flatpak" => Ok(PackageKind::Flatpak),
            "deb" => Ok(PackageKind::Deb),
            "rpm" => Ok(PackageKind::Rpm),
            "setup" => Ok(PackageKind::Setup),
            other => Err(Error::Message(format!(
                "unknown package kind '{}' (expected one of: zip, appimage, flatpak, deb, rpm, setup)",
                other
            ))),
        }
    }
}
