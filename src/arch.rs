//! Architecture resolution.
//!
//! Maps a generic platform-runtime identifier (e.g. `"linux-x64"`,
//! `"win-arm64"`) to the architecture token each package format expects:
//! Debian says `amd64` where RPM says `x86_64`, and the Windows installer
//! wants the generic name untouched. Resolution never fails — an
//! unrecognizable identifier degrades to the host architecture so the build
//! can proceed with a best-effort token.

use crate::kind::PackageKind;
use std::fmt;

/// Returns the host architecture token.
///
/// Detect this once at process start and pass it into [`ArchMapper::new`];
/// the mapper itself never reads ambient state, which keeps it a pure
/// function of its inputs.
pub fn host_arch() -> &'static str {
    std::env::consts::ARCH
}

/// Generic CPU architecture parsed from a runtime identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeArch {
    /// x86_64 / AMD64 (64-bit)
    X64,
    /// AArch64 / ARM64 (64-bit)
    Arm64,
    /// ARM (32-bit)
    Arm,
    /// x86 / i686 (32-bit)
    X86,
}

impl RuntimeArch {
    /// Parses the architecture suffix of a runtime identifier.
    ///
    /// Recognizes `-x64`, `-arm64`, `-arm` and `-x86` (the bare architecture
    /// name alone is accepted too). Returns `None` for anything else — the
    /// caller decides the fallback.
    pub fn from_runtime_id(runtime_id: &str) -> Option<Self> {
        let id = runtime_id.trim().to_ascii_lowercase();
        // Longest suffixes first so "-arm64" is never read as "-arm".
        if id.ends_with("-arm64") || id == "arm64" {
            Some(RuntimeArch::Arm64)
        } else if id.ends_with("-x64") || id == "x64" {
            Some(RuntimeArch::X64)
        } else if id.ends_with("-x86") || id == "x86" {
            Some(RuntimeArch::X86)
        } else if id.ends_with("-arm") || id == "arm" {
            Some(RuntimeArch::Arm)
        } else {
            None
        }
    }

    /// Parses a host architecture token as reported by the platform.
    ///
    /// Accepts the usual host spellings (`x86_64`, `aarch64`, `i686`, …) in
    /// addition to the generic names.
    pub fn from_host_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Some(RuntimeArch::X64),
            "aarch64" | "arm64" => Some(RuntimeArch::Arm64),
            "arm" | "armv7" => Some(RuntimeArch::Arm),
            "x86" | "i686" | "i586" => Some(RuntimeArch::X86),
            _ => None,
        }
    }

    /// Returns the generic lowercase architecture name.
    pub fn generic_name(&self) -> &'static str {
        match self {
            RuntimeArch::X64 => "x64",
            RuntimeArch::Arm64 => "arm64",
            RuntimeArch::Arm => "arm",
            RuntimeArch::X86 => "x86",
        }
    }
}

impl fmt::Display for RuntimeArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generic_name())
    }
}

/// Resolves the package architecture token for one build.
///
/// Construction parses the runtime identifier once;
/// [`package_arch`](ArchMapper::package_arch) then yields the
/// format-specific token. An explicit override always wins over the
/// derived token.
///
/// # Examples
///
/// ```
/// use bundlegen::{ArchMapper, PackageKind};
///
/// let mapper = ArchMapper::new(PackageKind::Deb, "linux-x64", "x86_64", None);
/// assert_eq!(mapper.package_arch(), "amd64");
///
/// let mapper = ArchMapper::new(PackageKind::Rpm, "linux-arm64", "x86_64", None);
/// assert_eq!(mapper.package_arch(), "aarch64");
/// ```
#[derive(Clone, Debug)]
pub struct ArchMapper {
    kind: PackageKind,
    arch: Option<RuntimeArch>,
    host: String,
    override_token: Option<String>,
}

impl ArchMapper {
    /// Creates a mapper for the given format and runtime identifier.
    ///
    /// `host` is the host architecture token (see [`host_arch`]), used as the
    /// fallback when the runtime identifier carries no recognizable suffix.
    /// `override_token` is the caller-supplied explicit token; when present
    /// it wins unconditionally.
    pub fn new(
        kind: PackageKind,
        runtime_id: &str,
        host: impl Into<String>,
        override_token: Option<String>,
    ) -> Self {
        let host = host.into();
        let arch = match RuntimeArch::from_runtime_id(runtime_id) {
            Some(arch) => Some(arch),
            None => {
                log::warn!(
                    "no recognizable architecture in runtime id '{}', assuming host '{}'",
                    runtime_id,
                    host
                );
                RuntimeArch::from_host_token(&host)
            }
        };
        Self {
            kind,
            arch,
            host,
            override_token,
        }
    }

    /// Returns the generic architecture, if one was recognized.
    pub fn runtime_arch(&self) -> Option<RuntimeArch> {
        self.arch
    }

    /// Returns the architecture token for the target format.
    ///
    /// Mapping table (override wins over all of it):
    ///
    /// | generic | Deb | Rpm | Zip/AppImage/Flatpak | Setup |
    /// |---------|-----|-----|----------------------|-------|
    /// | x64 | `amd64` | `x86_64` | `x86_64` | `x64` |
    /// | arm64 | `arm64` | `aarch64` | `aarch64` | `arm64` |
    /// | arm | `arm` | `arm` | host token | `arm` |
    /// | x86 | `x32` | `i686` | host token | `x86` |
    ///
    /// When even the host token is unrecognizable, it is passed through raw.
    pub fn package_arch(&self) -> String {
        if let Some(token) = &self.override_token {
            return token.clone();
        }

        match self.kind {
            PackageKind::Setup => match self.arch {
                Some(arch) => arch.generic_name().to_string(),
                None => self.host.clone(),
            },
            PackageKind::Deb => match self.arch {
                Some(RuntimeArch::X64) => "amd64".to_string(),
                Some(RuntimeArch::Arm64) => "arm64".to_string(),
                Some(RuntimeArch::X86) => "x32".to_string(),
                Some(RuntimeArch::Arm) => "arm".to_string(),
                None => self.host.clone(),
            },
            PackageKind::Rpm => match self.arch {
                Some(RuntimeArch::X64) => "x86_64".to_string(),
                Some(RuntimeArch::Arm64) => "aarch64".to_string(),
                Some(RuntimeArch::X86) => "i686".to_string(),
                Some(RuntimeArch::Arm) => "arm".to_string(),
                None => self.host.clone(),
            },
            PackageKind::Zip | PackageKind::AppImage | PackageKind::Flatpak => match self.arch {
                Some(RuntimeArch::X64) => "x86_64".to_string(),
                Some(RuntimeArch::Arm64) => "aarch64".to_string(),
                _ => self.host.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_id_suffixes() {
        assert_eq!(
            RuntimeArch::from_runtime_id("linux-x64"),
            Some(RuntimeArch::X64)
        );
        assert_eq!(
            RuntimeArch::from_runtime_id("linux-arm64"),
            Some(RuntimeArch::Arm64)
        );
        assert_eq!(
            RuntimeArch::from_runtime_id("win-x86"),
            Some(RuntimeArch::X86)
        );
        assert_eq!(
            RuntimeArch::from_runtime_id("linux-arm"),
            Some(RuntimeArch::Arm)
        );
        assert_eq!(RuntimeArch::from_runtime_id("linux-riscv64"), None);
    }

    #[test]
    fn test_debian_tokens() {
        let cases = [("linux-x64", "amd64"), ("linux-arm64", "arm64"), ("linux-x86", "x32")];
        for (id, expected) in cases {
            let mapper = ArchMapper::new(PackageKind::Deb, id, "x86_64", None);
            assert_eq!(mapper.package_arch(), expected, "runtime id {id}");
        }
    }

    #[test]
    fn test_rpm_tokens() {
        let cases = [
            ("linux-x64", "x86_64"),
            ("linux-arm64", "aarch64"),
            ("linux-x86", "i686"),
        ];
        for (id, expected) in cases {
            let mapper = ArchMapper::new(PackageKind::Rpm, id, "x86_64", None);
            assert_eq!(mapper.package_arch(), expected, "runtime id {id}");
        }
    }

    #[test]
    fn test_setup_passes_generic_name_through() {
        let mapper = ArchMapper::new(PackageKind::Setup, "win-arm64", "x86_64", None);
        assert_eq!(mapper.package_arch(), "arm64");
    }

    #[test]
    fn test_override_wins_over_mapping() {
        let mapper = ArchMapper::new(
            PackageKind::Deb,
            "linux-x64",
            "x86_64",
            Some("custom-arch".to_string()),
        );
        assert_eq!(mapper.package_arch(), "custom-arch");
    }

    #[test]
    fn test_unknown_suffix_falls_back_to_host() {
        let mapper = ArchMapper::new(PackageKind::Rpm, "linux-riscv64", "aarch64", None);
        // Host "aarch64" is interpreted as arm64 and mapped for the format.
        assert_eq!(mapper.package_arch(), "aarch64");

        let mapper = ArchMapper::new(PackageKind::Deb, "linux-riscv64", "x86_64", None);
        assert_eq!(mapper.package_arch(), "amd64");
    }

    #[test]
    fn test_unmappable_host_passes_through_raw() {
        let mapper = ArchMapper::new(PackageKind::AppImage, "linux-mystery", "riscv64", None);
        assert_eq!(mapper.package_arch(), "riscv64");
    }

    #[test]
    fn test_posix_x86_uses_host_token() {
        let mapper = ArchMapper::new(PackageKind::AppImage, "linux-x86", "x86_64", None);
        assert_eq!(mapper.package_arch(), "x86_64");
    }
}
