//! Application description supplied by the build driver.
//!
//! [`Configuration`] is the immutable snapshot of everything the caller knows
//! about the application being packaged: identity, description, icon
//! candidates, desktop-integration lines and per-format option blocks. It is
//! constructed once per build — either programmatically through
//! [`ConfigurationBuilder`] or deserialized from a configuration file by the
//! external driver — and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_release() -> String {
    "1".to_string()
}

fn default_license() -> String {
    "LicenseRef-Proprietary".to_string()
}

fn default_runtime() -> String {
    "org.freedesktop.Platform".to_string()
}

fn default_runtime_version() -> String {
    "23.08".to_string()
}

fn default_sdk() -> String {
    "org.freedesktop.Sdk".to_string()
}

/// Sandboxed-application (Flatpak) options.
///
/// Controls the runtime identifiers and permission entries written into the
/// sandbox manifest. The defaults target the freedesktop runtime, which is
/// the common baseline for applications without a toolkit-specific runtime.
///
/// # Configuration
///
/// ```toml
/// [flatpak]
/// runtime = "org.freedesktop.Platform"
/// runtime_version = "23.08"
/// sdk = "org.freedesktop.Sdk"
/// permissions = ["--share=network", "--socket=wayland"]
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxOptions {
    /// Base runtime identifier.
    ///
    /// Default: "org.freedesktop.Platform"
    pub runtime: String,

    /// Runtime branch/version.
    ///
    /// Default: "23.08"
    pub runtime_version: String,

    /// SDK identifier used at build time.
    ///
    /// Default: "org.freedesktop.Sdk"
    pub sdk: String,

    /// `finish-args` permission entries, e.g. `"--share=network"`.
    ///
    /// When empty, the manifest omits the `finish-args` block entirely.
    ///
    /// Default: Empty
    pub permissions: Vec<String>,
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            runtime_version: default_runtime_version(),
            sdk: default_sdk(),
            permissions: Vec::new(),
        }
    }
}

/// Immutable application description for one build.
///
/// All template text, icon selection and architecture mapping derive from
/// this snapshot. The external configuration-file collaborator deserializes
/// directly into it; programmatic callers go through
/// [`ConfigurationBuilder`], which validates the required fields.
///
/// # Examples
///
/// ```
/// use bundlegen::ConfigurationBuilder;
///
/// # fn example() -> bundlegen::Result<()> {
/// let config = ConfigurationBuilder::new()
///     .app_id("com.example.notes")
///     .app_base_name("ExampleNotes")
///     .app_friendly_name("Example Notes")
///     .version("1.4.0")
///     .summary("A note-taking application")
///     .vendor("Example Inc.")
///     .build()?;
/// assert_eq!(config.package_release, "1");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    /// Application identifier in reverse domain notation.
    ///
    /// Example: "com.example.notes". Names the desktop icon, the themed icon
    /// destinations and the sandbox `app-id`.
    pub app_id: String,

    /// File-safe base name, used for executables and package names.
    ///
    /// Example: "ExampleNotes". Must not contain spaces.
    pub app_base_name: String,

    /// Human-readable application name shown in menus and installers.
    pub app_friendly_name: String,

    /// Application version string.
    ///
    /// Example: "1.4.0"
    pub version: String,

    /// Package release number appended to the version.
    ///
    /// Incremented for packaging changes without a version bump.
    ///
    /// Default: "1"
    #[serde(default = "default_release")]
    pub package_release: String,

    /// Brief one-line description.
    ///
    /// Mandatory: the binary-package spec repeats it as the description body.
    pub summary: String,

    /// SPDX license identifier.
    ///
    /// Default: "LicenseRef-Proprietary"
    #[serde(default = "default_license")]
    pub license_id: String,

    /// Publisher/vendor name.
    pub vendor: String,

    /// Homepage URL.
    ///
    /// Default: None (the spec skeleton omits its `Url` field)
    pub homepage: Option<String>,

    /// Candidate icon paths; kind and size are inferred from file names.
    ///
    /// Raster names must encode their pixel size, e.g. `app.48.png` or
    /// `app.48x48.png`. `.svg` and `.ico` candidates carry no size.
    ///
    /// Default: Empty
    #[serde(default)]
    pub icons: Vec<PathBuf>,

    /// Raw desktop-entry lines, macro placeholders allowed.
    ///
    /// `None` selects the built-in default entry. An explicitly empty list
    /// opts out of desktop integration altogether.
    ///
    /// Default: None (built-in default entry)
    pub desktop_entry: Option<Vec<String>>,

    /// Path to the application metadata (AppStream metainfo) template.
    ///
    /// Default: None (no metadata document synthesized)
    pub metainfo_template: Option<PathBuf>,

    /// Explicit architecture token, overriding the derived one.
    ///
    /// Default: None (token derived from the runtime identifier)
    pub arch_override: Option<String>,

    /// Sandboxed-application options.
    ///
    /// See [`SandboxOptions`] for details.
    #[serde(default)]
    pub flatpak: SandboxOptions,
}

/// Builder for constructing [`Configuration`].
///
/// Provides a fluent API with validation: the identity fields (`app_id`,
/// `app_base_name`, `app_friendly_name`, `version`, `summary`, `vendor`) are
/// required and checked at [`build()`](ConfigurationBuilder::build).
///
/// # Examples
///
/// ```
/// use bundlegen::ConfigurationBuilder;
///
/// # fn example() -> bundlegen::Result<()> {
/// let config = ConfigurationBuilder::new()
///     .app_id("com.example.notes")
///     .app_base_name("ExampleNotes")
///     .app_friendly_name("Example Notes")
///     .version("1.4.0")
///     .summary("A note-taking application")
///     .vendor("Example Inc.")
///     .homepage("https://example.com/notes")
///     .icon("assets/notes.svg")
///     .icon("assets/notes.48.png")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigurationBuilder {
    app_id: Option<String>,
    app_base_name: Option<String>,
    app_friendly_name: Option<String>,
    version: Option<String>,
    package_release: Option<String>,
    summary: Option<String>,
    license_id: Option<String>,
    vendor: Option<String>,
    homepage: Option<String>,
    icons: Vec<PathBuf>,
    desktop_entry: Option<Vec<String>>,
    metainfo_template: Option<PathBuf>,
    arch_override: Option<String>,
    flatpak: SandboxOptions,
}

impl ConfigurationBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the reverse-domain application identifier.
    ///
    /// # Required
    pub fn app_id(mut self, id: impl Into<String>) -> Self {
        self.app_id = Some(id.into());
        self
    }

    /// Sets the file-safe base name.
    ///
    /// # Required
    pub fn app_base_name(mut self, name: impl Into<String>) -> Self {
        self.app_base_name = Some(name.into());
        self
    }

    /// Sets the human-readable application name.
    ///
    /// # Required
    pub fn app_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.app_friendly_name = Some(name.into());
        self
    }

    /// Sets the application version.
    ///
    /// # Required
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the package release number.
    ///
    /// Default: "1"
    pub fn package_release(mut self, release: impl Into<String>) -> Self {
        self.package_release = Some(release.into());
        self
    }

    /// Sets the one-line summary.
    ///
    /// # Required
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the SPDX license identifier.
    ///
    /// Default: "LicenseRef-Proprietary"
    pub fn license_id(mut self, license: impl Into<String>) -> Self {
        self.license_id = Some(license.into());
        self
    }

    /// Sets the publisher/vendor name.
    ///
    /// # Required
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Sets the homepage URL.
    pub fn homepage(mut self, url: impl Into<String>) -> Self {
        self.homepage = Some(url.into());
        self
    }

    /// Adds one candidate icon path.
    pub fn icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.icons.push(path.into());
        self
    }

    /// Sets all candidate icon paths at once.
    pub fn icons(mut self, paths: Vec<PathBuf>) -> Self {
        self.icons = paths;
        self
    }

    /// Sets raw desktop-entry lines (order preserved in the output).
    ///
    /// An empty vector opts out of the desktop entry; not calling this at
    /// all selects the built-in default entry.
    pub fn desktop_entry(mut self, lines: Vec<String>) -> Self {
        self.desktop_entry = Some(lines);
        self
    }

    /// Sets the metadata-document template path.
    pub fn metainfo_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.metainfo_template = Some(path.into());
        self
    }

    /// Sets an explicit architecture token; always wins over the derived one.
    pub fn arch_override(mut self, arch: impl Into<String>) -> Self {
        self.arch_override = Some(arch.into());
        self
    }

    /// Sets the sandboxed-application options.
    ///
    /// Default: freedesktop runtime, no permissions
    pub fn flatpak(mut self, options: SandboxOptions) -> Self {
        self.flatpak = options;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required field: `app_id`,
    /// `app_base_name`, `app_friendly_name`, `version`, `summary` or
    /// `vendor`. The base name is additionally rejected when it contains
    /// whitespace, since it names executables and package files.
    pub fn build(self) -> crate::error::Result<Configuration> {
        use crate::error::Context;

        let app_base_name = self.app_base_name.context("app_base_name is required")?;
        if app_base_name.contains(char::is_whitespace) {
            crate::bail!("app_base_name '{}' must not contain whitespace", app_base_name);
        }

        Ok(Configuration {
            app_id: self.app_id.context("app_id is required")?,
            app_base_name,
            app_friendly_name: self
                .app_friendly_name
                .context("app_friendly_name is required")?,
            version: self.version.context("version is required")?,
            package_release: self.package_release.unwrap_or_else(default_release),
            summary: self.summary.context("summary is required")?,
            license_id: self.license_id.unwrap_or_else(default_license),
            vendor: self.vendor.context("vendor is required")?,
            homepage: self.homepage,
            icons: self.icons,
            desktop_entry: self.desktop_entry,
            metainfo_template: self.metainfo_template,
            arch_override: self.arch_override,
            flatpak: self.flatpak,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
            .app_id("com.example.app")
            .app_base_name("ExampleApp")
            .app_friendly_name("Example App")
            .version("1.0.0")
            .summary("An example")
            .vendor("Example Inc.")
    }

    #[test]
    fn test_builder_applies_defaults() {
        let config = minimal().build().unwrap();
        assert_eq!(config.package_release, "1");
        assert_eq!(config.license_id, "LicenseRef-Proprietary");
        assert_eq!(config.flatpak.runtime, "org.freedesktop.Platform");
        assert_eq!(config.flatpak.runtime_version, "23.08");
        assert_eq!(config.flatpak.sdk, "org.freedesktop.Sdk");
        assert!(config.flatpak.permissions.is_empty());
        assert!(config.icons.is_empty());
        assert!(config.desktop_entry.is_none());
    }

    #[test]
    fn test_builder_rejects_missing_identity() {
        let err = ConfigurationBuilder::new()
            .app_base_name("ExampleApp")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("app_id is required"));
    }

    #[test]
    fn test_builder_rejects_whitespace_in_base_name() {
        let err = minimal()
            .app_base_name("Example Notes")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must not contain whitespace"));
    }

    #[test]
    fn test_builder_collects_icons_in_order() {
        let config = minimal()
            .icon("assets/a.svg")
            .icon("assets/a.48.png")
            .build()
            .unwrap();
        assert_eq!(config.icons.len(), 2);
        assert_eq!(config.icons[0], PathBuf::from("assets/a.svg"));
    }

    #[test]
    fn test_snapshot_deserializes_with_defaults() {
        let config: Configuration = toml::from_str(
            r#"
            app_id = "com.example.app"
            app_base_name = "ExampleApp"
            app_friendly_name = "Example App"
            version = "2.1.0"
            summary = "An example"
            vendor = "Example Inc."
            "#,
        )
        .unwrap();
        assert_eq!(config.package_release, "1");
        assert_eq!(config.flatpak.sdk, "org.freedesktop.Sdk");
        assert!(config.arch_override.is_none());
    }
}
