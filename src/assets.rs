//! Build asset assembly.
//!
//! [`Assembler`] is the top-level orchestrator: given a configuration and a
//! target format it resolves the architecture token, builds the macro table,
//! resolves icons and synthesizes the per-format manifests, in that order.
//! The result is a [`BuildAssets`] value the external build driver writes to
//! disk and feeds to the packaging tools.
//!
//! # Example
//!
//! ```
//! use bundlegen::{Assembler, BuildLayout, ConfigurationBuilder, PackageKind};
//!
//! # fn example() -> bundlegen::Result<()> {
//! let config = ConfigurationBuilder::new()
//!     .app_id("com.example.notes")
//!     .app_base_name("ExampleNotes")
//!     .app_friendly_name("Example Notes")
//!     .version("1.4.0")
//!     .summary("A note-taking application")
//!     .vendor("Example Inc.")
//!     .build()?;
//!
//! let layout = BuildLayout::new(
//!     "deploy/AppDir",
//!     "usr/share/icons/hicolor",
//!     "/opt/example-notes",
//! );
//! let assembler = Assembler::new(config, PackageKind::Deb, "linux-x64", "x86_64", layout);
//! let assets = assembler.assemble()?;
//!
//! assert_eq!(assets.package_arch, "amd64");
//! assert!(assets.desktop_entry.is_some());
//! assert!(assets.package_spec.is_some());
//! assert!(assets.flatpak_manifest.is_none());
//! # Ok(())
//! # }
//! ```

use crate::arch::ArchMapper;
use crate::config::Configuration;
use crate::error::Result;
use crate::expand::{MacroExpander, MacroId};
use crate::icon::{resolve_icons, IconPlan};
use crate::kind::PackageKind;
use crate::layout::{require_dir, require_file, BuildLayout, ContentReader, FsContentReader};
use crate::manifest::{
    generate_desktop_entry, generate_flatpak_manifest, generate_metainfo, generate_spec,
};
use chrono::Utc;
use serde::Serialize;

/// Everything one build produced.
///
/// An artifact field is `None` when it does not apply to the target
/// [`kind`](BuildAssets::kind) — an applicable artifact is never the empty
/// string. The whole set serializes, so drivers can dump a dry-run preview.
#[derive(Clone, Debug, Serialize)]
pub struct BuildAssets {
    /// The target format this set was assembled for.
    pub kind: PackageKind,

    /// Resolved architecture token, e.g. `amd64` for a Debian build.
    pub package_arch: String,

    /// Desktop entry text (Linux formats).
    pub desktop_entry: Option<String>,

    /// Application metadata document (Linux formats with a template).
    pub metainfo: Option<String>,

    /// Binary-package spec skeleton (`Deb`/`Rpm`).
    pub package_spec: Option<String>,

    /// Sandbox manifest (`Flatpak`).
    pub flatpak_manifest: Option<String>,

    /// Icon selection and layout for this format.
    pub icons: IconPlan,
}

/// Top-level orchestrator for one build invocation.
///
/// Synchronous and single-use: construct, optionally adjust with the
/// chainable setters, then call [`assemble`](Assembler::assemble).
pub struct Assembler {
    config: Configuration,
    kind: PackageKind,
    runtime_id: String,
    host_arch: String,
    layout: BuildLayout,
    reader: Box<dyn ContentReader>,
    strict: bool,
    file_list: Option<Vec<String>>,
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("config", &self.config)
            .field("kind", &self.kind)
            .field("runtime_id", &self.runtime_id)
            .field("host_arch", &self.host_arch)
            .field("layout", &self.layout)
            .field("strict", &self.strict)
            .field("file_list", &self.file_list)
            .finish_non_exhaustive()
    }
}

impl Assembler {
    /// Creates an assembler for one configuration and target format.
    ///
    /// `runtime_id` is the generic platform-runtime identifier (e.g.
    /// `"linux-x64"`); `host_arch` is the host token detected once at
    /// process start (see [`host_arch`](crate::host_arch)). Templates are
    /// read from the file system unless
    /// [`with_reader`](Assembler::with_reader) replaces the reader.
    pub fn new(
        config: Configuration,
        kind: PackageKind,
        runtime_id: impl Into<String>,
        host_arch: impl Into<String>,
        layout: BuildLayout,
    ) -> Self {
        Self {
            config,
            kind,
            runtime_id: runtime_id.into(),
            host_arch: host_arch.into(),
            layout,
            reader: Box::new(FsContentReader),
            strict: false,
            file_list: None,
        }
    }

    /// Replaces the template reader.
    pub fn with_reader(mut self, reader: impl ContentReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Enables strict existence checking.
    ///
    /// When on, every configured icon path and the metadata template must
    /// exist before synthesis starts, and a `Flatpak` build requires the
    /// bundle's `bin` and `share` trees to be present.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Supplies the real install-path list for the `%files` section.
    ///
    /// Without it the spec skeleton carries the
    /// [`FILE_LIST_PLACEHOLDER`](crate::manifest::FILE_LIST_PLACEHOLDER)
    /// preview marker instead.
    pub fn file_list(mut self, files: Vec<String>) -> Self {
        self.file_list = Some(files);
        self
    }

    /// The configuration this assembler was built with.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The target format.
    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    /// Builds the full macro table for this configuration and format.
    ///
    /// Useful on its own for printing a macro reference listing; the table
    /// is insertion-ordered, see [`MacroExpander::entries`].
    pub fn macros(&self) -> MacroExpander {
        let mapper = ArchMapper::new(
            self.kind,
            &self.runtime_id,
            self.host_arch.clone(),
            self.config.arch_override.clone(),
        );
        self.macro_table(&mapper.package_arch())
    }

    /// Runs the whole pipeline and returns the artifact set.
    ///
    /// Order is fixed: strict checks, architecture token, macro table, icon
    /// resolution, manifest synthesis. Any failure aborts the build with no
    /// partial artifacts.
    ///
    /// # Errors
    ///
    /// Every error kind in [`Error`](crate::Error) can surface here;
    /// strict-mode path checks come first.
    pub fn assemble(&self) -> Result<BuildAssets> {
        log::info!(
            "assembling {} assets for {} {}",
            self.kind,
            self.config.app_id,
            self.config.version
        );

        if self.strict {
            self.check_required_paths()?;
        }

        let mapper = ArchMapper::new(
            self.kind,
            &self.runtime_id,
            self.host_arch.clone(),
            self.config.arch_override.clone(),
        );
        let package_arch = mapper.package_arch();
        let expander = self.macro_table(&package_arch);

        let icons = resolve_icons(
            self.kind,
            &self.config.icons,
            &self.config.app_id,
            self.layout.icon_theme_root(),
        )?;

        let desktop_entry = generate_desktop_entry(self.kind, &self.config, &expander)?;
        let metainfo = generate_metainfo(self.kind, &self.config, self.reader.as_ref(), &expander)?;
        let package_spec =
            generate_spec(self.kind, &self.config, self.file_list.as_deref(), &expander)?;
        let flatpak_manifest = generate_flatpak_manifest(self.kind, &self.config, &expander)?;

        Ok(BuildAssets {
            kind: self.kind,
            package_arch,
            desktop_entry,
            metainfo,
            package_spec,
            flatpak_manifest,
            icons,
        })
    }

    fn macro_table(&self, package_arch: &str) -> MacroExpander {
        let now = Utc::now();
        let config = &self.config;

        let mut expander = MacroExpander::new();
        expander.insert(MacroId::AppId, config.app_id.clone());
        expander.insert(MacroId::AppBaseName, config.app_base_name.clone());
        expander.insert(MacroId::AppFriendlyName, config.app_friendly_name.clone());
        expander.insert(MacroId::AppVersion, config.version.clone());
        expander.insert(MacroId::PackageRelease, config.package_release.clone());
        expander.insert(MacroId::AppSummary, config.summary.clone());
        expander.insert(MacroId::AppLicense, config.license_id.clone());
        expander.insert(MacroId::VendorName, config.vendor.clone());
        expander.insert(
            MacroId::VendorUrl,
            config.homepage.clone().unwrap_or_default(),
        );
        expander.insert(MacroId::PackageKind, self.kind.short_name());
        expander.insert(MacroId::PackageArch, package_arch);
        expander.insert(MacroId::BuildDate, now.format("%Y-%m-%d").to_string());
        expander.insert(MacroId::BuildYear, now.format("%Y").to_string());
        expander.insert(
            MacroId::BundleRoot,
            self.layout.bundle_root().display().to_string(),
        );
        expander.insert(
            MacroId::InstallDir,
            self.layout.install_dir().display().to_string(),
        );
        expander.insert(
            MacroId::InstallExec,
            self.layout
                .install_exec(&config.app_base_name)
                .display()
                .to_string(),
        );
        expander
    }

    fn check_required_paths(&self) -> Result<()> {
        for icon in &self.config.icons {
            require_file(icon)?;
        }
        if let Some(template) = &self.config.metainfo_template {
            require_file(template)?;
        }
        if self.kind == PackageKind::Flatpak {
            require_dir(&self.layout.bin_dir())?;
            require_dir(&self.layout.share_dir())?;
        }
        Ok(())
    }
}
