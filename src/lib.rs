//! # bundlegen
//!
//! Packaging-asset synthesis for multi-format application deployment.
//!
//! Given one application description ([`Configuration`]) and one target
//! format ([`PackageKind`]), this crate produces every textual artifact and
//! icon decision the surrounding build pipeline needs: the desktop entry,
//! the application metadata document, the binary-package spec skeleton, the
//! sandbox manifest, the resolved architecture token and the icon layout.
//! It performs no packaging itself — the external driver writes the
//! artifacts to disk and invokes the actual packaging tools.
//!
//! ## Features
//!
//! - **Macro Expansion**: One fixed `${NAME}` vocabulary shared by every
//!   template, with recursive substitution and cycle detection
//! - **Per-Format Synthesis**: Each artifact knows which formats it applies
//!   to; inapplicable artifacts are absent, never empty
//! - **Icon Resolution**: File-name-driven selection — single icon for
//!   portable/installer formats, themed tree layout for the Linux package
//!   formats
//! - **Architecture Mapping**: Runtime identifiers resolved to the token
//!   each format expects (`amd64` vs `x86_64` vs generic), with explicit
//!   override and host fallback
//! - **Deterministic Output**: Same configuration, same format, same day —
//!   same artifacts; all I/O sits behind narrow seams
//!
//! ## Usage
//!
//! ```
//! use bundlegen::{Assembler, BuildLayout, ConfigurationBuilder, PackageKind};
//!
//! # fn main() -> bundlegen::Result<()> {
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
//! let assets = Assembler::new(config, PackageKind::Deb, "linux-x64", "x86_64", layout)
//!     .assemble()?;
//!
//! assert_eq!(assets.package_arch, "amd64");
//! assert!(assets.package_spec.is_some());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod arch;
pub mod assets;
pub mod config;
pub mod error;
pub mod expand;
pub mod icon;
pub mod kind;
pub mod layout;
pub mod manifest;

// Re-export main types for public API
pub use arch::{host_arch, ArchMapper, RuntimeArch};
pub use assets::{Assembler, BuildAssets};
pub use config::{Configuration, ConfigurationBuilder, SandboxOptions};
pub use error::{Context, Error, ErrorExt, Result};
pub use expand::{MacroExpander, MacroId};
pub use icon::{classify, png_size, resolve_icons, IconKind, IconPlan, ALLOWED_ICON_SIZES};
pub use kind::PackageKind;
pub use layout::{normalize_text, BuildLayout, ContentReader, FsContentReader};
