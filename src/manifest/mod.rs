//! Per-format manifest synthesis.
//!
//! Each submodule turns the shared configuration and macro table into one
//! textual artifact: the desktop entry, the application metadata document,
//! the binary-package spec skeleton, and the sandbox manifest. Every
//! synthesizer returns `Ok(None)` when its artifact does not apply to the
//! target format, so callers can distinguish "not applicable" from an
//! upstream error — an applicable artifact is never the empty string.
//!
//! All template text flows through [`MacroExpander`](crate::MacroExpander)
//! last, so an unresolved or cyclic macro anywhere aborts the synthesis of
//! that artifact with no partial output.

pub mod desktop;
pub mod flatpak;
pub mod metainfo;
pub mod specfile;

pub use desktop::generate_desktop_entry;
pub use flatpak::generate_flatpak_manifest;
pub use metainfo::generate_metainfo;
pub use specfile::{generate_spec, FILE_LIST_PLACEHOLDER};
