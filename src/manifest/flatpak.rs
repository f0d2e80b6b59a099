//! Sandbox manifest synthesis.
//!
//! Emits the flatpak-builder manifest describing how to assemble the
//! sandboxed image from the pre-built bundle: one simple-build module that
//! recreates `/app/bin` and `/app/share` from the bundle's `bin` and
//! `share` trees, with the bundle root as a directory source. The
//! `finish-args` permission block is omitted entirely when no permissions
//! are configured — an empty block would not be schema-valid.

use crate::config::Configuration;
use crate::error::Result;
use crate::expand::MacroExpander;
use crate::kind::PackageKind;

/// Synthesizes the sandbox manifest.
///
/// Returns `Ok(None)` for every format except `Flatpak`. Field order is
/// fixed: `app-id`, `runtime`, `runtime-version` (quoted so YAML keeps it a
/// string), `sdk`, `command`, the single module, then `finish-args` when
/// any permission entries exist.
///
/// # Errors
///
/// Macro expansion failures.
pub fn generate_flatpak_manifest(
    kind: PackageKind,
    config: &Configuration,
    expander: &MacroExpander,
) -> Result<Option<String>> {
    if kind != PackageKind::Flatpak {
        return Ok(None);
    }
    log::debug!("generating sandbox manifest for {}", config.app_id);

    let options = &config.flatpak;
    let mut text = String::new();
    text.push_str("app-id: ${APP_ID}\n");
    text.push_str(&format!("runtime: {}\n", options.runtime));
    text.push_str(&format!("runtime-version: \"{}\"\n", options.runtime_version));
    text.push_str(&format!("sdk: {}\n", options.sdk));
    text.push_str("command: ${APP_BASE_NAME}\n");
    text.push_str("modules:\n");
    text.push_str("  - name: ${APP_BASE_NAME}\n");
    text.push_str("    buildsystem: simple\n");
    text.push_str("    build-commands:\n");
    text.push_str("      - mkdir -p /app/bin\n");
    text.push_str("      - mkdir -p /app/share\n");
    text.push_str("      - cp -r bin/* /app/bin\n");
    text.push_str("      - cp -r share/* /app/share\n");
    text.push_str("    sources:\n");
    text.push_str("      - type: dir\n");
    text.push_str("        path: ${BUNDLE_ROOT}\n");

    let permissions: Vec<&str> = options
        .permissions
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if !permissions.is_empty() {
        text.push_str("finish-args:\n");
        for permission in permissions {
            text.push_str(&format!("  - {permission}\n"));
        }
    }

    expander.expand(&text).map(Some)
}
