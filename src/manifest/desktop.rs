//! Desktop entry synthesis.
//!
//! Emits the line-oriented `key=value` block desktop environments read.
//! The caller's configured lines pass through verbatim (ordering preserved)
//! before macro expansion; when none are configured, a built-in default
//! entry covers the common fields.

use crate::config::Configuration;
use crate::error::Result;
use crate::expand::MacroExpander;
use crate::kind::PackageKind;

/// Default desktop entry used when the configuration supplies no lines.
const DEFAULT_ENTRY: &str = "\
[Desktop Entry]
Type=Application
Name=${APP_FRIENDLY_NAME}
Exec=${INSTALL_EXEC}
Icon=${APP_ID}
Comment=${APP_SUMMARY}
Terminal=false
";

/// Synthesizes the desktop entry for Linux formats.
///
/// Returns `Ok(None)` for non-Linux formats, and for an explicitly empty
/// `desktop_entry` list (the caller's opt-out). A missing list selects the
/// built-in default entry.
///
/// # Errors
///
/// Macro expansion failures ([`UnresolvedMacro`](crate::Error::UnresolvedMacro),
/// [`CyclicMacro`](crate::Error::CyclicMacro)).
pub fn generate_desktop_entry(
    kind: PackageKind,
    config: &Configuration,
    expander: &MacroExpander,
) -> Result<Option<String>> {
    if !kind.is_linux() {
        return Ok(None);
    }

    let template = match config.desktop_entry.as_deref() {
        None => DEFAULT_ENTRY.to_string(),
        Some([]) => {
            log::debug!("desktop entry disabled for {}", config.app_id);
            return Ok(None);
        }
        Some(lines) => {
            let mut text = lines.join("\n");
            text.push('\n');
            text
        }
    };

    expander.expand(&template).map(Some)
}
