//! Macro expansion.
//!
//! Every generated artifact is template text containing `${NAME}`
//! placeholders drawn from a fixed macro vocabulary ([`MacroId`]). The
//! [`MacroExpander`] owns the symbol table — built once per build, immutable
//! afterwards — and substitutes placeholders recursively: macro values may
//! themselves reference other macros.
//!
//! Expansion is strict. A placeholder naming a macro that is not in the
//! table is a hard error, never passed through or dropped; a reference chain
//! that revisits a macro currently being expanded is a cycle error, detected
//! with an explicit visitation stack rather than by looping. Text of the
//! form `${` with no closing brace is not a placeholder and passes through
//! untouched.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// The fixed macro vocabulary.
///
/// Template authors can reference exactly these names. The table value for
/// each is derived from the [`Configuration`](crate::Configuration), the
/// resolved architecture token, the build layout, or the build date.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MacroId {
    /// `APP_ID` — reverse-domain application identifier.
    AppId,
    /// `APP_BASE_NAME` — file-safe base name.
    AppBaseName,
    /// `APP_FRIENDLY_NAME` — human-readable application name.
    AppFriendlyName,
    /// `APP_VERSION` — application version string.
    AppVersion,
    /// `PACKAGE_RELEASE` — package release number.
    PackageRelease,
    /// `APP_SUMMARY` — one-line description.
    AppSummary,
    /// `APP_LICENSE` — SPDX license identifier.
    AppLicense,
    /// `VENDOR_NAME` — publisher name.
    VendorName,
    /// `VENDOR_URL` — homepage URL (empty string when none configured).
    VendorUrl,
    /// `PACKAGE_KIND` — short name of the target format.
    PackageKind,
    /// `PACKAGE_ARCH` — resolved architecture token.
    PackageArch,
    /// `BUILD_DATE` — assembly date, `YYYY-MM-DD`.
    BuildDate,
    /// `BUILD_YEAR` — assembly year.
    BuildYear,
    /// `BUNDLE_ROOT` — root of the pre-built application bundle.
    BundleRoot,
    /// `INSTALL_DIR` — per-application install directory.
    InstallDir,
    /// `INSTALL_EXEC` — installed executable path.
    InstallExec,
}

impl MacroId {
    /// Returns the placeholder name as written in templates.
    pub fn name(&self) -> &'static str {
        match self {
            MacroId::AppId => "APP_ID",
            MacroId::AppBaseName => "APP_BASE_NAME",
            MacroId::AppFriendlyName => "APP_FRIENDLY_NAME",
            MacroId::AppVersion => "APP_VERSION",
            MacroId::PackageRelease => "PACKAGE_RELEASE",
            MacroId::AppSummary => "APP_SUMMARY",
            MacroId::AppLicense => "APP_LICENSE",
            MacroId::VendorName => "VENDOR_NAME",
            MacroId::VendorUrl => "VENDOR_URL",
            MacroId::PackageKind => "PACKAGE_KIND",
            MacroId::PackageArch => "PACKAGE_ARCH",
            MacroId::BuildDate => "BUILD_DATE",
            MacroId::BuildYear => "BUILD_YEAR",
            MacroId::BundleRoot => "BUNDLE_ROOT",
            MacroId::InstallDir => "INSTALL_DIR",
            MacroId::InstallExec => "INSTALL_EXEC",
        }
    }

    /// Looks up a macro by its placeholder name.
    pub fn from_name(name: &str) -> Option<Self> {
        MacroId::all().iter().copied().find(|id| id.name() == name)
    }

    /// Returns all macros in canonical order.
    pub fn all() -> &'static [MacroId] {
        &[
            MacroId::AppId,
            MacroId::AppBaseName,
            MacroId::AppFriendlyName,
            MacroId::AppVersion,
            MacroId::PackageRelease,
            MacroId::AppSummary,
            MacroId::AppLicense,
            MacroId::VendorName,
            MacroId::VendorUrl,
            MacroId::PackageKind,
            MacroId::PackageArch,
            MacroId::BuildDate,
            MacroId::BuildYear,
            MacroId::BundleRoot,
            MacroId::InstallDir,
            MacroId::InstallExec,
        ]
    }
}

impl fmt::Display for MacroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Symbol table plus the substitution engine.
///
/// Entries keep insertion order, so [`entries`](MacroExpander::entries) can
/// drive a stable macro reference listing.
///
/// # Examples
///
/// ```
/// use bundlegen::{MacroExpander, MacroId};
///
/// # fn example() -> bundlegen::Result<()> {
/// let mut expander = MacroExpander::new();
/// expander.insert(MacroId::AppBaseName, "ExampleNotes");
/// expander.insert(MacroId::InstallDir, "/opt/example-notes");
/// expander.insert(MacroId::InstallExec, "${INSTALL_DIR}/${APP_BASE_NAME}");
///
/// let out = expander.expand("Exec=${INSTALL_EXEC}")?;
/// assert_eq!(out, "Exec=/opt/example-notes/ExampleNotes");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MacroExpander {
    table: IndexMap<MacroId, String>,
}

impl MacroExpander {
    /// Creates an empty expander.
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts or replaces a macro value.
    pub fn insert(&mut self, id: MacroId, value: impl Into<String>) {
        self.table.insert(id, value.into());
    }

    /// Returns the raw (unexpanded) value of a macro, if present.
    pub fn value(&self, id: MacroId) -> Option<&str> {
        self.table.get(&id).map(String::as_str)
    }

    /// Iterates over `(macro, raw value)` entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (MacroId, &str)> {
        self.table.iter().map(|(id, value)| (*id, value.as_str()))
    }

    /// Number of macros in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when the table holds no macros.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Expands every `${NAME}` placeholder in `template`.
    ///
    /// Substitution recurses through macro values until no known placeholder
    /// remains. Same template and same table always produce the same output;
    /// no I/O happens here.
    ///
    /// # Errors
    ///
    /// [`Error::UnresolvedMacro`] when a placeholder names a macro absent
    /// from the table; [`Error::CyclicMacro`] when expansion re-enters a
    /// macro that is currently being expanded.
    pub fn expand(&self, template: &str) -> Result<String> {
        let mut visiting = Vec::new();
        self.expand_with(template, &mut visiting)
    }

    fn expand_with(&self, template: &str, visiting: &mut Vec<MacroId>) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                // No closing brace: not a placeholder.
                out.push_str(&rest[start..]);
                return Ok(out);
            };

            let name = &after[..end];
            let id = MacroId::from_name(name).ok_or_else(|| Error::UnresolvedMacro {
                name: name.to_string(),
            })?;
            let value = self.table.get(&id).ok_or_else(|| Error::UnresolvedMacro {
                name: name.to_string(),
            })?;

            if visiting.contains(&id) {
                return Err(Error::CyclicMacro {
                    name: name.to_string(),
                });
            }

            visiting.push(id);
            let expanded = self.expand_with(value, visiting)?;
            visiting.pop();

            out.push_str(&expanded);
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander(entries: &[(MacroId, &str)]) -> MacroExpander {
        let mut expander = MacroExpander::new();
        for (id, value) in entries {
            expander.insert(*id, *value);
        }
        expander
    }

    #[test]
    fn test_plain_text_passes_through() {
        let expander = expander(&[]);
        assert_eq!(expander.expand("no placeholders here").unwrap(), "no placeholders here");
    }

    #[test]
    fn test_single_substitution() {
        let expander = expander(&[(MacroId::AppVersion, "1.4.0")]);
        assert_eq!(
            expander.expand("Version: ${APP_VERSION}").unwrap(),
            "Version: 1.4.0"
        );
    }

    #[test]
    fn test_recursive_values_resolve() {
        let expander = expander(&[
            (MacroId::InstallDir, "/opt/app"),
            (MacroId::AppBaseName, "App"),
            (MacroId::InstallExec, "${INSTALL_DIR}/${APP_BASE_NAME}"),
        ]);
        assert_eq!(
            expander.expand("${INSTALL_EXEC}").unwrap(),
            "/opt/app/App"
        );
    }

    #[test]
    fn test_repeated_reference_is_not_a_cycle() {
        let expander = expander(&[(MacroId::AppId, "com.example.app")]);
        assert_eq!(
            expander.expand("${APP_ID} ${APP_ID}").unwrap(),
            "com.example.app com.example.app"
        );
    }

    #[test]
    fn test_unknown_macro_is_an_error() {
        let expander = expander(&[(MacroId::AppId, "com.example.app")]);
        let err = expander.expand("${NOT_A_MACRO}").unwrap_err();
        assert!(matches!(err, Error::UnresolvedMacro { ref name } if name == "NOT_A_MACRO"));
    }

    #[test]
    fn test_known_macro_missing_from_table_is_an_error() {
        let expander = expander(&[]);
        let err = expander.expand("${APP_VERSION}").unwrap_err();
        assert!(matches!(err, Error::UnresolvedMacro { ref name } if name == "APP_VERSION"));
    }

    #[test]
    fn test_direct_cycle_detected() {
        let expander = expander(&[(MacroId::AppId, "${APP_ID}")]);
        let err = expander.expand("${APP_ID}").unwrap_err();
        assert!(matches!(err, Error::CyclicMacro { ref name } if name == "APP_ID"));
    }

    #[test]
    fn test_transitive_cycle_detected() {
        let expander = expander(&[
            (MacroId::InstallDir, "${INSTALL_EXEC}"),
            (MacroId::InstallExec, "${INSTALL_DIR}"),
        ]);
        let err = expander.expand("${INSTALL_DIR}").unwrap_err();
        assert!(matches!(err, Error::CyclicMacro { .. }));
    }

    #[test]
    fn test_unterminated_brace_is_literal() {
        let expander = expander(&[(MacroId::AppVersion, "1.0")]);
        assert_eq!(
            expander.expand("price is ${ incomplete").unwrap(),
            "price is ${ incomplete"
        );
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let expander = expander(&[
            (MacroId::VendorName, "Example Inc."),
            (MacroId::AppId, "com.example.app"),
        ]);
        let names: Vec<&str> = expander.entries().map(|(id, _)| id.name()).collect();
        assert_eq!(names, vec!["VENDOR_NAME", "APP_ID"]);
    }

    #[test]
    fn test_name_lookup_round_trips() {
        for id in MacroId::all() {
            assert_eq!(MacroId::from_name(id.name()), Some(*id));
        }
        assert_eq!(MacroId::from_name("APP_UNKNOWN"), None);
    }
}
