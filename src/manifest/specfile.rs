//! Binary-package spec skeleton synthesis.
//!
//! One skeleton serves both binary-package formats — Debian and RPM builds
//! differ only through the `BuildArch` token the macro table carries. The
//! file-list section is dual-mode: a caller-supplied list of install paths
//! produces the final spec, while no list produces a preview carrying an
//! explicit placeholder to fill in before the real build. The two modes are
//! distinct parameters, never an empty-versus-missing pun.

use crate::config::Configuration;
use crate::error::Result;
use crate::expand::MacroExpander;
use crate::kind::PackageKind;

/// Marker emitted under `%files` when no file list was supplied.
///
/// Drivers substitute the real list for this line before invoking the
/// package build tool.
pub const FILE_LIST_PLACEHOLDER: &str = "# (file list to be generated)";

/// Synthesizes the spec skeleton for the binary-package formats.
///
/// Header fields are emitted in the fixed order package tools expect:
/// `Name`, `Version`, `Release`, `BuildArch`, `Summary`, `License`,
/// `Vendor`, then `Url` only when a homepage is configured, then the
/// dependency-policy line. `%description` repeats the summary. Under
/// `%files`, every non-blank entry is forced to begin with `/`.
///
/// Returns `Ok(None)` for formats other than `Deb`/`Rpm`.
///
/// # Errors
///
/// Macro expansion failures; the caller's file entries may themselves
/// reference macros.
pub fn generate_spec(
    kind: PackageKind,
    config: &Configuration,
    files: Option<&[String]>,
    expander: &MacroExpander,
) -> Result<Option<String>> {
    if !matches!(kind, PackageKind::Deb | PackageKind::Rpm) {
        return Ok(None);
    }
    log::debug!("generating {} package spec", kind);

    let mut text = String::new();
    text.push_str("Name: ${APP_BASE_NAME}\n");
    text.push_str("Version: ${APP_VERSION}\n");
    text.push_str("Release: ${PACKAGE_RELEASE}\n");
    text.push_str("BuildArch: ${PACKAGE_ARCH}\n");
    text.push_str("Summary: ${APP_SUMMARY}\n");
    text.push_str("License: ${APP_LICENSE}\n");
    text.push_str("Vendor: ${VENDOR_NAME}\n");
    if config.homepage.is_some() {
        text.push_str("Url: ${VENDOR_URL}\n");
    }
    text.push_str("AutoReqProv: no\n");
    text.push('\n');
    text.push_str("%description\n");
    text.push_str("${APP_SUMMARY}\n");
    text.push('\n');
    text.push_str("%files\n");

    match files {
        Some(list) => {
            for entry in list {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                if !entry.starts_with('/') {
                    text.push('/');
                }
                text.push_str(entry);
                text.push('\n');
            }
        }
        None => {
            text.push_str(FILE_LIST_PLACEHOLDER);
            text.push('\n');
        }
    }

    expander.expand(&text).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationBuilder;
    use crate::expand::MacroId;

    fn config() -> Configuration {
        ConfigurationBuilder::new()
            .app_id("com.example.notes")
            .app_base_name("ExampleNotes")
            .app_friendly_name("Example Notes")
            .version("1.4.0")
            .summary("A note-taking application")
            .vendor("Example Inc.")
            .build()
            .unwrap()
    }

    fn expander() -> MacroExpander {
        let mut expander = MacroExpander::new();
        expander.insert(MacroId::AppBaseName, "ExampleNotes");
        expander.insert(MacroId::AppVersion, "1.4.0");
        expander.insert(MacroId::PackageRelease, "1");
        expander.insert(MacroId::PackageArch, "x86_64");
        expander.insert(MacroId::AppSummary, "A note-taking application");
        expander.insert(MacroId::AppLicense, "MIT");
        expander.insert(MacroId::VendorName, "Example Inc.");
        expander.insert(MacroId::VendorUrl, "https://example.com/notes");
        expander
    }

    #[test]
    fn test_header_fields_in_fixed_order() {
        let text = generate_spec(PackageKind::Rpm, &config(), None, &expander())
            .unwrap()
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name: ExampleNotes");
        assert_eq!(lines[1], "Version: 1.4.0");
        assert_eq!(lines[2], "Release: 1");
        assert_eq!(lines[3], "BuildArch: x86_64");
        assert_eq!(lines[4], "Summary: A note-taking application");
        assert_eq!(lines[5], "License: MIT");
        assert_eq!(lines[6], "Vendor: Example Inc.");
        assert_eq!(lines[7], "AutoReqProv: no");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "%description");
        assert_eq!(lines[10], "A note-taking application");
        assert_eq!(lines[11], "");
        assert_eq!(lines[12], "%files");
    }

    #[test]
    fn test_url_emitted_only_with_homepage() {
        let without = generate_spec(PackageKind::Deb, &config(), None, &expander())
            .unwrap()
            .unwrap();
        assert!(!without.contains("Url:"));

        let mut config = config();
        config.homepage = Some("https://example.com/notes".to_string());
        let with = generate_spec(PackageKind::Deb, &config, None, &expander())
            .unwrap()
            .unwrap();
        assert!(with.contains("Url: https://example.com/notes\n"));
        // Url sits between Vendor and the dependency-policy line.
        let lines: Vec<&str> = with.lines().collect();
        assert_eq!(lines[6], "Vendor: Example Inc.");
        assert_eq!(lines[7], "Url: https://example.com/notes");
        assert_eq!(lines[8], "AutoReqProv: no");
    }

    #[test]
    fn test_file_entries_forced_absolute() {
        let files = vec!["/usr/bin/foo".to_string(), "bar/baz".to_string()];
        let text = generate_spec(PackageKind::Deb, &config(), Some(&files), &expander())
            .unwrap()
            .unwrap();
        let tail = text.split("%files\n").nth(1).unwrap();
        assert_eq!(tail, "/usr/bin/foo\n/bar/baz\n");
    }

    #[test]
    fn test_blank_file_entries_skipped() {
        let files = vec!["  ".to_string(), "opt/app".to_string(), String::new()];
        let text = generate_spec(PackageKind::Rpm, &config(), Some(&files), &expander())
            .unwrap()
            .unwrap();
        let tail = text.split("%files\n").nth(1).unwrap();
        assert_eq!(tail, "/opt/app\n");
    }

    #[test]
    fn test_placeholder_without_file_list() {
        let text = generate_spec(PackageKind::Rpm, &config(), None, &expander())
            .unwrap()
            .unwrap();
        assert!(text.ends_with(&format!("%files\n{}\n", FILE_LIST_PLACEHOLDER)));
    }

    #[test]
    fn test_not_applicable_outside_package_formats() {
        for kind in [
            PackageKind::Zip,
            PackageKind::AppImage,
            PackageKind::Flatpak,
            PackageKind::Setup,
        ] {
            let out = generate_spec(kind, &config(), None, &expander()).unwrap();
            assert!(out.is_none(), "{kind}");
        }
    }
}
