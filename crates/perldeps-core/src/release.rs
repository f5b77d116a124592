//! Koha release version detection.

use std::path::Path;
use std::sync::LazyLock;

use perldeps_util::errors::PerldepsError;
use regex::Regex;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\$VERSION = "(\d+\.\d+\.\d+)\.\d+";"#).expect("valid pattern")
});

/// Extract the release version from `Koha.pm` in the release tree.
///
/// Koha writes a four-component `$VERSION`; the meta-package uses the
/// first three.
pub fn release_version(koha_dir: &Path) -> miette::Result<String> {
    let path = koha_dir.join("Koha.pm");
    if !path.is_file() {
        return Err(PerldepsError::Release {
            message: format!("`{}' does not exist", path.display()),
        }
        .into());
    }

    let content = std::fs::read_to_string(&path).map_err(PerldepsError::Io)?;
    parse_version(&content).ok_or_else(|| {
        PerldepsError::Release {
            message: format!("no version found in `{}'", path.display()),
        }
        .into()
    })
}

fn parse_version(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| VERSION_RE.captures(line).map(|caps| caps[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_version_line() {
        let content = "package Koha;\n\nour $VERSION;\n$VERSION = \"24.05.02.000\";\n1;\n";
        assert_eq!(parse_version(content).unwrap(), "24.05.02");
    }

    #[test]
    fn rejects_files_without_a_version() {
        assert!(parse_version("package Koha;\n1;\n").is_none());
    }

    #[test]
    fn missing_tree_is_a_release_error() {
        let err = release_version(Path::new("/nonexistent-koha-dir")).unwrap_err();
        let err = err.downcast_ref::<PerldepsError>().unwrap();
        assert_eq!(err.exit_code(), 3);
    }
}
