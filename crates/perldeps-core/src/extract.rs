//! Upstream dependency extraction from a Koha release tree.
//!
//! Koha ships its own dependency lister, `misc/devel/koha_perl_deps.pl`;
//! we run it with `PERL5LIB` pointed at the release tree and parse its
//! tabular output. Parsing is a pure function over the captured stdout so
//! it stays testable without Perl installed.

use std::path::Path;
use std::sync::LazyLock;

use perldeps_util::errors::PerldepsError;
use perldeps_util::process::CommandBuilder;
use regex::Regex;

/// One row of the upstream dependency listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerlDep {
    /// CPAN module name (`Test::More`).
    pub module: String,
    /// Version installed in the environment the lister ran in.
    pub installed_version: String,
    /// Minimum version Koha requires, leading `v` stripped.
    pub required_version: String,
}

static DASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+$").expect("valid pattern"));

static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Versions look like "1", "1.2", "1.2.3", "v5.10.1", "0.9_01" or the
    // "0 *" placeholder for modules that are not installed.
    let version = r"(0 \*|\d+\.\d+_\d+|v?\d+(?:\.\d+){0,2})";
    Regex::new(&format!(r"^([\w:]+)\s+{version}\s+{version}\s+(Yes|No)$"))
        .expect("valid pattern")
});

/// Run the Koha dependency lister and parse its output.
pub fn extract_deps(koha_dir: &Path) -> miette::Result<Vec<PerlDep>> {
    let script = koha_dir.join("misc/devel/koha_perl_deps.pl");
    if !script.is_file() {
        return Err(PerldepsError::Extraction {
            message: format!("`{}' does not exist", script.display()),
        }
        .into());
    }

    let output = CommandBuilder::new("perl")
        .arg(script.display().to_string())
        .args(["--all", "--required"])
        .env("PERL5LIB", koha_dir.display().to_string())
        .exec()?;
    if !output.status.success() {
        return Err(PerldepsError::Extraction {
            message: format!("koha_perl_deps.pl exited with {}", output.status),
        }
        .into());
    }

    Ok(parse_deps_output(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the tabular lister output: rows live between a dashed header
/// line and a dashed footer line, and only rows whose required flag is
/// `Yes` are consumed. A row that fails the grammar is a warning, not a
/// halt.
pub fn parse_deps_output(text: &str) -> Vec<PerlDep> {
    let mut deps = Vec::new();
    let mut started = false;

    for line in text.lines() {
        let line = line.trim_end();
        if !started {
            if DASHES_RE.is_match(line) {
                started = true;
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if DASHES_RE.is_match(line) {
            break;
        }

        match ROW_RE.captures(line) {
            Some(caps) => {
                if &caps[4] != "Yes" {
                    continue;
                }
                let required = caps[3].strip_prefix('v').unwrap_or(&caps[3]);
                deps.push(PerlDep {
                    module: caps[1].to_string(),
                    installed_version: caps[2].to_string(),
                    required_version: required.to_string(),
                });
            }
            None => tracing::warn!("strange dependency line `{line}`"),
        }
    }

    deps
}
