//! The resolved package record and its durable cache-line grammar.
//!
//! Records are persisted one per line in an append-only cache file next to
//! the Koha release tree. The grammar is deliberately loose and textual so
//! the cache stays greppable and hand-editable; a line that fails to parse
//! is skipped with a warning, never a fatal error.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Which lookup service supplied a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repo {
    /// One of the official Arch Linux repositories (core, extra, ...).
    Official,
    /// The Arch User Repository.
    Aur,
}

impl Repo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Repo::Official => "official",
            Repo::Aur => "aur",
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Repo {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "official" => Ok(Repo::Official),
            "aur" => Ok(Repo::Aur),
            _ => Err(()),
        }
    }
}

/// A resolved Arch package entry satisfying one Perl module dependency.
///
/// One package may provide several modules; those are distinct records
/// sharing `name`. Within a store there is at most one record per
/// `perl_module`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Canonical Arch package name for the module (`perl-digest-sha`).
    pub name: String,
    /// CPAN module name this record satisfies; bound by the resolver.
    pub perl_module: String,
    /// Minimum version demanded by the edge that discovered this record.
    pub required_version: String,
    /// Normalized version carried by this record (pkgrel stripped,
    /// `provides` self-version honored).
    pub version: String,
    /// The package actually queried to satisfy this module.
    pub provided_by: String,
    /// Provider's own package version (pkgrel stripped for AUR).
    pub provided_version: String,
    /// Which lookup service supplied this record.
    pub repo: Repo,
    /// First listed maintainer; empty means orphaned when `repo` is AUR.
    pub maintainer: String,
    /// Raw `name[>=version]` dependency declarations from the provider.
    pub depends: Vec<String>,
    /// True once the record has been appended to the durable cache.
    pub persisted: bool,
}

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^PackageRecord\(name='([\w-]+)', perlname='([\w:]+)', required_version='([\d.]*)', version='([\w.+]+)', provided_by='([\w-]+)', provided_version='([\w.+]*)', repo='(official|aur)', maintainer='([^']*)', depends=\[([^\]]*)\]\)$",
    )
    .expect("valid record grammar")
});

static DEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'([\w>=.:+-]+)'$").expect("valid depends grammar"));

impl PackageRecord {
    /// Whether this record names an unmaintained AUR package.
    ///
    /// The AUR RPC reports absent maintainers as null; older caches may
    /// carry the literal `None` sentinel.
    pub fn is_orphan(&self) -> bool {
        self.repo == Repo::Aur && (self.maintainer.is_empty() || self.maintainer == "None")
    }

    /// Render the record as a single cache line (without trailing newline).
    pub fn serialize(&self) -> String {
        let depends = if self.depends.is_empty() {
            String::new()
        } else {
            format!("'{}'", self.depends.join("', '"))
        };
        format!(
            "PackageRecord(name='{}', perlname='{}', required_version='{}', version='{}', \
             provided_by='{}', provided_version='{}', repo='{}', maintainer='{}', depends=[{}])",
            self.name,
            self.perl_module,
            self.required_version,
            self.version,
            self.provided_by,
            self.provided_version,
            self.repo,
            self.maintainer,
            depends,
        )
    }

    /// Parse one cache line. Returns `None` when the line does not match
    /// the grammar; the caller decides whether that warrants a warning.
    pub fn parse(line: &str) -> Option<PackageRecord> {
        let caps = LINE_RE.captures(line.trim_end())?;

        let mut depends = Vec::new();
        let depends_str = &caps[9];
        if !depends_str.is_empty() {
            for item in depends_str.split(", ") {
                let dep = DEP_RE.captures(item)?;
                depends.push(dep[1].to_string());
            }
        }

        Some(PackageRecord {
            name: caps[1].to_string(),
            perl_module: caps[2].to_string(),
            required_version: caps[3].to_string(),
            version: caps[4].to_string(),
            provided_by: caps[5].to_string(),
            provided_version: caps[6].to_string(),
            repo: caps[7].parse().ok()?,
            maintainer: caps[8].to_string(),
            depends,
            persisted: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackageRecord {
        PackageRecord {
            name: "perl-cgi-carp".to_string(),
            perl_module: "CGI::Carp".to_string(),
            required_version: "1.29".to_string(),
            version: "4.59".to_string(),
            provided_by: "perl-cgi".to_string(),
            provided_version: "4.59".to_string(),
            repo: Repo::Official,
            maintainer: "bluewind".to_string(),
            depends: vec!["perl>=5.8.1".to_string(), "perl-html-parser".to_string()],
            persisted: false,
        }
    }

    #[test]
    fn serialize_matches_grammar() {
        let line = sample().serialize();
        assert_eq!(
            line,
            "PackageRecord(name='perl-cgi-carp', perlname='CGI::Carp', \
             required_version='1.29', version='4.59', provided_by='perl-cgi', \
             provided_version='4.59', repo='official', maintainer='bluewind', \
             depends=['perl>=5.8.1', 'perl-html-parser'])"
        );
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let record = sample();
        let parsed = PackageRecord::parse(&record.serialize()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn round_trip_with_empty_fields() {
        let mut record = sample();
        record.required_version = String::new();
        record.maintainer = String::new();
        record.depends = Vec::new();
        record.repo = Repo::Aur;
        let parsed = PackageRecord::parse(&record.serialize()).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.is_orphan());
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(PackageRecord::parse("").is_none());
        assert!(PackageRecord::parse("garbage").is_none());
        // Unknown repo tag
        assert!(PackageRecord::parse(
            "PackageRecord(name='a', perlname='A', required_version='', version='1', \
             provided_by='a', provided_version='1', repo='extra', maintainer='', depends=[])"
        )
        .is_none());
        // Broken depends list
        assert!(PackageRecord::parse(
            "PackageRecord(name='a', perlname='A', required_version='', version='1', \
             provided_by='a', provided_version='1', repo='aur', maintainer='', depends=[oops])"
        )
        .is_none());
    }

    #[test]
    fn none_sentinel_counts_as_orphan() {
        let mut record = sample();
        record.repo = Repo::Aur;
        record.maintainer = "None".to_string();
        assert!(record.is_orphan());

        record.repo = Repo::Official;
        assert!(!record.is_orphan());
    }
}
