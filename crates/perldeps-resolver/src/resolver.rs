//! Cache-first module resolution against the two lookup services.
//!
//! A module resolves to at most one record per run: the store is consulted
//! first, then the official package search, then the AUR. A record found in
//! the store is returned unchanged even if a later graph edge carries a
//! stricter minimum version; first writer wins (documented limitation, see
//! DESIGN.md).

use std::time::Duration;

use perldeps_arch::aur::{self, AurPackage};
use perldeps_arch::official::{self, OfficialPackage};
use perldeps_arch::repository::Repositories;
use perldeps_core::names;
use perldeps_core::record::{PackageRecord, Repo};
use reqwest::Client;

use crate::store::PackageStore;

/// Pause after each network-resolved record, so the lookup services are
/// not hammered. Cache hits pay nothing.
pub const RESOLVE_DELAY: Duration = Duration::from_millis(500);

/// Modules whose package lives under a name the mechanical translation
/// does not produce: either provided by the base `perl` package or
/// packaged under the distribution name of a larger upstream release.
const PROVIDED_BY: &[(&str, &str)] = &[
    ("CGI::Carp", "perl-cgi"),
    ("CPAN::Meta", "perl"),
    ("Crypt::Eksblowfish::Bcrypt", "perl-crypt-eksblowfish"),
    ("Data::Dumper", "perl"),
    ("Digest::MD5", "perl"),
    ("Digest::SHA", "perl"),
    ("GD::Barcode::UPCE", "perl-gd-barcode"),
    ("Getopt::Long", "perl"),
    ("Getopt::Std", "perl"),
    ("HTML::Entities", "perl-html-parser"),
    ("HTML::FormatText", "perl-html-formatter"),
    ("HTTP::Request::Common", "perl-http-message"),
    ("HTTP::Tiny", "perl"),
    ("IPC::Cmd", "perl"),
    ("List::Util", "perl"),
    ("Locale::Messages", "perl-libintl-perl"),
    ("LWP::Simple", "perl-libwww"),
    ("LWP::UserAgent", "perl-libwww"),
    ("MARC::Record::MiJ", "perl-marc-file-mij"),
    ("MIME::Base64", "perl"),
    ("POSIX", "perl"),
    ("Storable", "perl"),
    ("Template", "perl-template-toolkit"),
    ("Term::ANSIColor", "perl"),
    ("Test", "perl"),
    ("Test::More", "perl"),
    ("Text::Balanced", "perl"),
    ("Text::Wrap", "perl"),
    ("Time::HiRes", "perl"),
    ("Time::localtime", "perl"),
    ("Unicode::Normalize", "perl"),
    ("URI::Escape", "perl-uri"),
    ("XML::SAX::ParserFactory", "perl-xml-sax"),
    ("YAML::XS", "perl-yaml-libyaml"),
];

/// The package to query for a module, when it differs from the mechanical
/// translation.
pub fn provider_override(module: &str) -> Option<&'static str> {
    PROVIDED_BY
        .iter()
        .find(|(m, _)| *m == module)
        .map(|(_, provider)| *provider)
}

/// Resolves Perl modules to package records, owning the store for the
/// duration of a run.
pub struct Resolver<'a> {
    client: &'a Client,
    repos: &'a Repositories,
    pub store: PackageStore,
    delay: Duration,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a Client, repos: &'a Repositories, store: PackageStore) -> Self {
        Self {
            client,
            repos,
            store,
            delay: RESOLVE_DELAY,
        }
    }

    /// Override the post-resolution pause (tests use zero).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Resolve one module to a store index.
    ///
    /// Store hit: returned as-is, no network. Otherwise the official repos
    /// are asked first, then the AUR; both missing yields `Ok(None)` and
    /// the caller decides how loudly to warn. Transport failures are
    /// fatal.
    pub async fn resolve(
        &mut self,
        module: &str,
        required_version: &str,
    ) -> miette::Result<Option<usize>> {
        if let Some(index) = self.store.find_index(module) {
            return Ok(Some(index));
        }

        let package_name = names::to_package_name(module);
        let provided_by = provider_override(module).unwrap_or(&package_name);

        let record =
            match official::lookup(self.client, &self.repos.official_url, provided_by).await? {
                Some(pkg) => from_official(&package_name, provided_by, pkg),
                None => match aur::lookup(self.client, &self.repos.aur_url, provided_by).await? {
                    Some(pkg) => from_aur(&package_name, provided_by, pkg),
                    None => return Ok(None),
                },
            };

        let mut record = record;
        record.perl_module = module.to_string();
        record.required_version = required_version.to_string();
        tracing::info!(
            "resolved {module} -> {} {} ({})",
            record.name,
            record.version,
            record.repo
        );
        let index = self.store.add(record);

        tokio::time::sleep(self.delay).await;
        Ok(Some(index))
    }
}

fn from_official(package_name: &str, provided_by: &str, pkg: OfficialPackage) -> PackageRecord {
    let version =
        provides_version(package_name, &pkg.provides).unwrap_or_else(|| pkg.pkgver.clone());
    PackageRecord {
        name: package_name.to_string(),
        perl_module: String::new(),
        required_version: String::new(),
        version,
        provided_by: provided_by.to_string(),
        provided_version: pkg.pkgver,
        repo: Repo::Official,
        maintainer: pkg.maintainers.first().cloned().unwrap_or_default(),
        depends: strip_unconstrained(pkg.depends),
        persisted: false,
    }
}

fn from_aur(package_name: &str, provided_by: &str, pkg: AurPackage) -> PackageRecord {
    let pkgver = normalize_version(&pkg.version);
    let version = provides_version(package_name, &pkg.provides).unwrap_or_else(|| pkgver.clone());
    PackageRecord {
        name: package_name.to_string(),
        perl_module: String::new(),
        required_version: String::new(),
        version,
        provided_by: provided_by.to_string(),
        provided_version: pkgver,
        repo: Repo::Aur,
        maintainer: pkg.maintainer.unwrap_or_default(),
        depends: strip_unconstrained(pkg.depends),
        persisted: false,
    }
}

/// Self-declared version for `name` from a `provides` list of
/// `name=version` entries.
fn provides_version(name: &str, provides: &[String]) -> Option<String> {
    provides.iter().find_map(|entry| {
        let (n, v) = entry.split_once('=')?;
        (n == name).then(|| v.to_string())
    })
}

/// AUR pkgver carries the pkgrel (`4.59-1`) and sometimes an epoch-style
/// underscore suffix; everything from the first `-` or `_` goes.
fn normalize_version(raw: &str) -> String {
    match raw.find(['-', '_']) {
        Some(cut) => raw[..cut].to_string(),
        None => raw.to_string(),
    }
}

/// Drop the trivial `>=0` markers some packages put on unconstrained
/// dependencies.
fn strip_unconstrained(depends: Vec<String>) -> Vec<String> {
    depends
        .into_iter()
        .map(|dep| match dep.strip_suffix(">=0") {
            Some(bare) => bare.to_string(),
            None => dep,
        })
        .collect()
}
