//! Handler for `koha-perldeps pkgbuild`: print the PKGBUILD of the
//! koha-perldeps-meta package.

use std::path::Path;

use perldeps_arch::official;
use perldeps_arch::repository::Repositories;
use perldeps_core::extract::{self, PerlDep};
use perldeps_core::release;
use perldeps_resolver::reconcile;
use perldeps_resolver::resolver::Resolver;
use perldeps_resolver::store::PackageStore;
use perldeps_resolver::version::PkgVersion;
use perldeps_util::errors::PerldepsError;
use perldeps_util::progress::status_warn;
use reqwest::Client;

use super::common;

pub async fn exec(koha_dir: &Path) -> miette::Result<()> {
    let koha_version = release::release_version(koha_dir)?;
    let deps = extract::extract_deps(koha_dir)?;
    if deps.is_empty() {
        return Err(PerldepsError::Extraction {
            message: "no required Perl dependencies found".to_string(),
        }
        .into());
    }
    tracing::info!("extracted {} required Perl dependencies", deps.len());

    let cache_path = common::cache_path(koha_dir);
    let client = perldeps_arch::client::build_client()?;
    let repos = Repositories::default();
    let store = PackageStore::load(&cache_path)?;
    let mut resolver = Resolver::new(&client, &repos, store);

    // Ctrl-C lands here instead of killing the process, so records already
    // paid for in network calls reach the cache on every exit path.
    let outcome = tokio::select! {
        result = common::resolve_roots(&mut resolver, &deps, &cache_path) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    resolver.store.flush(&cache_path)?;
    match outcome {
        Some(result) => result?,
        None => {
            status_warn("Interrupted", "partial resolution saved to the cache");
            return Ok(());
        }
    }

    let perl_version = check_perl_version(&client, &repos, &deps, &resolver.store).await?;
    print!(
        "{}",
        render_pkgbuild(&koha_version, perl_version.as_deref(), &deps, &resolver.store)
    );
    Ok(())
}

/// The `perl>=` pin for the manifest: the official perl package's version,
/// degraded to `None` ("unknown") when any module the base package
/// provides is older than Koha requires.
async fn check_perl_version(
    client: &Client,
    repos: &Repositories,
    deps: &[PerlDep],
    store: &PackageStore,
) -> miette::Result<Option<String>> {
    let Some(perl) = official::lookup(client, &repos.official_url, "perl").await? else {
        return Ok(None);
    };
    let mut version = Some(perl.pkgver);

    for dep in deps {
        let Some(record) = store.find(&dep.module) else {
            continue;
        };
        if record.provided_by != "perl" {
            continue;
        }
        if PkgVersion::parse(&dep.installed_version) < PkgVersion::parse(&dep.required_version) {
            status_warn(
                "Outdated",
                &format!(
                    "perl module `{}' provided by the perl package is too old: {} < {}",
                    dep.module, dep.installed_version, dep.required_version
                ),
            );
            version = None;
        }
    }
    Ok(version)
}

/// Render the meta-package PKGBUILD.
///
/// Modules provided by the base `perl` package are covered by the
/// `perl>=` pin and omitted; a package providing several modules is
/// listed once, pinned to its binding constraint.
fn render_pkgbuild(
    koha_version: &str,
    perl_version: Option<&str>,
    deps: &[PerlDep],
    store: &PackageStore,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Maintainer: Koha AUR maintainers\n\
         \n\
         pkgname='koha-perldeps-meta'\n\
         pkgver='{koha_version}'\n\
         pkgrel='1'\n\
         pkgdesc=\"Koha Integrated Library System (ILS) - Perl dependencies meta-package\"\n\
         arch=('any')\n\
         license=('GPL')\n\
         options=('!emptydirs')\n\
         depends=(\n    'perl>={}'\n",
        perl_version.unwrap_or("unknown")
    ));

    let mut emitted: Vec<String> = Vec::new();
    for dep in deps {
        let Some(record) = store.find(&dep.module) else {
            continue;
        };
        if record.provided_by == "perl" {
            continue;
        }
        if emitted.contains(&record.name) {
            continue;
        }
        let binding = reconcile::binding_record(store, &record.name).unwrap_or(record);
        out.push_str(&format!(
            "    '{}>={}'\n",
            binding.name, binding.required_version
        ));
        emitted.push(record.name.clone());
    }

    out.push_str(")\nmakedepends=()\nurl='https://koha-community.org'\n");
    out
}
