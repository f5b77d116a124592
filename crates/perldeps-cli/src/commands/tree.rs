//! Handler for `koha-perldeps tree`: print the AUR dependency tree with
//! maintainer annotations.

use std::collections::HashSet;
use std::path::Path;

use console::Style;
use perldeps_arch::repository::Repositories;
use perldeps_core::extract::{self, PerlDep};
use perldeps_core::record::Repo;
use perldeps_core::release;
use perldeps_resolver::resolver::Resolver;
use perldeps_resolver::store::PackageStore;
use perldeps_resolver::walker;
use perldeps_util::errors::PerldepsError;
use perldeps_util::progress::status_warn;

use super::common;

pub async fn exec(koha_dir: &Path) -> miette::Result<()> {
    release::release_version(koha_dir)?;
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

    let outcome = tokio::select! {
        result = async {
            common::resolve_roots(&mut resolver, &deps, &cache_path).await?;
            walker::expand(&mut resolver, &cache_path).await
        } => Some(result),
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

    print!("{}", render_tree(&deps, &resolver.store));
    Ok(())
}

/// Render the dependency tree: one root line, then one indented line per
/// AUR package reachable from the root dependencies. Official-repo
/// packages are pruned; orphans get a red marker.
fn render_tree(deps: &[PerlDep], store: &PackageStore) -> String {
    let mut out = String::new();
    out.push_str("koha-perldeps\n");

    for dep in deps {
        let Some(record) = store.find(&dep.module) else {
            continue;
        };
        let name = record.name.clone();
        let mut path = HashSet::new();
        render_subtree(&mut out, store, &name, 0, &mut path);
    }
    out
}

fn render_subtree(
    out: &mut String,
    store: &PackageStore,
    name: &str,
    level: usize,
    path: &mut HashSet<String>,
) {
    let Some(record) = store.find_by_name(name).into_iter().next() else {
        return;
    };
    if record.repo != Repo::Aur {
        return;
    }

    let maintainer = if record.is_orphan() {
        Style::new().red().apply_to("orphan").to_string()
    } else {
        record.maintainer.clone()
    };
    out.push_str(&format!(
        "{}- {} ({maintainer})\n",
        "  ".repeat(level),
        record.provided_by
    ));

    // Shared dependencies reappear on every branch; only a cycle back to
    // an ancestor stops the descent.
    if !path.insert(name.to_string()) {
        return;
    }
    for dep in &record.depends {
        if let Some((dep_name, _)) = walker::parse_dep_ref(dep) {
            render_subtree(out, store, dep_name, level + 1, path);
        }
    }
    path.remove(name);
}
