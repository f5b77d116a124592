//! Transitive expansion of the AUR dependency graph.
//!
//! Official packages pull their dependencies from the official repos and
//! need no expansion; AUR packages may depend on further Perl packages
//! that the root list never mentions. The walker visits every AUR record
//! in store-insertion order, resolves each `perl-` dependency, and keeps
//! folding newly discovered references into the package's working list
//! until it stops growing.

use std::collections::HashSet;
use std::path::Path;

use perldeps_core::names;
use perldeps_core::record::Repo;
use perldeps_util::progress;

use crate::resolver::Resolver;

/// Split a raw dependency declaration into `(package_name, min_version)`.
///
/// Only `perl-` packages are Perl module dependencies; anything else
/// (glibc, perl itself) is not a candidate.
pub fn parse_dep_ref(dep: &str) -> Option<(&str, &str)> {
    if !dep.starts_with(names::PACKAGE_PREFIX) {
        return None;
    }
    Some(match dep.split_once(">=") {
        Some((name, version)) => (name, version),
        None => (dep, ""),
    })
}

/// Expand all AUR records' dependencies, resolving newly discovered
/// modules into the store.
///
/// The store dedup on module name bounds the recursion (every package is
/// queried at most once); the visited set additionally guards against
/// cycles among package names should the AUR data ever contain one. The
/// cache is flushed after every newly resolved record so interrupted runs
/// keep the work already paid for in network calls.
pub async fn expand(resolver: &mut Resolver<'_>, cache_path: &Path) -> miette::Result<()> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut index = 0;

    while index < resolver.store.len() {
        let record = resolver.store.get(index);
        index += 1;
        if record.repo != Repo::Aur || !visited.insert(record.name.clone()) {
            continue;
        }

        // Working list of this package's perl- dependency references;
        // grows as transitive AUR dependencies surface more of them.
        let mut refs: Vec<String> = record
            .depends
            .iter()
            .filter(|dep| dep.starts_with(names::PACKAGE_PREFIX))
            .cloned()
            .collect();

        let mut i = 0;
        while i < refs.len() {
            let dep = refs[i].clone();
            i += 1;
            let Some((package_name, required)) = parse_dep_ref(&dep) else {
                continue;
            };

            let module = match names::to_module_name(package_name) {
                Ok(module) => module,
                Err(err) => {
                    tracing::warn!("skipping dependency `{dep}`: {err}");
                    continue;
                }
            };

            let known = resolver.store.find_index(&module).is_some();
            let Some(resolved_index) = resolver.resolve(&module, required).await? else {
                progress::status_warn(
                    "Missing",
                    &format!("{package_name} found neither in the official repos nor the AUR"),
                );
                continue;
            };
            if !known {
                resolver.store.flush(cache_path)?;
            }

            let resolved = resolver.store.get(resolved_index);
            if resolved.repo == Repo::Aur {
                for sub in &resolved.depends {
                    if sub.starts_with(names::PACKAGE_PREFIX) && !refs.contains(sub) {
                        refs.push(sub.clone());
                    }
                }
            }
        }
    }

    Ok(())
}
