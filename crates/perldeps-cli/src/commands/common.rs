//! Shared resolution pipeline pieces used by both commands.

use std::path::{Path, PathBuf};

use perldeps_core::extract::PerlDep;
use perldeps_core::names;
use perldeps_resolver::resolver::Resolver;
use perldeps_util::progress::{spinner, status, status_warn};

/// The durable cache file sits next to the release tree: `<KOHADIR>.cache`.
pub fn cache_path(koha_dir: &Path) -> PathBuf {
    let trimmed = koha_dir.components().as_path();
    let mut os = trimmed.as_os_str().to_os_string();
    os.push(".cache");
    PathBuf::from(os)
}

/// Resolve every root dependency into the store, in extraction order.
///
/// A module found in neither lookup service is warned about and skipped;
/// downstream rendering tolerates the missing record. The cache is
/// flushed once the roots are done.
pub async fn resolve_roots(
    resolver: &mut Resolver<'_>,
    deps: &[PerlDep],
    cache_path: &Path,
) -> miette::Result<()> {
    let sp = spinner("Resolving Perl dependencies...");
    for dep in deps {
        sp.set_message(format!("Resolving {}...", dep.module));
        let resolved = resolver.resolve(&dep.module, &dep.required_version).await?;
        if resolved.is_none() {
            let package_name = names::to_package_name(&dep.module);
            sp.suspend(|| {
                status_warn(
                    "Missing",
                    &format!("{package_name} found neither in the official repos nor the AUR"),
                );
            });
        }
    }
    let written = resolver.store.flush(cache_path)?;
    sp.finish_and_clear();
    if written > 0 {
        status("Cached", &format!("{written} newly resolved packages"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_sits_next_to_the_release_tree() {
        assert_eq!(
            cache_path(Path::new("/srv/koha-24.05.02")),
            PathBuf::from("/srv/koha-24.05.02.cache")
        );
    }

    #[test]
    fn trailing_slashes_are_ignored() {
        assert_eq!(
            cache_path(Path::new("/srv/koha-24.05.02/")),
            PathBuf::from("/srv/koha-24.05.02.cache")
        );
    }
}
