//! Reconciling version constraints across records sharing a package.
//!
//! When one Arch package provides several Perl modules, the store carries
//! one record per module, all sharing `name`. The manifest must list the
//! package once, pinned to the strictest minimum version any module
//! demands.

use perldeps_core::record::PackageRecord;

use crate::store::PackageStore;
use crate::version::PkgVersion;

/// The record carrying the binding (highest) `required_version` among all
/// records for `name`. `None` when the package is not in the store.
pub fn binding_record<'a>(store: &'a PackageStore, name: &str) -> Option<&'a PackageRecord> {
    store
        .find_by_name(name)
        .into_iter()
        .max_by_key(|r| PkgVersion::parse(&r.required_version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use perldeps_core::record::Repo;

    fn record(module: &str, name: &str, required: &str) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            perl_module: module.to_string(),
            required_version: required.to_string(),
            version: "9.9".to_string(),
            provided_by: name.to_string(),
            provided_version: "9.9".to_string(),
            repo: Repo::Official,
            maintainer: String::new(),
            depends: Vec::new(),
            persisted: false,
        }
    }

    #[test]
    fn highest_constraint_wins() {
        let mut store = PackageStore::new();
        store.add(record("Foo::One", "perl-foo", "1.2"));
        store.add(record("Foo::Two", "perl-foo", "1.5"));

        let binding = binding_record(&store, "perl-foo").unwrap();
        assert_eq!(binding.required_version, "1.5");
    }

    #[test]
    fn missing_constraint_sorts_below_any() {
        let mut store = PackageStore::new();
        store.add(record("Foo::One", "perl-foo", ""));
        store.add(record("Foo::Two", "perl-foo", "0.01"));

        let binding = binding_record(&store, "perl-foo").unwrap();
        assert_eq!(binding.required_version, "0.01");
    }

    #[test]
    fn unknown_package_has_no_binding() {
        let store = PackageStore::new();
        assert!(binding_record(&store, "perl-foo").is_none());
    }
}
