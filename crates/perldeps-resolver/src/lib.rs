//! Dependency resolution engine for koha-perldeps: the in-memory package
//! record store backed by an append-only cache file, the cache-first module
//! resolver, the AUR dependency graph walker, and version reconciliation.

pub mod reconcile;
pub mod resolver;
pub mod store;
pub mod version;
pub mod walker;
