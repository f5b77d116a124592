//! In-memory package record store backed by an append-only cache file.
//!
//! The store spans one invocation; the cache file spans invocations.
//! Records already flushed survive a later crash, and flushing never
//! rewrites existing lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use perldeps_core::record::PackageRecord;
use perldeps_util::errors::PerldepsError;

/// Ordered collection of resolved package records, deduplicated by Perl
/// module name.
///
/// Store sizes stay in the tens to low hundreds, so lookups are plain
/// scans.
#[derive(Debug, Default)]
pub struct PackageStore {
    records: Vec<PackageRecord>,
}

impl PackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from the durable cache file.
    ///
    /// A missing file yields an empty store. A malformed line is warned
    /// about and skipped. Loaded records are already persisted.
    pub fn load(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(PerldepsError::Io)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match PackageRecord::parse(line) {
                Some(mut record) => {
                    record.persisted = true;
                    records.push(record);
                }
                None => tracing::warn!("strange cache line `{line}`"),
            }
        }
        Ok(Self { records })
    }

    /// Find the record bound to a Perl module name.
    pub fn find(&self, module: &str) -> Option<&PackageRecord> {
        self.records.iter().find(|r| r.perl_module == module)
    }

    /// Index of the record bound to a Perl module name.
    pub fn find_index(&self, module: &str) -> Option<usize> {
        self.records.iter().position(|r| r.perl_module == module)
    }

    /// All records sharing a package name (one package may provide
    /// several modules).
    pub fn find_by_name(&self, name: &str) -> Vec<&PackageRecord> {
        self.records.iter().filter(|r| r.name == name).collect()
    }

    /// Append a record; returns its index. Does not persist.
    pub fn add(&mut self, record: PackageRecord) -> usize {
        debug_assert!(
            self.find(&record.perl_module).is_none(),
            "duplicate module in store: {}",
            record.perl_module
        );
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> &PackageRecord {
        &self.records[index]
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append all unpersisted records to the cache file and mark them
    /// persisted. Calling again with nothing new is a no-op; existing
    /// lines are never rewritten. Returns how many records were written.
    pub fn flush(&mut self, path: &Path) -> miette::Result<usize> {
        if self.records.iter().all(|r| r.persisted) {
            return Ok(0);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(PerldepsError::Io)?;

        let mut written = 0;
        for record in self.records.iter_mut().filter(|r| !r.persisted) {
            writeln!(file, "{}", record.serialize()).map_err(PerldepsError::Io)?;
            record.persisted = true;
            written += 1;
        }
        Ok(written)
    }
}
