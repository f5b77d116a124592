//! Core data types and pure logic for koha-perldeps: the package record
//! and its durable cache-line grammar, CPAN/Arch package name translation,
//! upstream dependency extraction, and release version detection.

pub mod extract;
pub mod names;
pub mod record;
pub mod release;
