//! Arch Linux package lookup services: the official package search API and
//! the AUR RPC interface, plus shared HTTP client construction.

pub mod aur;
pub mod client;
pub mod official;
pub mod repository;
