//! Lookup service endpoints.

/// Official Arch Linux package search API.
pub const OFFICIAL_SEARCH_URL: &str = "https://archlinux.org/packages/search/json";

/// AUR RPC v5 info endpoint.
pub const AUR_RPC_URL: &str = "https://aur.archlinux.org/rpc/v5/info";

/// The pair of lookup services consulted during resolution, in priority
/// order: official repos first, then the AUR.
///
/// The URLs are swappable so tests can point at a local mock server.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub official_url: String,
    pub aur_url: String,
}

impl Default for Repositories {
    fn default() -> Self {
        Self {
            official_url: OFFICIAL_SEARCH_URL.to_string(),
            aur_url: AUR_RPC_URL.to_string(),
        }
    }
}
