//! Official Arch Linux package search API.

use reqwest::Client;
use serde::Deserialize;

use crate::client::get_json;

/// Response envelope of the package search API.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<OfficialPackage>,
}

/// One package entry from the official repositories.
///
/// `provides` entries are `name=version` strings; a matching entry for a
/// queried sub-package overrides the package's own version.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficialPackage {
    pub pkgname: String,
    pub pkgver: String,
    pub repo: String,
    #[serde(default)]
    pub maintainers: Vec<String>,
    #[serde(default)]
    pub depends: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
}

/// Query the official repos for an exact package name.
///
/// Returns `Ok(None)` when the name is unknown there; the caller falls
/// back to the AUR.
pub async fn lookup(
    client: &Client,
    base_url: &str,
    name: &str,
) -> miette::Result<Option<OfficialPackage>> {
    let url = format!("{base_url}?name={name}");
    let resp: SearchResponse = get_json(client, &url).await?;
    Ok(resp.results.into_iter().next())
}
