use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::config;

/// The published area table: every forecast center and office in one document.
pub const AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";

/// A forecast center: a wide region grouping several offices, e.g. 北海道地方.
#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    pub name: String,
    #[serde(rename = "enName")]
    pub en_name: String,
    /// Office codes under this center, in published order.
    #[serde(default)]
    pub children: Vec<String>,
}

/// A forecast office: the unit forecasts are published for, e.g. 東京都.
#[derive(Debug, Clone, Deserialize)]
pub struct Office {
    pub name: String,
    #[serde(rename = "enName")]
    pub en_name: String,
    /// Code of the center this office belongs to.
    pub parent: String,
}

/// Decoded subset of the area document. The payload carries further sections
/// (`class10s` and finer) and extra fields; those are ignored on decode.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaTable {
    /// Center code → center, iterated in ascending code order.
    pub centers: BTreeMap<String, Center>,
    /// Office code → office, iterated in ascending code order.
    pub offices: BTreeMap<String, Office>,
}

impl AreaTable {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).context("Failed to parse JMA area JSON")
    }

    /// Look up one office by its code.
    pub fn office(&self, code: &str) -> Option<&Office> {
        self.offices.get(code)
    }

    /// Resolve a center's children against the office map, keeping child-list
    /// order. Children with no office entry are skipped.
    pub fn offices_of<'a>(&'a self, center: &'a Center) -> Vec<(&'a str, &'a Office)> {
        center
            .children
            .iter()
            .filter_map(|code| self.offices.get(code).map(|office| (code.as_str(), office)))
            .collect()
    }
}

/// GET the area endpoint. Returns the decoded table together with the raw
/// body so callers can cache it byte-for-byte.
pub async fn fetch_area_table() -> Result<(AreaTable, String)> {
    let res = Client::new()
        .get(AREA_URL)
        .send()
        .await
        .context("Failed to send request to JMA (area table)")?;

    let status = res.status();
    let body = res
        .text()
        .await
        .context("Failed to read JMA area response body")?;

    if !status.is_success() {
        return Err(anyhow!(
            "JMA area request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    let table = AreaTable::from_json(&body)?;
    Ok((table, body))
}

/// Path of the area cache in the platform data directory.
pub fn cache_path() -> Result<PathBuf> {
    Ok(config::project_dirs()?.data_dir().join("area.json"))
}

/// Write the raw area JSON to the cache, creating parent directories as
/// needed. Returns the path written.
pub fn save_cache(body: &str) -> Result<PathBuf> {
    let path = cache_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create cache directory: {}", parent.display()))?;
    }

    fs::write(&path, body)
        .with_context(|| format!("Failed to write area cache: {}", path.display()))?;

    Ok(path)
}

/// Read and decode the cached area table.
pub fn load_cache() -> Result<AreaTable> {
    let path = cache_path()?;

    let body = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read area cache: {}", path.display()))?;

    AreaTable::from_json(&body).with_context(|| {
        format!(
            "Area cache {} did not decode.\n\
             Hint: run `jma update` to refresh it.",
            path.display()
        )
    })
}

/// The cached table when one exists, otherwise a live fetch that seeds the
/// cache.
pub async fn load_or_fetch() -> Result<AreaTable> {
    let path = cache_path()?;
    if path.exists() {
        return load_cache();
    }

    let (table, body) = fetch_area_table().await.context(
        "No cached area table and the live fetch failed.\n\
         Hint: run `jma update` once the network is reachable.",
    )?;
    save_cache(&body)?;

    Ok(table)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
