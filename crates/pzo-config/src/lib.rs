//! pzo-config
//!
//! Layered YAML configuration for the order form host.
//!
//! Documents are merged in order (earlier docs are base, later docs override),
//! converted to JSON, canonicalised and hashed. [`FormConfig`] is the typed
//! view the host actually reads; every key has a default so an empty layer
//! list yields a working form.

use anyhow::{bail, Context, Result};
use pzo_schemas::{default_toppings, Topping};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9009";
pub const DEFAULT_ORDER_PATH: &str = "/api/order";

// ---------------------------------------------------------------------------
// Typed config
// ---------------------------------------------------------------------------

/// Where orders are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    pub order_path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            order_path: DEFAULT_ORDER_PATH.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Full order URL, tolerant of a trailing `/` on the base.
    pub fn order_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.order_path)
    }
}

/// Everything the form host needs: endpoint plus topping catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    pub endpoint: EndpointConfig,
    pub toppings: Vec<Topping>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            toppings: default_toppings(),
        }
    }
}

impl FormConfig {
    /// Build from merged config JSON (produced by [`load_layered_yaml`]).
    ///
    /// Optional fields, each falling back to its default:
    /// - endpoint.base_url
    /// - endpoint.order_path
    /// - toppings (list of `{ topping_id, text }`)
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut out = Self::default();

        if let Some(v) = cfg.pointer("/endpoint/base_url") {
            let base = v.as_str().context("endpoint.base_url must be a string")?;
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                bail!("endpoint.base_url must start with http:// or https:// (got '{base}')");
            }
            out.endpoint.base_url = base.to_string();
        }

        if let Some(v) = cfg.pointer("/endpoint/order_path") {
            let path = v.as_str().context("endpoint.order_path must be a string")?;
            if !path.starts_with('/') {
                bail!("endpoint.order_path must start with '/' (got '{path}')");
            }
            out.endpoint.order_path = path.to_string();
        }

        if let Some(v) = cfg.pointer("/toppings") {
            let toppings: Vec<Topping> = serde_json::from_value(v.clone())
                .context("toppings must be a list of { topping_id, text }")?;
            check_catalogue(&toppings)?;
            out.toppings = toppings;
        }

        Ok(out)
    }

    /// Load and merge `paths`, then extract the typed config.
    pub fn load(paths: &[&str]) -> Result<(LoadedConfig, Self)> {
        let loaded = load_layered_yaml(paths)?;
        let cfg = Self::from_config_json(&loaded.config_json)?;
        Ok((loaded, cfg))
    }
}

fn check_catalogue(toppings: &[Topping]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for t in toppings {
        if t.topping_id.trim().is_empty() {
            bail!("toppings: topping_id must not be empty (text='{}')", t.text);
        }
        if !seen.insert(t.topping_id.as_str()) {
            bail!("toppings: duplicate topping_id '{}'", t.topping_id);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Layered loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

/// Read each path and merge the documents in order.
pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let raw = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("config layer {p}: read failed")))
        .collect::<Result<Vec<String>>>()?;
    let docs: Vec<&str> = raw.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&docs)
}

/// Merge YAML documents in order; later layers override earlier ones.
///
/// An empty document is an empty layer. A `null` value in a later layer
/// removes the key, so the typed default applies again.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (layer, raw) in yaml_docs.iter().enumerate() {
        let doc: serde_yaml::Value = serde_yaml::from_str(raw)
            .with_context(|| format!("config layer #{layer}: invalid yaml"))?;
        if doc.is_null() {
            continue;
        }
        let doc: Value = serde_json::to_value(doc)
            .with_context(|| format!("config layer #{layer}: not representable as json"))?;
        overlay(&mut merged, doc);
    }

    // serde_json's default Map is key-sorted, so key order in the YAML source
    // does not leak into the canonical form.
    let canonical_json = serde_json::to_string(&merged).context("canonical json serialize failed")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Objects merge key by key; lists and scalars replace; `null` deletes.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base_map), Value::Object(top_map)) => {
            for (key, value) in top_map {
                if value.is_null() {
                    base_map.remove(&key);
                } else if let Some(slot) = base_map.get_mut(&key) {
                    overlay(slot, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (slot, other) => *slot = other,
    }
}
