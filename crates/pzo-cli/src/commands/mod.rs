//! Command handler modules for the `pzo` binary.
//!
//! Shared utilities used by multiple command paths live here.

pub mod interactive;
pub mod order;

use anyhow::{bail, Result};
use pzo_config::FormConfig;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load layered config (defaults when `paths` is empty) and apply `--base-url`.
pub fn load_form_config(paths: &[String], base_url: Option<String>) -> Result<FormConfig> {
    let mut cfg = if paths.is_empty() {
        FormConfig::default()
    } else {
        let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
        let (loaded, cfg) = FormConfig::load(&path_refs)?;
        tracing::info!(config_hash = %loaded.config_hash, "config loaded");
        cfg
    };

    if let Some(url) = base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("--base-url must start with http:// or https:// (got '{url}')");
        }
        cfg.endpoint.base_url = url;
    }

    Ok(cfg)
}

/// The host only offers checkboxes for catalogue entries.
pub fn check_topping_offered(cfg: &FormConfig, id: &str) -> Result<()> {
    if cfg.toppings.iter().any(|t| t.topping_id == id) {
        return Ok(());
    }
    let offered: Vec<&str> = cfg.toppings.iter().map(|t| t.topping_id.as_str()).collect();
    bail!(
        "unknown topping '{}'. expected one of: {}",
        id,
        offered.join(" | ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_paths_means_defaults() {
        let cfg = load_form_config(&[], None).unwrap();
        assert_eq!(cfg, FormConfig::default());
    }

    #[test]
    fn base_url_override_is_checked() {
        let cfg = load_form_config(&[], Some("http://127.0.0.1:1".to_string())).unwrap();
        assert_eq!(cfg.endpoint.order_url(), "http://127.0.0.1:1/api/order");

        let err = load_form_config(&[], Some("ftp://x".to_string())).unwrap_err();
        assert!(err.to_string().contains("--base-url"));
    }

    #[test]
    fn only_catalogue_toppings_are_offered() {
        let cfg = FormConfig::default();
        assert!(check_topping_offered(&cfg, "3").is_ok());
        let err = check_topping_offered(&cfg, "9").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown topping '9'. expected one of: 1 | 2 | 3 | 4 | 5"
        );
    }
}
