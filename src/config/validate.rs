use anyhow::{Result, bail};

use super::AppConfig;
use crate::db::dao::{DaoBase, TodoDao};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.database.idle_timeout_secs == 0 {
        errors.push("database.idle_timeout_secs must be > 0".to_string());
    }

    let base_path = cfg.rest.base_path.as_str();
    if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
        errors.push(format!(
            "rest.base_path ({base_path:?}) must be empty or start with '/' and not end with '/'"
        ));
    }

    let page_size = cfg.rest.default_page_size;
    if page_size == 0 || page_size > TodoDao::MAX_PAGE_SIZE {
        errors.push(format!(
            "rest.default_page_size ({page_size}) must be between 1 and {}",
            TodoDao::MAX_PAGE_SIZE
        ));
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
