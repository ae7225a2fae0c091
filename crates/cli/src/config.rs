//! CLI configuration file format (`--config autorenta.toml`).
//!
//! # Example
//!
//! ```toml
//! [settlement]
//! owner_share = "0.85"
//! check_in_grace_hours = 2
//! review_window_days = 14
//! ```
//!
//! Every table and key is optional; missing keys keep the marketplace
//! defaults.

use std::path::Path;

use autorenta_settlement::SettlementPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settlement: SettlementPolicy,
}

/// Read and parse a config TOML file from `path`, then validate the policy.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;
    config
        .settlement
        .validate()
        .map_err(|e| format!("invalid settlement policy in '{}': {}", path.display(), e))?;

    tracing::debug!(
        path = %path.display(),
        owner_share = %config.settlement.owner_share,
        "loaded config"
    );
    Ok(config)
}

/// Config from `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => read_config(path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn partial_settlement_table() {
        let file = write("[settlement]\nowner_share = \"0.9\"\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.settlement.owner_share, Decimal::new(9, 1));
        assert_eq!(config.settlement.review_window_days, 14);
    }

    #[test]
    fn invalid_share_is_rejected() {
        let file = write("[settlement]\nowner_share = \"1.5\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.contains("invalid settlement policy"), "{}", err);
    }

    #[test]
    fn unbounded_grace_hours_are_rejected() {
        let file = write("[settlement]\ncheck_in_grace_hours = 9223372036854775807\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.contains("check_in_grace_hours"), "{}", err);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Some(Path::new("/nonexistent/autorenta.toml"))).unwrap_err();
        assert!(err.contains("/nonexistent/autorenta.toml"));
    }
}
