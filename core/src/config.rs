use crate::error::PanelResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaskConfig {
    /// Fewest local-part characters shown when the local part is long enough.
    pub min_prefix: usize,
    /// Most local-part characters ever shown.
    pub max_prefix: usize,
    pub suffix: String,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            min_prefix: 3,
            max_prefix: 5,
            suffix: "***".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// SQLite file backing local storage.
    pub db_path: String,
    /// Delay between closing an open position and finalizing logout.
    pub logout_delay_ms: u64,
    pub mask: MaskConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            db_path: "panel.db".into(),
            logout_delay_ms: 350,
            mask: MaskConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(Self::parse(content)?)
    }

    /// Parse and validate a config document.
    pub fn parse(content: &str) -> PanelResult<Self> {
        let config: PanelConfig = serde_json::from_str(content)?;
        if config.mask.min_prefix > config.mask.max_prefix {
            return Err(anyhow::anyhow!(
                "mask.min_prefix ({}) exceeds mask.max_prefix ({})",
                config.mask.min_prefix,
                config.mask.max_prefix
            )
            .into());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanelError;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = PanelConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PanelConfig::default());
        assert_eq!(cfg.logout_delay_ms, 350);
        assert_eq!(cfg.mask.suffix, "***");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = PanelConfig::from_json(r#"{"logout_delay_ms": 0, "mask": {"suffix": "…"}}"#)
            .unwrap();
        assert_eq!(cfg.logout_delay_ms, 0);
        assert_eq!(cfg.mask.suffix, "…");
        assert_eq!(cfg.mask.max_prefix, 5);
        assert_eq!(cfg.db_path, "panel.db");
    }

    #[test]
    fn inverted_mask_bounds_are_rejected() {
        let err = PanelConfig::from_json(r#"{"mask": {"min_prefix": 6, "max_prefix": 2}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn malformed_document_is_a_serialization_error() {
        let err = PanelConfig::parse(r#"{"logout_delay_ms": "soon"}"#);
        assert!(matches!(err, Err(PanelError::Serialization(_))), "got {err:?}");

        let err = PanelConfig::parse("{not json");
        assert!(matches!(err, Err(PanelError::Serialization(_))), "got {err:?}");
    }

    #[test]
    fn inverted_bounds_are_not_a_serialization_error() {
        let err = PanelConfig::parse(r#"{"mask": {"min_prefix": 6, "max_prefix": 2}}"#);
        assert!(matches!(err, Err(PanelError::Other(_))), "got {err:?}");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(PanelConfig::load("/nonexistent/panel-config.json").is_err());
    }
}
