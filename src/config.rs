//! Conversion limits and labels, with environment overrides.

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Tunables shared by [`Loader`](crate::Loader) and
/// [`Dumper`](crate::Dumper).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarshalConfig {
    /// Ceiling on conversion recursion depth. This binds the honest
    /// tree depth; aliases and cycles do not deepen it.
    pub max_depth: usize,
    /// Prefix for generated anchor labels (`id001`, `id002`, ...).
    pub anchor_prefix: String,
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            anchor_prefix: "id".to_string(),
        }
    }
}

impl MarshalConfig {
    /// Loads the defaults, then applies `TANGLE_*` environment
    /// overrides (`TANGLE_MAX_DEPTH`, `TANGLE_ANCHOR_PREFIX`).
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .set_default("max_depth", 512)?
            .set_default("anchor_prefix", "id")?
            .add_source(Environment::with_prefix("TANGLE"))
            .build()?;
        cfg.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let config = MarshalConfig::default();
        assert_eq!(config.max_depth, 512);
        assert_eq!(config.anchor_prefix, "id");
    }

    /// One test owns the `TANGLE_MAX_DEPTH` variable, so the two loads
    /// cannot race each other across test threads.
    #[test]
    fn load_applies_environment_overrides_over_defaults() {
        let loaded = MarshalConfig::load().unwrap();
        let defaults = MarshalConfig::default();
        assert_eq!(loaded.max_depth, defaults.max_depth);
        assert_eq!(loaded.anchor_prefix, defaults.anchor_prefix);

        std::env::set_var("TANGLE_MAX_DEPTH", "64");
        let overridden = MarshalConfig::load().unwrap();
        std::env::remove_var("TANGLE_MAX_DEPTH");
        assert_eq!(overridden.max_depth, 64);
        assert_eq!(overridden.anchor_prefix, defaults.anchor_prefix);
    }
}
