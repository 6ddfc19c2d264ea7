use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyConfig {
    /// When off, every request is authorized without consulting the key store.
    #[serde(default)]
    pub use_api_keys: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub api_key: ApiKeyConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub security: SecurityConfig,
}

impl CoreConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Err(anyhow!("Empty configuration file"));
        }
        let config: CoreConfig = serde_saphyr::from_str(yaml).map_err(|err| anyhow!(err))?;
        Ok(config)
    }
}
