use business::application::cart::recovery::RecoveryPolicy;

use super::{api_config::ApiConfig, recovery_config};

pub struct AppConfig {
    pub api: ApiConfig,
    pub recovery: RecoveryPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            api: ApiConfig::from_env()?,
            recovery: recovery_config::from_env()?,
        })
    }
}
