use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::app_config::AppConfig;
use crate::services::genai::{GenAiModel, StyleModel};
use crate::services::style_advisor::StyleAdvisor;

pub struct AppState {
    pub config: AppConfig,
    pub advisor: StyleAdvisor,
}

impl AppState {
    pub fn new(config: AppConfig, advisor: StyleAdvisor) -> Self {
        Self { config, advisor }
    }

    /// Wire up the style model when the config has credentials for one.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let model = match &config.genai {
            Some(genai) => {
                let client = GenAiModel::new(
                    &genai.api_url,
                    &genai.model,
                    &genai.api_key,
                    Duration::from_secs(genai.timeout_secs),
                )?;
                Some(Arc::new(client) as Arc<dyn StyleModel>)
            }
            None => None,
        };

        Ok(Self::new(config, StyleAdvisor::new(model)))
    }
}
