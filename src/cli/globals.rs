use crate::api::ApiConfig;
use std::time::Duration;

/// Settings shared by every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_url: String,
    pub support_url: String,
    pub timeout: Option<Duration>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, support_url: String) -> Self {
        Self {
            api_url,
            support_url,
            timeout: None,
        }
    }

    pub fn set_timeout(&mut self, seconds: Option<u64>) {
        self.timeout = seconds.map(Duration::from_secs);
    }

    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone())
            .with_support_base_url(self.support_url.clone())
            .with_timeout(self.timeout)
    }
}
