//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Emit usage events to the log
    #[serde(default = "default_enable_analytics")]
    pub enable_analytics: bool,

    /// Show underlying causes of errors (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_analytics: default_enable_analytics(),
            verbose_errors: false,
        }
    }
}

fn default_enable_analytics() -> bool {
    true
}
