use crate::error::{Result, StepError};

/// Runtime configuration for the step core.
///
/// The composition root builds one of these and hands it to the components
/// that need environment-aware behavior (the signer's key lookup and the
/// outbound callback transport).
#[derive(Debug, Clone)]
pub struct MintflowConfig {
    /// Deployment environment, part of the signature key lookup path.
    pub environment: String,
    /// Key-material domain, part of the signature key lookup path.
    pub signature_domain: String,
    /// Parameter name of the callback signing key.
    pub signature_key_name: String,
    /// Timeout for the single outbound callback POST.
    pub callback_timeout_ms: u64,
}

impl Default for MintflowConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            signature_domain: "mercury".to_string(),
            signature_key_name: "signature_key".to_string(),
            callback_timeout_ms: 10_000,
        }
    }
}

impl MintflowConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(env) = std::env::var("MINTFLOW_ENV").or_else(|_| std::env::var("APP_ENV")) {
            config.environment = env;
        }

        if let Ok(domain) = std::env::var("MINTFLOW_SIGNATURE_DOMAIN") {
            config.signature_domain = domain;
        }

        if let Ok(key_name) = std::env::var("MINTFLOW_SIGNATURE_KEY_NAME") {
            config.signature_key_name = key_name;
        }

        if let Ok(timeout) = std::env::var("MINTFLOW_CALLBACK_TIMEOUT_MS") {
            config.callback_timeout_ms = timeout.parse().map_err(|e| {
                StepError::Configuration(format!("invalid callback_timeout_ms: {e}"))
            })?;
        }

        Ok(config)
    }
}
