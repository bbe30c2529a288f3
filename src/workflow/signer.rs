//! # Callback Signer
//!
//! Key retrieval, payload signing, and delivery of one notification.
//!
//! The signing key lives in the parameter store under a per-environment,
//! per-domain path and decodes to a hex-encoded Ed25519 seed. The payload is
//! serialized with an empty signature field, signed, re-serialized with the
//! hex signature set, and POSTed once to the job's callback URL. There is no
//! internal retry: at-least-once delivery of the callback relies entirely on
//! the orchestrator re-invoking the step.

use std::sync::Arc;

use ed25519_dalek::{Signer as DalekSigner, SigningKey};
use tracing::debug;

use crate::config::MintflowConfig;
use crate::error::{Result, StepError};
use crate::logging::log_callback_operation;
use crate::models::{NotificationPayload, SignatureKey};
use crate::workflow::gateways::{CallbackTransport, ParameterStore};

pub struct Signer {
    parameters: Arc<dyn ParameterStore>,
    transport: Arc<dyn CallbackTransport>,
    domain: String,
    environment: String,
    key_name: String,
}

impl Signer {
    pub fn new(
        parameters: Arc<dyn ParameterStore>,
        transport: Arc<dyn CallbackTransport>,
        config: &MintflowConfig,
    ) -> Self {
        Self {
            parameters,
            transport,
            domain: config.signature_domain.clone(),
            environment: config.environment.clone(),
            key_name: config.signature_key_name.clone(),
        }
    }

    /// Sign the payload and deliver it to the callback URL.
    pub async fn sign_and_send(
        &self,
        payload: &NotificationPayload,
        callback_url: &str,
    ) -> Result<()> {
        let raw_key = self
            .parameters
            .get(&self.domain, &self.environment, &self.key_name)
            .await
            .map_err(|e| StepError::SignAndSend(format!("cannot fetch signature key: {e}")))?;

        let key: SignatureKey = serde_json::from_str(&raw_key)
            .map_err(|e| StepError::SignAndSend(format!("cannot decode signature key: {e}")))?;

        let seed = hex::decode(&key.private_key)
            .map_err(|e| StepError::SignAndSend(format!("signature key is not hex: {e}")))?;
        let seed: [u8; 32] = seed
            .try_into()
            .map_err(|_| StepError::SignAndSend("signature key must be a 32-byte seed".to_string()))?;
        let signing_key = SigningKey::from_bytes(&seed);

        let message = payload
            .signing_bytes()
            .map_err(|e| StepError::SignAndSend(format!("cannot serialize payload: {e}")))?;
        let signature = signing_key.sign(&message);

        let mut signed = payload.clone();
        signed.signature = hex::encode(signature.to_bytes());
        let body = serde_json::to_vec(&signed)
            .map_err(|e| StepError::SignAndSend(format!("cannot serialize signed payload: {e}")))?;

        debug!(callback_url = %callback_url, "Delivering signed notification");
        let delivery = self
            .transport
            .post_json(callback_url, &body)
            .await
            .map_err(|e| StepError::SignAndSend(format!("callback delivery failed: {e}")));

        let payload_status = serde_json::to_string(&signed.status).unwrap_or_default();
        match &delivery {
            Ok(()) => log_callback_operation(callback_url, &payload_status, "delivered", None),
            Err(e) => log_callback_operation(
                callback_url,
                &payload_status,
                "failed",
                Some(&e.to_string()),
            ),
        }
        delivery
    }
}
