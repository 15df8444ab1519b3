//! Per-attempt authorization request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Bytes of entropy in a state nonce.
const STATE_BYTES: usize = 32;

/// One interactive authorization attempt.
///
/// The state nonce is generated fresh for every attempt and never reused.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    state: String,
    callback_port: u16,
}

impl AuthorizationRequest {
    pub fn new(callback_port: u16) -> Self {
        Self {
            state: generate_state(),
            callback_port,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn callback_port(&self) -> u16 {
        self.callback_port
    }
}

/// Random URL-safe nonce, 43 characters long.
pub fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
