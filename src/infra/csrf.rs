use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::app_error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Form tokens bound to the session: `hex(HMAC-SHA256(secret, session token))`.
pub struct CsrfSigner {
    secret: SecretString,
}

impl CsrfSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Per-process key for deployments that do not configure one.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(SecretString::from(hex::encode(bytes)))
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AppError::Internal(format!("CSRF key rejected: {}", e)))
    }

    pub fn token_for(&self, session_token: &str) -> AppResult<String> {
        let mut mac = self.mac()?;
        mac.update(session_token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Constant-time check of a submitted form token.
    pub fn verify(&self, session_token: &str, submitted: &str) -> bool {
        let Ok(expected) = hex::decode(submitted.trim()) else {
            return false;
        };
        let Ok(mut mac) = self.mac() else {
            return false;
        };
        mac.update(session_token.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}
