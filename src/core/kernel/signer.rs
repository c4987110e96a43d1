use crate::core::errors::OstError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signer trait for request authentication
///
/// Implementations turn a canonical signing string into the value sent as the
/// `signature` parameter. Signing must be deterministic: the backend recomputes
/// the same digest from the parameters it receives.
pub trait Signer: Send + Sync {
    fn sign(&self, message: &str) -> String;
}

/// HMAC-SHA256 signer keyed by the API secret
///
/// The key schedule is computed once at construction; every call signs from a
/// clone of that keyed state, so the signer is shared freely across threads.
#[derive(Clone)]
pub struct HmacSigner {
    mac: HmacSha256,
}

impl HmacSigner {
    /// Create a new HMAC signer from the UTF-8 bytes of `api_secret`
    pub fn new(api_secret: &str) -> Result<Self, OstError> {
        let mac = HmacSha256::new_from_slice(api_secret.as_bytes())
            .map_err(|e| OstError::AuthError(format!("Invalid secret key: {}", e)))?;
        Ok(Self { mac })
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

impl Signer for HmacSigner {
    fn sign(&self, message: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
