//! Continuation carried through a pool's swap callback.

use alloy_primitives::{Address, Bytes};

use super::codec::{Path, ADDR_SIZE};
use crate::error::{Result, RouterError};

/// Remaining path plus the account that pays for the current leg.
///
/// Encoded as `payer (20 bytes) ‖ path` and handed to the pool as opaque
/// context; the pool passes it back unchanged when it calls back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCallbackData {
    /// Path whose first hop is the pool that is calling back.
    pub path: Path,
    /// Account debited for the amount owed.
    pub payer: Address,
}

impl SwapCallbackData {
    /// Bundles a path and payer.
    #[must_use]
    pub const fn new(path: Path, payer: Address) -> Self {
        Self { path, payer }
    }

    /// Encodes the continuation.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut out = Vec::with_capacity(ADDR_SIZE + self.path.as_bytes().len());
        out.extend_from_slice(self.payer.as_slice());
        out.extend_from_slice(self.path.as_bytes());
        Bytes::from(out)
    }

    /// Decodes a continuation.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedPath`] if the payer is truncated or
    /// the embedded path is malformed.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < ADDR_SIZE {
            return Err(RouterError::MalformedPath("callback data missing payer"));
        }
        let payer = Address::from_slice(&data[..ADDR_SIZE]);
        let path = Path::from_bytes(data[ADDR_SIZE..].to_vec())?;
        Ok(Self { path, payer })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FeeTier;

    #[test]
    fn encodes_payer_before_path() {
        let Ok(path) = Path::encode(
            &[Address::repeat_byte(1), Address::repeat_byte(2)],
            &[FeeTier::MEDIUM],
        ) else {
            panic!("expected Ok");
        };
        let data = SwapCallbackData::new(path.clone(), Address::repeat_byte(9));
        let encoded = data.encode();
        assert_eq!(encoded.len(), 63);
        assert_eq!(&encoded[..20], Address::repeat_byte(9).as_slice());
        assert_eq!(SwapCallbackData::decode(&encoded), Ok(data));
    }

    #[test]
    fn truncated_context_rejected() {
        assert!(SwapCallbackData::decode(&[0u8; 10]).is_err());
        assert!(SwapCallbackData::decode(&[0u8; 40]).is_err());
    }
}
