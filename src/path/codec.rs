//! Packed multi-hop path: `token | fee | token | fee | token …`.
//!
//! Each token takes 20 bytes and each fee 3 big-endian bytes, so a path of
//! `n` pools is `20 + 23·n` bytes long.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, Hop};
use crate::error::{Result, RouterError};

/// Length of an encoded token address.
pub const ADDR_SIZE: usize = 20;
/// Length of an encoded fee tier.
pub const FEE_SIZE: usize = 3;
/// Distance between two consecutive tokens.
pub const NEXT_OFFSET: usize = ADDR_SIZE + FEE_SIZE;
/// Length of a single-pool path.
pub const POP_OFFSET: usize = NEXT_OFFSET + ADDR_SIZE;
/// Minimum length of a path with two or more pools.
pub const MULTIPLE_POOLS_MIN_LENGTH: usize = POP_OFFSET + NEXT_OFFSET;

/// Decodes the hop starting at `offset` and returns the offset of the next
/// hop.
///
/// # Errors
///
/// Returns [`RouterError::MalformedPath`] if fewer than 43 bytes remain
/// from `offset`, or if the fee field is out of range.
pub fn decode_hop(path: &[u8], offset: usize) -> Result<(Hop, usize)> {
    let end = offset
        .checked_add(POP_OFFSET)
        .ok_or(RouterError::MalformedPath("offset overflow"))?;
    let window = path
        .get(offset..end)
        .ok_or(RouterError::MalformedPath("truncated hop"))?;
    let token_in = Address::from_slice(&window[..ADDR_SIZE]);
    let fee = FeeTier::from_be_bytes([
        window[ADDR_SIZE],
        window[ADDR_SIZE + 1],
        window[ADDR_SIZE + 2],
    ])?;
    let token_out = Address::from_slice(&window[NEXT_OFFSET..]);
    Ok((Hop::tick(token_in, fee, token_out), offset + NEXT_OFFSET))
}

/// Whether two or more pools remain from `offset`.
#[must_use]
pub fn has_more_hops(path: &[u8], offset: usize) -> bool {
    path.len().saturating_sub(offset) >= MULTIPLE_POOLS_MIN_LENGTH
}

/// A validated packed path.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_router::domain::FeeTier;
/// use hydra_router::path::Path;
///
/// let a = Address::repeat_byte(0x11);
/// let b = Address::repeat_byte(0x22);
/// let c = Address::repeat_byte(0x33);
/// let path = Path::encode(&[a, b, c], &[FeeTier::MEDIUM, FeeTier::LOW]).unwrap_or_default();
/// assert_eq!(path.num_pools(), 2);
/// assert_eq!(path.reversed().first_token(), Some(c));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Bytes);

impl Path {
    /// Encodes tokens and the fee tiers between them.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] if fewer than two tokens are
    /// given or the fee count is not one less than the token count.
    pub fn encode(tokens: &[Address], fees: &[FeeTier]) -> Result<Self> {
        if tokens.len() < 2 {
            return Err(RouterError::InvalidPath("path needs at least two tokens"));
        }
        if fees.len() + 1 != tokens.len() {
            return Err(RouterError::InvalidPath("one fee per pool required"));
        }
        let mut out = Vec::with_capacity(ADDR_SIZE + fees.len() * NEXT_OFFSET);
        out.extend_from_slice(tokens[0].as_slice());
        for (fee, token) in fees.iter().zip(&tokens[1..]) {
            out.extend_from_slice(&fee.to_be_bytes());
            out.extend_from_slice(token.as_slice());
        }
        Ok(Self(Bytes::from(out)))
    }

    /// Wraps raw bytes after checking the hop stride.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedPath`] if the length is below one
    /// pool or not `20 + 23·n`.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() < POP_OFFSET {
            return Err(RouterError::MalformedPath("path shorter than one pool"));
        }
        if (bytes.len() - ADDR_SIZE) % NEXT_OFFSET != 0 {
            return Err(RouterError::MalformedPath("path length breaks hop stride"));
        }
        Ok(Self(bytes))
    }

    /// Raw encoding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of pools along the path.
    #[must_use]
    pub fn num_pools(&self) -> usize {
        self.0.len().saturating_sub(ADDR_SIZE) / NEXT_OFFSET
    }

    /// Whether the path crosses two or more pools.
    #[must_use]
    pub fn has_multiple_pools(&self) -> bool {
        has_more_hops(&self.0, 0)
    }

    /// Decodes the hop at `offset`.
    ///
    /// # Errors
    ///
    /// See [`decode_hop`].
    pub fn decode_hop(&self, offset: usize) -> Result<(Hop, usize)> {
        decode_hop(&self.0, offset)
    }

    /// Decodes the first hop.
    ///
    /// # Errors
    ///
    /// See [`decode_hop`].
    pub fn first_hop(&self) -> Result<Hop> {
        decode_hop(&self.0, 0).map(|(hop, _)| hop)
    }

    /// All hops in path order.
    ///
    /// # Errors
    ///
    /// See [`decode_hop`].
    pub fn hops(&self) -> Result<Vec<Hop>> {
        let mut hops = Vec::with_capacity(self.num_pools());
        let mut offset = 0;
        while offset + POP_OFFSET <= self.0.len() {
            let (hop, next) = decode_hop(&self.0, offset)?;
            hops.push(hop);
            offset = next;
        }
        Ok(hops)
    }

    /// The path of the first pool only.
    #[must_use]
    pub fn first_pool(&self) -> Self {
        let end = POP_OFFSET.min(self.0.len());
        Self(Bytes::from(self.0[..end].to_vec()))
    }

    /// The path with its leading token and fee removed.
    #[must_use]
    pub fn skip_token(&self) -> Self {
        let start = NEXT_OFFSET.min(self.0.len());
        Self(Bytes::from(self.0[start..].to_vec()))
    }

    /// The same pools traversed from the other end.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut out = Vec::with_capacity(self.0.len());
        let mut end = self.0.len();
        while end >= ADDR_SIZE {
            out.extend_from_slice(&self.0[end - ADDR_SIZE..end]);
            if end < POP_OFFSET {
                break;
            }
            out.extend_from_slice(&self.0[end - NEXT_OFFSET..end - ADDR_SIZE]);
            end -= NEXT_OFFSET;
        }
        Self(Bytes::from(out))
    }

    /// First token of the path.
    #[must_use]
    pub fn first_token(&self) -> Option<Address> {
        self.0.get(..ADDR_SIZE).map(Address::from_slice)
    }

    /// Last token of the path.
    #[must_use]
    pub fn last_token(&self) -> Option<Address> {
        let len = self.0.len();
        len.checked_sub(ADDR_SIZE)
            .and_then(|start| self.0.get(start..))
            .map(Address::from_slice)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    fn two_pool_path() -> Path {
        let Ok(path) = Path::encode(
            &[addr(0x11), addr(0x22), addr(0x33)],
            &[FeeTier::MEDIUM, FeeTier::LOW],
        ) else {
            panic!("expected Ok");
        };
        path
    }

    #[test]
    fn layout_constants() {
        assert_eq!(NEXT_OFFSET, 23);
        assert_eq!(POP_OFFSET, 43);
        assert_eq!(MULTIPLE_POOLS_MIN_LENGTH, 66);
    }

    #[test]
    fn encode_layout() {
        let path = two_pool_path();
        let bytes = path.as_bytes();
        assert_eq!(bytes.len(), 66);
        assert_eq!(&bytes[20..23], &[0x00, 0x0b, 0xb8]);
        assert_eq!(&bytes[43..46], &[0x00, 0x01, 0xf4]);
        assert_eq!(path.num_pools(), 2);
    }

    #[test]
    fn decode_walks_hops() {
        let path = two_pool_path();
        let Ok((first, next)) = path.decode_hop(0) else {
            panic!("expected Ok");
        };
        assert_eq!(first, Hop::tick(addr(0x11), FeeTier::MEDIUM, addr(0x22)));
        assert_eq!(next, 23);
        assert!(has_more_hops(path.as_bytes(), 0));
        assert!(!has_more_hops(path.as_bytes(), next));
        let Ok((second, _)) = path.decode_hop(next) else {
            panic!("expected Ok");
        };
        assert_eq!(second, Hop::tick(addr(0x22), FeeTier::LOW, addr(0x33)));
    }

    #[test]
    fn skip_and_first_pool() {
        let path = two_pool_path();
        assert_eq!(path.first_pool().num_pools(), 1);
        assert_eq!(path.first_pool().last_token(), Some(addr(0x22)));
        let rest = path.skip_token();
        assert_eq!(rest.first_token(), Some(addr(0x22)));
        assert_eq!(rest.num_pools(), 1);
    }

    #[test]
    fn reverse_path() {
        let reversed = two_pool_path().reversed();
        let Ok(hops) = reversed.hops() else {
            panic!("expected Ok");
        };
        assert_eq!(
            hops,
            vec![
                Hop::tick(addr(0x33), FeeTier::LOW, addr(0x22)),
                Hop::tick(addr(0x22), FeeTier::MEDIUM, addr(0x11)),
            ]
        );
        assert_eq!(reversed.reversed(), two_pool_path());
    }

    #[test]
    fn malformed_lengths_rejected() {
        assert!(Path::from_bytes(vec![0u8; 42]).is_err());
        assert!(Path::from_bytes(vec![0u8; 44]).is_err());
        assert!(Path::from_bytes(vec![0u8; 43]).is_ok());
        assert!(decode_hop(&[0u8; 30], 0).is_err());
    }

    #[test]
    fn single_token_rejected() {
        assert_eq!(
            Path::encode(&[addr(1)], &[]),
            Err(RouterError::InvalidPath("path needs at least two tokens"))
        );
        assert!(Path::encode(&[addr(1), addr(2)], &[]).is_err());
    }
}
