//! Per-hand seeds for reproducible shuffles.
//!
//! A base seed is stretched with a domain-separated SHA-256:
//! `H(tag || base || session_id || hand_number)`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{HandId, SessionId};
use crate::infra::rng::DeterministicRng;

const DOMAIN_TAG: &[u8] = b"HOLDEM_ENGINE_DECK_V1";

/// 32-byte RNG seed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed for one hand of one session.
    pub fn derive(&self, session_id: SessionId, hand_number: HandId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update(self.bytes);
        hasher.update(session_id.to_le_bytes());
        hasher.update(hand_number.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}
